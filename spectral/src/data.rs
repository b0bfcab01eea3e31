use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Data {
  pub x: f64,
  pub y: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset(pub Vec<Data>);

impl Dataset {
  pub fn new(data: Vec<Data>) -> Self {
    Self(data)
  }

  /// Pair two equally long columns. Extra values in the longer one are dropped.
  pub fn from_xy(x: &[f64], y: &[f64]) -> Self {
    Self(
      x.iter()
        .zip(y.iter())
        .map(|(&x, &y)| Data { x, y })
        .collect(),
    )
  }

  pub fn x(&self) -> Vec<f64> {
    self.0.iter().map(|d| d.x).collect()
  }

  pub fn y(&self) -> Vec<f64> {
    self.0.iter().map(|d| d.y).collect()
  }

  pub fn data(&self) -> &Vec<Data> {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// `(min_y, max_y)`, or `None` when empty.
  pub fn y_bounds(&self) -> Option<(f64, f64)> {
    let first = self.0.first()?;
    Some(
      self
        .0
        .iter()
        .fold((first.y, first.y), |acc, d| (acc.0.min(d.y), acc.1.max(d.y))),
    )
  }

  /// `(min_x, max_x)`, or `None` when empty.
  pub fn x_bounds(&self) -> Option<(f64, f64)> {
    let first = self.0.first()?;
    Some(
      self
        .0
        .iter()
        .fold((first.x, first.x), |acc, d| (acc.0.min(d.x), acc.1.max(d.x))),
    )
  }
}
