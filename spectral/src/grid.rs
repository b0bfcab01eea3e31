use crate::{fft_frequencies, fftshift, SpectralError, SpectralResult};
use std::f64::consts::TAU;

pub const DEFAULT_SAMPLES: usize = 512;

/// `n` evenly spaced samples over one period `[0, 2π)`, endpoint excluded.
#[derive(Debug, Clone)]
pub struct Grid {
  n: usize,
  dt: f64,
  t: Vec<f64>,
}

impl Grid {
  pub fn new(n: usize) -> SpectralResult<Self> {
    if n == 0 {
      return Err(SpectralError::EmptyGrid);
    }
    let dt = TAU / n as f64;
    let t = (0..n).map(|i| i as f64 * dt).collect();
    Ok(Self { n, dt, t })
  }

  pub fn len(&self) -> usize {
    self.n
  }

  pub fn spacing(&self) -> f64 {
    self.dt
  }

  pub fn t(&self) -> &[f64] {
    &self.t
  }

  /// Frequency bins in natural transform order (zero first, negative half last).
  pub fn frequencies(&self) -> Vec<f64> {
    fft_frequencies(self.n, self.dt)
  }

  /// Frequency bins with zero frequency moved to index `n / 2`.
  pub fn centered_frequencies(&self) -> Vec<f64> {
    fftshift(&self.frequencies())
  }
}

#[test]
fn grid_spacing_is_constant() -> anyhow::Result<()> {
  let grid = Grid::new(512)?;
  assert_eq!(grid.len(), 512);
  assert_eq!(grid.t()[0], 0.0);
  for w in grid.t().windows(2) {
    assert!((w[1] - w[0] - grid.spacing()).abs() < 1e-12);
  }
  // endpoint excluded
  assert!((grid.t()[511] + grid.spacing() - TAU).abs() < 1e-12);
  Ok(())
}

#[test]
fn empty_grid_is_rejected() {
  assert!(matches!(Grid::new(0), Err(SpectralError::EmptyGrid)));
}

#[test]
fn centered_axis_is_symmetric() -> anyhow::Result<()> {
  for n in [1, 2, 3, 7, 8, 64, 511, 512] {
    let k = Grid::new(n)?.centered_frequencies();
    assert_eq!(k.len(), n);
    let c = n / 2;
    assert_eq!(k[c], 0.0);
    for i in 1..=(n - 1) / 2 {
      assert!((k[c + i] + k[c - i]).abs() < 1e-12, "n = {}, i = {}", n, i);
      assert!(k[c + i] > 0.0);
    }
    // ascending after centering
    for w in k.windows(2) {
      assert!(w[1] > w[0]);
    }
  }
  Ok(())
}
