pub fn mean(x: &[f64]) -> f64 {
  let sum: f64 = x.iter().sum();
  let n: f64 = x.len() as f64;
  sum / n
}

pub fn std_dev(x: &[f64]) -> f64 {
  let mean_x: f64 = mean(x);
  let sum_x_minus_mean: f64 = x.iter().map(|a| (a - mean_x).powi(2)).sum();
  (sum_x_minus_mean / (x.len() as f64)).sqrt()
}

/// Geometric mean computed in log space. Every value must be positive.
pub fn geometric_mean(x: &[f64]) -> f64 {
  let log_sum: f64 = x.iter().map(|a| a.ln()).sum();
  (log_sum / x.len() as f64).exp()
}

pub fn max_abs(x: &[f64]) -> f64 {
  x.iter().fold(0.0, |acc: f64, a| acc.max(a.abs()))
}

#[test]
fn moments() {
  let x = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
  assert_eq!(mean(&x), 5.0);
  assert_eq!(std_dev(&x), 2.0);
  assert!((geometric_mean(&[1.0, 4.0, 16.0]) - 4.0).abs() < 1e-12);
  assert_eq!(max_abs(&[-3.0, 1.0, 2.5]), 3.0);
}
