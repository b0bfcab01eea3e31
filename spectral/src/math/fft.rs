use crate::{Dataset, Grid};
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Centered amplitude spectrum of a real signal, aligned bin-for-bin with
/// [`Grid::centered_frequencies`].
#[derive(Debug, Clone)]
pub struct Spectrum {
  pub k: Vec<f64>,
  pub magnitude: Vec<f64>,
}

impl Spectrum {
  pub fn measure(grid: &Grid, signal: &[f64]) -> Self {
    Self {
      k: grid.centered_frequencies(),
      magnitude: amplitude_spectrum(signal),
    }
  }

  pub fn len(&self) -> usize {
    self.magnitude.len()
  }

  pub fn is_empty(&self) -> bool {
    self.magnitude.is_empty()
  }

  pub fn max(&self) -> f64 {
    self.magnitude.iter().cloned().fold(0.0, f64::max)
  }

  pub fn dataset(&self) -> Dataset {
    Dataset::from_xy(&self.k, &self.magnitude)
  }
}

/// Sample frequencies for a length `n` transform with sample spacing `d`,
/// zero first and the negative half last.
pub fn fft_frequencies(n: usize, d: f64) -> Vec<f64> {
  let val = 1.0 / (n as f64 * d);
  let mut result = Vec::with_capacity(n);
  let m = if n % 2 == 0 { n / 2 } else { n / 2 + 1 };
  for i in 0..m {
    result.push(i as f64 * val);
  }
  for i in -(n as i64 / 2)..0 {
    result.push(i as f64 * val);
  }
  result
}

/// Move the zero-frequency bin to index `len / 2`.
pub fn fftshift<T: Clone>(bins: &[T]) -> Vec<T> {
  let mut out = bins.to_vec();
  out.rotate_right(bins.len() / 2);
  out
}

/// Inverse of [`fftshift`], also for odd lengths.
pub fn ifftshift<T: Clone>(bins: &[T]) -> Vec<T> {
  let mut out = bins.to_vec();
  out.rotate_left(bins.len() / 2);
  out
}

/// Unnormalized forward transform of a real signal, natural bin order.
pub fn forward(signal: &[f64]) -> Vec<Complex<f64>> {
  let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
  if buffer.is_empty() {
    return buffer;
  }
  let mut planner = FftPlanner::new();
  let fft = planner.plan_fft_forward(buffer.len());
  fft.process(&mut buffer);
  buffer
}

/// Inverse transform scaled by `1/n`, so `inverse(forward(x)) == x`.
pub fn inverse(field: &[Complex<f64>]) -> Vec<Complex<f64>> {
  let mut buffer = field.to_vec();
  if buffer.is_empty() {
    return buffer;
  }
  let mut planner = FftPlanner::new();
  let ifft = planner.plan_fft_inverse(buffer.len());
  ifft.process(&mut buffer);
  let scale = 1.0 / buffer.len() as f64;
  buffer.iter_mut().for_each(|c| *c *= scale);
  buffer
}

/// `|FFT(signal)|`, centered.
pub fn amplitude_spectrum(signal: &[f64]) -> Vec<f64> {
  let magnitude: Vec<f64> = forward(signal).iter().map(|c| c.norm()).collect();
  fftshift(&magnitude)
}

/// `|FFT(signal)|²`, centered.
pub fn power_spectrum(signal: &[f64]) -> Vec<f64> {
  let power: Vec<f64> = forward(signal).iter().map(|c| c.norm_sqr()).collect();
  fftshift(&power)
}

#[test]
fn frequencies_match_transform_order() {
  assert_eq!(fft_frequencies(4, 1.0), vec![0.0, 0.25, -0.5, -0.25]);
  assert_eq!(fft_frequencies(5, 0.5), vec![0.0, 0.4, 0.8, -0.8, -0.4]);
}

#[test]
fn shift_round_trips_for_odd_and_even() {
  let even = vec![0, 1, 2, -3, -2, -1];
  assert_eq!(fftshift(&even), vec![-3, -2, -1, 0, 1, 2]);
  assert_eq!(ifftshift(&fftshift(&even)), even);

  let odd = vec![0, 1, 2, -2, -1];
  assert_eq!(fftshift(&odd), vec![-2, -1, 0, 1, 2]);
  assert_eq!(ifftshift(&fftshift(&odd)), odd);
}

#[test]
fn inverse_undoes_forward() {
  let signal: Vec<f64> = (0..37).map(|i| ((i * i) % 11) as f64 - 5.0).collect();
  let back = inverse(&forward(&signal));
  for (a, b) in signal.iter().zip(back.iter()) {
    assert!((a - b.re).abs() < 1e-10);
    assert!(b.im.abs() < 1e-10);
  }
}

#[test]
fn power_is_squared_amplitude() {
  let signal = [1.0, -2.0, 0.5, 3.0, 0.0, -1.5, 2.5];
  let amp = amplitude_spectrum(&signal);
  let pow = power_spectrum(&signal);
  for (a, p) in amp.iter().zip(pow.iter()) {
    assert!((a * a - p).abs() < 1e-9);
  }
}
