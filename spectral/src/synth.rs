use crate::{ifftshift, inverse, max_abs, Grid, SpectralResult};
use log::{debug, warn};
use ndarray::Array1;
use rand::distributions::Distribution;
use rand::Rng;
use rustfft::num_complex::Complex;
use serde::Deserialize;
use statrs::distribution::Normal;

/// Imaginary residual tolerated when the field is conjugate-symmetric by construction.
pub const HERMITIAN_TOLERANCE: f64 = 1e-9;

/// Anything that can fill a [`Grid`] with one realization of a signal.
pub trait Generator {
  fn generate<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> SpectralResult<Vec<f64>>;
}

pub struct Sinusoid {
  /// Whole cycles per `2π` window.
  pub freq: u32,
}

impl Generator for Sinusoid {
  fn generate<R: Rng + ?Sized>(&self, grid: &Grid, _rng: &mut R) -> SpectralResult<Vec<f64>> {
    Ok(sinusoid(grid, self.freq))
  }
}

pub struct WhiteNoise;

impl Generator for WhiteNoise {
  fn generate<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> SpectralResult<Vec<f64>> {
    white_noise(grid, rng)
  }
}

pub fn sinusoid(grid: &Grid, freq: u32) -> Vec<f64> {
  let f = freq as f64;
  grid.t().iter().map(|&t| (f * t).sin()).collect()
}

/// `n` independent draws from `Normal(0, 1)`.
pub fn standard_normal<R: Rng + ?Sized>(n: usize, rng: &mut R) -> SpectralResult<Vec<f64>> {
  let normal = Normal::new(0.0, 1.0)?;
  Ok((0..n).map(|_| normal.sample(rng)).collect())
}

pub fn white_noise<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> SpectralResult<Vec<f64>> {
  standard_normal(grid.len(), rng)
}

/// Complex Gaussian field: all real parts are drawn first, then all imaginary parts.
pub fn complex_noise<R: Rng + ?Sized>(n: usize, rng: &mut R) -> SpectralResult<Vec<Complex<f64>>> {
  let re = standard_normal(n, rng)?;
  let im = standard_normal(n, rng)?;
  Ok(re.into_iter().zip(im).map(|(re, im)| Complex::new(re, im)).collect())
}

/// `P(k) = 1 / |k|^index`, with the zero bin pinned to 0.
pub fn power_law_target(k: &[f64], index: f64) -> Vec<f64> {
  let k = Array1::from(k.to_vec());
  k.mapv(|x| if x == 0.0 { 0.0 } else { 1.0 / x.abs().powf(index) })
    .to_vec()
}

/// How the shaped field is turned into a real signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symmetry {
  /// Every bin is drawn independently; the inverse transform's imaginary part is dropped.
  #[default]
  Independent,
  /// Negative bins mirror the conjugate of positive bins, so the inverse transform is real.
  Hermitian,
}

#[derive(Debug, Clone)]
pub struct Synthesis {
  pub signal: Vec<f64>,
  /// `max|Im| / max|Re|` of the inverse transform before the imaginary part was dropped.
  pub imag_residual: f64,
}

/// Gaussian random field with power spectrum `∝ 1/|k|^spectral_index`.
#[derive(Debug, Clone, Copy)]
pub struct RedNoise {
  pub spectral_index: f64,
  pub symmetry: Symmetry,
}

impl Default for RedNoise {
  fn default() -> Self {
    Self {
      spectral_index: 2.0,
      symmetry: Symmetry::Independent,
    }
  }
}

impl RedNoise {
  pub fn new(spectral_index: f64, symmetry: Symmetry) -> Self {
    Self {
      spectral_index,
      symmetry,
    }
  }

  pub fn synthesize<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> SpectralResult<Synthesis> {
    let k = grid.centered_frequencies();
    let target = power_law_target(&k, self.spectral_index);
    let noise = complex_noise(grid.len(), rng)?;

    let shaped: Vec<Complex<f64>> = noise
      .iter()
      .zip(target.iter())
      .map(|(z, p)| *z * p.sqrt())
      .collect();
    let mut field = ifftshift(&shaped);
    if self.symmetry == Symmetry::Hermitian {
      make_hermitian(&mut field);
    }

    let values = inverse(&field);
    let signal: Vec<f64> = values.iter().map(|c| c.re).collect();
    let imag: Vec<f64> = values.iter().map(|c| c.im).collect();
    let max_re = max_abs(&signal);
    let imag_residual = if max_re > 0.0 {
      max_abs(&imag) / max_re
    } else {
      max_abs(&imag)
    };

    debug!(
      "red noise: n = {}, index = {}, symmetry = {:?}, imaginary residual = {:.3e}",
      grid.len(),
      self.spectral_index,
      self.symmetry,
      imag_residual
    );
    if self.symmetry == Symmetry::Hermitian && imag_residual > HERMITIAN_TOLERANCE {
      warn!(
        "Hermitian field left an imaginary residual of {:.3e} (tolerance {:.0e})",
        imag_residual, HERMITIAN_TOLERANCE
      );
    }

    Ok(Synthesis {
      signal,
      imag_residual,
    })
  }
}

impl Generator for RedNoise {
  fn generate<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> SpectralResult<Vec<f64>> {
    Ok(self.synthesize(grid, rng)?.signal)
  }
}

/// Overwrite the negative half of a natural-order field with the conjugate of
/// the positive half. Mirrored bins are scaled by `1/√2` so the expected power
/// per bin matches what dropping the imaginary part yields in independent mode.
fn make_hermitian(field: &mut [Complex<f64>]) {
  let n = field.len();
  if n == 0 {
    return;
  }
  let scale = std::f64::consts::FRAC_1_SQRT_2;
  field[0] = Complex::new(field[0].re, 0.0);
  for k in 1..(n + 1) / 2 {
    let value = field[k] * scale;
    field[k] = value;
    field[n - k] = value.conj();
  }
  if n % 2 == 0 {
    field[n / 2] = Complex::new(field[n / 2].re, 0.0);
  }
}

#[cfg(test)]
use crate::{mean, Spectrum};
#[cfg(test)]
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn sine_has_two_equal_peaks() -> anyhow::Result<()> {
  let grid = Grid::new(512)?;
  let spectrum = Spectrum::measure(&grid, &sinusoid(&grid, 7));
  let max = spectrum.max();
  let c = grid.len() / 2;

  assert!((spectrum.magnitude[c + 7] - max).abs() < 1e-9 * max);
  assert!((spectrum.magnitude[c - 7] - max).abs() < 1e-9 * max);
  assert!((max - 256.0).abs() < 1e-9);
  for (i, m) in spectrum.magnitude.iter().enumerate() {
    if i != c + 7 && i != c - 7 {
      assert!(*m < 1e-9 * max, "bin {} has magnitude {}", i, m);
    }
  }
  Ok(())
}

#[test]
fn target_pins_zero_bin() -> anyhow::Result<()> {
  let k = Grid::new(16)?.centered_frequencies();
  let target = power_law_target(&k, 2.0);
  for (k, p) in k.iter().zip(target.iter()) {
    if *k == 0.0 {
      assert_eq!(*p, 0.0);
    } else {
      let expected = 1.0 / (k * k);
      assert!((p - expected).abs() <= 1e-12 * expected);
    }
  }
  Ok(())
}

#[test]
fn red_noise_is_zero_mean() -> anyhow::Result<()> {
  let grid = Grid::new(512)?;
  let mut rng = StdRng::seed_from_u64(7);
  let red = RedNoise::default().synthesize(&grid, &mut rng)?;
  assert_eq!(red.signal.len(), 512);
  assert!(mean(&red.signal).abs() < 1e-12);
  Ok(())
}

#[test]
fn hermitian_field_is_real() -> anyhow::Result<()> {
  for n in [511, 512] {
    let grid = Grid::new(n)?;
    let mut rng = StdRng::seed_from_u64(11);
    let red = RedNoise::new(2.0, Symmetry::Hermitian).synthesize(&grid, &mut rng)?;
    assert!(red.imag_residual < HERMITIAN_TOLERANCE, "n = {}: {}", n, red.imag_residual);
    assert!(mean(&red.signal).abs() < 1e-12);
  }
  Ok(())
}

#[test]
fn independent_field_leaves_imaginary_part() -> anyhow::Result<()> {
  let grid = Grid::new(512)?;
  let mut rng = StdRng::seed_from_u64(3);
  let red = RedNoise::default().synthesize(&grid, &mut rng)?;
  // the dropped anti-Hermitian half is the same order as the kept signal
  assert!(red.imag_residual > 1e-3);
  Ok(())
}

#[test]
fn same_seed_same_signal() -> anyhow::Result<()> {
  let grid = Grid::new(128)?;
  let a = RedNoise::default().generate(&grid, &mut StdRng::seed_from_u64(42))?;
  let b = RedNoise::default().generate(&grid, &mut StdRng::seed_from_u64(42))?;
  let c = RedNoise::default().generate(&grid, &mut StdRng::seed_from_u64(43))?;
  assert_eq!(a, b);
  assert_ne!(a, c);

  let w1 = white_noise(&grid, &mut StdRng::seed_from_u64(42))?;
  let w2 = white_noise(&grid, &mut StdRng::seed_from_u64(42))?;
  assert_eq!(w1, w2);
  Ok(())
}
