use crate::{geometric_mean, mean, power_spectrum, Generator, Grid, SpectralError, SpectralResult};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// Straight line through `(ln k, ln P)`.
#[derive(Debug, Clone, Copy)]
pub struct PowerLawFit {
  /// Slope in log-log space: `-2` for `1/k²`, `0` for a flat spectrum.
  pub exponent: f64,
  pub intercept: f64,
  /// Number of bins that entered the regression.
  pub bins: usize,
}

/// Mean centered power spectrum over `realizations` independent draws.
/// Realization `i` is seeded with `seed + i`, so the result is reproducible
/// regardless of how rayon schedules the work.
pub fn ensemble_power<G: Generator + Sync>(
  grid: &Grid,
  generator: &G,
  realizations: usize,
  seed: u64,
) -> SpectralResult<Vec<f64>> {
  if realizations == 0 {
    return Err(SpectralError::NoRealizations);
  }
  let spectra: Vec<Vec<f64>> = (0..realizations)
    .into_par_iter()
    .map(|i| {
      let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
      let signal = generator.generate(grid, &mut rng)?;
      Ok(power_spectrum(&signal))
    })
    .collect::<SpectralResult<_>>()?;

  let mut total = vec![0.0; grid.len()];
  for spectrum in spectra.iter() {
    for (acc, p) in total.iter_mut().zip(spectrum.iter()) {
      *acc += p;
    }
  }
  let n = realizations as f64;
  Ok(total.into_iter().map(|p| p / n).collect())
}

/// Least-squares power law over the strictly positive frequencies with
/// positive power. Zero and negative bins (including Nyquist) are skipped.
pub fn fit_power_law(k: &[f64], power: &[f64]) -> SpectralResult<PowerLawFit> {
  if k.len() != power.len() {
    return Err(SpectralError::LengthMismatch {
      left: k.len(),
      right: power.len(),
    });
  }
  let (log_k, log_p): (Vec<f64>, Vec<f64>) = k
    .iter()
    .zip(power.iter())
    .filter(|(k, p)| **k > 0.0 && **p > 0.0)
    .map(|(k, p)| (k.ln(), p.ln()))
    .unzip();
  if log_k.len() < 2 {
    return Err(SpectralError::InsufficientBins(log_k.len()));
  }
  let (exponent, intercept): (f64, f64) = linreg::linear_regression(&log_k, &log_p)
    .map_err(|e| SpectralError::Regression(format!("{:?}", e)))?;
  debug!(
    "power law fit over {} bins: exponent = {:.4}, intercept = {:.4}",
    log_k.len(),
    exponent,
    intercept
  );
  Ok(PowerLawFit {
    exponent,
    intercept,
    bins: log_k.len(),
  })
}

/// [`fit_power_law`] for reporting: grids too small to fit yield `None`
/// instead of an error.
pub fn try_fit_power_law(k: &[f64], power: &[f64]) -> Option<PowerLawFit> {
  match fit_power_law(k, power) {
    Ok(fit) => Some(fit),
    Err(SpectralError::InsufficientBins(bins)) => {
      debug!("skipping power law fit: only {} usable bins", bins);
      None
    }
    Err(e) => {
      warn!("power law fit failed: {}", e);
      None
    }
  }
}

/// Geometric over arithmetic mean of the positive bins. `1.0` is perfectly flat.
pub fn spectral_flatness(power: &[f64]) -> f64 {
  let positive: Vec<f64> = power.iter().cloned().filter(|p| *p > 0.0).collect();
  if positive.is_empty() {
    return 0.0;
  }
  geometric_mean(&positive) / mean(&positive)
}

/// Indices whose magnitude exceeds `tolerance * max`.
pub fn peak_bins(magnitude: &[f64], tolerance: f64) -> Vec<usize> {
  let max = magnitude.iter().cloned().fold(0.0, f64::max);
  if max <= 0.0 {
    return vec![];
  }
  magnitude
    .iter()
    .enumerate()
    .filter(|(_, m)| **m > tolerance * max)
    .map(|(i, _)| i)
    .collect()
}

#[test]
fn exact_power_law_is_recovered() -> anyhow::Result<()> {
  let k: Vec<f64> = (-8..8).map(|i| i as f64).collect();
  let power: Vec<f64> = k
    .iter()
    .map(|k| if *k == 0.0 { 0.0 } else { 3.0 * k.abs().powf(-2.0) })
    .collect();
  let fit = fit_power_law(&k, &power)?;
  assert_eq!(fit.bins, 7);
  assert!((fit.exponent + 2.0).abs() < 1e-9);
  assert!((fit.intercept - 3f64.ln()).abs() < 1e-9);
  Ok(())
}

#[test]
fn fit_rejects_degenerate_input() {
  assert!(matches!(
    fit_power_law(&[1.0, 2.0], &[1.0]),
    Err(SpectralError::LengthMismatch { left: 2, right: 1 })
  ));
  assert!(matches!(
    fit_power_law(&[-1.0, 0.0, 1.0], &[1.0, 1.0, 1.0]),
    Err(SpectralError::InsufficientBins(1))
  ));
}

#[test]
fn flatness_bounds() {
  assert!((spectral_flatness(&[2.0; 32]) - 1.0).abs() < 1e-12);
  let steep: Vec<f64> = (1..256).map(|k| 1.0 / (k * k) as f64).collect();
  assert!(spectral_flatness(&steep) < 0.1);
  assert_eq!(spectral_flatness(&[0.0, 0.0]), 0.0);
}

#[test]
fn peaks_above_tolerance() {
  assert_eq!(peak_bins(&[0.0, 1e-12, 5.0, 1e-13, 5.0], 1e-9), vec![2, 4]);
  assert!(peak_bins(&[0.0, 0.0], 1e-9).is_empty());
}

#[test]
fn tiny_grids_skip_the_fit() -> anyhow::Result<()> {
  use crate::{Figure, FigureConfig};

  for samples in 1..=4 {
    let cfg = FigureConfig {
      samples,
      ..FigureConfig::default()
    };
    let figure = Figure::build(&cfg, &mut StdRng::seed_from_u64(1))?;
    let k = figure.grid.centered_frequencies();
    let power: Vec<f64> = figure.white().spectrum.y().iter().map(|m| m * m).collect();
    assert!(try_fit_power_law(&k, &power).is_none(), "samples = {}", samples);
  }

  let grid = Grid::new(64)?;
  let power = ensemble_power(&grid, &crate::WhiteNoise, 4, 0)?;
  assert!(try_fit_power_law(&grid.centered_frequencies(), &power).is_some());
  Ok(())
}
