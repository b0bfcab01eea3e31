use spectral::*;

const REALIZATIONS: usize = 200;

#[test]
fn sine_peaks_at_plus_minus_f() -> anyhow::Result<()> {
  let grid = Grid::new(512)?;
  let spectrum = Spectrum::measure(&grid, &sinusoid(&grid, 7));
  let peaks = peak_bins(&spectrum.magnitude, 1e-9);
  assert_eq!(peaks, vec![256 - 7, 256 + 7]);

  // peak bins sit at ±7 cycles per window
  let cycles: Vec<f64> = peaks
    .iter()
    .map(|&i| spectrum.k[i] * grid.len() as f64 * grid.spacing())
    .collect();
  assert!((cycles[0] + 7.0).abs() < 1e-9);
  assert!((cycles[1] - 7.0).abs() < 1e-9);
  Ok(())
}

#[test]
fn red_noise_ensemble_follows_inverse_square() -> anyhow::Result<()> {
  let grid = Grid::new(512)?;
  let power = ensemble_power(&grid, &RedNoise::default(), REALIZATIONS, 1_000)?;
  let fit = fit_power_law(&grid.centered_frequencies(), &power)?;
  assert_eq!(fit.bins, 255);
  assert!((fit.exponent + 2.0).abs() < 0.1, "exponent = {}", fit.exponent);
  assert!(spectral_flatness(&power) < 0.5);
  Ok(())
}

#[test]
fn hermitian_ensemble_follows_inverse_square() -> anyhow::Result<()> {
  let grid = Grid::new(512)?;
  let red = RedNoise::new(2.0, Symmetry::Hermitian);
  let power = ensemble_power(&grid, &red, REALIZATIONS, 2_000)?;
  let fit = fit_power_law(&grid.centered_frequencies(), &power)?;
  assert!((fit.exponent + 2.0).abs() < 0.1, "exponent = {}", fit.exponent);
  Ok(())
}

#[test]
fn spectral_index_is_configurable() -> anyhow::Result<()> {
  let grid = Grid::new(256)?;
  let pink = RedNoise::new(1.0, Symmetry::Independent);
  let power = ensemble_power(&grid, &pink, REALIZATIONS, 3_000)?;
  let fit = fit_power_law(&grid.centered_frequencies(), &power)?;
  assert!((fit.exponent + 1.0).abs() < 0.1, "exponent = {}", fit.exponent);
  Ok(())
}

#[test]
fn white_noise_ensemble_is_flat() -> anyhow::Result<()> {
  let grid = Grid::new(512)?;
  let power = ensemble_power(&grid, &WhiteNoise, REALIZATIONS, 4_000)?;
  let fit = fit_power_law(&grid.centered_frequencies(), &power)?;
  assert!(fit.exponent.abs() < 0.1, "exponent = {}", fit.exponent);
  assert!(spectral_flatness(&power) > 0.9);

  // expected power per bin is N for unit-variance samples
  let level = mean(&power);
  assert!((level / 512.0 - 1.0).abs() < 0.05, "level = {}", level);
  Ok(())
}

#[test]
fn ensemble_is_reproducible() -> anyhow::Result<()> {
  let grid = Grid::new(64)?;
  let a = ensemble_power(&grid, &RedNoise::default(), 16, 5)?;
  let b = ensemble_power(&grid, &RedNoise::default(), 16, 5)?;
  assert_eq!(a, b);
  assert!(matches!(
    ensemble_power(&grid, &WhiteNoise, 0, 5),
    Err(SpectralError::NoRealizations)
  ));
  Ok(())
}

#[test]
fn panels_export_to_csv() -> anyhow::Result<()> {
  use rand::{rngs::StdRng, SeedableRng};

  let cfg = FigureConfig {
    samples: 32,
    ..FigureConfig::default()
  };
  let figure = Figure::build(&cfg, &mut StdRng::seed_from_u64(8))?;
  let dir = std::env::temp_dir().join(format!("spectral_csv_{}", std::process::id()));
  let paths = write_csv(&figure, &dir)?;
  assert_eq!(paths.len(), 3);

  let mut reader = csv::Reader::from_path(&paths[0])?;
  let headers = reader.headers()?.clone();
  assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["t", "signal", "k", "magnitude"]);
  assert_eq!(reader.records().count(), 32);

  std::fs::remove_dir_all(&dir)?;
  Ok(())
}

#[test]
fn deterministic_generator_ensemble_matches_single_draw() -> anyhow::Result<()> {
  let grid = Grid::new(128)?;
  let power = ensemble_power(&grid, &Sinusoid { freq: 5 }, 8, 0)?;
  let single = power_spectrum(&sinusoid(&grid, 5));
  for (a, b) in power.iter().zip(single.iter()) {
    assert!((a - b).abs() < 1e-9);
  }
  assert_eq!(peak_bins(&power, 1e-9), vec![64 - 5, 64 + 5]);
  Ok(())
}
