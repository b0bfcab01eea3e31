use config::Config;
use log::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use spectral::*;
use std::path::Path;

mod config;

fn main() -> anyhow::Result<()> {
  dotenv::dotenv().ok();
  init_logger()?;

  let cfg = Config::read()?;
  info!(
    "samples: {}, sine freq: {}, spectral index: {}, symmetry: {:?}, seed: {:?}",
    cfg.samples, cfg.sine_freq, cfg.spectral_index, cfg.symmetry, cfg.seed
  );

  let mut rng = match cfg.seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_entropy(),
  };
  let figure = Figure::build(&cfg.figure(), &mut rng)?;

  log_summary(&cfg, &figure)?;

  if let Some(dir) = cfg.csv_dir.as_ref() {
    for path in write_csv(&figure, Path::new(dir))? {
      info!("wrote {}", path.display());
    }
  }

  Plot::figure(&figure, &cfg.out_file, (cfg.width, cfg.height))?;
  info!("figure saved to {}", cfg.out_file);

  Ok(())
}

/// Peaks, residual and power-law fits. Fits are skipped on grids too small to support them.
fn log_summary(cfg: &Config, figure: &Figure) -> anyhow::Result<()> {
  let sine_peaks: Vec<f64> = peak_bins(&figure.sine().spectrum.y(), 1e-9)
    .into_iter()
    .map(|i| figure.sine().spectrum.0[i].x * figure.grid.len() as f64 * figure.grid.spacing())
    .collect();
  info!("sine peaks (cycles per window): {:?}", sine_peaks);
  info!("red noise imaginary residual: {:.3e}", figure.red_residual);

  let k = figure.grid.centered_frequencies();
  for panel in [figure.white(), figure.red()] {
    let power: Vec<f64> = panel.spectrum.y().iter().map(|m| m * m).collect();
    match try_fit_power_law(&k, &power) {
      Some(fit) => info!(
        "{}: exponent = {:.3}, flatness = {:.3}",
        panel.title,
        fit.exponent,
        spectral_flatness(&power)
      ),
      None => info!("{}: too few bins to fit a power law", panel.title),
    }
  }

  if cfg.realizations > 0 {
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let red = cfg.figure().red;
    let power = ensemble_power(&figure.grid, &red, cfg.realizations, seed)?;
    if let Some(fit) = try_fit_power_law(&k, &power) {
      info!(
        "ensemble of {} red noise draws: exponent = {:.3} (target {})",
        cfg.realizations, fit.exponent, -cfg.spectral_index
      );
    }
  }

  Ok(())
}

#[test]
fn summary_survives_tiny_grids() -> anyhow::Result<()> {
  for samples in 1..=4 {
    let yaml = format!(
      "samples: {}\nsine_freq: 7\nspectral_index: 2.0\nout_file: a.png\nwidth: 100\nheight: 100\nrealizations: 2\n",
      samples
    );
    let mut cfg = Config::from_yaml(&yaml)?;
    cfg.seed = Some(1);
    let figure = Figure::build(&cfg.figure(), &mut StdRng::seed_from_u64(1))?;
    log_summary(&cfg, &figure)?;
  }
  Ok(())
}
