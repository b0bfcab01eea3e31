use std::{path::PathBuf, str::FromStr};

use serde::Deserialize;
use spectral::{FigureConfig, RedNoise, Symmetry};

#[derive(Debug, Deserialize)]
pub struct Config {
  pub samples: usize,
  pub sine_freq: u32,
  pub spectral_index: f64,
  #[serde(default)]
  pub symmetry: Symmetry,
  pub out_file: String,
  pub width: u32,
  pub height: u32,
  /// Draws averaged for the logged power-law fit; 0 skips the fit.
  #[serde(default)]
  pub realizations: usize,
  #[serde(default)]
  pub csv_dir: Option<String>,
  /// Read from `SEED`; unseeded runs draw from OS entropy.
  #[serde(skip)]
  pub seed: Option<u64>,
}

impl Config {
  pub fn read() -> anyhow::Result<Self> {
    let dir = env!("CARGO_MANIFEST_DIR").to_string();
    let name = "config.yaml";
    let path = format!("{}/{}", dir, name);
    let path = PathBuf::from_str(&path)?;
    let contents = String::from_utf8(std::fs::read(path)?)?;
    let mut cfg = Self::from_yaml(&contents)?;
    cfg.seed = match std::env::var("SEED") {
      Ok(seed) => Some(
        seed
          .parse::<u64>()
          .map_err(|e| anyhow::anyhow!("Invalid SEED {:?}: {}", seed, e))?,
      ),
      Err(_) => None,
    };
    Ok(cfg)
  }

  pub fn from_yaml(contents: &str) -> anyhow::Result<Self> {
    let cfg: Config = serde_yaml::from_str(contents)?;
    if cfg.samples == 0 {
      return Err(anyhow::anyhow!("samples must be positive"));
    }
    Ok(cfg)
  }

  pub fn figure(&self) -> FigureConfig {
    FigureConfig {
      samples: self.samples,
      sine_freq: self.sine_freq,
      red: RedNoise::new(self.spectral_index, self.symmetry),
    }
  }
}

#[test]
fn parses_bundled_config() -> anyhow::Result<()> {
  let cfg = Config::from_yaml(include_str!("../config.yaml"))?;
  assert_eq!(cfg.samples, 512);
  assert_eq!(cfg.sine_freq, 7);
  assert_eq!(cfg.symmetry, Symmetry::Independent);
  assert_eq!(cfg.realizations, 200);
  assert!(cfg.csv_dir.is_none());
  assert!(cfg.seed.is_none());
  Ok(())
}

#[test]
fn parses_hermitian_and_rejects_empty_grid() -> anyhow::Result<()> {
  let yaml = "samples: 64\nsine_freq: 3\nspectral_index: 1.0\nsymmetry: hermitian\nout_file: a.png\nwidth: 100\nheight: 100\n";
  let cfg = Config::from_yaml(yaml)?;
  assert_eq!(cfg.symmetry, Symmetry::Hermitian);
  assert_eq!(cfg.realizations, 0);
  assert_eq!(cfg.figure().red.spectral_index, 1.0);

  assert!(Config::from_yaml(&yaml.replace("samples: 64", "samples: 0")).is_err());
  Ok(())
}
