use thiserror::Error;

pub type SpectralResult<T = ()> = Result<T, SpectralError>;

#[derive(Debug, Error)]
pub enum SpectralError {
  #[error("Grid must contain at least one sample")]
  EmptyGrid,

  #[error("Invalid distribution: {0}")]
  Distribution(#[from] statrs::StatsError),

  #[error("Regression failed: {0}")]
  Regression(String),

  /// Fewer than two bins survived the positive-frequency, positive-power filter.
  #[error("Power-law fit needs at least 2 usable bins, got {0}")]
  InsufficientBins(usize),

  #[error("Ensemble needs at least one realization")]
  NoRealizations,

  #[error("Series length mismatch: {left} vs {right}")]
  LengthMismatch { left: usize, right: usize },

  #[error("{0}")]
  Io(#[from] std::io::Error),

  #[error("{0}")]
  Csv(#[from] csv::Error),
}
