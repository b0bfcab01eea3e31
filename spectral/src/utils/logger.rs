use log::*;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

pub fn level_from_str(level: &str) -> LevelFilter {
  match level.to_lowercase().as_str() {
    "trace" => LevelFilter::Trace,
    "debug" => LevelFilter::Debug,
    "info" => LevelFilter::Info,
    "warn" => LevelFilter::Warn,
    "error" => LevelFilter::Error,
    _ => LevelFilter::Info,
  }
}

/// Terminal logger at the level named by `LOG_LEVEL`, defaulting to info.
pub fn init_logger() -> anyhow::Result<()> {
  let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
  let log_level = level_from_str(&log_level);

  let mut cfg = ConfigBuilder::new();
  let local_offset = cfg.set_time_offset_to_local().is_ok();
  let cfg = cfg.build();

  TermLogger::init(log_level, cfg, TerminalMode::Mixed, ColorChoice::Auto)
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;
  if !local_offset {
    debug!("Local time offset unavailable, logging timestamps in UTC");
  }
  Ok(())
}

#[test]
fn unknown_level_is_info() {
  assert_eq!(level_from_str("DEBUG"), LevelFilter::Debug);
  assert_eq!(level_from_str("warn"), LevelFilter::Warn);
  assert_eq!(level_from_str("verbose"), LevelFilter::Info);
}

#[test]
fn logger_initializes_once() {
  assert!(init_logger().is_ok());
  assert!(init_logger().is_err());
}
