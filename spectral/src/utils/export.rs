use crate::{Figure, SpectralResult};
use serde::Serialize;
use std::path::{Path, PathBuf};

const PANEL_FILES: [&str; 3] = ["sine.csv", "white_noise.csv", "red_noise.csv"];

#[derive(Serialize)]
struct Row {
  t: f64,
  signal: f64,
  k: f64,
  magnitude: f64,
}

/// Write each panel to `dir` as `t,signal,k,magnitude` rows. Returns the paths written.
pub fn write_csv(figure: &Figure, dir: &Path) -> SpectralResult<Vec<PathBuf>> {
  std::fs::create_dir_all(dir)?;
  let mut paths = Vec::with_capacity(figure.panels.len());
  for (i, panel) in figure.panels.iter().enumerate() {
    let name = PANEL_FILES
      .get(i)
      .map(|s| s.to_string())
      .unwrap_or_else(|| format!("panel_{}.csv", i));
    let path = dir.join(name);
    let mut writer = csv::Writer::from_path(&path)?;
    for (s, k) in panel.signal.data().iter().zip(panel.spectrum.data().iter()) {
      writer.serialize(Row {
        t: s.x,
        signal: s.y,
        k: k.x,
        magnitude: k.y,
      })?;
    }
    writer.flush()?;
    paths.push(path);
  }
  Ok(paths)
}
