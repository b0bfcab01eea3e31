use crate::{Dataset, Figure};
use plotters::prelude::*;
use plotters::style::full_palette::*;
use plotters::style::{BLACK, WHITE};
use std::f64::consts::TAU;

const SIGNAL: RGBColor = BLUE_A700;
const SPECTRUM: RGBColor = RED_A400;

pub struct Plot;

impl Plot {
  /// Render a [`Figure`] as a grid: one row per panel, signal on the left,
  /// spectrum on the right.
  pub fn figure(figure: &Figure, out_file: &str, size: (u32, u32)) -> anyhow::Result<()> {
    let root = BitMapBackend::new(out_file, size).into_drawing_area();
    root
      .fill(&WHITE)
      .map_err(|e| anyhow::anyhow!("Failed to fill drawing area with white: {}", e))?;

    let cells = root.split_evenly((figure.panels.len(), 2));
    for (panel, row) in figure.panels.iter().zip(cells.chunks(2)) {
      Self::draw_cell(&row[0], &panel.title, &panel.signal, Some(0.0..TAU), SIGNAL)?;
      Self::draw_cell(&row[1], &panel.spectrum_title, &panel.spectrum, None, SPECTRUM)?;
    }

    root
      .present()
      .map_err(|e| anyhow::anyhow!("Failed to present root: {}", e))?;

    Ok(())
  }

  fn draw_cell<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    title: &str,
    data: &Dataset,
    x_range: Option<std::ops::Range<f64>>,
    color: RGBColor,
  ) -> anyhow::Result<()> {
    let x_range = match x_range {
      Some(range) => range,
      None => {
        let (min_x, max_x) = data.x_bounds().unwrap_or((0.0, 1.0));
        padded(min_x, max_x)
      }
    };
    let (min_y, max_y) = data.y_bounds().unwrap_or((0.0, 1.0));
    let y_range = padded(min_y, max_y);

    let mut chart = ChartBuilder::on(area)
      .margin(10)
      .set_all_label_area_size(40)
      .caption(title, ("sans-serif", 20.0).into_font())
      .build_cartesian_2d(x_range, y_range)
      .map_err(|e| anyhow::anyhow!("Failed to build cartesian 2d: {}", e))?;

    chart
      .configure_mesh()
      .light_line_style(WHITE)
      .label_style(("sans-serif", 12, &BLACK).into_text_style(area))
      .x_labels(7)
      .y_labels(5)
      .draw()
      .map_err(|e| anyhow::anyhow!("Failed to draw mesh: {}", e))?;

    chart
      .draw_series(LineSeries::new(
        data.data().iter().map(|d| (d.x, d.y)),
        ShapeStyle {
          color: RGBAColor::from(color),
          filled: true,
          stroke_width: 1,
        },
      ))
      .map_err(|e| anyhow::anyhow!("Failed to draw series: {}", e))?;

    Ok(())
  }
}

/// Widen a degenerate range so the axis can still be built.
fn padded(min: f64, max: f64) -> std::ops::Range<f64> {
  if max > min {
    min..max
  } else {
    min - 1.0..max + 1.0
  }
}

#[test]
fn padded_handles_flat_series() {
  assert_eq!(padded(0.0, 2.0), 0.0..2.0);
  assert_eq!(padded(3.0, 3.0), 2.0..4.0);
}
