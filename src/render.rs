// Copyright 2025 Chisomo Makombo Sakala
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use crate::error::GraphError;
use crate::view::AxisScale;
use crate::view::Figure;
use crate::view::Panel;
use plotters::coord::Shift;
use plotters::coord::ranged1d::AsRangedCoord;
use plotters::coord::ranged1d::ValueFormatter;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::HPos;
use plotters::style::text_anchor::Pos;
use plotters::style::text_anchor::VPos;
use std::path::Path;

const TITLE_FONT_SIZE: u32 = 28;
const AXIS_LABEL_FONT_SIZE: u32 = 20;
const TICK_LABEL_FONT_SIZE: u32 = 16;
const LEGEND_FONT_SIZE: u32 = 16;
const DATA_LABEL_FONT_SIZE: u32 = 12;

type DrawResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Destination for finished figures.
pub trait FigureSink {
  fn write(&mut self, figure: &Figure, path: &Path) -> Result<(), GraphError>;
}

/// Writes figures as PNG images through plotters' bitmap backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct BitmapSink;

impl FigureSink for BitmapSink {
  fn write(&mut self, figure: &Figure, path: &Path) -> Result<(), GraphError> {
    draw_figure(figure, path).map_err(|source| GraphError::Render {
      path: path.to_path_buf(),
      source,
    })
  }
}

fn draw_figure(figure: &Figure, path: &Path) -> DrawResult<()> {
  let root = BitMapBackend::new(path, figure.size).into_drawing_area();
  root.fill(&WHITE)?;

  if !figure.panels.is_empty() {
    let areas = root.split_evenly((figure.panels.len(), 1));
    for (area, panel) in areas.iter().zip(&figure.panels) {
      let y_range = panel.y_range();
      match panel.scale {
        AxisScale::Logarithmic => draw_panel(area, panel, y_range.log_scale())?,
        AxisScale::Linear => draw_panel(area, panel, y_range)?,
      }
    }
  }

  root.present()?;
  Ok(())
}

fn axis_tick(y: f64) -> String {
  if y == 0.0 {
    "0".to_string()
  } else if y.abs() >= 1.0 {
    format!("{y:.0}")
  } else {
    format!("{y:.2}")
  }
}

fn draw_panel<Y>(
  area: &DrawingArea<BitMapBackend<'_>, Shift>,
  panel: &Panel,
  y_spec: Y,
) -> DrawResult<()>
where
  Y: AsRangedCoord<Value = f64>,
  Y::CoordDescType: ValueFormatter<f64>,
{
  let y_range = panel.y_range();
  let (y_floor, y_ceil) = (y_range.start, y_range.end);

  let mut chart = ChartBuilder::on(area)
    .caption(&panel.title, ("sans-serif", TITLE_FONT_SIZE))
    .margin(20)
    .x_label_area_size(60)
    .y_label_area_size(90)
    .build_cartesian_2d(panel.x_range.clone(), y_spec)?;

  // Precision names are drawn at the group ticks below, not at mesh key points.
  chart
    .configure_mesh()
    .disable_x_mesh()
    .x_labels(0)
    .y_labels(8)
    .y_label_formatter(&|y: &f64| axis_tick(*y))
    .x_desc("Precision")
    .y_desc(panel.y_desc.as_str())
    .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
    .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
    .draw()?;

  let tick_style = ("sans-serif", TICK_LABEL_FONT_SIZE)
    .into_font()
    .color(&BLACK)
    .pos(Pos::new(HPos::Center, VPos::Top));
  chart.draw_series(panel.ticks.iter().map(|(x, precision)| {
    EmptyElement::at((*x, y_floor)) + Text::new(precision.clone(), (0, 8), tick_style.clone())
  }))?;

  chart.draw_series(panel.boundaries.iter().map(|&x| {
    PathElement::new(vec![(x, y_floor), (x, y_ceil)], BLACK.mix(0.3).stroke_width(1))
  }))?;

  for series in &panel.series {
    let color = series.color;
    chart
      .draw_series(series.bars.iter().map(|bar| {
        let half = bar.width / 2.0;
        Rectangle::new(
          [(bar.x - half, y_floor), (bar.x + half, bar.value)],
          color.filled(),
        )
      }))?
      .label(series.legend_label.as_str())
      .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
  }

  let value_style = ("sans-serif", DATA_LABEL_FONT_SIZE)
    .into_font()
    .transform(FontTransform::Rotate270)
    .color(&BLACK)
    .pos(Pos::new(HPos::Left, VPos::Center));
  for bar in panel.bars() {
    let Some(label) = &bar.label else { continue };
    chart.draw_series(std::iter::once(Text::new(
      label.clone(),
      (bar.x, panel.label_anchor(bar.value)),
      value_style.clone(),
    )))?;
  }

  if panel.legend {
    chart
      .configure_series_labels()
      .position(SeriesLabelPosition::UpperRight)
      .background_style(WHITE.mix(0.85))
      .border_style(BLACK)
      .label_font(("sans-serif", LEGEND_FONT_SIZE))
      .draw()?;
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::aggregate::aggregate;
  use crate::config::Settings;
  use crate::parser::parse;
  use crate::view::all_figures;
  use tempfile::tempdir;

  const SAMPLE: &str = "\
test f32::add_rug ... bench: 12 ns/iter
test f32::add_softfloat_sys ... bench: 1,500 ns/iter
test f64::add_rug ... bench: 20 ns/iter
";

  #[test]
  fn bitmap_sink_writes_png_files() {
    let temp = tempdir().unwrap();
    let table = aggregate(&parse(SAMPLE));
    let settings = Settings {
      outlier_library: "softfloat_sys".to_string(),
      ..Settings::default()
    };

    for figure in all_figures(&table, &settings) {
      let path = temp.path().join(&figure.file_name);
      BitmapSink.write(&figure, &path).unwrap();

      let bytes = std::fs::read(&path).unwrap();
      assert!(bytes.starts_with(b"\x89PNG"), "{} is not a PNG", path.display());
    }
  }

  #[test]
  fn bitmap_sink_reports_unwritable_paths() {
    let temp = tempdir().unwrap();
    let table = aggregate(&parse(SAMPLE));
    let figures = all_figures(&table, &Settings::default());
    let path = temp.path().join("missing").join(&figures[0].file_name);

    let err = BitmapSink.write(&figures[0], &path).unwrap_err();

    assert!(matches!(err, GraphError::Render { .. }));
    assert!(!path.exists());
  }

  #[test]
  fn axis_ticks_drop_noise() {
    assert_eq!(axis_tick(1000.0), "1000");
    assert_eq!(axis_tick(0.30000000000000004), "0.30");
    assert_eq!(axis_tick(0.0), "0");
    assert_eq!(axis_tick(-0.0), "0");
  }
}
