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
//! Chart models for the three benchmark views.
//!
//! Everything here is a pure function of the [`DenseTable`] and the
//! [`Settings`]; drawing happens in [`crate::render`].

use crate::aggregate::DenseTable;
use crate::config::Settings;
use crate::layout::GroupLayout;
use crate::layout::fitted_bar_width;
use crate::palette::library_color;
use plotters::style::RGBColor;
use std::ops::Range;

pub const COMBINED_FILE_NAME: &str = "combined_benchmark.png";
pub const ZOOMED_FILE_NAME: &str = "zoomed_benchmark.png";

const SINGLE_SIZE: (u32, u32) = (1200, 800);
const PANEL_WIDTH: u32 = 1400;
const PANEL_HEIGHT: u32 = 500;

/// Time axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
  Logarithmic,
  Linear,
}

/// How bars are annotated with their value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueLabels {
  Hidden,
  /// Values of 1000 and above get digit-grouping commas.
  Grouped,
  Plain,
}

impl ValueLabels {
  pub fn format(self, value: f64) -> Option<String> {
    match self {
      ValueLabels::Hidden => None,
      ValueLabels::Grouped if value >= 1000.0 => Some(group_digits(&format_plain(value))),
      ValueLabels::Grouped | ValueLabels::Plain => Some(format_plain(value)),
    }
  }
}

/// Renders whole values without a fractional part, others as-is.
pub fn format_plain(value: f64) -> String {
  if value.fract() == 0.0 && value.abs() < 1e15 {
    format!("{}", value as i64)
  } else {
    format!("{value}")
  }
}

fn group_digits(plain: &str) -> String {
  let (int_part, frac_part) = match plain.split_once('.') {
    Some((int_part, frac_part)) => (int_part, Some(frac_part)),
    None => (plain, None),
  };
  let (sign, digits) = match int_part.strip_prefix('-') {
    Some(digits) => ("-", digits),
    None => ("", int_part),
  };

  let mut grouped = String::with_capacity(plain.len() + digits.len() / 3);
  grouped.push_str(sign);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(ch);
  }
  if let Some(frac_part) = frac_part {
    grouped.push('.');
    grouped.push_str(frac_part);
  }
  grouped
}

/// The knobs that distinguish one view from another.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
  /// Libraries to draw, in legend order. A subset of the table's universe.
  pub libraries: Vec<String>,
  pub scale: AxisScale,
  pub labels: ValueLabels,
  pub bar_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
  pub x: f64,
  pub width: f64,
  pub value: f64,
  pub label: Option<String>,
}

/// All bars of one library within a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
  pub library: String,
  pub legend_label: String,
  pub color: RGBColor,
  pub bars: Vec<Bar>,
}

/// One chart: a single operation across every precision.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
  pub title: String,
  pub y_desc: String,
  pub scale: AxisScale,
  pub x_range: Range<f64>,
  pub ticks: Vec<(f64, String)>,
  pub boundaries: Vec<f64>,
  pub series: Vec<Series>,
  pub legend: bool,
}

impl Panel {
  pub fn bars(&self) -> impl Iterator<Item = &Bar> {
    self.series.iter().flat_map(|series| series.bars.iter())
  }

  /// Time range that fits every bar plus the room its label needs.
  pub fn y_range(&self) -> Range<f64> {
    let (min, max) = self.bars().fold((f64::MAX, 0.0_f64), |(lo, hi), bar| {
      (lo.min(bar.value), hi.max(bar.value))
    });
    let has_bars = max > 0.0;

    match self.scale {
      AxisScale::Logarithmic if has_bars => (min / 2.0)..(max * 10.0),
      AxisScale::Logarithmic => 1.0..10.0,
      AxisScale::Linear if has_bars => 0.0..(max * 1.3),
      AxisScale::Linear => 0.0..1.0,
    }
  }

  /// Where a bar's value label is anchored, just above the bar.
  pub fn label_anchor(&self, value: f64) -> f64 {
    match self.scale {
      AxisScale::Logarithmic => value * 1.1,
      AxisScale::Linear => value + (self.y_range().end * 0.01),
    }
  }
}

/// One image artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
  pub file_name: String,
  pub size: (u32, u32),
  pub panels: Vec<Panel>,
}

fn capitalize(word: &str) -> String {
  let mut chars = word.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// Builds the panel for the operation at rank `operation`.
pub fn build_panel(
  table: &DenseTable,
  operation: usize,
  view: &ViewConfig,
  title: String,
  y_desc: &str,
  legend: bool,
) -> Panel {
  let precisions = table.precisions();
  let bar_width = fitted_bar_width(view.bar_width, view.libraries.len());
  let layout = GroupLayout::compute(precisions.len(), view.libraries.len(), bar_width);

  let series = view
    .libraries
    .iter()
    .enumerate()
    .filter_map(|(slot, library)| {
      let rank = table.library_rank(library)?;
      let bars = (0..precisions.len())
        .filter_map(|p| {
          let value = table.time_at(operation, p, rank);
          (value > 0.0).then(|| Bar {
            x: layout.bar_x(p, slot),
            width: bar_width,
            value,
            label: view.labels.format(value),
          })
        })
        .collect();
      Some(Series {
        library: library.clone(),
        legend_label: library.replace('_', " "),
        color: library_color(library, rank),
        bars,
      })
    })
    .collect();

  Panel {
    title,
    y_desc: y_desc.to_string(),
    scale: view.scale,
    x_range: layout.x_extent(),
    ticks: layout
      .tick_positions
      .iter()
      .copied()
      .zip(precisions.iter().cloned())
      .collect(),
    boundaries: layout.group_boundaries(),
    series,
    legend,
  }
}

/// File name of an operation's own chart, kept clear of the combined artifacts.
fn operation_file_name(operation: &str) -> String {
  let file_name = format!("{operation}_benchmark.png");
  if file_name == COMBINED_FILE_NAME || file_name == ZOOMED_FILE_NAME {
    // Operations never contain `_`, so this cannot meet another operation's name.
    format!("{operation}_operation_benchmark.png")
  } else {
    file_name
  }
}

/// One figure per operation, log scale with grouped value labels.
pub fn per_operation_figures(table: &DenseTable, settings: &Settings) -> Vec<Figure> {
  let view = ViewConfig {
    libraries: table.libraries().to_vec(),
    scale: AxisScale::Logarithmic,
    labels: ValueLabels::Grouped,
    bar_width: settings.bar_width,
  };

  table
    .operations()
    .iter()
    .enumerate()
    .map(|(rank, operation)| Figure {
      file_name: operation_file_name(operation),
      size: SINGLE_SIZE,
      panels: vec![build_panel(
        table,
        rank,
        &view,
        format!(
          "{} Operation Performance by Library and Precision",
          capitalize(operation)
        ),
        "Time (ns/iter)",
        true,
      )],
    })
    .collect()
}

/// Stacks one panel per operation. Only the first panel carries a legend.
fn stacked_figure(
  table: &DenseTable,
  view: &ViewConfig,
  file_name: &str,
  y_desc: &str,
  title: impl Fn(&str) -> String,
) -> Figure {
  let panels: Vec<Panel> = table
    .operations()
    .iter()
    .enumerate()
    .map(|(rank, operation)| build_panel(table, rank, view, title(operation), y_desc, rank == 0))
    .collect();

  Figure {
    file_name: file_name.to_string(),
    size: (PANEL_WIDTH, PANEL_HEIGHT * panels.len().max(1) as u32),
    panels,
  }
}

/// Every operation in one figure, log scale, no value labels.
pub fn combined_figure(table: &DenseTable, settings: &Settings) -> Figure {
  let view = ViewConfig {
    libraries: table.libraries().to_vec(),
    scale: AxisScale::Logarithmic,
    labels: ValueLabels::Hidden,
    bar_width: settings.bar_width,
  };

  stacked_figure(table, &view, COMBINED_FILE_NAME, "log Time (ns/iter)", |op| {
    format!("{} Operation Performance", capitalize(op))
  })
}

/// The combined figure without the outlier library, on a linear axis.
pub fn zoomed_figure(table: &DenseTable, settings: &Settings) -> Figure {
  let outlier = settings.outlier_library.as_str();
  let view = ViewConfig {
    libraries: table.universes().libraries_excluding(outlier),
    scale: AxisScale::Linear,
    labels: ValueLabels::Plain,
    bar_width: settings.zoomed_bar_width,
  };

  stacked_figure(table, &view, ZOOMED_FILE_NAME, "Time (ns/iter)", |op| {
    format!("{} Operation Performance (excluding {outlier})", capitalize(op))
  })
}

/// Every artifact for one run: per-operation figures, then combined, then zoomed.
pub fn all_figures(table: &DenseTable, settings: &Settings) -> Vec<Figure> {
  if table.universes().is_empty() {
    return Vec::new();
  }

  let mut figures = per_operation_figures(table, settings);
  figures.push(combined_figure(table, settings));
  figures.push(zoomed_figure(table, settings));
  figures
}
