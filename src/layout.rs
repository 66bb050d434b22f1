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
use std::ops::Range;

/// Share of the unit step between groups that one group's bars may fill.
pub const MAX_GROUP_SPAN: f64 = 0.9;

/// Narrows `bar_width` so `num_libraries` bars fit within [`MAX_GROUP_SPAN`].
pub fn fitted_bar_width(bar_width: f64, num_libraries: usize) -> f64 {
  if num_libraries == 0 {
    return bar_width;
  }
  bar_width.min(MAX_GROUP_SPAN / num_libraries as f64)
}

/// Horizontal placement of a grouped bar chart.
///
/// Each precision is one group, each library one bar within the group. Bar
/// `j` of group `i` sits at `i + j * bar_width`; the group's tick sits at the
/// center of its bars.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupLayout {
  /// Bar centers, group-major: index `i * num_libraries + j`.
  pub bar_positions: Vec<f64>,
  /// One tick per group.
  pub tick_positions: Vec<f64>,
  pub num_libraries: usize,
  pub bar_width: f64,
}

impl GroupLayout {
  pub fn compute(num_precisions: usize, num_libraries: usize, bar_width: f64) -> Self {
    let mut bar_positions = Vec::with_capacity(num_precisions * num_libraries);
    let mut tick_positions = Vec::with_capacity(num_precisions);

    // With no libraries the group collapses onto its own origin.
    let center_offset = bar_width * num_libraries.saturating_sub(1) as f64 / 2.0;

    for i in 0..num_precisions {
      let group_start = i as f64;
      tick_positions.push(group_start + center_offset);
      for j in 0..num_libraries {
        bar_positions.push(group_start + j as f64 * bar_width);
      }
    }

    GroupLayout {
      bar_positions,
      tick_positions,
      num_libraries,
      bar_width,
    }
  }

  pub fn num_groups(&self) -> usize {
    self.tick_positions.len()
  }

  /// Center of the bar for precision rank `group` and library rank `library`.
  pub fn bar_x(&self, group: usize, library: usize) -> f64 {
    self.bar_positions[group * self.num_libraries + library]
  }

  /// Midpoints between consecutive ticks, where group separators go.
  pub fn group_boundaries(&self) -> Vec<f64> {
    self
      .tick_positions
      .windows(2)
      .map(|pair| (pair[0] + pair[1]) / 2.0)
      .collect()
  }

  /// The x range covering every bar edge, padded by one bar width per side.
  pub fn x_extent(&self) -> Range<f64> {
    let half = self.bar_width / 2.0;
    let lo = self
      .bar_positions
      .first()
      .or(self.tick_positions.first())
      .copied()
      .unwrap_or(0.0);
    let hi = self
      .bar_positions
      .last()
      .or(self.tick_positions.last())
      .copied()
      .unwrap_or(0.0);
    (lo - half - self.bar_width)..(hi + half + self.bar_width)
  }
}

/// Bar centers and group tick positions for a grouped bar chart.
pub fn compute_positions(
  num_precisions: usize,
  num_libraries: usize,
  bar_width: f64,
) -> (Vec<f64>, Vec<f64>) {
  let layout = GroupLayout::compute(num_precisions, num_libraries, bar_width);
  (layout.bar_positions, layout.tick_positions)
}
