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
use plotters::style::RGBColor;

/// Fixed colors for the libraries usually compared, in legend order.
const LIBRARY_COLORS: &[(&str, RGBColor)] = &[
  ("rug", RGBColor(0x1f, 0x77, 0xb4)),
  ("rustc_apfloat", RGBColor(0xff, 0x7f, 0x0e)),
  ("simple_soft_float", RGBColor(0x2c, 0xa0, 0x2c)),
  ("softfloat_sys", RGBColor(0xd6, 0x27, 0x28)),
  ("softfloat_pure", RGBColor(0x94, 0x67, 0xbd)),
  ("const_soft_float", RGBColor(0x8c, 0x56, 0x4b)),
];

/// Ten-color category cycle for libraries without a fixed color.
const FALLBACK_CYCLE: &[RGBColor] = &[
  RGBColor(0x1f, 0x77, 0xb4),
  RGBColor(0xff, 0x7f, 0x0e),
  RGBColor(0x2c, 0xa0, 0x2c),
  RGBColor(0xd6, 0x27, 0x28),
  RGBColor(0x94, 0x67, 0xbd),
  RGBColor(0x8c, 0x56, 0x4b),
  RGBColor(0xe3, 0x77, 0xc2),
  RGBColor(0x7f, 0x7f, 0x7f),
  RGBColor(0xbc, 0xbd, 0x22),
  RGBColor(0x17, 0xbe, 0xcf),
];

/// Color for `library`, falling back to the cycle entry at its legend `rank`.
pub fn library_color(library: &str, rank: usize) -> RGBColor {
  LIBRARY_COLORS
    .iter()
    .find(|(name, _)| *name == library)
    .map(|(_, color)| *color)
    .unwrap_or(FALLBACK_CYCLE[rank % FALLBACK_CYCLE.len()])
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_libraries_ignore_rank() {
    assert_eq!(library_color("softfloat_sys", 0), RGBColor(0xd6, 0x27, 0x28));
    assert_eq!(library_color("softfloat_sys", 7), RGBColor(0xd6, 0x27, 0x28));
  }

  #[test]
  fn unknown_libraries_cycle_by_rank() {
    assert_eq!(library_color("mystery", 1), FALLBACK_CYCLE[1]);
    assert_eq!(library_color("mystery", 11), FALLBACK_CYCLE[1]);
  }
}
