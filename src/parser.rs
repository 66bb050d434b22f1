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
use crate::error::ParseError;
use regex::Regex;
use std::sync::LazyLock;

/// Matches one libtest bench line, e.g.
/// `test f32::add_softfloat_sys ... bench:       1,500 ns/iter (+/- 12)`.
///
/// The precision is everything before the first `::`. Any intermediate path
/// segments are skipped, and the last segment splits on its first `_` into
/// operation and library. Operations name output files, so they never
/// contain path separators.
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^test\s+([^:\s]+)::(?:\S*::)?([^_:\s/\\]+)_([^:\s]+)\s+\.\.\. bench:\s+([\d,.]+) ns/iter",
  )
  .expect("benchmark line pattern is a valid regex")
});

/// A single measurement parsed from a bench line.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
  pub precision: String,
  pub operation: String,
  pub library: String,
  pub time_ns: f64,
}

/// Parses raw benchmark output into records, in input order.
///
/// Lines that do not match the bench grammar are skipped. A line that matches
/// but carries an unparseable number is dropped with a warning; it never
/// aborts the rest of the batch.
pub fn parse(raw: &str) -> Vec<BenchmarkRecord> {
  let mut records = Vec::new();

  for (index, line) in raw.lines().enumerate() {
    match parse_line(line) {
      Ok(Some(record)) => records.push(record),
      Ok(None) => {}
      Err(e) => {
        tracing::warn!(line_no = index + 1, ?line, error = %e, "Dropping malformed bench line");
      }
    }
  }

  records
}

/// Parses one line. `Ok(None)` means the line is not a bench line at all.
pub fn parse_line(line: &str) -> Result<Option<BenchmarkRecord>, ParseError> {
  let Some(caps) = LINE_PATTERN.captures(line) else {
    return Ok(None);
  };

  let time_ns = parse_time(&caps[4])?;

  Ok(Some(BenchmarkRecord {
    precision: caps[1].to_string(),
    operation: caps[2].to_string(),
    library: caps[3].to_string(),
    time_ns,
  }))
}

/// Strips digit-grouping commas and parses the rest as `f64`.
fn parse_time(token: &str) -> Result<f64, ParseError> {
  token
    .replace(',', "")
    .parse::<f64>()
    .map_err(|source| ParseError::Number {
      token: token.to_string(),
      source,
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(precision: &str, operation: &str, library: &str, time_ns: f64) -> BenchmarkRecord {
    BenchmarkRecord {
      precision: precision.to_string(),
      operation: operation.to_string(),
      library: library.to_string(),
      time_ns,
    }
  }

  #[test]
  fn scoped_path_takes_last_segment_as_operation() {
    let parsed = parse_line("test A::B::op_lib ... bench: 1,234 ns/iter").unwrap();
    assert_eq!(parsed, Some(record("A", "op", "lib", 1234.0)));
  }

  #[test]
  fn library_keeps_everything_after_first_underscore() {
    let parsed = parse_line("test f32::add_softfloat_sys ... bench:       1,500 ns/iter (+/- 31)")
      .unwrap()
      .unwrap();
    assert_eq!(parsed.operation, "add");
    assert_eq!(parsed.library, "softfloat_sys");
    assert_eq!(parsed.time_ns, 1500.0);
  }

  #[test]
  fn fractional_times_are_kept() {
    let parsed = parse_line("test f64::mul_rug ... bench:          12.75 ns/iter (+/- 0.20)")
      .unwrap()
      .unwrap();
    assert_eq!(parsed.time_ns, 12.75);
  }

  #[test]
  fn non_bench_lines_are_skipped() {
    for line in [
      "",
      "running 12 tests",
      "warning: unused variable: `x`",
      "test f32::add_rug ... ok",
      "test f32::add_rug ... bench: 12",
      "test f32::add ... bench: 12 ns/iter",
      "test f32::../escaped_rug ... bench: 12 ns/iter",
      r"test f32::..\escaped_rug ... bench: 12 ns/iter",
      "test f32::sub/dir_rug ... bench: 12 ns/iter",
      "test result: ok. 0 passed; 0 failed; 0 ignored; 12 measured",
    ] {
      assert_eq!(parse_line(line).unwrap(), None, "line {line:?} should not match");
    }
  }

  #[test]
  fn malformed_number_is_an_error_for_the_line() {
    let err = parse_line("test f32::add_rug ... bench: 1.2.3 ns/iter").unwrap_err();
    assert!(err.to_string().contains("1.2.3"));
  }

  #[test]
  fn bad_lines_do_not_abort_the_batch() {
    let raw = "\
test f32::add_rug ... bench: 12 ns/iter
garbage line
test f32::add_rug ... bench: 1.2.3 ns/iter
test f64::add_rug ... bench: 20 ns/iter
";
    assert_eq!(
      parse(raw),
      vec![record("f32", "add", "rug", 12.0), record("f64", "add", "rug", 20.0)]
    );
  }

  #[test]
  fn empty_input_yields_no_records() {
    assert!(parse("").is_empty());
    assert!(parse("\n\n   \n").is_empty());
  }
}
