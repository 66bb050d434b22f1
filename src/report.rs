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
use crate::aggregate::aggregate;
use crate::config::Config;
use crate::config::Settings;
use crate::error::GraphError;
use crate::parser::parse;
use crate::render::FigureSink;
use crate::view::all_figures;
use std::fs;
use std::io;
use std::io::IsTerminal;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

/// Result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// No bench line was found; nothing was written.
  NoData,
  /// Every artifact was written, in render order.
  Written {
    output_dir: PathBuf,
    artifacts: Vec<PathBuf>,
  },
}

/// Reads the whole benchmark log from `input`, or from stdin when `None`.
pub fn read_input(input: Option<&Path>) -> Result<String, GraphError> {
  match input {
    Some(path) => fs::read_to_string(path).map_err(|source| GraphError::ReadInput {
      path: path.to_path_buf(),
      source,
    }),
    None => {
      let mut stdin = io::stdin();
      if stdin.is_terminal() {
        eprintln!("Please paste your benchmark data (press Ctrl+D when done):");
      }
      let mut raw = String::new();
      stdin
        .read_to_string(&mut raw)
        .map_err(GraphError::ReadStdin)?;
      Ok(raw)
    }
  }
}

/// Parses `raw`, then writes every figure into the configured output directory.
///
/// The directory is only created once at least one record was parsed. The
/// first failed write aborts the remaining renders.
pub fn generate<S: FigureSink>(
  raw: &str,
  settings: &Settings,
  sink: &mut S,
) -> Result<Outcome, GraphError> {
  let records = parse(raw);
  if records.is_empty() {
    tracing::info!("No bench lines found in input");
    return Ok(Outcome::NoData);
  }
  tracing::info!(records = records.len(), "Parsed benchmark records");

  let table = aggregate(&records);

  let output_dir = settings.output_dir.clone();
  fs::create_dir_all(&output_dir).map_err(|source| GraphError::CreateOutputDir {
    path: output_dir.clone(),
    source,
  })?;

  let mut artifacts = Vec::new();
  for figure in all_figures(&table, settings) {
    let path = output_dir.join(&figure.file_name);
    let _span = tracing::info_span!("render", artifact = %figure.file_name).entered();

    sink.write(&figure, &path)?;

    tracing::info!(path = %path.display(), panels = figure.panels.len(), "Wrote chart");
    artifacts.push(path);
  }

  Ok(Outcome::Written {
    output_dir,
    artifacts,
  })
}

/// Runs the whole pipeline for a resolved [`Config`].
pub fn run<S: FigureSink>(config: &Config, sink: &mut S) -> Result<Outcome, GraphError> {
  let raw = read_input(config.input.as_deref())?;
  generate(&raw, &config.settings, sink)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::view::Figure;
  use tempfile::tempdir;

  const SAMPLE: &str = "\
running 3 tests
test f32::add_rug ... bench: 12 ns/iter
test f32::add_softfloat_sys ... bench: 1,500 ns/iter
test f64::add_rug ... bench: 20 ns/iter

test result: ok. 0 passed; 0 failed; 0 ignored; 3 measured
";

  /// Records what would have been written; optionally fails after `fail_after` writes.
  #[derive(Default)]
  struct RecordingSink {
    written: Vec<(String, PathBuf)>,
    fail_after: Option<usize>,
  }

  impl FigureSink for RecordingSink {
    fn write(&mut self, figure: &Figure, path: &Path) -> Result<(), GraphError> {
      if self.fail_after == Some(self.written.len()) {
        return Err(GraphError::Render {
          path: path.to_path_buf(),
          source: "disk full".into(),
        });
      }
      self.written.push((figure.file_name.clone(), path.to_path_buf()));
      Ok(())
    }
  }

  fn settings_in(dir: &Path) -> Settings {
    Settings {
      output_dir: dir.join("graphs"),
      outlier_library: "softfloat_sys".to_string(),
      ..Settings::default()
    }
  }

  #[test]
  fn writes_every_artifact_into_the_output_dir() {
    let temp = tempdir().unwrap();
    let settings = settings_in(temp.path());
    let mut sink = RecordingSink::default();

    let outcome = generate(SAMPLE, &settings, &mut sink).unwrap();

    let names: Vec<_> = sink.written.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
      names,
      ["add_benchmark.png", "combined_benchmark.png", "zoomed_benchmark.png"]
    );
    assert!(settings.output_dir.is_dir());
    assert_eq!(
      outcome,
      Outcome::Written {
        output_dir: settings.output_dir.clone(),
        artifacts: sink.written.iter().map(|(_, path)| path.clone()).collect(),
      }
    );
  }

  #[test]
  fn no_records_means_no_output_dir() {
    let temp = tempdir().unwrap();
    let settings = settings_in(temp.path());
    let mut sink = RecordingSink::default();

    let outcome = generate("warning: nothing to see here\n", &settings, &mut sink).unwrap();

    assert_eq!(outcome, Outcome::NoData);
    assert!(sink.written.is_empty());
    assert!(!settings.output_dir.exists());
  }

  #[test]
  fn first_failed_write_aborts_the_rest() {
    let temp = tempdir().unwrap();
    let settings = settings_in(temp.path());
    let mut sink = RecordingSink {
      fail_after: Some(1),
      ..RecordingSink::default()
    };

    let err = generate(SAMPLE, &settings, &mut sink).unwrap_err();

    assert!(matches!(err, GraphError::Render { .. }));
    assert_eq!(sink.written.len(), 1);
  }

  #[test]
  fn unwritable_output_dir_is_fatal() {
    let temp = tempdir().unwrap();
    let blocker = temp.path().join("graphs");
    fs::write(&blocker, "not a directory").unwrap();
    let mut sink = RecordingSink::default();

    let err = generate(SAMPLE, &settings_in(temp.path()), &mut sink).unwrap_err();

    assert!(matches!(err, GraphError::CreateOutputDir { .. }));
    assert!(sink.written.is_empty());
  }

  #[test]
  fn operation_names_cannot_leave_the_output_dir() {
    let temp = tempdir().unwrap();
    let settings = settings_in(temp.path());
    let mut sink = RecordingSink::default();

    let outcome = generate(
      "test f32::../escaped_rug ... bench: 12 ns/iter\n",
      &settings,
      &mut sink,
    )
    .unwrap();

    assert_eq!(outcome, Outcome::NoData);
    assert!(sink.written.is_empty());
    assert!(!temp.path().join("escaped_benchmark.png").exists());
  }

  #[test]
  fn reserved_operation_names_do_not_overwrite_combined_charts() {
    let temp = tempdir().unwrap();
    let settings = settings_in(temp.path());
    let mut sink = RecordingSink::default();

    generate(
      "test f32::combined_rug ... bench: 12 ns/iter\ntest f32::zoomed_rug ... bench: 9 ns/iter\n",
      &settings,
      &mut sink,
    )
    .unwrap();

    let mut paths: Vec<_> = sink.written.iter().map(|(_, path)| path.clone()).collect();
    assert!(paths.iter().all(|path| path.parent() == Some(settings.output_dir.as_path())));
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), 4);
  }

  #[test]
  fn missing_input_file_is_fatal() {
    let temp = tempdir().unwrap();
    let err = read_input(Some(temp.path().join("missing.txt").as_path())).unwrap_err();
    assert!(matches!(err, GraphError::ReadInput { .. }));
  }

  #[test]
  fn run_reads_the_configured_input_file() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("bench.txt");
    fs::write(&input, SAMPLE).unwrap();
    let config = Config {
      input: Some(input),
      settings: settings_in(temp.path()),
    };
    let mut sink = RecordingSink::default();

    let outcome = run(&config, &mut sink).unwrap();

    assert!(matches!(outcome, Outcome::Written { ref artifacts, .. } if artifacts.len() == 3));
  }
}
