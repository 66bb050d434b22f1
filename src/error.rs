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
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a run (src/report.rs, src/render.rs).
#[derive(Error, Debug)]
pub enum GraphError {
  #[error("Failed to read benchmark data from {path}")]
  ReadInput {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to read benchmark data from stdin")]
  ReadStdin(#[source] std::io::Error),

  #[error("Failed to create output directory: {path}")]
  CreateOutputDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to render {path}")]
  Render {
    path: PathBuf,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

/// Errors related to settings resolution (src/config.rs).
#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Failed to load settings: {0}")]
  Extract(#[from] figment::Error),

  #[error("Setting `{name}` must be a positive, finite number, got {value}")]
  InvalidBarWidth { name: &'static str, value: f64 },
}

/// Per-line errors from the bench line parser (src/parser.rs).
#[derive(Error, Debug)]
pub enum ParseError {
  #[error("Failed to parse time '{token}'")]
  Number {
    token: String,
    #[source]
    source: std::num::ParseFloatError,
  },
}
