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
use crate::cli::Cli;
use crate::error::ConfigError;
use figment::Figment;
use figment::providers::Env;
use figment::providers::Format;
use figment::providers::Json;
use figment::providers::Serialized;
use serde::Deserialize;
use serde::Serialize;
use std::path::PathBuf;

/// Optional settings file, looked up in the working directory.
pub const CONFIG_FILE: &str = "bench-graph.json";

/// Prefix of the environment variables that override settings.
pub const ENV_PREFIX: &str = "BENCH_GRAPH_";

// --- Default Values ---
fn default_output_dir() -> PathBuf {
  PathBuf::from("benchmark_graphs")
}

fn default_outlier_library() -> String {
  "simple_soft_float".to_string()
}

/// Rendering settings, layered from defaults, file, env, then CLI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
  /// Directory that receives the PNG artifacts.
  pub output_dir: PathBuf,
  /// Library left out of the zoomed view.
  pub outlier_library: String,
  /// Bar width for the per-operation and combined views.
  pub bar_width: f64,
  /// Bar width for the zoomed view.
  pub zoomed_bar_width: f64,
}

impl Default for Settings {
  fn default() -> Self {
    Settings {
      output_dir: default_output_dir(),
      outlier_library: default_outlier_library(),
      bar_width: 0.15,
      zoomed_bar_width: 0.18,
    }
  }
}

impl Settings {
  /// Defaults, then [`CONFIG_FILE`], then `BENCH_GRAPH_*` variables.
  pub fn figment() -> Figment {
    Figment::from(Serialized::defaults(Settings::default()))
      .merge(Json::file(CONFIG_FILE))
      .merge(Env::prefixed(ENV_PREFIX).ignore(&["log_file"]))
  }

  fn validate(self) -> Result<Self, ConfigError> {
    for (name, value) in [
      ("bar_width", self.bar_width),
      ("zoomed_bar_width", self.zoomed_bar_width),
    ] {
      if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidBarWidth { name, value });
      }
    }
    Ok(self)
  }
}

/// Flags that take precedence over every other settings layer.
#[derive(Debug, Default, Serialize)]
struct CliOverrides {
  #[serde(skip_serializing_if = "Option::is_none")]
  output_dir: Option<PathBuf>,
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  /// Benchmark log to read; stdin when `None`.
  pub input: Option<PathBuf>,
  pub settings: Settings,
}

impl TryFrom<Cli> for Config {
  type Error = ConfigError;

  fn try_from(Cli { input, output }: Cli) -> Result<Self, Self::Error> {
    let overrides = CliOverrides { output_dir: output };

    let settings: Settings = Settings::figment()
      .merge(Serialized::defaults(overrides))
      .extract()?;
    let settings = settings.validate()?;

    tracing::debug!(?settings, "Resolved settings");

    Ok(Config { input, settings })
  }
}
