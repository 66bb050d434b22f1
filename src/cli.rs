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
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
  version,
  about = "Generate comparative bar charts from Rust benchmark output"
)]
pub struct Cli {
  /// Input file with benchmark data. Reads stdin until end-of-input when omitted.
  #[arg(long)]
  pub input: Option<PathBuf>,

  /// Output directory for graphs (default: benchmark_graphs).
  #[arg(long)]
  pub output: Option<PathBuf>,
}
