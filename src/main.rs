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
use anyhow::Result;
use bench_graph::cli::Cli;
use bench_graph::config::Config;
use bench_graph::logging::setup_tracing;
use bench_graph::render::BitmapSink;
use bench_graph::report::Outcome;
use bench_graph::report::run;
use clap::Parser;

fn main() -> Result<()> {
  let _log_guard = setup_tracing()?;

  let cli = Cli::parse();
  let main_span = tracing::info_span!("bench_graph");
  let _enter = main_span.enter();

  let config = Config::try_from(cli)?;

  match run(&config, &mut BitmapSink)? {
    Outcome::NoData => println!("No valid benchmark data found"),
    Outcome::Written { output_dir, .. } => {
      println!("Visualizations saved to {}/ directory", output_dir.display());
    }
  }

  Ok(())
}
