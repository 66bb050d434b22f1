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

//! # bench-graph
//!
//! `bench-graph` turns the text output of Rust micro-benchmarks
//! (`test <precision>::<operation>_<library> ... bench: N ns/iter`) into
//! comparative bar charts, one per operation plus two combined views.
//!
//! This crate contains the library logic for the `bench-graph` CLI; its
//! core modules (`parser`, `aggregate`, `layout`, `view`) are pure and can
//! be used independently of any rendering.
//!
//! ## Core Modules
//!
//! * [`parser`]: Turns raw log text into [`parser::BenchmarkRecord`]s,
//!   skipping every line that is not a bench line.
//! * [`aggregate`]: Builds the dense `(operation, precision, library)`
//!   table, keeping the first measurement for duplicated keys.
//! * [`layout`]: Computes bar and tick positions of a grouped bar chart.
//! * [`view`]: Builds the per-operation, combined and zoomed figures.
//! * [`render`]: Draws figures to PNG via `plotters`.
//! * [`report`]: Runs the whole pipeline from input text to artifacts.
//! * [`palette`]: Library colors.
//! * [`config`]: Layered settings resolution with `figment`.
//! * [`cli`]: Defines the `clap`-based command-line interface.
//! * [`error`]: Defines the custom error types for the library.
//! * [`logging`]: Provides the `setup_tracing` utility.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod palette;
pub mod parser;
pub mod render;
pub mod report;
pub mod view;
