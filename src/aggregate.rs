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
use crate::parser::BenchmarkRecord;
use std::collections::BTreeSet;
use std::collections::HashMap;

/// Table value for a combination that was never measured.
pub const ABSENT: f64 = 0.0;

/// Sorted, de-duplicated value sets of each record field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Universes {
  pub precisions: Vec<String>,
  pub operations: Vec<String>,
  pub libraries: Vec<String>,
}

impl Universes {
  /// Collects the universes from a record sequence.
  pub fn from_records(records: &[BenchmarkRecord]) -> Self {
    fn sorted_unique<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
      values.collect::<BTreeSet<_>>().into_iter().cloned().collect()
    }

    Universes {
      precisions: sorted_unique(records.iter().map(|r| &r.precision)),
      operations: sorted_unique(records.iter().map(|r| &r.operation)),
      libraries: sorted_unique(records.iter().map(|r| &r.library)),
    }
  }

  /// The library universe with `outlier` removed, order preserved.
  pub fn libraries_excluding(&self, outlier: &str) -> Vec<String> {
    self
      .libraries
      .iter()
      .filter(|library| library.as_str() != outlier)
      .cloned()
      .collect()
  }

  pub fn is_empty(&self) -> bool {
    self.operations.is_empty()
  }
}

/// Dense `(operation, precision, library) -> ns/iter` grid.
///
/// Every triple of the universes has exactly one cell. Unmeasured cells hold
/// [`ABSENT`].
#[derive(Debug, Clone, PartialEq)]
pub struct DenseTable {
  universes: Universes,
  cells: Vec<f64>,
}

impl DenseTable {
  pub fn universes(&self) -> &Universes {
    &self.universes
  }

  pub fn precisions(&self) -> &[String] {
    &self.universes.precisions
  }

  pub fn operations(&self) -> &[String] {
    &self.universes.operations
  }

  pub fn libraries(&self) -> &[String] {
    &self.universes.libraries
  }

  /// Number of cells; always the product of the three universe sizes.
  pub fn len(&self) -> usize {
    self.cells.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }

  /// Cell value by universe ranks. Panics if a rank is out of range.
  pub fn time_at(&self, operation: usize, precision: usize, library: usize) -> f64 {
    self.cells[self.index(operation, precision, library)]
  }

  /// Cell value by name, or `None` if a name is outside the universes.
  pub fn time(&self, operation: &str, precision: &str, library: &str) -> Option<f64> {
    let operation = rank(&self.universes.operations, operation)?;
    let precision = rank(&self.universes.precisions, precision)?;
    let library = rank(&self.universes.libraries, library)?;
    Some(self.time_at(operation, precision, library))
  }

  /// Rank of `library` in the library universe.
  pub fn library_rank(&self, library: &str) -> Option<usize> {
    rank(&self.universes.libraries, library)
  }

  fn index(&self, operation: usize, precision: usize, library: usize) -> usize {
    let precisions = self.universes.precisions.len();
    let libraries = self.universes.libraries.len();
    (operation * precisions + precision) * libraries + library
  }
}

fn rank(universe: &[String], value: &str) -> Option<usize> {
  universe
    .binary_search_by(|probe| probe.as_str().cmp(value))
    .ok()
}

/// Builds the dense table for a record sequence.
///
/// When several records share a key, the first one in input order wins and
/// the rest are ignored.
pub fn aggregate(records: &[BenchmarkRecord]) -> DenseTable {
  let universes = Universes::from_records(records);

  let mut first_seen: HashMap<(&str, &str, &str), f64> = HashMap::with_capacity(records.len());
  for record in records {
    let key = (
      record.operation.as_str(),
      record.precision.as_str(),
      record.library.as_str(),
    );
    if first_seen.contains_key(&key) {
      tracing::debug!(
        operation = %record.operation,
        precision = %record.precision,
        library = %record.library,
        ignored = record.time_ns,
        "Duplicate benchmark key; keeping the first measurement"
      );
      continue;
    }
    first_seen.insert(key, record.time_ns);
  }

  let mut cells = Vec::with_capacity(
    universes.operations.len() * universes.precisions.len() * universes.libraries.len(),
  );
  for operation in &universes.operations {
    for precision in &universes.precisions {
      for library in &universes.libraries {
        let key = (operation.as_str(), precision.as_str(), library.as_str());
        cells.push(first_seen.get(&key).copied().unwrap_or(ABSENT));
      }
    }
  }

  tracing::info!(
    precisions = universes.precisions.len(),
    operations = universes.operations.len(),
    libraries = universes.libraries.len(),
    "Aggregated benchmark table"
  );

  DenseTable { universes, cells }
}
