//! Benchmark log reader.
//!
//! Each non-blank line is `x/p1[/p2] runtime_ns`. The composite fields are
//! unsigned integers; the runtime is divided by [`NANOS_PER_MILLI`]. Parsing
//! is strict: the first malformed line aborts the read with its line number.

use crate::error::{Error, LineError, Result};
use crate::key::GroupKey;
use crate::series::{Sample, SeriesMap};
use crate::types::{Family, DEFAULT_FILTER_DELTA, DEFAULT_FILTER_EPSILON, NANOS_PER_MILLI};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// A parsed line: where it goes and what it measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
	pub key: GroupKey,
	pub sample: Sample,
}

/// Keeps only naive records with one raw epsilon/delta pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaiveFilter {
	pub epsilon: u64,
	pub delta: u64,
}

impl Default for NaiveFilter {
	fn default() -> Self {
		Self { epsilon: DEFAULT_FILTER_EPSILON, delta: DEFAULT_FILTER_DELTA }
	}
}

impl NaiveFilter {
	pub fn new(epsilon: u64, delta: u64) -> Self { Self { epsilon, delta } }

	/// Knuth keys always pass.
	pub fn accepts(&self, key: &GroupKey) -> bool {
		match key {
			GroupKey::EpsilonDelta { epsilon_tenths, delta_ten_thousandths } => {
				*epsilon_tenths == self.epsilon && *delta_ten_thousandths == self.delta
			}
			GroupKey::BufferSize(_) => true,
		}
	}
}

/// Parses one line. Blank lines yield `Ok(None)`; tokens after the runtime are ignored.
pub fn parse_line(line: &str, family: Family) -> core::result::Result<Option<Record>, LineError> {
	let mut tokens = line.split_whitespace();
	let Some(composite) = tokens.next() else { return Ok(None) };

	let fields = family.fields();
	let parts: Vec<&str> = composite.split('/').collect();
	if parts.len() != fields.len() {
		return Err(LineError::Arity { expected: fields.len(), found: parts.len() });
	}
	let runtime = tokens.next().ok_or(LineError::MissingRuntime)?;
	let mut values = [0u64; 3];
	for (slot, (name, raw)) in values.iter_mut().zip(fields.iter().zip(&parts)) {
		*slot = raw.parse::<u64>().map_err(|_| LineError::Field { field: *name, value: raw.to_string() })?;
	}

	let runtime_ns = runtime
		.parse::<f64>()
		.ok()
		.filter(|v| v.is_finite())
		.ok_or_else(|| LineError::Runtime(runtime.to_string()))?;

	let key = match family {
		Family::Naive => GroupKey::epsilon_delta(values[1], values[2]),
		Family::Knuth => GroupKey::buffer_size(values[1]),
	};
	Ok(Some(Record { key, sample: Sample::new(values[0], runtime_ns / NANOS_PER_MILLI) }))
}

/// Reads a whole log, grouping samples by key. `filter` drops naive records
/// outside one epsilon/delta pair before they are stored.
pub fn read_series<R: BufRead>(reader: R, family: Family, filter: Option<NaiveFilter>) -> Result<SeriesMap> {
	let mut map = SeriesMap::new();
	let mut filtered = 0usize;
	for (idx, line) in reader.lines().enumerate() {
		let line = line?;
		let record = match parse_line(&line, family) {
			Ok(Some(r)) => r,
			Ok(None) => continue,
			Err(cause) => return Err(Error::parse(idx + 1, &line, cause)),
		};
		if filter.is_some_and(|f| !f.accepts(&record.key)) {
			filtered += 1;
			continue;
		}
		map.push(record.key, record.sample);
	}
	debug!(%family, groups = map.len(), samples = map.total_samples(), filtered, "parsed benchmark log");
	Ok(map)
}

pub fn read_file(path: impl AsRef<Path>, family: Family, filter: Option<NaiveFilter>) -> Result<SeriesMap> {
	let path = path.as_ref();
	let file = File::open(path).map_err(|e| Error::file(path, e))?;
	debug!(path = %path.display(), %family, "reading benchmark log");
	read_series(BufReader::new(file), family, filter)
}

pub fn read_naive_file(path: impl AsRef<Path>, filter: Option<NaiveFilter>) -> Result<SeriesMap> {
	read_file(path, Family::Naive, filter)
}

pub fn read_knuth_file(path: impl AsRef<Path>) -> Result<SeriesMap> {
	read_file(path, Family::Knuth, None)
}
