use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Divisor applied to benchmark runtimes (nanoseconds) before plotting.
pub const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Naive logs store epsilon in tenths.
pub const EPSILON_DIVISOR: f64 = 10.0;

/// Naive logs store delta in ten-thousandths.
pub const DELTA_FACTOR: f64 = 0.0001;

/// Raw epsilon kept by the default naive filter (ε = 0.5).
pub const DEFAULT_FILTER_EPSILON: u64 = 5;

/// Raw delta kept by the default naive filter (δ = 0.01).
pub const DEFAULT_FILTER_DELTA: u64 = 100;

/// Benchmarked algorithm family; selects the composite key schema of a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
	/// `x/epsilon/delta runtime_ns`
	Naive,
	/// `x/s runtime_ns`
	Knuth,
}

impl Family {
	/// Names of the '/'-separated composite fields, in order.
	pub fn fields(self) -> &'static [&'static str] {
		match self {
			Family::Naive => &["x", "epsilon", "delta"],
			Family::Knuth => &["x", "s"],
		}
	}

	pub fn arity(self) -> usize { self.fields().len() }

	pub fn as_str(self) -> &'static str {
		match self {
			Family::Naive => "naive",
			Family::Knuth => "knuth",
		}
	}
}

impl fmt::Display for Family {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Family {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"naive" => Ok(Family::Naive),
			"knuth" => Ok(Family::Knuth),
			other => Err(format!("unknown family: {other} (expected naive or knuth)")),
		}
	}
}

/// Formats a float the way the benchmark plots label it: integral values keep one decimal.
pub fn format_param(v: f64) -> String {
	if v.is_finite() && v.fract() == 0.0 {
		format!("{v:.1}")
	} else {
		format!("{v}")
	}
}
