//! Grouping keys: one plotted series per key.

use crate::types::{format_param, Family, DELTA_FACTOR, EPSILON_DIVISOR};
use std::fmt;

/// Identifies one series. Naive and Knuth keys are distinct variants, so
/// merging data from both families can never collide across them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
	/// Knuth buffer size `s`.
	BufferSize(u64),
	/// Naive privacy parameters, kept in their scaled integer log encoding.
	EpsilonDelta { epsilon_tenths: u64, delta_ten_thousandths: u64 },
}

impl GroupKey {
	pub fn buffer_size(s: u64) -> Self { Self::BufferSize(s) }

	pub fn epsilon_delta(epsilon_tenths: u64, delta_ten_thousandths: u64) -> Self {
		Self::EpsilonDelta { epsilon_tenths, delta_ten_thousandths }
	}

	pub fn family(&self) -> Family {
		match self {
			Self::BufferSize(_) => Family::Knuth,
			Self::EpsilonDelta { .. } => Family::Naive,
		}
	}

	/// `epsilon / 10`, for naive keys.
	pub fn epsilon(&self) -> Option<f64> {
		match self {
			Self::EpsilonDelta { epsilon_tenths, .. } => Some(*epsilon_tenths as f64 / EPSILON_DIVISOR),
			Self::BufferSize(_) => None,
		}
	}

	/// `delta * 0.0001`, for naive keys.
	pub fn delta(&self) -> Option<f64> {
		match self {
			Self::EpsilonDelta { delta_ten_thousandths, .. } => Some(*delta_ten_thousandths as f64 * DELTA_FACTOR),
			Self::BufferSize(_) => None,
		}
	}

	pub fn label(&self) -> String { self.to_string() }
}

impl fmt::Display for GroupKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::BufferSize(s) => write!(f, "|B|={s}"),
			Self::EpsilonDelta { epsilon_tenths, delta_ten_thousandths } => write!(
				f,
				"ε={}, δ={}",
				format_param(*epsilon_tenths as f64 / EPSILON_DIVISOR),
				format_param(*delta_ten_thousandths as f64 * DELTA_FACTOR),
			),
		}
	}
}
