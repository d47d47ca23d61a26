//! CVM buffer threshold `(12/ε²)·ln(8x/δ)` over a log-spaced domain.

use crate::error::{Error, Result};
use crate::types::format_param;
use serde::{Deserialize, Serialize};

/// Lower end of the plotted domain; keeps `8x/δ` above zero.
pub const X_MIN: f64 = 1.0;

pub fn threshold(x: f64, epsilon: f64, delta: f64) -> f64 {
	(12.0 / (epsilon * epsilon)) * (8.0 * x / delta).ln()
}

/// `n` values evenly spaced in log10 space; the endpoints are exact.
pub fn log_space(start: f64, end: f64, n: usize) -> Vec<f64> {
	match n {
		0 => Vec::new(),
		1 => vec![start],
		_ => {
			let (a, b) = (start.log10(), end.log10());
			let step = (b - a) / (n - 1) as f64;
			let mut out: Vec<f64> = (0..n).map(|i| 10f64.powf(a + step * i as f64)).collect();
			out[0] = start;
			out[n - 1] = end;
			out
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdCurve {
	pub epsilon: f64,
	pub delta: f64,
	pub points: usize,
	pub x_max: f64,
}

impl Default for ThresholdCurve {
	fn default() -> Self {
		Self { epsilon: 0.5, delta: 0.01, points: 1000, x_max: 1e7 }
	}
}

impl ThresholdCurve {
	pub fn validate(&self) -> Result<()> {
		if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
			return Err(Error::config(format!("invalid threshold epsilon: {}", self.epsilon)));
		}
		if !(self.delta.is_finite() && self.delta > 0.0) {
			return Err(Error::config(format!("invalid threshold delta: {}", self.delta)));
		}
		if self.points < 2 {
			return Err(Error::config(format!("threshold needs at least 2 points, got {}", self.points)));
		}
		if !(self.x_max.is_finite() && self.x_max > X_MIN) {
			return Err(Error::config(format!("invalid threshold x_max: {}", self.x_max)));
		}
		Ok(())
	}

	/// `(x, threshold(x))` pairs from [`X_MIN`] to `x_max`.
	pub fn samples(&self) -> Result<Vec<(f64, f64)>> {
		self.validate()?;
		Ok(log_space(X_MIN, self.x_max, self.points)
			.into_iter()
			.map(|x| (x, threshold(x, self.epsilon, self.delta)))
			.collect())
	}

	pub fn label(&self) -> String {
		format!("ε={}, δ={}", format_param(self.epsilon), format_param(self.delta))
	}
}
