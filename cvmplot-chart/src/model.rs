//! Backend-independent description of a chart.

use cvmplot_core::{GroupKey, SeriesMap, ThresholdCurve};

pub const DEFAULT_STROKE_WIDTH: u32 = 1;
/// Stroke of ε-δ series in the combined view.
pub const HEAVY_STROKE_WIDTH: u32 = 5;

pub const NAIVE_TITLE: &str = "Runtime vs. x for different ε-δ combinations";
pub const KNUTH_TITLE: &str = "Runtime vs. x for different buffersizes";
pub const COMBINED_TITLE: &str = "Knuth vs. Naive";
pub const THRESHOLD_TITLE: &str = "Number of Elements vs thresh";

pub const RUNTIME_X_DESC: &str = "Value of x";
pub const RUNTIME_Y_DESC: &str = "Runtime (ms)";

/// Canvas of the threshold chart (runtime charts take theirs from config).
pub const THRESHOLD_CANVAS: (u32, u32) = (1000, 600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
	Linear,
	Log,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
	pub desc: String,
	pub scale: Scale,
}

impl Axis {
	pub fn new(desc: impl Into<String>, scale: Scale) -> Self { Self { desc: desc.into(), scale } }

	/// Padded value range covering `values`. Non-finite values, and
	/// non-positive ones on a log axis, do not count.
	pub fn range<I: IntoIterator<Item = f64>>(&self, values: I) -> (f64, f64) {
		let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
		for v in values.into_iter().filter(|v| self.accepts(*v)) {
			lo = lo.min(v);
			hi = hi.max(v);
		}
		match self.scale {
			_ if lo > hi => match self.scale {
				Scale::Log => (1.0, 10.0),
				Scale::Linear => (0.0, 1.0),
			},
			Scale::Log if lo == hi => (lo / 2.0, hi * 2.0),
			Scale::Log => (lo / 1.2, hi * 1.2),
			Scale::Linear => {
				let pad = if lo == hi { lo.abs().max(1.0) * 0.1 } else { (hi - lo) * 0.05 };
				(lo - pad, hi + pad)
			}
		}
	}

	pub fn accepts(&self, v: f64) -> bool {
		v.is_finite() && (self.scale == Scale::Linear || v > 0.0)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSpec {
	pub label: String,
	pub points: Vec<(f64, f64)>,
	pub stroke_width: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
	pub title: String,
	pub x: Axis,
	pub y: Axis,
	pub lines: Vec<LineSpec>,
}

impl ChartSpec {
	/// One line per group, points ordered by x. With `emphasize_privacy`
	/// the ε-δ lines are drawn heavy so they stand out next to buffer sizes.
	pub fn runtime(title: impl Into<String>, data: &SeriesMap, emphasize_privacy: bool) -> Self {
		let lines = data
			.iter()
			.map(|(key, series)| LineSpec {
				label: key.label(),
				points: series.sorted().iter().map(|s| (s.x as f64, s.runtime_ms)).collect(),
				stroke_width: stroke_for(key, emphasize_privacy),
			})
			.collect();
		Self {
			title: title.into(),
			x: Axis::new(RUNTIME_X_DESC, Scale::Log),
			y: Axis::new(RUNTIME_Y_DESC, Scale::Log),
			lines,
		}
	}

	pub fn naive(data: &SeriesMap) -> Self { Self::runtime(NAIVE_TITLE, data, false) }
	pub fn knuth(data: &SeriesMap) -> Self { Self::runtime(KNUTH_TITLE, data, false) }
	pub fn combined(data: &SeriesMap) -> Self { Self::runtime(COMBINED_TITLE, data, true) }

	pub fn threshold(curve: &ThresholdCurve) -> crate::Result<Self> {
		Ok(Self {
			title: THRESHOLD_TITLE.into(),
			x: Axis::new("Number of Elements", Scale::Log),
			y: Axis::new("thresh", Scale::Linear),
			lines: vec![LineSpec { label: curve.label(), points: curve.samples()?, stroke_width: DEFAULT_STROKE_WIDTH }],
		})
	}

	pub fn x_range(&self) -> (f64, f64) {
		self.x.range(self.lines.iter().flat_map(|l| l.points.iter().map(|p| p.0)))
	}

	pub fn y_range(&self) -> (f64, f64) {
		self.y.range(self.lines.iter().flat_map(|l| l.points.iter().map(|p| p.1)))
	}

	/// Points of `line` that can be placed on this chart's axes.
	pub fn plottable(&self, line: &LineSpec) -> Vec<(f64, f64)> {
		line.points.iter().copied().filter(|(x, y)| self.x.accepts(*x) && self.y.accepts(*y)).collect()
	}

	pub fn is_empty(&self) -> bool { self.lines.iter().all(|l| l.points.is_empty()) }
}

fn stroke_for(key: &GroupKey, emphasize_privacy: bool) -> u32 {
	match key {
		GroupKey::EpsilonDelta { .. } if emphasize_privacy => HEAVY_STROKE_WIDTH,
		GroupKey::EpsilonDelta { .. } | GroupKey::BufferSize(_) => DEFAULT_STROKE_WIDTH,
	}
}
