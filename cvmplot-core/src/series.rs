//! Runtime samples grouped by [`GroupKey`].

use crate::key::GroupKey;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{btree_map, BTreeMap};

/// One benchmark measurement: input size and runtime after unit conversion.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Sample {
	pub x: u64,
	pub runtime_ms: f64,
}

impl Sample {
	pub fn new(x: u64, runtime_ms: f64) -> Self { Self { x, runtime_ms } }
}

/// Samples of one group in file order. Not sorted until [`Series::sorted`].
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Series {
	samples: Vec<Sample>,
}

impl Series {
	pub fn push(&mut self, sample: Sample) { self.samples.push(sample); }
	pub fn len(&self) -> usize { self.samples.len() }
	pub fn is_empty(&self) -> bool { self.samples.is_empty() }
	pub fn samples(&self) -> &[Sample] { &self.samples }

	/// Samples ordered by `x` ascending; equal `x` keep their file order.
	pub fn sorted(&self) -> Vec<Sample> {
		let mut out = self.samples.clone();
		out.sort_by_key(|s| s.x);
		out
	}
}

impl From<Vec<Sample>> for Series {
	fn from(samples: Vec<Sample>) -> Self { Self { samples } }
}

impl FromIterator<Sample> for Series {
	fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
		Self { samples: iter.into_iter().collect() }
	}
}

/// Ordered mapping from grouping key to series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesMap {
	groups: BTreeMap<GroupKey, Series>,
}

impl SeriesMap {
	pub fn new() -> Self { Self::default() }

	/// Appends `sample` to the series of `key`, creating it on first use.
	pub fn push(&mut self, key: GroupKey, sample: Sample) {
		self.groups.entry(key).or_default().push(sample);
	}

	pub fn get(&self, key: &GroupKey) -> Option<&Series> { self.groups.get(key) }
	pub fn contains_key(&self, key: &GroupKey) -> bool { self.groups.contains_key(key) }
	pub fn len(&self) -> usize { self.groups.len() }
	pub fn is_empty(&self) -> bool { self.groups.is_empty() }
	pub fn keys(&self) -> impl Iterator<Item = &GroupKey> { self.groups.keys() }
	pub fn iter(&self) -> btree_map::Iter<'_, GroupKey, Series> { self.groups.iter() }

	/// Total number of samples across all groups.
	pub fn total_samples(&self) -> usize { self.groups.values().map(Series::len).sum() }

	/// Merges a mapping read after this one. A key present in `later` has its
	/// series replaced wholesale, never concatenated.
	pub fn merge(&mut self, later: SeriesMap) {
		self.groups.extend(later.groups);
	}

	pub fn merged(mut self, later: SeriesMap) -> Self {
		self.merge(later);
		self
	}
}

impl FromIterator<(GroupKey, Series)> for SeriesMap {
	fn from_iter<I: IntoIterator<Item = (GroupKey, Series)>>(iter: I) -> Self {
		Self { groups: iter.into_iter().collect() }
	}
}

impl IntoIterator for SeriesMap {
	type Item = (GroupKey, Series);
	type IntoIter = btree_map::IntoIter<GroupKey, Series>;

	fn into_iter(self) -> Self::IntoIter { self.groups.into_iter() }
}

impl<'a> IntoIterator for &'a SeriesMap {
	type Item = (&'a GroupKey, &'a Series);
	type IntoIter = btree_map::Iter<'a, GroupKey, Series>;

	fn into_iter(self) -> Self::IntoIter { self.groups.iter() }
}

// JSON object keys must be strings, so groups are keyed by their label.
impl Serialize for SeriesMap {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.groups.len()))?;
		for (key, series) in &self.groups {
			map.serialize_entry(&key.label(), series)?;
		}
		map.end()
	}
}
