//! Explicit list of benchmark logs feeding the combined view.
//!
//! A manifest is either discovered from a directory listing (file names
//! containing `knuth`/`naive` and the bit-size token) or written by hand as
//! TOML:
//!
//! ```toml
//! [[entry]]
//! family = "knuth"
//! size = "32"
//! path = "knuth_32"
//! ```

use crate::config::ScanConfig;
use crate::error::{Error, Result};
use crate::parser::{read_knuth_file, read_naive_file, NaiveFilter};
use crate::series::SeriesMap;
use crate::types::Family;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
	pub family: Family,
	/// Bit-size token the log was produced for, e.g. `"32"`.
	pub size: String,
	pub path: PathBuf,
}

impl ManifestEntry {
	pub fn new(family: Family, size: impl Into<String>, path: impl Into<PathBuf>) -> Self {
		Self { family, size: size.into(), path: path.into() }
	}
}

/// Entries in processing order; later entries win on key collisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
	#[serde(default, rename = "entry")]
	entries: Vec<ManifestEntry>,
}

impl Manifest {
	pub fn new() -> Self { Self::default() }
	pub fn entries(&self) -> &[ManifestEntry] { &self.entries }
	pub fn len(&self) -> usize { self.entries.len() }
	pub fn is_empty(&self) -> bool { self.entries.is_empty() }

	/// Scans `dir` for logs of one bit size. Knuth logs come first, then naive
	/// logs, each group sorted by file name. A name containing both family
	/// markers counts as Knuth.
	pub fn discover(dir: impl AsRef<Path>, bits: &str, scan: &ScanConfig) -> Result<Self> {
		let dir = dir.as_ref();
		let bits = bits.trim();
		if bits.is_empty() {
			return Err(Error::manifest("bit size token must not be empty"));
		}

		let mut knuth = Vec::new();
		let mut naive = Vec::new();
		for entry in fs::read_dir(dir).map_err(|e| Error::file(dir, e))? {
			let entry = entry?;
			let path = entry.path();
			if !path.is_file() { continue; }
			let Ok(name) = entry.file_name().into_string() else {
				trace!(path = %path.display(), "skipping non UTF-8 file name");
				continue;
			};
			if !name.contains(bits) || scan.is_excluded(&name) { continue; }
			if name.contains("knuth") {
				knuth.push(path);
			} else if name.contains("naive") {
				naive.push(path);
			}
		}
		knuth.sort();
		naive.sort();

		let entries: Vec<ManifestEntry> = knuth
			.into_iter()
			.map(|p| ManifestEntry::new(Family::Knuth, bits, p))
			.chain(naive.into_iter().map(|p| ManifestEntry::new(Family::Naive, bits, p)))
			.collect();
		if entries.is_empty() {
			return Err(Error::manifest(format!("no benchmark logs matching {bits:?} in {}", dir.display())));
		}
		debug!(dir = %dir.display(), bits, entries = entries.len(), "discovered benchmark logs");
		Ok(Self { entries })
	}

	pub fn from_toml_str(s: &str) -> Result<Self> {
		toml::from_str(s).map_err(|e| Error::manifest(format!("toml parse error: {e}")))
	}

	pub fn to_toml_string(&self) -> Result<String> {
		toml::to_string_pretty(self).map_err(|e| Error::manifest(format!("toml encode error: {e}")))
	}

	/// Reads a TOML manifest; relative entry paths resolve against its directory.
	pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let data = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
		let mut manifest = Self::from_toml_str(&data)?;
		if let Some(base) = path.parent() {
			for entry in &mut manifest.entries {
				if entry.path.is_relative() {
					entry.path = base.join(&entry.path);
				}
			}
		}
		Ok(manifest)
	}

	/// Entries produced for one bit size.
	pub fn for_size(&self, bits: &str) -> Self {
		let bits = bits.trim();
		Self { entries: self.entries.iter().filter(|e| e.size == bits).cloned().collect() }
	}

	/// Parses every entry in order and merges the results. Naive logs pass
	/// through `filter`.
	pub fn load(&self, filter: NaiveFilter) -> Result<SeriesMap> {
		if self.entries.is_empty() {
			return Err(Error::manifest("manifest has no entries"));
		}
		let mut data = SeriesMap::new();
		for entry in &self.entries {
			let part = match entry.family {
				Family::Knuth => read_knuth_file(&entry.path)?,
				Family::Naive => read_naive_file(&entry.path, Some(filter))?,
			};
			debug!(path = %entry.path.display(), family = %entry.family, groups = part.len(), "merging log");
			data.merge(part);
		}
		Ok(data)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn toml_round_trip_keeps_order() {
		let text = r#"
[[entry]]
family = "naive"
size = "32"
path = "a"

[[entry]]
family = "knuth"
size = "64"
path = "b"
"#;
		let m = Manifest::from_toml_str(text).unwrap();
		assert_eq!(m.len(), 2);
		assert_eq!(m.entries()[0].family, Family::Naive);
		assert_eq!(m.for_size("64").entries(), &[ManifestEntry::new(Family::Knuth, "64", "b")]);
		assert_eq!(Manifest::from_toml_str(&m.to_toml_string().unwrap()).unwrap(), m);
	}

	#[test]
	fn unknown_family_is_rejected() {
		let err = Manifest::from_toml_str("[[entry]]\nfamily = \"fast\"\nsize = \"1\"\npath = \"x\"\n").unwrap_err();
		assert!(matches!(err, Error::Manifest(_)));
	}

	#[test]
	fn empty_manifest_cannot_load() {
		assert!(Manifest::new().load(NaiveFilter::default()).is_err());
	}

	#[test]
	fn empty_bits_token_is_rejected() {
		assert!(Manifest::discover(".", "  ", &ScanConfig::default()).is_err());
	}
}
