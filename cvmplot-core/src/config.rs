use crate::error::{Error, Result};
use crate::parser::NaiveFilter;
use crate::threshold::ThresholdCurve;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::{Path, PathBuf}};
use tracing::debug;

/// File name looked up in the working directory and the user config dir.
pub const CONFIG_FILE_NAME: &str = "cvmplot.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const MIN_CANVAS: u32 = 200;
const MAX_CANVAS: u32 = 20_000;

/// Directory-scan rules for the combined view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
	/// File names ending with any of these are never treated as logs.
	pub exclude_suffixes: Vec<String>,
}

impl Default for ScanConfig {
	fn default() -> Self {
		Self { exclude_suffixes: vec!["pdf".into(), "svg".into()] }
	}
}

impl ScanConfig {
	pub fn is_excluded(&self, name: &str) -> bool {
		self.exclude_suffixes.iter().any(|s| name.ends_with(s.as_str()))
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlotConfig {
	pub log_level: String,
	/// Canvas size in pixels of runtime charts.
	pub width: u32,
	pub height: u32,
	/// Where charts go when no explicit output path is given.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub output_dir: Option<PathBuf>,
	/// Epsilon/delta pair kept from naive logs in the combined view.
	pub naive_filter: NaiveFilter,
	pub scan: ScanConfig,
	pub threshold: ThresholdCurve,
}

impl Default for PlotConfig {
	fn default() -> Self {
		Self {
			log_level: "info".into(),
			width: 1400,
			height: 800,
			output_dir: None,
			naive_filter: NaiveFilter::default(),
			scan: ScanConfig::default(),
			threshold: ThresholdCurve::default(),
		}
	}
}

impl PlotConfig {
	pub fn builder() -> PlotConfigBuilder { PlotConfigBuilder::default() }

	pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let data = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
		Self::from_toml_str(&data)
	}

	pub fn from_toml_str(s: &str) -> Result<Self> {
		let cfg: Self = toml::from_str(s).map_err(|e| Error::config(format!("toml parse error: {e}")))?;
		cfg.validate()?;
		Ok(cfg)
	}

	pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
		let path = path.as_ref();
		let data = toml::to_string_pretty(self).map_err(|e| Error::config(format!("toml encode error: {e}")))?;
		fs::write(path, data).map_err(|e| Error::file(path, e))
	}

	pub fn from_env() -> Result<Self> {
		let mut cfg = Self::default();
		cfg.apply_env()?;
		Ok(cfg)
	}

	/// Overrides fields from `CVMPLOT_*` environment variables, then validates.
	pub fn apply_env(&mut self) -> Result<()> {
		if let Ok(v) = env::var("CVMPLOT_LOG_LEVEL") { self.log_level = v.trim().to_ascii_lowercase(); }
		if let Ok(v) = env::var("CVMPLOT_OUTPUT_DIR") {
			let v = v.trim();
			self.output_dir = if v.is_empty() { None } else { Some(PathBuf::from(v)) };
		}
		if let Ok(v) = env::var("CVMPLOT_WIDTH") { self.width = parse_env_u32("CVMPLOT_WIDTH", &v)?; }
		if let Ok(v) = env::var("CVMPLOT_HEIGHT") { self.height = parse_env_u32("CVMPLOT_HEIGHT", &v)?; }
		self.validate()
	}

	pub fn validate(&self) -> Result<()> {
		if !LOG_LEVELS.contains(&self.log_level.as_str()) {
			return Err(Error::config(format!("invalid log_level: {}", self.log_level)));
		}
		for (name, v) in [("width", self.width), ("height", self.height)] {
			if !(MIN_CANVAS..=MAX_CANVAS).contains(&v) {
				return Err(Error::config(format!("invalid {name}: {v} (allowed {MIN_CANVAS}..={MAX_CANVAS})")));
			}
		}
		if self.scan.exclude_suffixes.iter().any(|s| s.is_empty()) {
			return Err(Error::config("scan.exclude_suffixes must not contain empty strings"));
		}
		self.threshold.validate()
	}

	/// Search order: `$CVMPLOT_CONFIG` -> `./cvmplot.toml` -> platform config dir.
	pub fn candidate_paths() -> Vec<PathBuf> {
		let mut out = Vec::new();
		if let Ok(p) = env::var("CVMPLOT_CONFIG") {
			if !p.trim().is_empty() { out.push(PathBuf::from(p)); }
		}
		out.push(PathBuf::from(CONFIG_FILE_NAME));
		if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
			out.push(PathBuf::from(xdg).join("cvmplot").join(CONFIG_FILE_NAME));
		}
		if let Ok(home) = env::var("HOME") {
			out.push(PathBuf::from(home).join(".config").join("cvmplot").join(CONFIG_FILE_NAME));
		}
		out
	}

	/// Loads the first existing candidate file (or defaults) and applies env overrides.
	/// Returns the file that was used, if any.
	pub fn discover() -> Result<(Self, Option<PathBuf>)> {
		let found = Self::candidate_paths().into_iter().find(|p| p.is_file());
		let mut cfg = match &found {
			Some(path) => {
				debug!(path = %path.display(), "loading config");
				Self::load_from_file(path)?
			}
			None => Self::default(),
		};
		cfg.apply_env()?;
		Ok((cfg, found))
	}
}

fn parse_env_u32(name: &str, v: &str) -> Result<u32> {
	v.trim().parse().map_err(|_| Error::config(format!("{name} must be a positive integer, got {v:?}")))
}

#[derive(Debug, Default)]
pub struct PlotConfigBuilder {
	cfg: PlotConfig,
}

impl PlotConfigBuilder {
	pub fn log_level(mut self, level: impl Into<String>) -> Self { self.cfg.log_level = level.into(); self }
	pub fn size(mut self, width: u32, height: u32) -> Self { self.cfg.width = width; self.cfg.height = height; self }
	pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self { self.cfg.output_dir = Some(dir.into()); self }
	pub fn naive_filter(mut self, filter: NaiveFilter) -> Self { self.cfg.naive_filter = filter; self }
	pub fn exclude_suffixes<I, S>(mut self, suffixes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.cfg.scan.exclude_suffixes = suffixes.into_iter().map(Into::into).collect();
		self
	}
	pub fn threshold(mut self, curve: ThresholdCurve) -> Self { self.cfg.threshold = curve; self }

	pub fn build(self) -> Result<PlotConfig> {
		self.cfg.validate()?;
		Ok(self.cfg)
	}
}
