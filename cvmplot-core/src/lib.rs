#![forbid(unsafe_code)]
#![allow(missing_docs)]

//! Benchmark log parsing for CVM runtime plots.
//!
//! Logs written by the naive and Knuth CVM benchmarks are read into a
//! [`SeriesMap`], one [`Series`] per [`GroupKey`], ready for charting.

pub mod config;
pub mod error;
pub mod key;
pub mod manifest;
pub mod parser;
pub mod series;
pub mod threshold;
pub mod types;

pub use config::{PlotConfig, ScanConfig};
pub use error::{Error, LineError, Result};
pub use key::GroupKey;
pub use manifest::{Manifest, ManifestEntry};
pub use parser::{parse_line, read_file, read_knuth_file, read_naive_file, read_series, NaiveFilter, Record};
pub use series::{Sample, Series, SeriesMap};
pub use threshold::{log_space, threshold, ThresholdCurve};
pub use types::Family;
