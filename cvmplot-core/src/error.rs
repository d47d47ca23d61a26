use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	#[error("{}: {source}", path.display())]
	File {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("serde: {0}")]
	Serde(#[from] serde_json::Error),
	#[error("line {line}: {cause} in {content:?}")]
	Parse {
		line: usize,
		content: String,
		#[source]
		cause: LineError,
	},
	#[error("config: {0}")]
	Config(String),
	#[error("manifest: {0}")]
	Manifest(String),
}

impl Error {
	pub fn config(msg: impl Into<String>) -> Self { Self::Config(msg.into()) }
	pub fn manifest(msg: impl Into<String>) -> Self { Self::Manifest(msg.into()) }

	pub fn parse(line: usize, content: &str, cause: LineError) -> Self {
		Self::Parse { line, content: content.to_string(), cause }
	}

	pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::File { path: path.into(), source }
	}

	/// 1-based line number of a parse failure.
	pub fn line(&self) -> Option<usize> {
		match self {
			Self::Parse { line, .. } => Some(*line),
			_ => None,
		}
	}
}

/// Why a single benchmark log line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
	#[error("missing runtime column")]
	MissingRuntime,
	#[error("expected {expected} '/'-separated fields, found {found}")]
	Arity { expected: usize, found: usize },
	#[error("invalid integer {value:?} for {field}")]
	Field { field: &'static str, value: String },
	#[error("invalid runtime {0:?}")]
	Runtime(String),
}
