//! Error types for config loading.
//!
//! Only structural failures are errors. A value that cannot be coerced is
//! logged and leaves its attribute untouched; it never reaches this type.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a whole load.
#[derive(Debug, Error)]
pub enum LoadError {
	/// Reading the config file failed part-way, or its bytes could not be
	/// decoded in the selected charset.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The config target could not be constructed.
	#[error("cannot construct config '{config}': {reason}")]
	Construct {
		/// Name of the config type.
		config: &'static str,
		/// Error returned by the constructor.
		reason: anyhow::Error,
	},
}

/// Result type for config loading.
pub type Result<T> = std::result::Result<T, LoadError>;
