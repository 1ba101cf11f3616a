//! Error types shared across the assetmin pipeline.
//!
//! Every variant is fatal for the request that produced it. Nothing is retried
//! and there is no partial output.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving, building, caching or serving assets.
#[derive(Debug, Error)]
pub enum AssetError {
	/// A file reference could not be resolved to an existing file.
	#[error("could not determine absolute path for file `{reference}`; it probably does not exist")]
	FileNotFound {
		/// The reference as given by the caller
		reference: String,
	},

	/// A resolved source file could not be read.
	#[error("could not read file `{}`: {source}", path.display())]
	FileUnreadable {
		/// Absolute path of the file
		path: PathBuf,
		/// Underlying I/O error
		#[source]
		source: io::Error,
	},

	/// A cache artifact could not be written, replaced or removed.
	#[error("could not write cache file `{}`: {source}", path.display())]
	CacheWriteFailed {
		/// Path of the cache entry
		path: PathBuf,
		/// Underlying I/O error
		#[source]
		source: io::Error,
	},

	/// An existing cache artifact could not be read.
	#[error("could not read cache file `{}`: {source}", path.display())]
	CacheReadFailed {
		/// Path of the cache entry
		path: PathBuf,
		/// Underlying I/O error
		#[source]
		source: io::Error,
	},

	/// The cache directory does not exist and may not (or could not) be created.
	#[error("the cache directory `{}` does not exist or is inaccessible", path.display())]
	CacheDirUnavailable {
		/// The configured cache directory
		path: PathBuf,
	},

	/// The requested asset type is not known.
	#[error("unknown asset type `{0}`")]
	UnknownAssetType(String),

	/// The minifier rejected its input.
	#[error("could not minify `{}`: {message}", path.display())]
	MinifyFailed {
		/// File that was being minified
		path: PathBuf,
		/// Description of the problem
		message: String,
	},

	/// Invalid configuration input.
	#[error("invalid configuration: {0}")]
	Config(String),
}

impl From<toml::de::Error> for AssetError {
	fn from(err: toml::de::Error) -> Self {
		AssetError::Config(err.to_string())
	}
}

/// Result type used throughout assetmin.
pub type Result<T> = std::result::Result<T, AssetError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_file_not_found_names_reference() {
		let err = AssetError::FileNotFound {
			reference: "styles/missing.css".to_string(),
		};
		assert!(err.to_string().contains("styles/missing.css"));
	}

	#[rstest]
	fn test_cache_write_failed_keeps_source() {
		let err = AssetError::CacheWriteFailed {
			path: PathBuf::from("/tmp/assetmin/abc.css"),
			source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
		};
		assert!(err.to_string().contains("/tmp/assetmin/abc.css"));
		assert!(std::error::Error::source(&err).is_some());
	}

	#[rstest]
	fn test_toml_error_becomes_config_error() {
		let parsed: std::result::Result<toml::Table, _> = toml::from_str("minify = ");
		let err: AssetError = parsed.unwrap_err().into();
		assert!(matches!(err, AssetError::Config(_)));
	}
}
