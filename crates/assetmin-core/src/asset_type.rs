//! Asset type enumeration

use crate::error::AssetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Kind of asset being combined.
///
/// The type decides the response mime type, the file extension of sources and
/// cache entries, and which minifier runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
	/// JavaScript
	#[serde(alias = "javascript")]
	Js,
	/// Cascading style sheets
	Css,
}

impl AssetType {
	/// Mime type sent in the `Content-Type` header
	///
	/// # Examples
	///
	/// ```rust
	/// use assetmin_core::AssetType;
	///
	/// assert_eq!(AssetType::Css.mime_type(), "text/css; charset=utf-8");
	/// ```
	pub fn mime_type(self) -> &'static str {
		match self {
			AssetType::Js => "application/x-javascript; charset=utf-8",
			AssetType::Css => "text/css; charset=utf-8",
		}
	}

	/// File extension (without dot) of sources and cache entries
	pub fn extension(self) -> &'static str {
		match self {
			AssetType::Js => "js",
			AssetType::Css => "css",
		}
	}

	/// Checks whether a path carries this type's extension (case-insensitive)
	///
	/// # Examples
	///
	/// ```rust
	/// use assetmin_core::AssetType;
	/// use std::path::Path;
	///
	/// assert!(AssetType::Js.matches_extension(Path::new("app.JS")));
	/// assert!(!AssetType::Js.matches_extension(Path::new("app.css")));
	/// ```
	pub fn matches_extension(self, path: &Path) -> bool {
		path.extension()
			.and_then(|ext| ext.to_str())
			.map(|ext| ext.eq_ignore_ascii_case(self.extension()))
			.unwrap_or(false)
	}
}

impl FromStr for AssetType {
	type Err = AssetError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"js" | "javascript" => Ok(AssetType::Js),
			"css" => Ok(AssetType::Css),
			_ => Err(AssetError::UnknownAssetType(s.to_string())),
		}
	}
}

impl fmt::Display for AssetType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.extension())
	}
}
