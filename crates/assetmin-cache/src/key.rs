//! Cache keys

use assetmin_core::{AssetType, FileSet};
use md5::{Digest, Md5};
use std::fmt;

/// Name of a cached artifact inside the cache directory.
///
/// Derived from the ordered source paths, the asset type and the options
/// that change the output. Only hex digits, dots and an ASCII extension
/// appear in it, so it is always a safe file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
	/// Builds the key for a file set.
	///
	/// The MD5 digest of the `;`-joined paths is followed by `.min` when
	/// minifying, `.dbg` in debug mode, and the type's extension.
	///
	/// # Examples
	///
	/// ```rust
	/// use assetmin_cache::CacheKey;
	/// use assetmin_core::{AssetType, FileSet};
	///
	/// let files = FileSet::from_canonical(vec!["/srv/a.css".into(), "/srv/b.css".into()]);
	/// let key = CacheKey::new(&files, AssetType::Css, true, false);
	///
	/// assert!(key.as_str().ends_with(".min.css"));
	/// assert_eq!(key.as_str().len(), 32 + ".min.css".len());
	/// ```
	pub fn new(files: &FileSet, asset_type: AssetType, minify: bool, debug: bool) -> Self {
		let joined = files
			.iter()
			.map(|path| path.to_string_lossy())
			.collect::<Vec<_>>()
			.join(";");

		let mut key = hex::encode(Md5::digest(joined.as_bytes()));
		if minify {
			key.push_str(".min");
		}
		if debug {
			key.push_str(".dbg");
		}
		key.push('.');
		key.push_str(asset_type.extension());

		Self(key)
	}

	/// The key as a file name
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for CacheKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for CacheKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;
	use std::path::PathBuf;

	fn file_set(paths: &[&str]) -> FileSet {
		FileSet::from_canonical(paths.iter().map(PathBuf::from).collect())
	}

	#[rstest]
	#[case(true, false, AssetType::Css, "9e107d9d372bb6826bd81d3542a419d6.min.css")]
	#[case(false, true, AssetType::Js, "9e107d9d372bb6826bd81d3542a419d6.dbg.js")]
	#[case(true, true, AssetType::Js, "9e107d9d372bb6826bd81d3542a419d6.min.dbg.js")]
	#[case(false, false, AssetType::Css, "9e107d9d372bb6826bd81d3542a419d6.css")]
	fn test_key_format(
		#[case] minify: bool,
		#[case] debug: bool,
		#[case] asset_type: AssetType,
		#[case] expected: &str,
	) {
		let files = file_set(&["The quick brown fox jumps over the lazy dog"]);
		assert_eq!(CacheKey::new(&files, asset_type, minify, debug).as_str(), expected);
	}

	#[rstest]
	fn test_paths_are_joined_with_semicolons() {
		let joined = CacheKey::new(&file_set(&["/a;/b"]), AssetType::Js, false, false);
		let split = CacheKey::new(&file_set(&["/a", "/b"]), AssetType::Js, false, false);
		assert_eq!(joined, split);
	}

	#[rstest]
	fn test_key_is_stable() {
		let files = file_set(&["/srv/a.js", "/srv/b.js"]);
		assert_eq!(
			CacheKey::new(&files, AssetType::Js, true, false),
			CacheKey::new(&files, AssetType::Js, true, false)
		);
	}

	#[rstest]
	fn test_display() {
		let key = CacheKey::new(&file_set(&["/x.css"]), AssetType::Css, true, false);
		assert_eq!(key.to_string(), key.as_str());
	}

	proptest! {
		#[test]
		fn reordering_files_changes_key(a in "/[a-z]{1,8}\\.js", b in "/[a-z]{1,8}\\.js") {
			prop_assume!(a != b);
			let forward = CacheKey::new(&file_set(&[a.as_str(), b.as_str()]), AssetType::Js, true, false);
			let backward = CacheKey::new(&file_set(&[b.as_str(), a.as_str()]), AssetType::Js, true, false);
			prop_assert_ne!(forward, backward);
		}
	}
}
