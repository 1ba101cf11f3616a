//! File reference resolution
//!
//! Turns logical file references into canonical absolute paths. This is the
//! only place where missing files are detected; everything downstream works
//! on a [`FileSet`] and assumes its paths exist.

use crate::error::{AssetError, Result};
use std::path::{Path, PathBuf};

/// Ordered set of canonical absolute source paths.
///
/// Order is significant: it decides both the order of the combined output
/// and the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileSet {
	paths: Vec<PathBuf>,
}

impl FileSet {
	/// Wraps already canonical paths without touching the filesystem
	pub fn from_canonical(paths: Vec<PathBuf>) -> Self {
		Self { paths }
	}

	/// Paths in their significant order
	pub fn paths(&self) -> &[PathBuf] {
		&self.paths
	}

	/// Iterates over the paths in order
	pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
		self.paths.iter()
	}

	/// Number of files
	pub fn len(&self) -> usize {
		self.paths.len()
	}

	/// Whether the set contains no files
	pub fn is_empty(&self) -> bool {
		self.paths.is_empty()
	}
}

impl<'a> IntoIterator for &'a FileSet {
	type Item = &'a PathBuf;
	type IntoIter = std::slice::Iter<'a, PathBuf>;

	fn into_iter(self) -> Self::IntoIter {
		self.paths.iter()
	}
}

/// Resolves file references relative to a base directory
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
	base_dir: PathBuf,
}

impl PathResolver {
	/// Creates a resolver for references relative to `base_dir`.
	///
	/// An empty base directory resolves against the process working directory.
	pub fn new(base_dir: impl Into<PathBuf>) -> Self {
		Self {
			base_dir: base_dir.into(),
		}
	}

	/// Base directory references are resolved against
	pub fn base_dir(&self) -> &Path {
		&self.base_dir
	}

	/// Resolves a single reference to its canonical absolute path
	///
	/// Absolute references ignore the base directory.
	///
	/// # Errors
	///
	/// Returns [`AssetError::FileNotFound`] naming the reference if it does
	/// not point at an existing file.
	pub fn resolve_one(&self, reference: &str) -> Result<PathBuf> {
		let candidate = self.base_dir.join(reference);
		match std::fs::canonicalize(&candidate) {
			Ok(path) if path.is_file() => Ok(path),
			_ => Err(AssetError::FileNotFound {
				reference: reference.to_string(),
			}),
		}
	}

	/// Resolves every reference, keeping their order
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use assetmin_core::PathResolver;
	///
	/// let resolver = PathResolver::new("static/css");
	/// let files = resolver.resolve(&["reset.css", "layout.css"])?;
	/// assert_eq!(files.len(), 2);
	/// # Ok::<(), assetmin_core::AssetError>(())
	/// ```
	pub fn resolve<S: AsRef<str>>(&self, references: &[S]) -> Result<FileSet> {
		let paths = references
			.iter()
			.map(|reference| self.resolve_one(reference.as_ref()))
			.collect::<Result<Vec<_>>>()?;
		Ok(FileSet { paths })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use tempfile::TempDir;

	fn dir_with_files(names: &[&str]) -> TempDir {
		let dir = TempDir::new().unwrap();
		for name in names {
			let path = dir.path().join(name);
			if let Some(parent) = path.parent() {
				std::fs::create_dir_all(parent).unwrap();
			}
			std::fs::write(path, name.as_bytes()).unwrap();
		}
		dir
	}

	#[rstest]
	fn test_resolve_keeps_order() {
		let dir = dir_with_files(&["b.css", "a.css"]);
		let resolver = PathResolver::new(dir.path());

		let files = resolver.resolve(&["b.css", "a.css"]).unwrap();

		assert_eq!(files.len(), 2);
		assert!(files.paths()[0].ends_with("b.css"));
		assert!(files.paths()[1].ends_with("a.css"));
		assert!(files.iter().all(|p| p.is_absolute()));
	}

	#[rstest]
	fn test_resolve_canonicalizes_dot_segments() {
		let dir = dir_with_files(&["css/site.css"]);
		let resolver = PathResolver::new(dir.path().join("css"));

		let via_parent = resolver.resolve_one("../css/./site.css").unwrap();
		let direct = resolver.resolve_one("site.css").unwrap();

		assert_eq!(via_parent, direct);
	}

	#[rstest]
	fn test_resolve_absolute_reference() {
		let dir = dir_with_files(&["a.js"]);
		let absolute = dir.path().join("a.js");
		let resolver = PathResolver::new("/somewhere/else");

		let resolved = resolver.resolve_one(absolute.to_str().unwrap()).unwrap();
		assert_eq!(resolved, std::fs::canonicalize(absolute).unwrap());
	}

	#[rstest]
	fn test_missing_file_is_named() {
		let dir = dir_with_files(&["a.css"]);
		let resolver = PathResolver::new(dir.path());

		let err = resolver.resolve(&["a.css", "missing.css"]).unwrap_err();
		match err {
			AssetError::FileNotFound { reference } => assert_eq!(reference, "missing.css"),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[rstest]
	fn test_directory_is_not_a_file() {
		let dir = dir_with_files(&["sub/a.css"]);
		let resolver = PathResolver::new(dir.path());

		assert!(resolver.resolve_one("sub").is_err());
	}

	#[rstest]
	fn test_empty_reference_list() {
		let resolver = PathResolver::new("/");
		let files = resolver.resolve::<&str>(&[]).unwrap();
		assert!(files.is_empty());
	}
}
