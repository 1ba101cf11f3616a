//! On-disk artifact store
//!
//! The cache directory is flat: one file per [`CacheKey`], holding exactly
//! the built bytes. The file's modification time is the only metadata and
//! serves as the freshness watermark against the source files.
//!
//! Entries are never modified in place. A stale entry is deleted and a new
//! one written through a temporary file in the same directory followed by a
//! rename, so concurrent readers see either the old or the new artifact.

use crate::etag::generate_etag;
use crate::key::CacheKey;
use assetmin_core::{AssetError, FileSet, Result};
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::NamedTempFile;

/// A cached artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
	/// Key the entry is stored under
	pub key: CacheKey,

	/// Location inside the cache directory
	pub path: PathBuf,

	/// Artifact bytes
	pub content: Vec<u8>,

	/// Size in bytes
	pub size: u64,

	/// Modification time of the cache file
	pub modified: SystemTime,

	/// ETag for conditional requests
	pub etag: String,
}

impl CacheEntry {
	fn new(key: CacheKey, path: PathBuf, content: Vec<u8>, modified: SystemTime) -> Self {
		let size = content.len() as u64;
		let etag = generate_etag(size, modified, &key);
		Self {
			key,
			path,
			content,
			size,
			modified,
			etag,
		}
	}
}

/// Flat directory of cached artifacts
#[derive(Debug, Clone)]
pub struct CacheStore {
	dir: PathBuf,
}

impl CacheStore {
	/// Opens the store in `dir`.
	///
	/// A missing directory is created (recursively) when `create_dir` is set.
	///
	/// # Errors
	///
	/// [`AssetError::CacheDirUnavailable`] when the directory is missing and
	/// may not be created, cannot be created, or is not a directory.
	///
	/// # Examples
	///
	/// ```rust
	/// use assetmin_cache::CacheStore;
	///
	/// let temp_dir = tempfile::TempDir::new()?;
	/// let store = CacheStore::open(temp_dir.path().join("assets"), true)?;
	/// assert!(store.dir().is_dir());
	/// # Ok::<(), Box<dyn std::error::Error>>(())
	/// ```
	pub fn open(dir: impl Into<PathBuf>, create_dir: bool) -> Result<Self> {
		let dir = dir.into();

		if !dir.exists() && create_dir {
			if let Err(err) = fs::create_dir_all(&dir) {
				tracing::warn!(dir = %dir.display(), error = %err, "cannot create cache directory");
				return Err(AssetError::CacheDirUnavailable { path: dir });
			}
			tracing::debug!(dir = %dir.display(), "created cache directory");
		}

		if !dir.is_dir() {
			return Err(AssetError::CacheDirUnavailable { path: dir });
		}

		Ok(Self { dir })
	}

	/// The cache directory
	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// Location of the entry for `key`
	pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
		self.dir.join(key.as_str())
	}

	/// Loads the entry for `key`, or `None` when there is none
	pub fn lookup(&self, key: &CacheKey) -> Result<Option<CacheEntry>> {
		let path = self.entry_path(key);

		let mut file = match File::open(&path) {
			Ok(file) => file,
			Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
			Err(source) => return Err(AssetError::CacheReadFailed { path, source }),
		};

		let read = |file: &mut File| -> std::io::Result<(Vec<u8>, SystemTime)> {
			let modified = file.metadata()?.modified()?;
			let mut content = Vec::new();
			file.read_to_end(&mut content)?;
			Ok((content, modified))
		};

		match read(&mut file) {
			Ok((content, modified)) => Ok(Some(CacheEntry::new(key.clone(), path, content, modified))),
			Err(source) => Err(AssetError::CacheReadFailed { path, source }),
		}
	}

	/// Whether any source was modified after the entry was written
	pub fn is_stale(&self, entry: &CacheEntry, sources: &FileSet) -> Result<bool> {
		for source in sources {
			let modified = fs::metadata(source)
				.and_then(|metadata| metadata.modified())
				.map_err(|err| AssetError::FileUnreadable {
					path: source.clone(),
					source: err,
				})?;

			if modified > entry.modified {
				tracing::debug!(
					key = %entry.key,
					source = %source.display(),
					"cache entry is older than source"
				);
				return Ok(true);
			}
		}
		Ok(false)
	}

	/// Deletes the entry; an entry that is already gone is not an error
	pub fn invalidate(&self, entry: &CacheEntry) -> Result<()> {
		match fs::remove_file(&entry.path) {
			Ok(()) => {
				tracing::debug!(key = %entry.key, "invalidated cache entry");
				Ok(())
			}
			Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
			Err(source) => Err(AssetError::CacheWriteFailed {
				path: entry.path.clone(),
				source,
			}),
		}
	}

	/// Writes `content` under `key`, replacing any previous entry atomically
	///
	/// # Errors
	///
	/// [`AssetError::CacheWriteFailed`] when the temporary file cannot be
	/// written or renamed into place.
	pub fn store(&self, key: &CacheKey, content: &[u8]) -> Result<CacheEntry> {
		let path = self.entry_path(key);
		let write_failed = |source| AssetError::CacheWriteFailed {
			path: path.clone(),
			source,
		};

		let mut temp = NamedTempFile::new_in(&self.dir).map_err(write_failed)?;
		temp.write_all(content).map_err(write_failed)?;
		let modified = temp
			.as_file()
			.metadata()
			.and_then(|metadata| metadata.modified())
			.map_err(write_failed)?;
		temp.persist(&path).map_err(|err| write_failed(err.error))?;

		tracing::debug!(key = %key, bytes = content.len(), "stored cache entry");

		Ok(CacheEntry::new(key.clone(), path, content.to_vec(), modified))
	}

	/// Loads the entry for `key` if it is newer than every source.
	///
	/// A stale entry is deleted and `None` returned, so the caller rebuilds.
	pub fn lookup_fresh(&self, key: &CacheKey, sources: &FileSet) -> Result<Option<CacheEntry>> {
		let Some(entry) = self.lookup(key)? else {
			tracing::debug!(key = %key, "cache miss");
			return Ok(None);
		};

		if self.is_stale(&entry, sources)? {
			self.invalidate(&entry)?;
			return Ok(None);
		}

		tracing::debug!(key = %key, "cache hit");
		Ok(Some(entry))
	}
}
