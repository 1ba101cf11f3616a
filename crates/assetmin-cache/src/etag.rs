//! ETag generation for cached artifacts

use crate::key::CacheKey;
use md5::{Digest, Md5};
use std::time::{SystemTime, UNIX_EPOCH};

/// Generates an ETag for a cached artifact.
///
/// Format: `"{size_hex}-{mtime_nanos_hex}-{key_digest}"` where the key
/// digest is the first 8 hex digits of the MD5 of the key. The same file
/// state always yields the same ETag; rewriting the entry changes its mtime
/// and therefore the ETag.
///
/// # Examples
///
/// ```rust
/// use assetmin_cache::{CacheKey, generate_etag};
/// use assetmin_core::{AssetType, FileSet};
/// use std::time::{Duration, UNIX_EPOCH};
///
/// let key = CacheKey::new(&FileSet::from_canonical(vec!["/a.js".into()]), AssetType::Js, true, false);
/// let etag = generate_etag(255, UNIX_EPOCH + Duration::from_nanos(4096), &key);
///
/// assert!(etag.starts_with("\"ff-1000-"));
/// assert!(etag.ends_with('"'));
/// ```
pub fn generate_etag(size: u64, modified: SystemTime, key: &CacheKey) -> String {
	let nanos = modified
		.duration_since(UNIX_EPOCH)
		.map(|duration| duration.as_nanos())
		.unwrap_or(0);
	let digest = hex::encode(Md5::digest(key.as_str().as_bytes()));

	format!("\"{:x}-{:x}-{}\"", size, nanos, &digest[..8])
}
