//! # assetmin-cache
//!
//! On-disk cache for combined assets.
//!
//! This crate provides:
//! - [`CacheKey`] - stable artifact names derived from file order, type and options
//! - [`generate_etag`] - ETags for conditional requests
//! - [`CacheStore`] - lookup, staleness validation, invalidation and atomic writes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use assetmin_cache::{CacheKey, CacheStore};
//! use assetmin_core::{AssetType, PathResolver};
//!
//! let files = PathResolver::new("static/css").resolve(&["a.css", "b.css"])?;
//! let key = CacheKey::new(&files, AssetType::Css, true, false);
//! let store = CacheStore::open("/var/cache/assetmin", true)?;
//!
//! let entry = match store.lookup_fresh(&key, &files)? {
//!     Some(entry) => entry,
//!     None => store.store(&key, b".x{color:blue}\n")?,
//! };
//! println!("{} {}", entry.path.display(), entry.etag);
//! # Ok::<(), assetmin_core::AssetError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`key`] - Cache keys
//! - [`etag`] - ETag generation
//! - [`store`] - Cache directory access

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod etag;
pub mod key;
pub mod store;

pub use etag::generate_etag;
pub use key::CacheKey;
pub use store::{CacheEntry, CacheStore};
