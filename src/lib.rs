//! # assetmin
//!
//! Combines JavaScript and CSS source files into a single response, minifying
//! them in production and annotating them with line numbers in development.
//! Built artifacts are cached on disk, invalidated when any source changes,
//! and delivered with ETags so clients can revalidate with `If-None-Match`.
//!
//! ## Feature Flags
//!
//! - `server` (default) - HTTP delivery: routing, conditional GET, hyper server
//!   and the `assetmin-serve` binary
//!
//! With `default-features = false` only the build pipeline remains:
//! resolution, annotation, minification and the cache.
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use assetmin::prelude::*;
//!
//! let options = BuildOptions::for_profile(HostProfile::Production)
//!     .with_cache_dir("/var/cache/assetmin");
//!
//! let files = PathResolver::new("static/css").resolve(&["reset.css", "site.css"])?;
//! let key = CacheKey::new(&files, AssetType::Css, options.minify, options.debug);
//! let store = CacheStore::open(&options.cache_dir, options.cache_create_dir)?;
//!
//! let entry = match store.lookup_fresh(&key, &files)? {
//!     Some(entry) => entry,
//!     None => store.store(&key, &AssetBuilder::new().build(&files, AssetType::Css, &options)?)?,
//! };
//! println!("{} bytes, ETag {}", entry.size, entry.etag);
//! # Ok::<(), AssetError>(())
//! ```
//!
//! ## Crates
//!
//! - [`assetmin_core`] - Asset types, build options, path resolution, errors
//! - [`processing`] - Tokenizer, line annotation, minifiers, asset builder
//! - [`cache`] - Cache keys, ETags, cache store
//! - [`server`] - HTTP delivery (feature `server`)

pub use assetmin_cache as cache;
pub use assetmin_core;
pub use assetmin_processing as processing;
#[cfg(feature = "server")]
pub use assetmin_server as server;

pub use assetmin_cache::{CacheEntry, CacheKey, CacheStore, generate_etag};
pub use assetmin_core::{
	AssetError, AssetType, BuildOptions, FileSet, HostProfile, OptionsOverrides, PathResolver,
	Result,
};
pub use assetmin_processing::{AssetBuilder, Minifier, MinifierSet};

#[cfg(feature = "server")]
pub use assetmin_server::{AssetHandler, AssetPipeline, AssetServer, Delivery, Route, ServerConfig};

/// Commonly used types
pub mod prelude {
	pub use crate::{
		AssetBuilder, AssetError, AssetType, BuildOptions, CacheKey, CacheStore, FileSet,
		HostProfile, PathResolver, Result,
	};

	#[cfg(feature = "server")]
	pub use crate::{AssetHandler, AssetPipeline, AssetServer, Route};
}
