//! Delivery pipeline
//!
//! Ties resolution, the on-disk cache and the builder together for one
//! request. Nothing here knows about HTTP; the handler translates an
//! [`AssetRequest`] in and a [`Delivery`] out.

use assetmin_cache::{CacheEntry, CacheKey, CacheStore};
use assetmin_core::{AssetType, BuildOptions, FileSet, PathResolver, Result};
use assetmin_processing::AssetBuilder;
use std::path::{Path, PathBuf};

/// One request for a combined asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
	/// Type of the combined asset
	pub asset_type: AssetType,

	/// Directory the references are resolved against
	pub base_dir: PathBuf,

	/// File references in output order, including their extension
	pub references: Vec<String>,

	/// Value of the client's `If-None-Match` header
	pub if_none_match: Option<String>,
}

impl AssetRequest {
	/// Creates a request without a conditional header
	pub fn new(asset_type: AssetType, base_dir: impl Into<PathBuf>, references: Vec<String>) -> Self {
		Self {
			asset_type,
			base_dir: base_dir.into(),
			references,
			if_none_match: None,
		}
	}

	/// Sets the `If-None-Match` value
	pub fn with_if_none_match(mut self, value: impl Into<String>) -> Self {
		self.if_none_match = Some(value.into());
		self
	}
}

/// Outcome of a delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
	/// The client's copy is current
	NotModified {
		/// ETag the client presented
		etag: String,
	},

	/// The asset itself
	Content {
		/// Response body
		body: Vec<u8>,

		/// ETag to send, if any
		etag: Option<String>,
	},
}

/// Serves combined assets, consulting the cache when it is enabled
#[derive(Debug, Clone)]
pub struct AssetPipeline {
	options: BuildOptions,
	builder: AssetBuilder,
	store: Option<CacheStore>,
}

impl AssetPipeline {
	/// Creates a pipeline, opening the cache directory when caching is enabled
	///
	/// # Errors
	///
	/// [`AssetError::CacheDirUnavailable`](assetmin_core::AssetError::CacheDirUnavailable)
	/// when the cache directory cannot be used.
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use assetmin_core::{AssetType, BuildOptions, HostProfile};
	/// use assetmin_server::{AssetPipeline, AssetRequest, Delivery};
	///
	/// let pipeline = AssetPipeline::new(BuildOptions::for_profile(HostProfile::Production))?;
	/// let request = AssetRequest::new(AssetType::Css, "static/css", vec!["a.css".into(), "b.css".into()]);
	///
	/// match pipeline.deliver(&request)? {
	///     Delivery::NotModified { .. } => println!("304"),
	///     Delivery::Content { body, .. } => println!("{} bytes", body.len()),
	/// }
	/// # Ok::<(), assetmin_core::AssetError>(())
	/// ```
	pub fn new(options: BuildOptions) -> Result<Self> {
		let store = if options.cache_enabled {
			Some(CacheStore::open(&options.cache_dir, options.cache_create_dir)?)
		} else {
			None
		};

		Ok(Self {
			options,
			builder: AssetBuilder::new(),
			store,
		})
	}

	/// Replaces the asset builder
	pub fn with_builder(mut self, builder: AssetBuilder) -> Self {
		self.builder = builder;
		self
	}

	/// Options this pipeline was created with
	pub fn options(&self) -> &BuildOptions {
		&self.options
	}

	/// Produces the response for `request`.
	///
	/// References with the wrong extension are dropped. With the cache
	/// enabled, a fresh entry is reused (or answered with
	/// [`Delivery::NotModified`] when the client already has it) and a
	/// missing or stale one is rebuilt and stored. Debug deliveries carry a
	/// note saying where the body came from and no ETag.
	pub fn deliver(&self, request: &AssetRequest) -> Result<Delivery> {
		let references = filter_references(&request.references, request.asset_type);
		if references.is_empty() {
			return Ok(Delivery::Content {
				body: Vec::new(),
				etag: None,
			});
		}

		let files = PathResolver::new(&request.base_dir).resolve(&references)?;

		let Some(store) = &self.store else {
			let body = self.builder.build(&files, request.asset_type, &self.options)?;
			return Ok(self.content(body, None, "built on the fly"));
		};

		let key = CacheKey::new(&files, request.asset_type, self.options.minify, self.options.debug);

		if let Some(entry) = store.lookup_fresh(&key, &files)? {
			if let Some(header) = &request.if_none_match
				&& etag_matches(header, &entry.etag)
			{
				tracing::debug!(key = %key, "client copy is current");
				return Ok(Delivery::NotModified { etag: entry.etag });
			}
			let note = format!("loaded cache file: {}", entry.path.display());
			return Ok(self.from_entry(entry, &note));
		}

		let entry = self.build_and_store(store, &key, &files, request.asset_type)?;
		let note = format!("created cache file: {}", entry.path.display());
		Ok(self.from_entry(entry, &note))
	}

	fn build_and_store(
		&self,
		store: &CacheStore,
		key: &CacheKey,
		files: &FileSet,
		asset_type: AssetType,
	) -> Result<CacheEntry> {
		let body = self.builder.build(files, asset_type, &self.options)?;
		store.store(key, &body)
	}

	fn from_entry(&self, entry: CacheEntry, note: &str) -> Delivery {
		self.content(entry.content, Some(entry.etag), note)
	}

	fn content(&self, body: Vec<u8>, etag: Option<String>, note: &str) -> Delivery {
		if !self.options.debug {
			return Delivery::Content { body, etag };
		}

		let mut annotated = format!("/* {} */\n\n", note).into_bytes();
		annotated.extend_from_slice(&body);
		Delivery::Content {
			body: annotated,
			etag: None,
		}
	}
}

fn filter_references(references: &[String], asset_type: AssetType) -> Vec<&str> {
	references
		.iter()
		.filter(|reference| {
			let keep = asset_type.matches_extension(Path::new(reference.as_str()));
			if !keep {
				tracing::warn!(reference = %reference, %asset_type, "ignoring file with wrong extension");
			}
			keep
		})
		.map(String::as_str)
		.collect()
}

/// Whether an `If-None-Match` value matches `etag`.
///
/// The header may list several tags separated by commas; `*` matches any
/// tag, and quotes are not significant.
///
/// # Examples
///
/// ```rust
/// use assetmin_server::pipeline::etag_matches;
///
/// assert!(etag_matches("\"a-1\"", "\"a-1\""));
/// assert!(etag_matches("\"x\", \"a-1\"", "\"a-1\""));
/// assert!(etag_matches("*", "\"a-1\""));
/// assert!(!etag_matches("\"a-2\"", "\"a-1\""));
/// ```
pub fn etag_matches(if_none_match: &str, etag: &str) -> bool {
	if_none_match.split(',').map(str::trim).any(|candidate| {
		candidate == "*" || candidate == etag || candidate.trim_matches('"') == etag.trim_matches('"')
	})
}
