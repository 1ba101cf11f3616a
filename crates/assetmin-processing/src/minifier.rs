//! Minifier abstraction
//!
//! The builder only knows this trait. CSS is handled by
//! [`CssMinifier`](crate::css::CssMinifier); JavaScript by any
//! implementation plugged into [`MinifierSet`], by default
//! [`JsMinifier`](crate::js::JsMinifier).

use crate::css::CssMinifier;
use crate::js::JsMinifier;
use assetmin_core::{AssetType, Result};
use std::sync::Arc;

/// Semantics-preserving compression of source text.
///
/// Implementations must be deterministic and free of side effects: the same
/// input always yields the same output.
pub trait Minifier: Send + Sync {
	/// Compresses `source`
	fn minify(&self, source: &str) -> Result<String>;

	/// Name used in log output
	fn name(&self) -> &str;
}

/// The minifier used for each asset type
#[derive(Clone)]
pub struct MinifierSet {
	js: Arc<dyn Minifier>,
	css: Arc<dyn Minifier>,
}

impl MinifierSet {
	/// Creates a set from explicit minifiers
	pub fn new(js: Arc<dyn Minifier>, css: Arc<dyn Minifier>) -> Self {
		Self { js, css }
	}

	/// Replaces the JavaScript minifier
	///
	/// # Examples
	///
	/// ```rust
	/// use assetmin_processing::js::{JsMinifier, JsMinifyConfig};
	/// use assetmin_processing::minifier::MinifierSet;
	/// use std::sync::Arc;
	///
	/// let keep_names = JsMinifier::with_config(JsMinifyConfig::default().with_mangle(false));
	/// let minifiers = MinifierSet::default().with_js(Arc::new(keep_names));
	/// ```
	pub fn with_js(mut self, js: Arc<dyn Minifier>) -> Self {
		self.js = js;
		self
	}

	/// Replaces the CSS minifier
	pub fn with_css(mut self, css: Arc<dyn Minifier>) -> Self {
		self.css = css;
		self
	}

	/// Minifier responsible for `asset_type`
	pub fn for_type(&self, asset_type: AssetType) -> &dyn Minifier {
		match asset_type {
			AssetType::Js => self.js.as_ref(),
			AssetType::Css => self.css.as_ref(),
		}
	}
}

impl Default for MinifierSet {
	fn default() -> Self {
		Self {
			js: Arc::new(JsMinifier::new()),
			css: Arc::new(CssMinifier::new()),
		}
	}
}

impl std::fmt::Debug for MinifierSet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MinifierSet")
			.field("js", &self.js.name())
			.field("css", &self.css.name())
			.finish()
	}
}
