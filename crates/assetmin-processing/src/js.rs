//! JavaScript minification with OXC
//!
//! Sources are parsed as classic scripts, compressed, mangled and printed
//! back without comments. A source that does not parse is rejected instead
//! of being passed through half-minified.

use crate::minifier::Minifier;
use assetmin_core::{AssetError, Result};
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc_mangler::MangleOptions as OxcMangleOptions;
use oxc_minifier::{CompressOptions as OxcCompressOptions, Minifier as OxcMinifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::path::PathBuf;

/// JavaScript minification configuration
#[derive(Debug, Clone)]
pub struct JsMinifyConfig {
	/// Enable local variable name mangling
	pub mangle: bool,
	/// Enable compression optimizations
	pub compress: bool,
	/// Remove console.* statements
	pub drop_console: bool,
	/// Remove debugger statements
	pub drop_debugger: bool,
}

impl Default for JsMinifyConfig {
	fn default() -> Self {
		Self {
			mangle: true,
			compress: true,
			drop_console: false,
			drop_debugger: true,
		}
	}
}

impl JsMinifyConfig {
	/// Enable or disable variable mangling
	pub fn with_mangle(mut self, enable: bool) -> Self {
		self.mangle = enable;
		self
	}

	/// Enable or disable compression
	pub fn with_compress(mut self, enable: bool) -> Self {
		self.compress = enable;
		self
	}

	/// Enable or disable console removal
	pub fn with_drop_console(mut self, enable: bool) -> Self {
		self.drop_console = enable;
		self
	}

	/// Enable or disable debugger removal
	pub fn with_drop_debugger(mut self, enable: bool) -> Self {
		self.drop_debugger = enable;
		self
	}
}

/// JavaScript minifier backed by OXC
///
/// # Examples
///
/// ```rust
/// use assetmin_processing::js::{JsMinifier, JsMinifyConfig};
/// use assetmin_processing::minifier::Minifier;
///
/// let minifier = JsMinifier::with_config(JsMinifyConfig::default().with_mangle(false));
/// let output = minifier.minify("var answer = 42; // the answer").unwrap();
/// assert!(!output.contains("the answer"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsMinifier {
	config: JsMinifyConfig,
}

impl JsMinifier {
	/// Create a minifier with default settings
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a minifier with custom configuration
	pub fn with_config(config: JsMinifyConfig) -> Self {
		Self { config }
	}

	/// Configuration in use
	pub fn config(&self) -> &JsMinifyConfig {
		&self.config
	}

	fn minify_with_oxc(&self, source: &str) -> std::result::Result<String, String> {
		let allocator = Allocator::default();

		// Bundled sources are classic scripts, not modules
		let parse_result = Parser::new(&allocator, source, SourceType::default()).parse();
		if let Some(error) = parse_result.errors.first() {
			return Err(format!("parse error: {:?}", error));
		}

		let mut program = parse_result.program;

		let mangle = self.config.mangle.then(OxcMangleOptions::default);
		let compress = self.config.compress.then(|| {
			let mut opts = OxcCompressOptions::smallest();
			opts.drop_console = self.config.drop_console;
			opts.drop_debugger = self.config.drop_debugger;
			opts
		});

		let minified = OxcMinifier::new(MinifierOptions { mangle, compress }).minify(&allocator, &mut program);

		let codegen_options = CodegenOptions {
			minify: true,
			comments: CommentOptions::disabled(),
			..CodegenOptions::default()
		};

		Ok(Codegen::new()
			.with_options(codegen_options)
			.with_scoping(minified.scoping)
			.build(&program)
			.code)
	}
}

impl Minifier for JsMinifier {
	fn minify(&self, source: &str) -> Result<String> {
		self.minify_with_oxc(source)
			.map_err(|message| AssetError::MinifyFailed {
				path: PathBuf::new(),
				message,
			})
	}

	fn name(&self) -> &str {
		"JsMinifier"
	}
}

/// Minifies `source` with the default [`JsMinifier`] settings
pub fn minify_js(source: &str) -> Result<String> {
	JsMinifier::new().minify(source)
}
