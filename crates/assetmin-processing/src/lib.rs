//! # assetmin-processing
//!
//! Source transformations for combined JavaScript and CSS assets.
//!
//! This crate provides:
//! - Line-number annotation of unminified sources for debugging
//! - Regex-based CSS minification
//! - OXC-based JavaScript minification
//! - Concatenation of a resolved file set into one artifact
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use assetmin_core::{AssetType, BuildOptions, HostProfile, PathResolver};
//! use assetmin_processing::AssetBuilder;
//!
//! let files = PathResolver::new("static/js").resolve(&["jquery.js", "app.js"])?;
//! let options = BuildOptions::for_profile(HostProfile::Development);
//!
//! // Manifest header, per-file banners and line numbers
//! let js = AssetBuilder::new().build(&files, AssetType::Js, &options)?;
//! # Ok::<(), assetmin_core::AssetError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`tokenizer`] - Comment and conditional-compilation delimiter scanning
//! - [`annotate`] - Line-number annotation
//! - [`css`] - CSS minifier
//! - [`js`] - JavaScript minifier
//! - [`minifier`] - Minifier trait and per-type selection
//! - [`bundle`] - Asset builder

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod annotate;
pub mod bundle;
pub mod css;
pub mod js;
pub mod minifier;
pub mod tokenizer;

pub use annotate::annotate_lines;
pub use bundle::AssetBuilder;
pub use css::{CssMinifier, minify_css};
pub use js::{JsMinifier, JsMinifyConfig, minify_js};
pub use minifier::{Minifier, MinifierSet};
pub use tokenizer::{Token, tokenize};
