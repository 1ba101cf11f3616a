//! # assetmin-core
//!
//! Shared building blocks for the assetmin pipeline.
//!
//! This crate provides:
//! - [`AssetType`] - the kind of asset being combined (JavaScript or CSS)
//! - [`BuildOptions`] - immutable per-build configuration with host-dependent defaults
//! - [`PathResolver`] / [`FileSet`] - resolution of logical file references to canonical paths
//! - [`AssetError`] - the request-fatal error taxonomy shared by every crate
//!
//! ## Module Structure
//!
//! - [`asset_type`] - Asset type enumeration, mime types and extensions
//! - [`options`] - Build options, host profiles and option overrides
//! - [`path_resolver`] - File reference resolution
//! - [`error`] - Error types

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod asset_type;
pub mod error;
pub mod options;
pub mod path_resolver;

pub use asset_type::AssetType;
pub use error::{AssetError, Result};
pub use options::{BuildOptions, HostProfile, OptionsOverrides};
pub use path_resolver::{FileSet, PathResolver};
