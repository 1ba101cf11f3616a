//! # assetmin-server
//!
//! HTTP delivery of combined JavaScript and CSS assets.
//!
//! Requests name the files to combine in the last path segment
//! (`/css/reset,layout`). Responses carry an `ETag`; a request presenting
//! the current tag with `If-None-Match` gets `304 Not Modified`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use assetmin_core::{AssetType, BuildOptions, HostProfile};
//! use assetmin_server::{AssetHandler, AssetPipeline, AssetServer, Route};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = BuildOptions::for_profile(HostProfile::detect());
//!     let handler = AssetHandler::new(AssetPipeline::new(options)?)
//!         .with_route(Route::new("/css", AssetType::Css, "static/css"))
//!         .with_route(Route::new("/js", AssetType::Js, "static/js"));
//!
//!     AssetServer::new(handler).listen("127.0.0.1:8080".parse()?).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`pipeline`] - Cache-aware delivery, independent of HTTP
//! - [`handler`] - Routing, conditional GET and error mapping
//! - [`response`] - Response type
//! - [`http`] - hyper HTTP/1 server
//! - [`config`] - TOML server configuration

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod handler;
pub mod http;
pub mod pipeline;
pub mod response;

pub use config::{RouteConfig, ServerConfig};
pub use handler::{AssetHandler, Route};
pub use http::AssetServer;
pub use pipeline::{AssetPipeline, AssetRequest, Delivery};
pub use response::Response;
