//! Request routing and conditional GET
//!
//! A [`Route`] maps a URL prefix to an asset type and a source directory.
//! The last path segment below the prefix is a comma-separated list of
//! file names without extension: `/css/reset,layout` combines `reset.css`
//! and `layout.css` from the route's directory.

use crate::pipeline::{AssetPipeline, AssetRequest, Delivery};
use crate::response::Response;
use assetmin_core::{AssetError, AssetType};
use hyper::header::{ETAG, HeaderValue, IF_NONE_MATCH};
use hyper::{HeaderMap, Method, StatusCode};
use std::path::PathBuf;
use std::sync::Arc;

/// URL prefix served from one source directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
	/// URL prefix without trailing slash, e.g. `/css`
	pub prefix: String,

	/// Type of the assets under this prefix
	pub asset_type: AssetType,

	/// Directory the file names are resolved against
	pub base_dir: PathBuf,
}

impl Route {
	/// Creates a route
	pub fn new(prefix: &str, asset_type: AssetType, base_dir: impl Into<PathBuf>) -> Self {
		Self {
			prefix: prefix.trim_end_matches('/').to_string(),
			asset_type,
			base_dir: base_dir.into(),
		}
	}

	/// The part of `path` below this route's prefix, or `None` if the route
	/// does not cover `path`
	fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
		let rest = path.strip_prefix(self.prefix.as_str())?;
		if rest.is_empty() || rest.starts_with('/') {
			Some(rest)
		} else {
			None
		}
	}
}

/// Splits the last path segment into file names with `extension` appended.
///
/// Names are trimmed and empty names skipped.
///
/// # Examples
///
/// ```rust
/// use assetmin_server::handler::parse_references;
///
/// assert_eq!(parse_references("/a, b,,c/", "css"), vec!["a.css", "b.css", "c.css"]);
/// assert!(parse_references("/", "js").is_empty());
/// ```
pub fn parse_references(path: &str, extension: &str) -> Vec<String> {
	let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
	segment
		.split(',')
		.map(str::trim)
		.filter(|name| !name.is_empty())
		.map(|name| format!("{}.{}", name, extension))
		.collect()
}

/// HTTP status for a failed delivery.
///
/// Only a reference to a missing file is the client's fault; an unknown
/// asset type means a misconfigured route.
pub fn status_for(error: &AssetError) -> StatusCode {
	match error {
		AssetError::FileNotFound { .. } => StatusCode::NOT_FOUND,
		_ => StatusCode::INTERNAL_SERVER_ERROR,
	}
}

/// Routes requests to the delivery pipeline
#[derive(Debug, Clone)]
pub struct AssetHandler {
	pipeline: Arc<AssetPipeline>,
	routes: Vec<Route>,
}

impl AssetHandler {
	/// Creates a handler without routes
	pub fn new(pipeline: AssetPipeline) -> Self {
		Self {
			pipeline: Arc::new(pipeline),
			routes: Vec::new(),
		}
	}

	/// Adds a route
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use assetmin_core::{AssetType, BuildOptions, HostProfile};
	/// use assetmin_server::{AssetHandler, AssetPipeline, Route};
	///
	/// let pipeline = AssetPipeline::new(BuildOptions::for_profile(HostProfile::Production))?;
	/// let handler = AssetHandler::new(pipeline)
	///     .with_route(Route::new("/css", AssetType::Css, "static/css"))
	///     .with_route(Route::new("/js", AssetType::Js, "static/js"));
	/// # Ok::<(), assetmin_core::AssetError>(())
	/// ```
	pub fn with_route(mut self, route: Route) -> Self {
		self.routes.push(route);
		self
	}

	/// Configured routes
	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	/// The route with the longest prefix covering `path`
	pub fn route_for(&self, path: &str) -> Option<&Route> {
		self.routes
			.iter()
			.filter(|route| route.strip(path).is_some())
			.max_by_key(|route| route.prefix.len())
	}

	/// Builds the [`AssetRequest`] for `path`, or `None` when no route matches
	pub fn asset_request(&self, path: &str, headers: &HeaderMap) -> Option<AssetRequest> {
		let route = self.route_for(path)?;
		let rest = route.strip(path)?;
		let references = parse_references(rest, route.asset_type.extension());

		let mut request = AssetRequest::new(route.asset_type, route.base_dir.clone(), references);
		if let Some(value) = headers.get(IF_NONE_MATCH).and_then(|value| value.to_str().ok()) {
			request = request.with_if_none_match(value);
		}
		Some(request)
	}

	/// Handles one request.
	///
	/// The build runs on tokio's blocking pool.
	pub async fn handle(&self, method: &Method, path: &str, headers: &HeaderMap) -> Response {
		if method != Method::GET && method != Method::HEAD {
			return Response::method_not_allowed();
		}

		let Some(request) = self.asset_request(path, headers) else {
			tracing::debug!(path, "no route");
			return Response::not_found();
		};

		let asset_type = request.asset_type;
		let pipeline = Arc::clone(&self.pipeline);
		let delivery = match tokio::task::spawn_blocking(move || pipeline.deliver(&request)).await {
			Ok(result) => result,
			Err(err) => {
				tracing::error!(path, error = %err, "delivery task failed");
				return Response::internal_server_error();
			}
		};

		let response = match delivery {
			Ok(delivery) => respond(delivery, asset_type),
			Err(err) => error_response(path, &err),
		};

		if method == Method::HEAD {
			response.without_body()
		} else {
			response
		}
	}
}

fn respond(delivery: Delivery, asset_type: AssetType) -> Response {
	match delivery {
		Delivery::NotModified { etag } => with_etag(
			Response::not_modified().with_content_type(asset_type.mime_type()),
			&etag,
		),
		Delivery::Content { body, etag } => {
			let response = Response::ok()
				.with_content_type(asset_type.mime_type())
				.with_body(body);
			match etag {
				Some(etag) => with_etag(response, &etag),
				None => response,
			}
		}
	}
}

fn with_etag(response: Response, etag: &str) -> Response {
	match HeaderValue::from_str(etag) {
		Ok(value) => response.with_header(ETAG, value),
		Err(_) => response,
	}
}

fn error_response(path: &str, error: &AssetError) -> Response {
	let status = status_for(error);
	if status == StatusCode::NOT_FOUND {
		tracing::warn!(path, error = %error, "asset not found");
		Response::not_found()
	} else {
		tracing::error!(path, error = %error, "asset delivery failed");
		Response::internal_server_error()
	}
}
