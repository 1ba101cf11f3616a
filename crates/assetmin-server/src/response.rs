//! HTTP responses

use bytes::Bytes;
use hyper::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use hyper::{HeaderMap, StatusCode};

/// HTTP response produced by the asset handler
#[derive(Debug, Clone)]
pub struct Response {
	/// Status code
	pub status: StatusCode,
	/// Response headers
	pub headers: HeaderMap,
	/// Response body
	pub body: Bytes,
}

impl Response {
	/// Create a new Response with the given status code
	///
	/// # Examples
	///
	/// ```
	/// use assetmin_server::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::new(StatusCode::OK);
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// Create a Response with HTTP 200 OK status
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// Create a Response with HTTP 304 Not Modified status
	pub fn not_modified() -> Self {
		Self::new(StatusCode::NOT_MODIFIED)
	}

	/// Create a Response with HTTP 404 Not Found status
	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND).with_text("Not Found")
	}

	/// Create a Response with HTTP 405 Method Not Allowed status
	pub fn method_not_allowed() -> Self {
		Self::new(StatusCode::METHOD_NOT_ALLOWED)
			.with_header(hyper::header::ALLOW, HeaderValue::from_static("GET, HEAD"))
	}

	/// Create a Response with HTTP 500 Internal Server Error status
	pub fn internal_server_error() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR).with_text("Internal Server Error")
	}

	/// Set the response body
	///
	/// # Examples
	///
	/// ```
	/// use assetmin_server::Response;
	///
	/// let response = Response::ok().with_body(".x{color:blue}\n");
	/// assert_eq!(response.body, ".x{color:blue}\n");
	/// ```
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Set a header, replacing any previous value
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);
		self
	}

	/// Set the Content-Type header
	pub fn with_content_type(self, content_type: &'static str) -> Self {
		self.with_header(CONTENT_TYPE, HeaderValue::from_static(content_type))
	}

	fn with_text(self, text: &'static str) -> Self {
		self.with_content_type("text/plain; charset=utf-8").with_body(text)
	}

	/// Drop the body, keeping status and headers (for HEAD requests)
	pub fn without_body(mut self) -> Self {
		self.body = Bytes::new();
		self
	}

	/// Convert into a hyper response
	pub fn into_hyper<B: From<Bytes>>(self) -> hyper::Response<B> {
		let mut response = hyper::Response::new(B::from(self.body));
		*response.status_mut() = self.status;
		*response.headers_mut() = self.headers;
		response
	}
}
