//! hyper HTTP/1 server

use crate::handler::AssetHandler;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

/// HTTP/1 server delivering combined assets
pub struct AssetServer {
	handler: Arc<AssetHandler>,
}

impl AssetServer {
	/// Create a new server with the given handler
	pub fn new(handler: AssetHandler) -> Self {
		Self {
			handler: Arc::new(handler),
		}
	}

	/// Bind to `addr` and serve until an error occurs
	///
	/// # Examples
	///
	/// ```no_run
	/// use assetmin_core::{AssetType, BuildOptions, HostProfile};
	/// use assetmin_server::{AssetHandler, AssetPipeline, AssetServer, Route};
	/// use std::net::SocketAddr;
	///
	/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
	/// let pipeline = AssetPipeline::new(BuildOptions::for_profile(HostProfile::Production))?;
	/// let handler = AssetHandler::new(pipeline).with_route(Route::new("/css", AssetType::Css, "static/css"));
	///
	/// let addr: SocketAddr = "127.0.0.1:8080".parse()?;
	/// AssetServer::new(handler).listen(addr).await?;
	/// # Ok(())
	/// # }
	/// ```
	pub async fn listen(self, addr: SocketAddr) -> std::io::Result<()> {
		let listener = TcpListener::bind(addr).await?;
		self.serve(listener).await
	}

	/// Serve connections from an already bound listener
	pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
		tracing::info!(addr = %listener.local_addr()?, "listening");

		loop {
			let (stream, remote_addr) = listener.accept().await?;
			let handler = Arc::clone(&self.handler);

			tokio::task::spawn(async move {
				if let Err(err) = Self::handle_connection(stream, remote_addr, handler).await {
					tracing::debug!(%remote_addr, error = %err, "connection error");
				}
			});
		}
	}

	/// Handle a single TCP connection
	pub async fn handle_connection(
		stream: TcpStream,
		remote_addr: SocketAddr,
		handler: Arc<AssetHandler>,
	) -> Result<(), hyper::Error> {
		let io = TokioIo::new(stream);
		let service = RequestService {
			handler,
			remote_addr,
		};

		http1::Builder::new().serve_connection(io, service).await
	}
}

/// Service implementation for hyper
struct RequestService {
	handler: Arc<AssetHandler>,
	remote_addr: SocketAddr,
}

impl Service<hyper::Request<Incoming>> for RequestService {
	type Response = hyper::Response<Full<Bytes>>;
	type Error = Infallible;
	type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

	fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
		let handler = Arc::clone(&self.handler);
		let remote_addr = self.remote_addr;

		Box::pin(async move {
			// Asset requests carry no body
			let (parts, _body) = req.into_parts();
			let path = parts.uri.path();

			let response = handler.handle(&parts.method, path, &parts.headers).await;
			tracing::info!(
				%remote_addr,
				method = %parts.method,
				path,
				status = response.status.as_u16(),
				"request"
			);

			Ok(response.into_hyper())
		})
	}
}
