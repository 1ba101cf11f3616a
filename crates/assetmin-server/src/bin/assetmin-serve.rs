//! assetmin-serve
//!
//! Serves combined, minified JavaScript and CSS over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! assetmin-serve --config assetmin.toml
//! assetmin-serve --route /css=css:static/css --route /js=js:static/js --listen 0.0.0.0:8080
//! ASSETMIN_DEBUG=1 assetmin-serve -v --profile development --route /js=js:static/js
//! ```

use anyhow::Context;
use assetmin_core::{HostProfile, OptionsOverrides};
use assetmin_server::config::{RouteConfig, parse_route};
use assetmin_server::{AssetHandler, AssetPipeline, AssetServer, ServerConfig};
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "assetmin-serve")]
#[command(about = "Serve combined and minified JavaScript/CSS assets", long_about = None)]
#[command(version)]
struct Cli {
	/// Path to a TOML configuration file
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Address to listen on (overrides the configuration file)
	#[arg(short, long, value_name = "ADDR")]
	listen: Option<SocketAddr>,

	/// Route in the form PREFIX=TYPE:DIR (can be repeated)
	#[arg(short, long = "route", value_name = "ROUTE", value_parser = route_arg)]
	routes: Vec<RouteConfig>,

	/// Host profile (detected from the host name by default)
	#[arg(short, long, value_enum)]
	profile: Option<ProfileArg>,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbosity: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProfileArg {
	Development,
	Production,
}

impl From<ProfileArg> for HostProfile {
	fn from(profile: ProfileArg) -> Self {
		match profile {
			ProfileArg::Development => HostProfile::Development,
			ProfileArg::Production => HostProfile::Production,
		}
	}
}

fn route_arg(value: &str) -> Result<RouteConfig, String> {
	parse_route(value).map_err(|err| err.to_string())
}

fn init_tracing(verbosity: u8) {
	let level = match verbosity {
		0 => "info",
		1 => "debug",
		_ => "trace",
	};
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
		)
		.init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.verbosity);

	let mut config = match &cli.config {
		Some(path) => ServerConfig::from_file(path)
			.with_context(|| format!("failed to load {}", path.display()))?,
		None => ServerConfig::default(),
	};
	if let Some(listen) = cli.listen {
		config.listen = listen;
	}
	if let Some(profile) = cli.profile {
		config.profile = Some(profile.into());
	}
	config.routes.extend(cli.routes);

	if config.routes.is_empty() {
		anyhow::bail!("no routes configured; pass --route or a configuration file with [[routes]]");
	}

	let profile = config.profile.unwrap_or_else(HostProfile::detect);
	let env = OptionsOverrides::from_env_vars(std::env::vars())
		.context("invalid ASSETMIN_* environment variable")?;
	let options = config.build_options(profile, env);
	tracing::info!(
		?profile,
		minify = options.minify,
		debug = options.debug,
		cache = options.cache_enabled,
		cache_dir = %options.cache_dir.display(),
		"build options"
	);

	let pipeline = AssetPipeline::new(options).context("failed to set up the asset pipeline")?;

	let mut handler = AssetHandler::new(pipeline);
	for route in config.routes() {
		tracing::info!(prefix = %route.prefix, asset_type = %route.asset_type, dir = %route.base_dir.display(), "route");
		handler = handler.with_route(route);
	}

	AssetServer::new(handler)
		.listen(config.listen)
		.await
		.with_context(|| format!("server on {} failed", config.listen))
}
