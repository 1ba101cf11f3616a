//! Server configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! listen = "127.0.0.1:8080"
//! profile = "production"
//!
//! [options]
//! cache_dir = "/var/cache/assetmin"
//!
//! [[routes]]
//! prefix = "/css"
//! type = "css"
//! dir = "static/css"
//!
//! [[routes]]
//! prefix = "/js"
//! type = "js"
//! dir = "static/js"
//! ```

use crate::handler::Route;
use assetmin_core::{AssetError, AssetType, BuildOptions, HostProfile, OptionsOverrides, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default listen address
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";

/// One `[[routes]]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
	/// URL prefix
	pub prefix: String,

	/// Asset type served under the prefix
	#[serde(rename = "type")]
	pub asset_type: AssetType,

	/// Source directory
	pub dir: PathBuf,
}

impl From<&RouteConfig> for Route {
	fn from(config: &RouteConfig) -> Self {
		Route::new(&config.prefix, config.asset_type, config.dir.clone())
	}
}

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
	/// Address to listen on
	pub listen: SocketAddr,

	/// Host profile; detected from the host name when unset
	pub profile: Option<HostProfile>,

	/// Build option overrides
	pub options: OptionsOverrides,

	/// Served routes
	pub routes: Vec<RouteConfig>,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			listen: SocketAddr::from(([127, 0, 0, 1], 8080)),
			profile: None,
			options: OptionsOverrides::default(),
			routes: Vec::new(),
		}
	}
}

impl ServerConfig {
	/// Parses a configuration from TOML text
	///
	/// # Examples
	///
	/// ```rust
	/// use assetmin_server::ServerConfig;
	///
	/// let config = ServerConfig::from_toml_str(r#"
	///     listen = "0.0.0.0:9000"
	///
	///     [[routes]]
	///     prefix = "/css"
	///     type = "css"
	///     dir = "static/css"
	/// "#).unwrap();
	///
	/// assert_eq!(config.listen.port(), 9000);
	/// assert_eq!(config.routes.len(), 1);
	/// ```
	pub fn from_toml_str(content: &str) -> Result<Self> {
		Ok(toml::from_str(content)?)
	}

	/// Loads a configuration file
	pub fn from_file(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path).map_err(|err| {
			AssetError::Config(format!("cannot read `{}`: {}", path.display(), err))
		})?;
		Self::from_toml_str(&content)
	}

	/// Resolves the build options.
	///
	/// Profile defaults first, then the file's `[options]`, then `env`.
	pub fn build_options(&self, profile: HostProfile, env: OptionsOverrides) -> BuildOptions {
		let overrides = self.options.clone().or(env);
		BuildOptions::for_profile(self.profile.unwrap_or(profile)).merge(&overrides)
	}

	/// Configured routes
	pub fn routes(&self) -> Vec<Route> {
		self.routes.iter().map(Route::from).collect()
	}
}

/// Parses a `PREFIX=TYPE:DIR` route argument
///
/// # Examples
///
/// ```rust
/// use assetmin_core::AssetType;
/// use assetmin_server::config::parse_route;
///
/// let route = parse_route("/css=css:static/css").unwrap();
/// assert_eq!(route.prefix, "/css");
/// assert_eq!(route.asset_type, AssetType::Css);
/// ```
pub fn parse_route(value: &str) -> Result<RouteConfig> {
	let invalid = || AssetError::Config(format!("route `{}` is not of the form PREFIX=TYPE:DIR", value));

	let (prefix, rest) = value.split_once('=').ok_or_else(invalid)?;
	let (asset_type, dir) = rest.split_once(':').ok_or_else(invalid)?;
	if prefix.is_empty() || dir.is_empty() {
		return Err(invalid());
	}

	Ok(RouteConfig {
		prefix: prefix.to_string(),
		asset_type: asset_type.parse()?,
		dir: PathBuf::from(dir),
	})
}
