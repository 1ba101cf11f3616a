//! Build configuration
//!
//! [`BuildOptions`] is resolved once per build and is read-only afterwards.
//! Its defaults depend on a [`HostProfile`] that the caller passes in
//! explicitly; nothing here consults global state on its own.

use crate::error::{AssetError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix understood by [`OptionsOverrides::from_env_vars`]
pub const ENV_PREFIX: &str = "ASSETMIN_";

/// Kind of host the pipeline runs on.
///
/// Development hosts default to unminified, annotated output; production hosts
/// to minified output without annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostProfile {
	/// Developer machine or staging host
	Development,
	/// Production host
	#[default]
	Production,
}

impl HostProfile {
	/// Derives the profile from a host name.
	///
	/// Host names starting with `dev` are development hosts.
	///
	/// # Examples
	///
	/// ```rust
	/// use assetmin_core::HostProfile;
	///
	/// assert_eq!(HostProfile::from_hostname("dev-web01"), HostProfile::Development);
	/// assert_eq!(HostProfile::from_hostname("web01"), HostProfile::Production);
	/// ```
	pub fn from_hostname(hostname: &str) -> Self {
		if hostname.trim().starts_with("dev") {
			HostProfile::Development
		} else {
			HostProfile::Production
		}
	}

	/// Detects the profile of the current host from `HOSTNAME` or `/etc/hostname`.
	///
	/// Meant for binaries; libraries and tests should pass a profile explicitly.
	pub fn detect() -> Self {
		let hostname = std::env::var("HOSTNAME")
			.ok()
			.or_else(|| std::fs::read_to_string("/etc/hostname").ok())
			.unwrap_or_default();
		let profile = Self::from_hostname(&hostname);
		tracing::debug!(hostname = hostname.trim(), ?profile, "detected host profile");
		profile
	}

	/// Returns `true` for development hosts
	pub fn is_development(self) -> bool {
		matches!(self, HostProfile::Development)
	}
}

/// Immutable configuration for one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
	/// Whether built artifacts are cached on disk
	pub cache_enabled: bool,

	/// Whether the cache directory is created (recursively) when missing
	pub cache_create_dir: bool,

	/// Location of the cache directory
	pub cache_dir: PathBuf,

	/// Whether sources are minified
	pub minify: bool,

	/// Whether debug annotations (manifest header, line numbers) are emitted
	pub debug: bool,
}

impl BuildOptions {
	/// Creates the default options for a host profile
	///
	/// # Examples
	///
	/// ```rust
	/// use assetmin_core::{BuildOptions, HostProfile};
	///
	/// let options = BuildOptions::for_profile(HostProfile::Production);
	/// assert!(options.minify);
	/// assert!(!options.debug);
	///
	/// let options = BuildOptions::for_profile(HostProfile::Development);
	/// assert!(!options.minify);
	/// assert!(options.debug);
	/// ```
	pub fn for_profile(profile: HostProfile) -> Self {
		let development = profile.is_development();
		Self {
			cache_enabled: true,
			cache_create_dir: true,
			cache_dir: default_cache_dir(),
			minify: !development,
			debug: development,
		}
	}

	/// Enables or disables the on-disk cache
	pub fn with_cache_enabled(mut self, enable: bool) -> Self {
		self.cache_enabled = enable;
		self
	}

	/// Allows or forbids creating the cache directory
	pub fn with_cache_create_dir(mut self, enable: bool) -> Self {
		self.cache_create_dir = enable;
		self
	}

	/// Sets the cache directory
	pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.cache_dir = dir.into();
		self
	}

	/// Enables or disables minification
	pub fn with_minify(mut self, enable: bool) -> Self {
		self.minify = enable;
		self
	}

	/// Enables or disables debug annotations
	pub fn with_debug(mut self, enable: bool) -> Self {
		self.debug = enable;
		self
	}

	/// Applies explicit overrides on top of these options
	///
	/// # Examples
	///
	/// ```rust
	/// use assetmin_core::{BuildOptions, HostProfile, OptionsOverrides};
	///
	/// let overrides = OptionsOverrides {
	///     minify: Some(true),
	///     ..Default::default()
	/// };
	/// let options = BuildOptions::for_profile(HostProfile::Development).merge(&overrides);
	/// assert!(options.minify);
	/// assert!(options.debug);
	/// ```
	pub fn merge(mut self, overrides: &OptionsOverrides) -> Self {
		if let Some(enabled) = overrides.cache_enabled {
			self.cache_enabled = enabled;
		}
		if let Some(create) = overrides.cache_create_dir {
			self.cache_create_dir = create;
		}
		if let Some(dir) = &overrides.cache_dir {
			self.cache_dir = dir.clone();
		}
		if let Some(minify) = overrides.minify {
			self.minify = minify;
		}
		if let Some(debug) = overrides.debug {
			self.debug = debug;
		}
		self
	}
}

impl Default for BuildOptions {
	fn default() -> Self {
		Self::for_profile(HostProfile::default())
	}
}

/// Default cache location: `assetmin` below the system temp directory
pub fn default_cache_dir() -> PathBuf {
	std::env::temp_dir().join("assetmin")
}

/// Explicitly specified option values.
///
/// Unset fields keep the profile defaults when merged with
/// [`BuildOptions::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsOverrides {
	/// Overrides [`BuildOptions::cache_enabled`]
	pub cache_enabled: Option<bool>,
	/// Overrides [`BuildOptions::cache_create_dir`]
	pub cache_create_dir: Option<bool>,
	/// Overrides [`BuildOptions::cache_dir`]
	pub cache_dir: Option<PathBuf>,
	/// Overrides [`BuildOptions::minify`]
	pub minify: Option<bool>,
	/// Overrides [`BuildOptions::debug`]
	pub debug: Option<bool>,
}

impl OptionsOverrides {
	/// Parses overrides from TOML text
	///
	/// # Examples
	///
	/// ```rust
	/// use assetmin_core::OptionsOverrides;
	///
	/// let overrides = OptionsOverrides::from_toml_str("minify = false\ncache_dir = \"/var/cache/assets\"").unwrap();
	/// assert_eq!(overrides.minify, Some(false));
	/// assert!(overrides.debug.is_none());
	/// ```
	pub fn from_toml_str(content: &str) -> Result<Self> {
		Ok(toml::from_str(content)?)
	}

	/// Loads overrides from a TOML file
	pub fn from_toml_file(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path).map_err(|err| {
			AssetError::Config(format!("cannot read `{}`: {}", path.display(), err))
		})?;
		Self::from_toml_str(&content)
	}

	/// Collects overrides from `ASSETMIN_*` variables.
	///
	/// Takes the variables as an iterator so callers decide where they come
	/// from (`std::env::vars()` in binaries, a fixed list in tests). Unknown
	/// `ASSETMIN_*` names are ignored.
	///
	/// # Examples
	///
	/// ```rust
	/// use assetmin_core::OptionsOverrides;
	///
	/// let vars = vec![
	///     ("ASSETMIN_DEBUG".to_string(), "yes".to_string()),
	///     ("PATH".to_string(), "/usr/bin".to_string()),
	/// ];
	/// let overrides = OptionsOverrides::from_env_vars(vars).unwrap();
	/// assert_eq!(overrides.debug, Some(true));
	/// ```
	pub fn from_env_vars<I>(vars: I) -> Result<Self>
	where
		I: IntoIterator<Item = (String, String)>,
	{
		let mut overrides = Self::default();
		for (name, value) in vars {
			let Some(option) = name.strip_prefix(ENV_PREFIX) else {
				continue;
			};
			match option {
				"CACHE_ENABLED" => overrides.cache_enabled = Some(parse_flag(&name, &value)?),
				"CACHE_CREATE" => overrides.cache_create_dir = Some(parse_flag(&name, &value)?),
				"CACHE_DIR" => overrides.cache_dir = Some(PathBuf::from(value)),
				"MINIFY" => overrides.minify = Some(parse_flag(&name, &value)?),
				"DEBUG" => overrides.debug = Some(parse_flag(&name, &value)?),
				_ => {}
			}
		}
		Ok(overrides)
	}

	/// Layers `other` on top of `self`; values set in `other` win
	pub fn or(self, other: OptionsOverrides) -> Self {
		Self {
			cache_enabled: other.cache_enabled.or(self.cache_enabled),
			cache_create_dir: other.cache_create_dir.or(self.cache_create_dir),
			cache_dir: other.cache_dir.or(self.cache_dir),
			minify: other.minify.or(self.minify),
			debug: other.debug.or(self.debug),
		}
	}
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" | "" => Ok(false),
		other => Err(AssetError::Config(format!(
			"`{}` must be a boolean, got `{}`",
			name, other
		))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("dev", HostProfile::Development)]
	#[case("dev01.example.org", HostProfile::Development)]
	#[case("web-dev", HostProfile::Production)]
	#[case("", HostProfile::Production)]
	fn test_profile_from_hostname(#[case] hostname: &str, #[case] expected: HostProfile) {
		assert_eq!(HostProfile::from_hostname(hostname), expected);
	}

	#[rstest]
	fn test_minify_and_debug_are_opposites_by_default() {
		for profile in [HostProfile::Development, HostProfile::Production] {
			let options = BuildOptions::for_profile(profile);
			assert_ne!(options.minify, options.debug);
			assert!(options.cache_enabled);
			assert!(options.cache_create_dir);
		}
	}

	#[rstest]
	fn test_builder_methods() {
		let options = BuildOptions::for_profile(HostProfile::Production)
			.with_cache_enabled(false)
			.with_cache_create_dir(false)
			.with_cache_dir("/var/cache/assetmin")
			.with_minify(false)
			.with_debug(true);

		assert!(!options.cache_enabled);
		assert!(!options.cache_create_dir);
		assert_eq!(options.cache_dir, PathBuf::from("/var/cache/assetmin"));
		assert!(!options.minify);
		assert!(options.debug);
	}

	#[rstest]
	fn test_merge_keeps_unset_fields() {
		let base = BuildOptions::for_profile(HostProfile::Production);
		let merged = base.clone().merge(&OptionsOverrides::default());
		assert_eq!(base, merged);
	}

	#[rstest]
	fn test_from_toml_rejects_unknown_keys() {
		let result = OptionsOverrides::from_toml_str("minfy = true");
		assert!(matches!(result, Err(AssetError::Config(_))));
	}

	#[rstest]
	fn test_from_toml_file() {
		let dir = tempfile::TempDir::new().unwrap();
		let path = dir.path().join("assetmin.toml");
		std::fs::write(&path, "cache_enabled = false\ndebug = true\n").unwrap();

		let overrides = OptionsOverrides::from_toml_file(&path).unwrap();
		assert_eq!(overrides.cache_enabled, Some(false));
		assert_eq!(overrides.debug, Some(true));
	}

	#[rstest]
	fn test_from_toml_file_missing() {
		let result = OptionsOverrides::from_toml_file(Path::new("/nonexistent/assetmin.toml"));
		assert!(matches!(result, Err(AssetError::Config(_))));
	}

	#[rstest]
	#[case("1", true)]
	#[case("TRUE", true)]
	#[case("on", true)]
	#[case("0", false)]
	#[case("off", false)]
	fn test_env_flag_values(#[case] value: &str, #[case] expected: bool) {
		let vars = vec![("ASSETMIN_MINIFY".to_string(), value.to_string())];
		let overrides = OptionsOverrides::from_env_vars(vars).unwrap();
		assert_eq!(overrides.minify, Some(expected));
	}

	#[rstest]
	fn test_env_invalid_flag() {
		let vars = vec![("ASSETMIN_CACHE_ENABLED".to_string(), "maybe".to_string())];
		let err = OptionsOverrides::from_env_vars(vars).unwrap_err();
		assert!(err.to_string().contains("ASSETMIN_CACHE_ENABLED"));
	}

	#[rstest]
	fn test_env_cache_dir() {
		let vars = vec![
			("ASSETMIN_CACHE_DIR".to_string(), "/srv/cache".to_string()),
			("ASSETMIN_CACHE_CREATE".to_string(), "no".to_string()),
		];
		let overrides = OptionsOverrides::from_env_vars(vars).unwrap();
		assert_eq!(overrides.cache_dir, Some(PathBuf::from("/srv/cache")));
		assert_eq!(overrides.cache_create_dir, Some(false));
	}

	#[rstest]
	fn test_overrides_layering() {
		let file = OptionsOverrides {
			minify: Some(true),
			debug: Some(false),
			..Default::default()
		};
		let env = OptionsOverrides {
			debug: Some(true),
			..Default::default()
		};
		let combined = file.or(env);
		assert_eq!(combined.minify, Some(true));
		assert_eq!(combined.debug, Some(true));
	}
}
