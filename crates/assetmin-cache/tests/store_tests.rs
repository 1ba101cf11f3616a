//! Cache store tests

use assetmin_cache::{CacheKey, CacheStore};
use assetmin_core::{AssetType, BuildOptions, HostProfile, PathResolver};
use assetmin_processing::AssetBuilder;
use rstest::rstest;
use std::fs::File;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

#[rstest]
fn test_rebuild_after_source_change_matches_uncached_build() {
	let temp_dir = TempDir::new().unwrap();
	let static_dir = temp_dir.path().join("static");
	std::fs::create_dir(&static_dir).unwrap();
	std::fs::write(static_dir.join("a.css"), ".x { color: blue }").unwrap();
	std::fs::write(static_dir.join("b.css"), ".y { color: green }").unwrap();

	let options = BuildOptions::for_profile(HostProfile::Production);
	let files = PathResolver::new(&static_dir).resolve(&["a.css", "b.css"]).unwrap();
	let key = CacheKey::new(&files, AssetType::Css, options.minify, options.debug);
	let store = CacheStore::open(temp_dir.path().join("cache"), true).unwrap();
	let builder = AssetBuilder::new();

	let first = store
		.store(&key, &builder.build(&files, AssetType::Css, &options).unwrap())
		.unwrap();
	assert_eq!(first.content, b".x{color:blue}\n.y{color:green}\n");

	std::fs::write(static_dir.join("b.css"), ".y { color: red }").unwrap();
	File::options()
		.write(true)
		.open(static_dir.join("b.css"))
		.unwrap()
		.set_modified(SystemTime::now() + Duration::from_secs(3600))
		.unwrap();

	assert!(store.lookup_fresh(&key, &files).unwrap().is_none());

	let rebuilt = store
		.store(&key, &builder.build(&files, AssetType::Css, &options).unwrap())
		.unwrap();
	let uncached = builder.build(&files, AssetType::Css, &options).unwrap();

	assert_eq!(rebuilt.content, uncached);
	assert_eq!(rebuilt.content, b".x{color:blue}\n.y{color:red}\n");
	assert_ne!(rebuilt.etag, first.etag);
}

#[rstest]
fn test_debug_and_minified_builds_do_not_share_entries() {
	let temp_dir = TempDir::new().unwrap();
	std::fs::write(temp_dir.path().join("a.js"), "run();").unwrap();
	let files = PathResolver::new(temp_dir.path()).resolve(&["a.js"]).unwrap();

	let production = BuildOptions::for_profile(HostProfile::Production);
	let development = BuildOptions::for_profile(HostProfile::Development);

	let production_key = CacheKey::new(&files, AssetType::Js, production.minify, production.debug);
	let development_key = CacheKey::new(&files, AssetType::Js, development.minify, development.debug);

	assert_ne!(production_key, development_key);
	assert!(production_key.as_str().ends_with(".min.js"));
	assert!(development_key.as_str().ends_with(".dbg.js"));
}
