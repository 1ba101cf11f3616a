//! Build, cache and revalidate through the facade crate

use assetmin::prelude::*;
use assetmin::generate_etag;
use rstest::rstest;
use tempfile::TempDir;

#[rstest]
fn test_build_store_and_reload() {
	let temp_dir = TempDir::new().unwrap();
	std::fs::write(temp_dir.path().join("a.css"), ".x{color:blue}").unwrap();
	std::fs::write(temp_dir.path().join("b.css"), ".y{color:green}").unwrap();

	let options = BuildOptions::for_profile(HostProfile::Production)
		.with_cache_dir(temp_dir.path().join("cache"));
	let files = PathResolver::new(temp_dir.path()).resolve(&["a.css", "b.css"]).unwrap();
	let key = CacheKey::new(&files, AssetType::Css, options.minify, options.debug);
	let store = CacheStore::open(&options.cache_dir, options.cache_create_dir).unwrap();

	let built = AssetBuilder::new().build(&files, AssetType::Css, &options).unwrap();
	let stored = store.store(&key, &built).unwrap();
	let loaded = store.lookup_fresh(&key, &files).unwrap().unwrap();

	assert_eq!(loaded.content, b".x{color:blue}\n.y{color:green}\n");
	assert_eq!(loaded.etag, stored.etag);
	assert_eq!(loaded.etag, generate_etag(loaded.size, loaded.modified, &key));
}
