//! Asset concatenation
//!
//! Combines the files of a [`FileSet`] into one artifact, minifying or
//! annotating each file on the way. The builder reads source files and
//! nothing else; caching is the caller's business.

use crate::annotate::annotate_lines;
use crate::minifier::MinifierSet;
use assetmin_core::{AssetError, AssetType, BuildOptions, FileSet, Result};
use chrono::{DateTime, Local};
use std::path::Path;
use std::time::SystemTime;

/// Width the per-file debug banner is padded to
const BANNER_WIDTH: usize = 69;

/// Builds combined assets
///
/// # Examples
///
/// ```rust,no_run
/// use assetmin_core::{AssetType, BuildOptions, HostProfile, PathResolver};
/// use assetmin_processing::bundle::AssetBuilder;
///
/// let files = PathResolver::new("static/css").resolve(&["reset.css", "site.css"])?;
/// let options = BuildOptions::for_profile(HostProfile::Production);
///
/// let css = AssetBuilder::new().build(&files, AssetType::Css, &options)?;
/// # Ok::<(), assetmin_core::AssetError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssetBuilder {
	minifiers: MinifierSet,
}

impl AssetBuilder {
	/// Create a builder using the default minifiers
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a builder using custom minifiers
	pub fn with_minifiers(minifiers: MinifierSet) -> Self {
		Self { minifiers }
	}

	/// Minifiers used by this builder
	pub fn minifiers(&self) -> &MinifierSet {
		&self.minifiers
	}

	/// Combines `files` in order.
	///
	/// Each file is minified when `options.minify` is set, annotated with line
	/// numbers when only `options.debug` is set, and copied verbatim
	/// otherwise. Every file is followed by a newline. Debug builds start
	/// with a manifest of the combined files and put a banner before each
	/// file.
	///
	/// # Errors
	///
	/// [`AssetError::FileUnreadable`] when a file cannot be read, or when a
	/// file that has to be minified or annotated is not valid UTF-8;
	/// [`AssetError::MinifyFailed`] when the minifier rejects a file.
	pub fn build(
		&self,
		files: &FileSet,
		asset_type: AssetType,
		options: &BuildOptions,
	) -> Result<Vec<u8>> {
		let mut content = Vec::new();

		if options.debug {
			content.extend_from_slice(manifest_header(files)?.as_bytes());
		}

		for path in files {
			if options.debug {
				content.extend_from_slice(file_banner(path).as_bytes());
			}

			let source = std::fs::read(path).map_err(|source| AssetError::FileUnreadable {
				path: path.clone(),
				source,
			})?;

			if options.minify {
				let minifier = self.minifiers.for_type(asset_type);
				let minified = minifier.minify(source_text(path, &source)?).map_err(|err| match err {
					AssetError::MinifyFailed { message, .. } => AssetError::MinifyFailed {
						path: path.clone(),
						message,
					},
					other => other,
				})?;
				tracing::trace!(
					file = %path.display(),
					minifier = minifier.name(),
					before = source.len(),
					after = minified.len(),
					"minified file"
				);
				content.extend_from_slice(minified.trim().as_bytes());
			} else if options.debug {
				content.extend_from_slice(annotate_lines(source_text(path, &source)?).as_bytes());
			} else {
				content.extend_from_slice(&source);
			}

			content.push(b'\n');
		}

		tracing::debug!(
			files = files.len(),
			%asset_type,
			minify = options.minify,
			debug = options.debug,
			bytes = content.len(),
			"built asset"
		);

		Ok(content)
	}
}

/// Table of combined files with their modification times.
///
/// ```text
/// /*
///  * Combined files (in this order):
///  *    /srv/static/css/reset.css [19.10.2026 09:12:44]
///  *    /srv/static/css/site.css  [18.10.2026 17:03:01]
///  */
/// ```
fn manifest_header(files: &FileSet) -> Result<String> {
	let width = files
		.iter()
		.map(|path| path.display().to_string().chars().count())
		.max()
		.unwrap_or(0);

	let mut header = String::from("/* \n * Combined files (in this order):\n");
	for path in files {
		let modified = modified_time(path)?;
		header.push_str(&format!(
			" *    {:<width$} [{}]\n",
			path.display().to_string(),
			format_timestamp(modified),
			width = width
		));
	}
	header.push_str(" */\n");
	Ok(header)
}

/// Source text of a file that gets minified or annotated.
///
/// Verbatim copies keep arbitrary bytes, everything else needs UTF-8.
fn source_text<'a>(path: &Path, source: &'a [u8]) -> Result<&'a str> {
	std::str::from_utf8(source).map_err(|err| AssetError::FileUnreadable {
		path: path.to_path_buf(),
		source: std::io::Error::new(std::io::ErrorKind::InvalidData, err),
	})
}

fn file_banner(path: &Path) -> String {
	let name = path.display().to_string();
	let dashes = BANNER_WIDTH.saturating_sub(name.len()).max(3);
	format!("\n/* --- {} {} */\n", name, "-".repeat(dashes))
}

fn modified_time(path: &Path) -> Result<SystemTime> {
	std::fs::metadata(path)
		.and_then(|metadata| metadata.modified())
		.map_err(|source| AssetError::FileUnreadable {
			path: path.to_path_buf(),
			source,
		})
}

fn format_timestamp(time: SystemTime) -> String {
	DateTime::<Local>::from(time)
		.format("%d.%m.%Y %H:%M:%S")
		.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::minifier::Minifier;
	use assetmin_core::{HostProfile, PathResolver};
	use rstest::{fixture, rstest};
	use std::path::PathBuf;
	use std::sync::Arc;
	use tempfile::TempDir;

	struct Sources {
		dir: TempDir,
	}

	impl Sources {
		fn write(&self, name: &str, content: &str) -> &Self {
			std::fs::write(self.dir.path().join(name), content).unwrap();
			self
		}

		fn files(&self, names: &[&str]) -> FileSet {
			PathResolver::new(self.dir.path()).resolve(names).unwrap()
		}
	}

	#[fixture]
	fn sources() -> Sources {
		Sources {
			dir: TempDir::new().unwrap(),
		}
	}

	fn plain() -> BuildOptions {
		BuildOptions::for_profile(HostProfile::Production)
			.with_minify(false)
			.with_debug(false)
	}

	#[rstest]
	fn test_verbatim_concatenation(sources: Sources) {
		sources.write("a.js", "var a = 1;").write("b.js", "var b = 2;\n");
		let files = sources.files(&["a.js", "b.js"]);

		let output = AssetBuilder::new().build(&files, AssetType::Js, &plain()).unwrap();

		assert_eq!(output, b"var a = 1;\nvar b = 2;\n\n");
	}

	#[rstest]
	fn test_minified_css_in_file_order(sources: Sources) {
		sources
			.write("a.css", ".x  { color : blue ; }")
			.write("b.css", "/* b */ .y { color: green }");
		let files = sources.files(&["b.css", "a.css"]);
		let options = plain().with_minify(true);

		let output = AssetBuilder::new().build(&files, AssetType::Css, &options).unwrap();

		assert_eq!(String::from_utf8(output).unwrap(), ".y{color:green}\n.x{color:blue}\n");
	}

	#[rstest]
	fn test_minified_js_is_trimmed(sources: Sources) {
		sources.write("a.js", "\n\nvar a = 1;\n\n");
		let files = sources.files(&["a.js"]);
		let options = plain().with_minify(true);

		let output = String::from_utf8(
			AssetBuilder::new().build(&files, AssetType::Js, &options).unwrap(),
		)
		.unwrap();

		assert!(output.starts_with("var a=1"), "unexpected output: {output:?}");
		assert!(output.ends_with('\n'));
		assert!(!output.trim_end_matches('\n').ends_with(char::is_whitespace));
		assert_eq!(output.matches('\n').count(), 1);
	}

	#[rstest]
	fn test_minify_wins_over_annotation(sources: Sources) {
		sources.write("a.css", "a { b: c }");
		let files = sources.files(&["a.css"]);
		let options = plain().with_minify(true).with_debug(true);

		let output = String::from_utf8(
			AssetBuilder::new().build(&files, AssetType::Css, &options).unwrap(),
		)
		.unwrap();

		assert!(output.ends_with("a{b:c}\n"));
		assert!(!output.contains("/* 1 */"));
	}

	#[rstest]
	fn test_debug_output_has_manifest_banner_and_line_numbers(sources: Sources) {
		sources.write("first.js", "one();\ntwo();").write("second.js", "three();");
		let files = sources.files(&["first.js", "second.js"]);
		let options = plain().with_debug(true);

		let output = String::from_utf8(
			AssetBuilder::new().build(&files, AssetType::Js, &options).unwrap(),
		)
		.unwrap();

		assert!(output.starts_with("/* \n * Combined files (in this order):\n"));
		let first = files.paths()[0].display().to_string();
		let second = files.paths()[1].display().to_string();
		assert!(output.find(&first).unwrap() < output.find(&second).unwrap());
		assert!(output.contains(&format!("\n/* --- {} ", first)));
		assert!(output.contains("/* 1 */   one();\n/* 2 */   two();\n"));
		assert!(output.contains("/* 1 */   three();\n"));
	}

	#[rstest]
	fn test_manifest_rows_are_aligned(sources: Sources) {
		sources.write("a.js", "").write("long-name.js", "");
		let files = sources.files(&["a.js", "long-name.js"]);

		let header = manifest_header(&files).unwrap();
		let columns: Vec<usize> = header
			.lines()
			.filter(|line| line.starts_with(" *    "))
			.map(|line| line.find('[').unwrap())
			.collect();

		assert_eq!(columns.len(), 2);
		assert_eq!(columns[0], columns[1]);
	}

	#[rstest]
	#[case("/short.js", 69 - 9)]
	#[case(&format!("/{}", "x".repeat(80)), 3)]
	fn test_banner_dash_count(#[case] path: &str, #[case] dashes: usize) {
		let banner = file_banner(Path::new(path));
		assert_eq!(banner, format!("\n/* --- {} {} */\n", path, "-".repeat(dashes)));
	}

	#[rstest]
	fn test_unreadable_file(sources: Sources) {
		sources.write("a.css", "a{}");
		let files = sources.files(&["a.css"]);
		std::fs::remove_file(&files.paths()[0]).unwrap();

		let err = AssetBuilder::new().build(&files, AssetType::Css, &plain()).unwrap_err();

		match err {
			AssetError::FileUnreadable { path, .. } => assert_eq!(path, files.paths()[0]),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[rstest]
	fn test_minify_error_names_file(sources: Sources) {
		sources.write("broken.js", "var s = 'unterminated;");
		let files = sources.files(&["broken.js"]);
		let options = plain().with_minify(true);

		let err = AssetBuilder::new().build(&files, AssetType::Js, &options).unwrap_err();

		match err {
			AssetError::MinifyFailed { path, .. } => assert_eq!(path, files.paths()[0]),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[rstest]
	#[case(plain().with_minify(true))]
	#[case(plain().with_debug(true))]
	fn test_invalid_utf8_is_rejected_when_transformed(sources: Sources, #[case] options: BuildOptions) {
		std::fs::write(sources.dir.path().join("a.css"), b"a{content:\"\xff\"}").unwrap();
		let files = sources.files(&["a.css"]);

		let err = AssetBuilder::new().build(&files, AssetType::Css, &options).unwrap_err();

		match err {
			AssetError::FileUnreadable { path, source } => {
				assert_eq!(path, files.paths()[0]);
				assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[rstest]
	fn test_invalid_utf8_is_copied_verbatim(sources: Sources) {
		std::fs::write(sources.dir.path().join("a.css"), b"a{content:\"\xff\"}").unwrap();
		let files = sources.files(&["a.css"]);

		let output = AssetBuilder::new().build(&files, AssetType::Css, &plain()).unwrap();

		assert_eq!(output, b"a{content:\"\xff\"}\n");
	}

	#[rstest]
	fn test_custom_js_minifier(sources: Sources) {
		struct Shout;
		impl Minifier for Shout {
			fn minify(&self, source: &str) -> Result<String> {
				Ok(format!("  {}  ", source.to_uppercase()))
			}
			fn name(&self) -> &str {
				"Shout"
			}
		}

		sources.write("a.js", "hello()");
		let files = sources.files(&["a.js"]);
		let builder = AssetBuilder::with_minifiers(MinifierSet::default().with_js(Arc::new(Shout)));

		let output = builder.build(&files, AssetType::Js, &plain().with_minify(true)).unwrap();

		assert_eq!(output, b"HELLO()\n");
	}

	#[rstest]
	fn test_empty_file_set() {
		let output = AssetBuilder::new()
			.build(&FileSet::from_canonical(Vec::<PathBuf>::new()), AssetType::Css, &plain())
			.unwrap();
		assert!(output.is_empty());
	}
}
