//! Regex-based CSS minification
//!
//! CSS is simple enough that a fixed pipeline of substitutions removes
//! comments and redundant whitespace safely. Malformed input is processed on
//! a best-effort basis and never rejected.

use crate::minifier::Minifier;
use assetmin_core::Result;
use once_cell::sync::Lazy;
use regex::Regex;

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\s+").unwrap());
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s?([;,:(){}>])\s?").unwrap());
static MEDIA_AND: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\band\(").unwrap());
static TRAILING_SEMICOLON: Lazy<Regex> = Lazy::new(|| Regex::new(r";+\}").unwrap());

/// Minifies CSS source text.
///
/// The steps run in this order, each on the previous result:
///
/// 1. remove `/* ... */` comments, repeatedly
/// 2. trim the whole text
/// 3. collapse whitespace runs to a single space
/// 4. drop whitespace around `;`, `,`, `:`, `(`, `)`, `{`, `}` and `>`
/// 5. restore the space media queries need in `and (`
/// 6. drop semicolons directly before `}`
///
/// # Examples
///
/// ```rust
/// use assetmin_processing::css::minify_css;
///
/// assert_eq!(minify_css(".a  {  color : red ;  }"), ".a{color:red}");
/// assert_eq!(minify_css("@media and(min-width:1px){}"), "@media and (min-width:1px){}");
/// ```
pub fn minify_css(css: &str) -> String {
	let output = strip_comments(css);
	let output = output.trim();
	let output = WHITESPACE_RUN.replace_all(output, " ");
	let output = PUNCTUATION.replace_all(&output, "$1");
	let output = MEDIA_AND.replace_all(&output, "and (");
	let output = TRAILING_SEMICOLON.replace_all(&output, "}");
	output.into_owned()
}

/// Removes comments until none are left.
///
/// A single pass can splice the remains of two comments into a new one,
/// as in `//* a */* b */`.
fn strip_comments(css: &str) -> String {
	let mut output = COMMENT.replace_all(css, "").into_owned();
	while COMMENT.is_match(&output) {
		output = COMMENT.replace_all(&output, "").into_owned();
	}
	output
}

/// [`Minifier`] wrapper around [`minify_css`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CssMinifier;

impl CssMinifier {
	/// Creates a CSS minifier
	pub fn new() -> Self {
		Self
	}
}

impl Minifier for CssMinifier {
	fn minify(&self, source: &str) -> Result<String> {
		Ok(minify_css(source))
	}

	fn name(&self) -> &str {
		"CssMinifier"
	}
}
