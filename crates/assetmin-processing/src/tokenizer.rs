//! Comment and conditional-compilation delimiter scanning
//!
//! JavaScript and CSS comments do not nest, and JavaScript has no multi-line
//! string literals, so a literal substring scan per line is enough to follow
//! comment state across a file. No lexer is involved.

/// A delimiter found in a line of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
	/// `/*`
	CommentStart,
	/// `*/`
	CommentEnd,
	/// `/*@cc_on`, `/*@if` or `/*@set`
	ConditionalCompilationStart,
	/// `@*/`
	ConditionalCompilationEnd,
}

/// Delimiter literals, highest priority first.
///
/// When two literals match at the same offset the earlier one wins. The
/// conditional-compilation openers must precede `/*`, which is a prefix of
/// all of them.
pub const DELIMITERS: &[(&str, Token)] = &[
	("/*@cc_on", Token::ConditionalCompilationStart),
	("/*@if", Token::ConditionalCompilationStart),
	("/*@set", Token::ConditionalCompilationStart),
	("@*/", Token::ConditionalCompilationEnd),
	("/*", Token::CommentStart),
	("*/", Token::CommentEnd),
];

/// Returns the delimiters of `line` in order of occurrence.
///
/// Each literal contributes its non-overlapping occurrences; a byte offset
/// claimed by a higher-priority literal is not reported again.
///
/// # Examples
///
/// ```rust
/// use assetmin_processing::tokenizer::{tokenize, Token};
///
/// assert_eq!(
///     tokenize("/*@cc_on alert(1); @*/"),
///     vec![
///         Token::ConditionalCompilationStart,
///         Token::ConditionalCompilationEnd,
///         Token::CommentEnd,
///     ]
/// );
/// ```
pub fn tokenize(line: &str) -> Vec<Token> {
	let mut matches: Vec<(usize, Token)> = Vec::new();

	for &(literal, token) in DELIMITERS {
		for (offset, _) in line.match_indices(literal) {
			if !matches.iter().any(|&(taken, _)| taken == offset) {
				matches.push((offset, token));
			}
		}
	}

	matches.sort_by_key(|&(offset, _)| offset);
	matches.into_iter().map(|(_, token)| token).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("var a = 1;", vec![])]
	#[case("/* comment */", vec![Token::CommentStart, Token::CommentEnd])]
	#[case("a(); /* open", vec![Token::CommentStart])]
	#[case("close */ b();", vec![Token::CommentEnd])]
	#[case("/*@cc_on", vec![Token::ConditionalCompilationStart])]
	#[case("/*@if (@_jscript_version >= 5)", vec![Token::ConditionalCompilationStart])]
	#[case("/*@set @debug = true @*/", vec![
		Token::ConditionalCompilationStart,
		Token::ConditionalCompilationEnd,
		Token::CommentEnd,
	])]
	fn test_tokenize(#[case] line: &str, #[case] expected: Vec<Token>) {
		assert_eq!(tokenize(line), expected);
	}

	#[rstest]
	fn test_conditional_start_wins_over_comment_start() {
		let tokens = tokenize("/*@cc_on");
		assert_eq!(tokens.len(), 1);
		assert_eq!(tokens[0], Token::ConditionalCompilationStart);
	}

	#[rstest]
	fn test_tokens_ordered_by_offset() {
		let tokens = tokenize("*/ x /* y */ z /*");
		assert_eq!(
			tokens,
			vec![
				Token::CommentEnd,
				Token::CommentStart,
				Token::CommentEnd,
				Token::CommentStart,
			]
		);
	}

	#[rstest]
	fn test_adjacent_comments() {
		assert_eq!(
			tokenize("/**//**/"),
			vec![
				Token::CommentStart,
				Token::CommentEnd,
				Token::CommentStart,
				Token::CommentEnd,
			]
		);
	}

	#[rstest]
	fn test_multibyte_text_is_handled() {
		assert_eq!(
			tokenize("/* größe */ ü"),
			vec![Token::CommentStart, Token::CommentEnd]
		);
	}
}
