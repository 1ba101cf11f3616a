//! Line-number annotation for debug builds
//!
//! Every line gets a numbered prefix so combined output can be mapped back
//! to its source file. The prefix must never change how the code parses:
//! inside a block comment it uses `/+ N +/` (a `*/` would close the comment),
//! and inside an IE conditional-compilation block it is blanked out entirely,
//! since that runtime interprets the comment contents as code.

use crate::tokenizer::{Token, tokenize};

/// Spacer between the prefix and the original line
const SPACER: &str = "   ";

/// Comment state carried from one line to the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotatorState {
	/// Inside a block comment
	pub in_comment: bool,
	/// Inside a conditional-compilation block
	pub in_conditional_compilation: bool,
}

impl AnnotatorState {
	/// Applies one token
	pub fn apply(&mut self, token: Token) {
		match token {
			Token::ConditionalCompilationStart => self.in_conditional_compilation = true,
			Token::ConditionalCompilationEnd => self.in_conditional_compilation = false,
			Token::CommentStart => self.in_comment = true,
			Token::CommentEnd => self.in_comment = false,
		}
	}

	fn prefix(&self, number: usize, width: usize) -> String {
		let prefix = if self.in_comment {
			format!("/+ {:0width$} +/", number, width = width)
		} else {
			format!("/* {:0width$} */", number, width = width)
		};

		if self.in_conditional_compilation {
			" ".repeat(prefix.chars().count())
		} else {
			prefix
		}
	}
}

/// Prefixes every line of `code` with its line number.
///
/// Lines are split on `\n`; a trailing newline produces a final, numbered
/// empty line. Numbers are zero-padded to the width of the line count.
///
/// # Examples
///
/// ```rust
/// use assetmin_processing::annotate::annotate_lines;
///
/// let annotated = annotate_lines("a();\n/* note\n   more */\nb();");
/// assert_eq!(
///     annotated,
///     "/* 1 */   a();\n/* 2 */   /* note\n/+ 3 +/      more */\n/* 4 */   b();"
/// );
/// ```
pub fn annotate_lines(code: &str) -> String {
	let lines: Vec<&str> = code.split('\n').collect();
	let width = lines.len().to_string().len();
	let mut state = AnnotatorState::default();
	let mut annotated = Vec::with_capacity(lines.len());

	for (index, line) in lines.iter().enumerate() {
		let prefix = state.prefix(index + 1, width);
		annotated.push(format!("{}{}{}", prefix, SPACER, line));

		for token in tokenize(line) {
			state.apply(token);
		}
	}

	annotated.join("\n")
}
