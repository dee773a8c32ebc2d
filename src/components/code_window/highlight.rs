//! Tiny JavaScript-ish highlighter for the fixed code snippets.
//!
//! Produces borrowed, classed spans so the view never injects raw HTML.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
	Plain,
	Comment,
	Str,
	Keyword,
	Function,
}

impl TokenKind {
	pub fn class(self) -> &'static str {
		match self {
			Self::Plain => "tok-plain",
			Self::Comment => "tok-comment",
			Self::Str => "tok-string",
			Self::Keyword => "tok-keyword",
			Self::Function => "tok-function",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
	pub kind: TokenKind,
	pub text: &'a str,
}

const KEYWORDS: &[&str] = &["const", "async", "await", "return", "app"];
const FUNCTIONS: &[&str] = &["getUser", "execute", "get", "send", "sanitize", "escape"];

fn is_ident_start(c: char) -> bool {
	c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Split `src` into tokens. Adjacent plain text is merged into one token.
pub fn highlight(src: &str) -> Vec<Token<'_>> {
	let mut tokens: Vec<Token<'_>> = Vec::new();
	// Start offset of the trailing token, for merging plain runs.
	let mut last_start = 0;
	let mut pos = 0;

	while let Some(c) = src[pos..].chars().next() {
		let rest = &src[pos..];
		let len = if rest.starts_with("//") {
			rest.find('\n').unwrap_or(rest.len())
		} else if matches!(c, '\'' | '"' | '`') {
			string_len(rest, c)
		} else if is_ident_start(c) {
			rest.find(|ch: char| !is_ident(ch)).unwrap_or(rest.len())
		} else {
			c.len_utf8()
		};

		let text = &rest[..len];
		let kind = if text.starts_with("//") {
			TokenKind::Comment
		} else if matches!(c, '\'' | '"' | '`') {
			TokenKind::Str
		} else if KEYWORDS.contains(&text) {
			TokenKind::Keyword
		} else if FUNCTIONS.contains(&text) {
			TokenKind::Function
		} else {
			TokenKind::Plain
		};

		match tokens.last_mut() {
			Some(last) if kind == TokenKind::Plain && last.kind == TokenKind::Plain => {
				last.text = &src[last_start..pos + len];
			}
			_ => {
				last_start = pos;
				tokens.push(Token { kind, text });
			}
		}
		pos += len;
	}
	tokens
}

/// Byte length of the string literal at the start of `s`, quotes included.
/// Single and double quoted strings stop at the end of the line when unclosed.
fn string_len(s: &str, quote: char) -> usize {
	let body = &s[quote.len_utf8()..];
	let mut escaped = false;
	for (i, ch) in body.char_indices() {
		match ch {
			_ if escaped => escaped = false,
			'\\' => escaped = true,
			'\n' if quote != '`' => return quote.len_utf8() + i,
			_ if ch == quote => return quote.len_utf8() + i + ch.len_utf8(),
			_ => {}
		}
	}
	s.len()
}
