//! Tokenizer for the filter language.
//!
//! A hand-rolled scanner rather than a regex-per-token-class engine: the
//! token set is small and fixed, and a single left-to-right scan keeps the
//! "keyword beats ident" and "longest operator first" rules local instead of
//! spread across a table of compiled patterns.

use crate::error::{Error, Position};

/// One lexical token, tagged with the byte offset it started at (used for
/// [`Error::Parse`] positions).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
	pub kind: TokenKind,
	pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
	Keyword(Keyword),
	Ident(String),
	Size(i64),
	Number(f64),
	Text(String),
	Operator(Operator),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
	True,
	False,
	Not,
	Between,
	And,
	Or,
	Like,
	Ilike,
	Rlike,
	In,
}

impl Keyword {
	fn from_word(word: &str) -> Option<Self> {
		Some(match word.to_ascii_uppercase().as_str() {
			"TRUE" => Self::True,
			"FALSE" => Self::False,
			"NOT" => Self::Not,
			"BETWEEN" => Self::Between,
			"AND" => Self::And,
			"OR" => Self::Or,
			"LIKE" => Self::Like,
			"ILIKE" => Self::Ilike,
			"RLIKE" => Self::Rlike,
			"IN" => Self::In,
			_ => return None,
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
	NotEqualDiamond, // <>
	NotEqualBang,    // !=
	LessEqual,
	GreaterEqual,
	Equal,
	Less,
	Greater,
	Comma,
	Dot,
	LParen,
	RParen,
}

/// Turn filter source into a flat token stream.
///
/// # Errors
///
/// Returns [`Error::Parse`] on the first byte that cannot start any token
/// (after whitespace has been skipped), or on an unterminated quoted string.
pub fn tokenize(src: &str) -> Result<Vec<Token>, Error> {
	let bytes = src.as_bytes();
	let mut tokens = Vec::new();
	let mut i = 0;

	while i < bytes.len() {
		let c = bytes[i] as char;

		if c.is_whitespace() {
			i += 1;
			continue;
		}

		let start = i;

		if c == '\'' || c == '"' {
			let quote = c;
			let mut j = i + 1;
			while j < bytes.len() && bytes[j] as char != quote {
				j += 1;
			}
			if j >= bytes.len() {
				return Err(parse_error(start, "unterminated string literal"));
			}
			let text = src[i + 1..j].to_string();
			tokens.push(Token {
				kind: TokenKind::Text(text),
				offset: start,
			});
			i = j + 1;
			continue;
		}

		if is_numeric_start(bytes, i) || ((c == '+' || c == '-') && is_numeric_start(bytes, i + 1)) {
			let (kind, next) = lex_number_or_size(src, i)?;
			tokens.push(Token { kind, offset: start });
			i = next;
			continue;
		}

		if c.is_ascii_alphabetic() || c == '_' {
			let mut j = i + 1;
			while j < bytes.len() && (is_ident_byte(bytes[j])) {
				j += 1;
			}
			let word = &src[i..j];
			let kind = Keyword::from_word(word)
				.map(TokenKind::Keyword)
				.unwrap_or_else(|| TokenKind::Ident(word.to_string()));
			tokens.push(Token { kind, offset: start });
			i = j;
			continue;
		}

		if let Some((op, len)) = lex_operator(&src[i..]) {
			tokens.push(Token {
				kind: TokenKind::Operator(op),
				offset: start,
			});
			i += len;
			continue;
		}

		return Err(parse_error(start, format!("unexpected character '{c}'")));
	}

	Ok(tokens)
}

fn is_ident_byte(b: u8) -> bool {
	(b as char).is_ascii_alphanumeric() || b == b'_'
}

fn peek_digit(bytes: &[u8], at: usize) -> bool {
	bytes.get(at).is_some_and(|b| b.is_ascii_digit())
}

/// `true` if a numeric literal (`Size` or unsigned `Number`) could start at
/// `at`: a digit, or a `.` immediately followed by one.
fn is_numeric_start(bytes: &[u8], at: usize) -> bool {
	bytes.get(at).is_some_and(|&b| {
		let c = b as char;
		c.is_ascii_digit() || (c == '.' && peek_digit(bytes, at + 1))
	})
}

/// `Size` (`\d*\.?\d+[BKMGTbkmgt]`) takes priority over `Number` when a unit
/// suffix immediately follows the digits; otherwise we fall back to `Number`,
/// which additionally allows a leading sign and scientific notation. The
/// grammar's `Size` production has no sign, so a leading `+`/`-` always
/// lexes as `Number`, even when a unit letter immediately follows the
/// digits (`-10K` is `Number(-10)` followed by `Ident("K")`).
fn lex_number_or_size(src: &str, start: usize) -> Result<(TokenKind, usize), Error> {
	let bytes = src.as_bytes();
	let mut j = start;
	if bytes[j] as char == '+' || bytes[j] as char == '-' {
		j += 1;
	}
	let had_sign = j > start;
	let digits_start = j;
	while j < bytes.len() && bytes[j].is_ascii_digit() {
		j += 1;
	}
	if j < bytes.len() && bytes[j] as char == '.' {
		j += 1;
		while j < bytes.len() && bytes[j].is_ascii_digit() {
			j += 1;
		}
	}
	if j == digits_start {
		return Err(parse_error(start, "malformed numeric literal"));
	}

	if !had_sign {
		if let Some(&unit_byte) = bytes.get(j) {
			let unit = unit_byte as char;
			if matches!(unit, 'B' | 'K' | 'M' | 'G' | 'T' | 'b' | 'k' | 'm' | 'g' | 't') {
				let next = j + 1;
				// A unit suffix must not be immediately followed by more ident
				// characters (that would make this the start of an identifier).
				if !bytes.get(next).is_some_and(|&b| is_ident_byte(b)) {
					let literal = &src[start..next];
					let size = crate::size::parse_size(literal)?;
					return Ok((TokenKind::Size(size), next));
				}
			}
		}
	}

	// Optional scientific-notation exponent, e.g. `1e-3`.
	let mut k = j;
	if bytes.get(k).is_some_and(|&b| b as char == 'e' || b as char == 'E') {
		let mut m = k + 1;
		if bytes.get(m).is_some_and(|&b| b as char == '+' || b as char == '-') {
			m += 1;
		}
		let exp_digits_start = m;
		while bytes.get(m).is_some_and(u8::is_ascii_digit) {
			m += 1;
		}
		if m > exp_digits_start {
			k = m;
		}
	}

	let literal = &src[start..k];
	let value: f64 = literal.parse().map_err(|_| parse_error(start, "malformed numeric literal"))?;
	Ok((TokenKind::Number(value), k))
}

fn lex_operator(rest: &str) -> Option<(Operator, usize)> {
	let two = rest.get(0..2);
	if two == Some("<>") {
		return Some((Operator::NotEqualDiamond, 2));
	}
	if two == Some("!=") {
		return Some((Operator::NotEqualBang, 2));
	}
	if two == Some("<=") {
		return Some((Operator::LessEqual, 2));
	}
	if two == Some(">=") {
		return Some((Operator::GreaterEqual, 2));
	}
	match rest.chars().next()? {
		',' => Some((Operator::Comma, 1)),
		'.' => Some((Operator::Dot, 1)),
		'(' => Some((Operator::LParen, 1)),
		')' => Some((Operator::RParen, 1)),
		'=' => Some((Operator::Equal, 1)),
		'<' => Some((Operator::Less, 1)),
		'>' => Some((Operator::Greater, 1)),
		_ => None,
	}
}

fn parse_error(offset: usize, message: impl Into<String>) -> Error {
	Error::Parse {
		position: Position::new(offset),
		message: message.into(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn kinds(src: &str) -> Vec<TokenKind> {
		tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
	}

	#[test]
	fn keywords_beat_idents() {
		assert_eq!(kinds("and"), vec![TokenKind::Keyword(Keyword::And)]);
		assert_eq!(kinds("AND"), vec![TokenKind::Keyword(Keyword::And)]);
		assert_eq!(kinds("android"), vec![TokenKind::Ident("android".into())]);
	}

	#[test]
	fn sizes_and_numbers() {
		assert_eq!(kinds("10K"), vec![TokenKind::Size(10 * 1024)]);
		assert_eq!(kinds("3"), vec![TokenKind::Number(3.0)]);
		assert_eq!(kinds("1.5e2"), vec![TokenKind::Number(150.0)]);
	}

	#[test]
	fn signed_numbers_lex_as_number_not_size() {
		assert_eq!(kinds("-1"), vec![TokenKind::Number(-1.0)]);
		assert_eq!(kinds("+3.5"), vec![TokenKind::Number(3.5)]);
		// `Size` has no sign in the grammar: a signed literal followed by a
		// unit letter is `Number` then a separate `Ident`, not one `Size`.
		assert_eq!(
			kinds("-10K"),
			vec![TokenKind::Number(-10.0), TokenKind::Ident("K".into())]
		);
	}

	#[test]
	fn quoted_text_both_quote_styles() {
		assert_eq!(kinds("\"foo\""), vec![TokenKind::Text("foo".into())]);
		assert_eq!(kinds("'foo'"), vec![TokenKind::Text("foo".into())]);
	}

	#[test]
	fn operators() {
		assert_eq!(
			kinds("<> != <= >= = < >"),
			vec![
				TokenKind::Operator(Operator::NotEqualDiamond),
				TokenKind::Operator(Operator::NotEqualBang),
				TokenKind::Operator(Operator::LessEqual),
				TokenKind::Operator(Operator::GreaterEqual),
				TokenKind::Operator(Operator::Equal),
				TokenKind::Operator(Operator::Less),
				TokenKind::Operator(Operator::Greater),
			]
		);
	}

	#[test]
	fn unterminated_string_is_an_error() {
		assert!(tokenize("name = \"foo").is_err());
	}

	#[test]
	fn unexpected_character_is_an_error() {
		assert!(tokenize("name = foo & bar").is_err());
	}
}
