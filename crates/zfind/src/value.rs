//! The dynamic, three-valued type that filter literals and record fields share.

use std::cmp::Ordering;
use std::fmt;

/// A filter value: an integer, a piece of text, or a boolean.
///
/// Unlike the struct-of-optionals the original implementation used, this is a
/// proper tagged union, so there is no representable "all fields empty" state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	/// A signed 64-bit integer. Size literals (`10K`, `1.5G`) evaluate to this
	/// variant too; there is no distinction left once parsing is done.
	Int(i64),
	/// A text value, from a quoted literal or a record field.
	Text(String),
	/// A boolean, from `TRUE`/`FALSE` or a comparison result.
	Bool(bool),
}

impl Value {
	/// The coercion used by `AND`/`OR`/`NOT` and by the `Bool()` helper on the
	/// original: integer != 0, text non-empty, or the boolean itself.
	#[must_use]
	pub fn as_bool(&self) -> bool {
		match self {
			Self::Int(n) => *n != 0,
			Self::Text(s) => !s.is_empty(),
			Self::Bool(b) => *b,
		}
	}

	/// The string projection used as the left- and right-hand side of
	/// `LIKE`/`ILIKE`/`RLIKE`: the decimal integer, the text itself, or
	/// `"true"`/`"false"`.
	#[must_use]
	pub fn as_text(&self) -> String {
		match self {
			Self::Int(n) => n.to_string(),
			Self::Text(s) => s.clone(),
			Self::Bool(b) => b.to_string(),
		}
	}

	/// A short, stable tag used in error messages and tests.
	#[must_use]
	pub const fn type_name(&self) -> &'static str {
		match self {
			Self::Int(_) => "integer",
			Self::Text(_) => "text",
			Self::Bool(_) => "boolean",
		}
	}

	/// Ordering between two values of the *same* variant, used by comparisons
	/// and `BETWEEN`. Returns `None` for mismatched variants or for booleans,
	/// which only support equality.
	#[must_use]
	pub fn partial_cmp_same_type(&self, other: &Self) -> Option<Ordering> {
		match (self, other) {
			(Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
			(Self::Text(a), Self::Text(b)) => Some(a.as_bytes().cmp(b.as_bytes())),
			_ => None,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.as_text())
	}
}
