//! Error kinds shared by the filter language, the field getter, the archive
//! listers and the walker.
//!
//! [`Error::Parse`] is fatal: a caller should abort before walking anything.
//! The rest are per-record: the walker reports them on its error channel and
//! keeps going, matching the propagation policy the original implementation
//! used (one bad file or one unknown variable never aborts the whole walk).

use std::path::PathBuf;

use thiserror::Error;

/// A position in filter source, used by [`Error::Parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
	/// Zero-based byte offset into the filter source.
	pub offset: usize,
}

impl Position {
	#[must_use]
	pub const fn new(offset: usize) -> Self {
		Self { offset }
	}
}

/// The crate's unified error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
	/// The filter source failed to parse.
	#[error("parse error at offset {position}: {message}", position = position.offset)]
	Parse { position: Position, message: String },

	/// A size literal's numeric part could not be parsed (`parse_size`).
	#[error("malformed size literal {0:?}")]
	MalformedSize(String),

	/// The getter returned `None` for an identifier referenced by the filter.
	#[error("\"{0}\" is unknown")]
	UnknownVariable(String),

	/// A comparison, `BETWEEN`, or `IN` mixed incompatible types, or used an
	/// operator a type doesn't support (e.g. `<` on booleans).
	#[error("invalid operator or operands")]
	InvalidOperatorOrOperands,

	/// An I/O or decoder failure while walking the filesystem or reading an
	/// archive's member index.
	#[error("{path}: {cause}")]
	Find { path: PathBuf, cause: String },
}

impl Error {
	/// Build a [`Error::Find`] from any displayable cause.
	pub fn find(path: impl Into<PathBuf>, cause: impl std::fmt::Display) -> Self {
		Self::Find {
			path: path.into(),
			cause: cause.to_string(),
		}
	}
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
