//! Public entry point for the filter language: compile source once, test it
//! against many records.

use crate::error::Error;
use crate::eval::{self, VariableGetter};
use crate::parser::{self, Expression};

/// A compiled filter expression.
///
/// Immutable except for the per-`LIKE` regex cache each AST node carries,
/// which is populated on first use (see [`eval`]).
#[derive(Debug)]
pub struct Filter {
	expression: Expression,
}

impl Filter {
	/// Test a record's getter against this filter.
	///
	/// # Errors
	///
	/// See [`eval::test`].
	pub fn test(&self, getter: &impl VariableGetter) -> Result<bool, Error> {
		eval::test(&self.expression, getter)
	}
}

/// Parse filter source into a reusable [`Filter`].
///
/// # Errors
///
/// Returns [`Error::Parse`] if `source` is not well-formed per the grammar.
pub fn compile(source: &str) -> Result<Filter, Error> {
	Ok(Filter { expression: parser::parse(source)? })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::Value;

	#[test]
	fn compiles_and_tests() {
		let filter = compile("x between 3 and 5").unwrap();
		let getter = |name: &str| match name {
			"x" => Some(Value::Int(4)),
			_ => None,
		};
		assert!(filter.test(&getter).unwrap());
	}
}
