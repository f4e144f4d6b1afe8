//! Evaluates a parsed filter [`Expression`] against a per-record
//! [`VariableGetter`], producing a boolean or an [`Error`].
//!
//! `AND`/`OR` accumulate over every operand rather than short-circuiting on
//! the first decisive value, but they *do* stop immediately — without
//! evaluating later operands — on the first operand that errors. This
//! reproduces the one end-to-end scenario where it's observable: in
//! `x=5 and (i=7 or foo='foo')`, the left operand (`x=5`) evaluates to
//! `false` but does not short-circuit the `AND`, so the right operand is
//! still evaluated and fails on the unknown identifier `i`.

use std::mem::discriminant;

use regex::{Regex, RegexBuilder};

use crate::error::Error;
use crate::parser::{AndCondition, CompareOp, Condition, ConditionOperand, ConditionRhs, Expression, LikeKind, Term};
use crate::value::Value;

/// A capability interface resolving a filter identifier to a [`Value`].
///
/// `None` means "this identifier is unknown", which the evaluator turns into
/// [`Error::UnknownVariable`]. Implemented for any `Fn(&str) -> Option<Value>`
/// so a plain closure works as a getter.
pub trait VariableGetter {
	fn get(&self, name: &str) -> Option<Value>;
}

impl<F> VariableGetter for F
where
	F: Fn(&str) -> Option<Value>,
{
	fn get(&self, name: &str) -> Option<Value> {
		self(name)
	}
}

/// Test a parsed expression against a getter.
///
/// # Errors
///
/// Returns an [`Error`] if any identifier the expression touches is unknown,
/// or if an operator is applied to operands of mismatched or unsupported
/// types.
pub fn test(expr: &Expression, getter: &impl VariableGetter) -> Result<bool, Error> {
	eval_expression(expr, getter)
}

fn eval_expression(expr: &Expression, getter: &impl VariableGetter) -> Result<bool, Error> {
	let mut acc = false;
	for and_condition in &expr.or {
		let v = eval_and_condition(and_condition, getter)?;
		acc = acc || v;
	}
	Ok(acc)
}

fn eval_and_condition(and: &AndCondition, getter: &impl VariableGetter) -> Result<bool, Error> {
	let mut acc = true;
	for condition in &and.and {
		let v = eval_condition(condition, getter)?;
		acc = acc && v;
	}
	Ok(acc)
}

fn eval_condition(condition: &Condition, getter: &impl VariableGetter) -> Result<bool, Error> {
	match condition {
		Condition::Operand(operand) => eval_condition_operand(operand, getter),
		Condition::Not(inner) => Ok(!eval_condition(inner, getter)?),
	}
}

fn eval_condition_operand(operand: &ConditionOperand, getter: &impl VariableGetter) -> Result<bool, Error> {
	match &operand.rhs {
		None => Ok(eval_term(&operand.operand, getter)?.as_bool()),
		Some(rhs) => eval_rhs(&operand.operand, rhs, getter),
	}
}

fn eval_term(term: &Term, getter: &impl VariableGetter) -> Result<Value, Error> {
	match term {
		Term::Value(v) => Ok(v.clone()),
		Term::Ident(name) => getter.get(name).ok_or_else(|| Error::UnknownVariable(name.clone())),
		Term::Sub(expr) => Ok(Value::Bool(eval_expression(expr, getter)?)),
	}
}

fn eval_rhs(lhs: &Term, rhs: &ConditionRhs, getter: &impl VariableGetter) -> Result<bool, Error> {
	let v1 = eval_term(lhs, getter)?;
	match rhs {
		ConditionRhs::Compare { op, operand } => {
			let v2 = eval_term(operand, getter)?;
			eval_compare(*op, &v1, &v2)
		}
		ConditionRhs::Between { not, low, high } => {
			let lo = eval_term(low, getter)?;
			let hi = eval_term(high, getter)?;
			let r = eval_between(&v1, &lo, &hi)?;
			Ok(r != *not)
		}
		ConditionRhs::In { not, items } => {
			let r = eval_in(&v1, items, getter)?;
			Ok(r != *not)
		}
		ConditionRhs::Like { not, kind, pattern, cache } => {
			let r = eval_like(&v1, *kind, pattern, cache, getter)?;
			Ok(r != *not)
		}
	}
}

fn eval_compare(op: CompareOp, v1: &Value, v2: &Value) -> Result<bool, Error> {
	match (v1, v2) {
		(Value::Int(a), Value::Int(b)) => Ok(compare_from_ordering(op, a.cmp(b))),
		(Value::Text(a), Value::Text(b)) => Ok(compare_from_ordering(op, a.as_bytes().cmp(b.as_bytes()))),
		(Value::Bool(a), Value::Bool(b)) => match op {
			CompareOp::Eq => Ok(a == b),
			CompareOp::NotEq => Ok(a != b),
			_ => Err(Error::InvalidOperatorOrOperands),
		},
		_ => Err(Error::InvalidOperatorOrOperands),
	}
}

fn compare_from_ordering(op: CompareOp, ord: std::cmp::Ordering) -> bool {
	use std::cmp::Ordering::{Equal, Greater, Less};
	match op {
		CompareOp::Eq => ord == Equal,
		CompareOp::NotEq => ord != Equal,
		CompareOp::Lt => ord == Less,
		CompareOp::Gt => ord == Greater,
		CompareOp::Le => ord != Greater,
		CompareOp::Ge => ord != Less,
	}
}

fn eval_between(x: &Value, low: &Value, high: &Value) -> Result<bool, Error> {
	let lo = x.partial_cmp_same_type(low).ok_or(Error::InvalidOperatorOrOperands)?;
	let hi = x.partial_cmp_same_type(high).ok_or(Error::InvalidOperatorOrOperands)?;
	Ok(lo != std::cmp::Ordering::Less && hi != std::cmp::Ordering::Greater)
}

fn eval_in(x: &Value, items: &[Term], getter: &impl VariableGetter) -> Result<bool, Error> {
	let mut saw_matching_type = false;
	for item in items {
		let candidate = eval_term(item, getter)?;
		if discriminant(x) == discriminant(&candidate) {
			saw_matching_type = true;
			if *x == candidate {
				return Ok(true);
			}
		}
	}
	if saw_matching_type {
		Ok(false)
	} else {
		Err(Error::InvalidOperatorOrOperands)
	}
}

fn eval_like(
	x: &Value,
	kind: LikeKind,
	pattern: &Term,
	cache: &std::cell::RefCell<Option<Regex>>,
	getter: &impl VariableGetter,
) -> Result<bool, Error> {
	if cache.borrow().is_none() {
		let pattern_value = eval_term(pattern, getter)?;
		let regex = compile_like_pattern(kind, &pattern_value.as_text())?;
		*cache.borrow_mut() = Some(regex);
	}
	let borrowed = cache.borrow();
	let regex = borrowed.as_ref().expect("regex cache populated above");
	Ok(regex.is_match(&x.as_text()))
}

fn compile_like_pattern(kind: LikeKind, pattern: &str) -> Result<Regex, Error> {
	let compiled = match kind {
		LikeKind::Rlike => RegexBuilder::new(pattern).build(),
		LikeKind::Like | LikeKind::Ilike => {
			let escaped = regex::escape(pattern).replace('%', ".*").replace('_', ".");
			let anchored = format!("^{escaped}$");
			RegexBuilder::new(&anchored).case_insensitive(kind == LikeKind::Ilike).build()
		}
	};
	compiled.map_err(|_| Error::InvalidOperatorOrOperands)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parser::parse;

	fn getter(name: &str) -> Option<Value> {
		match name {
			"x" => Some(Value::Int(3)),
			"y" => Some(Value::Int(40_000)),
			"name" => Some(Value::Text("foobar".into())),
			_ => None,
		}
	}

	fn check(src: &str) -> Result<bool, Error> {
		test(&parse(src).unwrap(), &getter)
	}

	#[test]
	fn like_variants() {
		assert!(check("name like \"foo%\"").unwrap());
		assert!(check("name ilike \"FOO%\"").unwrap());
		assert!(check("name rlike \"^foo.*$\"").unwrap());
	}

	#[test]
	fn and_or_between_in() {
		assert!(check("x=3 and y<70K").unwrap());
		assert!(!check("x=5 and (y=40000 or name=\"foobar\")").unwrap());
		assert!(check("x in (3,5)").unwrap());
		assert!(!check("x not between 3 and 5").unwrap());
	}

	#[test]
	fn unknown_variable_is_an_error() {
		let err = check("noname like \"hug%\"").unwrap_err();
		assert_eq!(err.to_string(), "\"noname\" is unknown");
	}

	#[test]
	fn type_mismatch_is_an_error() {
		let err = check("x=\"x\"").unwrap_err();
		assert_eq!(err.to_string(), "invalid operator or operands");
	}

	#[test]
	fn and_evaluates_right_operand_even_when_left_is_false() {
		// x=5 is false, but the right operand is still evaluated and hits an
		// unknown identifier: the AND does not short-circuit on the value.
		let err = check("x=5 and (i=7 or foo='foo')").unwrap_err();
		assert_eq!(err.to_string(), "\"i\" is unknown");
	}

	#[test]
	fn like_cache_is_reused_across_evaluations() {
		let expr = parse("name like \"foo%\"").unwrap();
		assert!(test(&expr, &getter).unwrap());
		assert!(test(&expr, &getter).unwrap());
	}

	#[test]
	fn size_literals_compare_as_integers() {
		assert!(check("x=3 and y between 1 and 1M").unwrap());
	}
}
