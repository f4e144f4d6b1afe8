//! Recursive-descent parser and AST for the filter grammar (see the crate's
//! `SPEC_FULL.md` §3.3 for the grammar in EBNF form).
//!
//! Unlike a participle-style struct-to-grammar mapping, this is a plain
//! parser over an explicit token stream emitting explicit AST variants —
//! easier to read and to extend with a new operator than a derive macro.

use std::cell::RefCell;

use regex::Regex;

use crate::error::{Error, Position};
use crate::lexer::{self, Keyword, Operator, Token, TokenKind};
use crate::value::Value;

/// `Expression := OrTerm ("OR" OrTerm)*`
#[derive(Debug)]
pub struct Expression {
	pub or: Vec<AndCondition>,
}

/// `OrTerm := AndTerm ("AND" AndTerm)*`
#[derive(Debug)]
pub struct AndCondition {
	pub and: Vec<Condition>,
}

/// `AndTerm := "NOT" AndTerm | Operand (RHS)?`
#[derive(Debug)]
pub enum Condition {
	Operand(ConditionOperand),
	Not(Box<Condition>),
}

/// `Operand := Term` plus an optional comparison/between/in/like tail.
#[derive(Debug)]
pub struct ConditionOperand {
	pub operand: Term,
	pub rhs: Option<ConditionRhs>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
	Eq,
	NotEq,
	Lt,
	Gt,
	Le,
	Ge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeKind {
	Like,
	Ilike,
	Rlike,
}

/// `RHS := Compare | ["NOT"] ("BETWEEN" ... | "IN" ... | "LIKE/ILIKE/RLIKE" ...)`
#[derive(Debug)]
pub enum ConditionRhs {
	Compare { op: CompareOp, operand: Term },
	Between { not: bool, low: Term, high: Term },
	In { not: bool, items: Vec<Term> },
	Like { not: bool, kind: LikeKind, pattern: Term, cache: RefCell<Option<Regex>> },
}

/// `Term := Value | Ident | "(" Expression ")"`
#[derive(Debug)]
pub enum Term {
	Value(Value),
	Ident(String),
	Sub(Box<Expression>),
}

struct Parser {
	tokens: Vec<Token>,
	pos: usize,
}

/// Parse filter source into an [`Expression`] AST.
///
/// # Errors
///
/// Returns [`Error::Parse`] on a lexical error or on any grammar violation,
/// including trailing tokens after a complete expression.
pub fn parse(src: &str) -> Result<Expression, Error> {
	let tokens = lexer::tokenize(src)?;
	let mut parser = Parser { tokens, pos: 0 };
	let expr = parser.expression()?;
	if let Some(tok) = parser.peek() {
		return Err(parser.error_at(tok.offset, format!("unexpected trailing token {:?}", tok.kind)));
	}
	Ok(expr)
}

impl Parser {
	fn peek(&self) -> Option<&Token> {
		self.tokens.get(self.pos)
	}

	fn bump(&mut self) -> Option<Token> {
		let tok = self.tokens.get(self.pos).cloned();
		if tok.is_some() {
			self.pos += 1;
		}
		tok
	}

	fn error_at(&self, offset: usize, message: impl Into<String>) -> Error {
		Error::Parse {
			position: Position::new(offset),
			message: message.into(),
		}
	}

	fn error_eof(&self, message: impl Into<String>) -> Error {
		let offset = self.tokens.last().map_or(0, |t| t.offset + 1);
		self.error_at(offset, message)
	}

	fn eat_keyword(&mut self, kw: Keyword) -> bool {
		if matches!(self.peek(), Some(Token { kind: TokenKind::Keyword(k), .. }) if *k == kw) {
			self.pos += 1;
			true
		} else {
			false
		}
	}

	fn eat_operator(&mut self, op: Operator) -> bool {
		if matches!(self.peek(), Some(Token { kind: TokenKind::Operator(o), .. }) if *o == op) {
			self.pos += 1;
			true
		} else {
			false
		}
	}

	fn expect_operator(&mut self, op: Operator, what: &str) -> Result<(), Error> {
		if self.eat_operator(op) {
			Ok(())
		} else {
			Err(self.unexpected(what))
		}
	}

	fn unexpected(&self, expected: &str) -> Error {
		match self.peek() {
			Some(tok) => self.error_at(tok.offset, format!("expected {expected}, found {:?}", tok.kind)),
			None => self.error_eof(format!("expected {expected}, found end of input")),
		}
	}

	fn expression(&mut self) -> Result<Expression, Error> {
		let mut or = vec![self.and_condition()?];
		while self.eat_keyword(Keyword::Or) {
			or.push(self.and_condition()?);
		}
		Ok(Expression { or })
	}

	fn and_condition(&mut self) -> Result<AndCondition, Error> {
		let mut and = vec![self.condition()?];
		while self.eat_keyword(Keyword::And) {
			and.push(self.condition()?);
		}
		Ok(AndCondition { and })
	}

	fn condition(&mut self) -> Result<Condition, Error> {
		if self.eat_keyword(Keyword::Not) {
			return Ok(Condition::Not(Box::new(self.condition()?)));
		}
		Ok(Condition::Operand(self.condition_operand()?))
	}

	fn condition_operand(&mut self) -> Result<ConditionOperand, Error> {
		let operand = self.term()?;
		let rhs = self.condition_rhs()?;
		Ok(ConditionOperand { operand, rhs })
	}

	fn condition_rhs(&mut self) -> Result<Option<ConditionRhs>, Error> {
		if let Some(op) = self.compare_op() {
			let operand = self.term()?;
			return Ok(Some(ConditionRhs::Compare { op, operand }));
		}

		let not = self.eat_keyword(Keyword::Not);

		if self.eat_keyword(Keyword::Between) {
			let low = self.term()?;
			if !self.eat_keyword(Keyword::And) {
				return Err(self.unexpected("AND in BETWEEN ... AND ..."));
			}
			let high = self.term()?;
			return Ok(Some(ConditionRhs::Between { not, low, high }));
		}

		if self.eat_keyword(Keyword::In) {
			self.expect_operator(Operator::LParen, "'(' after IN")?;
			let mut items = vec![self.term()?];
			while self.eat_operator(Operator::Comma) {
				items.push(self.term()?);
			}
			self.expect_operator(Operator::RParen, "')' closing IN list")?;
			return Ok(Some(ConditionRhs::In { not, items }));
		}

		let kind = if self.eat_keyword(Keyword::Like) {
			Some(LikeKind::Like)
		} else if self.eat_keyword(Keyword::Ilike) {
			Some(LikeKind::Ilike)
		} else if self.eat_keyword(Keyword::Rlike) {
			Some(LikeKind::Rlike)
		} else {
			None
		};

		if let Some(kind) = kind {
			let pattern = self.term()?;
			return Ok(Some(ConditionRhs::Like {
				not,
				kind,
				pattern,
				cache: RefCell::new(None),
			}));
		}

		if not {
			return Err(self.unexpected("BETWEEN, IN, LIKE, ILIKE or RLIKE after NOT"));
		}

		Ok(None)
	}

	fn compare_op(&mut self) -> Option<CompareOp> {
		let op = match self.peek()?.kind {
			TokenKind::Operator(Operator::NotEqualDiamond | Operator::NotEqualBang) => CompareOp::NotEq,
			TokenKind::Operator(Operator::LessEqual) => CompareOp::Le,
			TokenKind::Operator(Operator::GreaterEqual) => CompareOp::Ge,
			TokenKind::Operator(Operator::Equal) => CompareOp::Eq,
			TokenKind::Operator(Operator::Less) => CompareOp::Lt,
			TokenKind::Operator(Operator::Greater) => CompareOp::Gt,
			_ => return None,
		};
		self.pos += 1;
		Some(op)
	}

	fn term(&mut self) -> Result<Term, Error> {
		let tok = self.peek().cloned().ok_or_else(|| self.error_eof("expected a value, identifier, or '('"))?;

		match tok.kind {
			TokenKind::Operator(Operator::LParen) => {
				self.pos += 1;
				let expr = self.expression()?;
				self.expect_operator(Operator::RParen, "')' closing sub-expression")?;
				Ok(Term::Sub(Box::new(expr)))
			}
			TokenKind::Ident(name) => {
				self.pos += 1;
				Ok(Term::Ident(name))
			}
			TokenKind::Size(n) => {
				self.pos += 1;
				Ok(Term::Value(Value::Int(n)))
			}
			TokenKind::Number(n) => {
				self.pos += 1;
				Ok(Term::Value(Value::Int(n as i64)))
			}
			TokenKind::Text(s) => {
				self.pos += 1;
				Ok(Term::Value(Value::Text(s)))
			}
			TokenKind::Keyword(Keyword::True) => {
				self.pos += 1;
				Ok(Term::Value(Value::Bool(true)))
			}
			TokenKind::Keyword(Keyword::False) => {
				self.pos += 1;
				Ok(Term::Value(Value::Bool(false)))
			}
			_ => Err(self.unexpected("a value, identifier, or '('")),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_simple_comparison() {
		let expr = parse("x = 3").unwrap();
		assert_eq!(expr.or.len(), 1);
		assert_eq!(expr.or[0].and.len(), 1);
	}

	#[test]
	fn parses_nested_parens() {
		assert!(parse("x=5 and (y=40000 or name=\"foobar\")").is_ok());
	}

	#[test]
	fn rejects_trailing_garbage() {
		assert!(parse("x=5)").is_err());
	}

	#[test]
	fn rejects_dangling_between() {
		assert!(parse("x between 3").is_err());
	}

	#[test]
	fn accepts_not_before_between_and_in() {
		assert!(parse("x not between 3 and 5").is_ok());
		assert!(parse("x not in (1,2,3)").is_ok());
	}
}
