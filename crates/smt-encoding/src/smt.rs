// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Solver-facing model: sorts, term expressions, and the session trait
//!
//! This module is the seam between the encoding layer and a concrete SMT
//! backend. Backends implement [`Solver`]; everything else here is plain
//! data.

use crate::error::EncodingError;
use itertools::Itertools;
use num::BigInt;
use std::fmt;

/// Discriminant of a [`Sort`], without the element sorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Int,
    Bool,
    Array,
    Function,
}

/// An SMT sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sort {
    Int,
    Bool,
    Array {
        domain: Box<Sort>,
        range: Box<Sort>,
    },
    /// Uninterpreted function sort with exactly one codomain.
    Function {
        domain: Vec<Sort>,
        codomain: Box<Sort>,
    },
}

impl Sort {
    pub fn array(domain: Sort, range: Sort) -> Self {
        Sort::Array {
            domain: Box::new(domain),
            range: Box::new(range),
        }
    }

    pub fn function(domain: Vec<Sort>, codomain: Sort) -> Self {
        Sort::Function {
            domain,
            codomain: Box::new(codomain),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Sort::Int => Kind::Int,
            Sort::Bool => Kind::Bool,
            Sort::Array { .. } => Kind::Array,
            Sort::Function { .. } => Kind::Function,
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Int => write!(f, "Int"),
            Sort::Bool => write!(f, "Bool"),
            Sort::Array { domain, range } => write!(f, "(Array {} {})", domain, range),
            Sort::Function { domain, codomain } => {
                write!(f, "({} -> {})", domain.iter().join(" "), codomain)
            }
        }
    }
}

/// A solver term: a symbol or literal, or an application of one to
/// arguments. Every expression knows its sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    name: String,
    args: Vec<Expression>,
    sort: Sort,
}

impl Expression {
    /// An integer literal.
    pub fn int(value: BigInt) -> Self {
        Self {
            name: value.to_string(),
            args: vec![],
            sort: Sort::Int,
        }
    }

    /// A boolean literal.
    pub fn boolean(value: bool) -> Self {
        Self {
            name: value.to_string(),
            args: vec![],
            sort: Sort::Bool,
        }
    }

    /// A free symbol of the given sort. Used by [`Solver`] implementations
    /// to hand back the current value of a declared variable.
    pub fn symbol(name: impl Into<String>, sort: Sort) -> Self {
        Self {
            name: name.into(),
            args: vec![],
            sort,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Expression] {
        &self.args
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// `self = other`.
    pub fn eq(self, other: Expression) -> Expression {
        Self::operation("=", vec![self, other])
    }

    /// `self >= other`.
    pub fn ge(self, other: Expression) -> Expression {
        Self::operation(">=", vec![self, other])
    }

    /// `self <= other`.
    pub fn le(self, other: Expression) -> Expression {
        Self::operation("<=", vec![self, other])
    }

    /// Apply a function-sorted expression to arguments. The result carries
    /// the codomain sort. Arity or argument-sort mismatches are upstream
    /// invariant violations, not recoverable conditions.
    pub fn apply(self, args: Vec<Expression>) -> Result<Expression, EncodingError> {
        let Sort::Function { domain, codomain } = self.sort else {
            return Err(EncodingError::InvariantViolation(
                "application of a non-function expression",
            ));
        };
        if domain.len() != args.len() {
            return Err(EncodingError::InvariantViolation(
                "function application arity mismatch",
            ));
        }
        if domain.iter().zip(&args).any(|(d, a)| d != a.sort()) {
            return Err(EncodingError::InvariantViolation(
                "function application argument sort mismatch",
            ));
        }
        Ok(Expression {
            name: self.name,
            args,
            sort: *codomain,
        })
    }

    fn operation(name: &str, args: Vec<Expression>) -> Expression {
        Expression {
            name: name.to_string(),
            args,
            sort: Sort::Bool,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "({} {})", self.name, self.args.iter().join(" "))
        }
    }
}

/// A solver session. Declaring a variable registers a fresh symbol with the
/// backend and returns its current-value expression; the caller guarantees
/// name uniqueness per session.
pub trait Solver {
    fn declare_variable(&mut self, name: &str, sort: &Sort) -> Expression;
    fn add_assertion(&mut self, expr: Expression);
}
