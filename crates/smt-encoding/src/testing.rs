// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! In-memory solver session for unit tests.

use crate::smt::{Expression, Solver, Sort};

/// Records every declaration and assertion it receives.
#[derive(Default)]
pub struct RecordingSolver {
    pub declarations: Vec<(String, Sort)>,
    pub assertions: Vec<Expression>,
}

impl Solver for RecordingSolver {
    fn declare_variable(&mut self, name: &str, sort: &Sort) -> Expression {
        self.declarations.push((name.to_string(), sort.clone()));
        Expression::symbol(name, sort.clone())
    }

    fn add_assertion(&mut self, expr: Expression) {
        self.assertions.push(expr);
    }
}
