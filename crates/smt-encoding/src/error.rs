// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Errors of the encoding layer
//!
//! Two distinct classes: a type the solver model cannot represent (the
//! factory recovers from this with the integer abstraction), and a broken
//! compiler-internal invariant that should have been enforced upstream by
//! the type-checker. Both are values; nothing in this crate aborts.

use crate::ty::TypeCategory;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// A type outside the supported categories reached an operation that
    /// requires a faithful solver representation.
    UnsupportedType { category: TypeCategory },
    /// An upstream type-checker invariant was violated; the analysis run
    /// must not continue past this.
    InvariantViolation(&'static str),
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::UnsupportedType { category } => {
                write!(f, "unsupported type of category {:?} reached the sort mapper", category)
            }
            EncodingError::InvariantViolation(message) => {
                write!(f, "internal invariant violated: {}", message)
            }
        }
    }
}

impl std::error::Error for EncodingError {}
