// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! SMT encoding layer for the contract checker
//!
//! Bridges the source language's static types and the solver's sort/value
//! model: classifies a type into its semantic category, maps it to the
//! matching SMT sort, and materializes symbolic variables bound to a
//! solver session. Types the solver cannot represent precisely are
//! over-approximated as unconstrained wide integers, so coverage never
//! depends on a type being modeled faithfully.
//!
//! Satisfiability checking, path conditions, and variable versioning
//! across program steps belong to the exploration engine, not here; the
//! solver backend itself sits behind the [`Solver`] trait.

mod encode;
mod error;
mod smt;
mod ty;
mod variables;

#[cfg(test)]
pub(crate) mod testing;

pub use encode::{
    is_address, is_array, is_bool, is_fixed_bytes, is_function, is_integer, is_mapping, is_number,
    is_rational, is_supported_category, is_supported_type, max_value, min_value,
    new_symbolic_variable, smt_kind, smt_sort, smt_sorts,
};
pub use error::EncodingError;
pub use smt::{Expression, Kind, Solver, Sort};
pub use ty::{IntegerType, RationalType, Type, TypeCategory};
pub use variables::{
    AddressVariable, BoolVariable, FixedBytesVariable, IntegerVariable, MappingVariable,
    SymbolicFunctionDeclaration, SymbolicVariable,
};
