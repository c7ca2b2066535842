// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Type classification, sort mapping, and the symbolic-variable factory
//!
//! The factory is the only entry point the exploration engine needs per
//! program value: it picks a variable variant for the value's type and
//! substitutes the integer abstraction for anything the solver model
//! cannot represent, so an unsupported type never turns into a hard error
//! downstream.

use crate::error::EncodingError;
use crate::smt::{Expression, Kind, Solver, Sort};
use crate::ty::{IntegerType, Type, TypeCategory};
use crate::variables::{
    AddressVariable, BoolVariable, FixedBytesVariable, IntegerVariable, MappingVariable,
    SymbolicVariable,
};
use log::debug;

pub fn is_integer(category: TypeCategory) -> bool {
    category == TypeCategory::Integer
}

pub fn is_rational(category: TypeCategory) -> bool {
    category == TypeCategory::RationalNumber
}

pub fn is_fixed_bytes(category: TypeCategory) -> bool {
    category == TypeCategory::FixedBytes
}

pub fn is_address(category: TypeCategory) -> bool {
    category == TypeCategory::Address
}

pub fn is_bool(category: TypeCategory) -> bool {
    category == TypeCategory::Bool
}

pub fn is_function(category: TypeCategory) -> bool {
    category == TypeCategory::Function
}

pub fn is_mapping(category: TypeCategory) -> bool {
    category == TypeCategory::Mapping
}

pub fn is_array(category: TypeCategory) -> bool {
    // Array types are not distinguished from mappings at this layer yet.
    is_mapping(category)
}

/// Every category represented by the solver's `Int` sort.
pub fn is_number(category: TypeCategory) -> bool {
    is_integer(category) || is_rational(category) || is_fixed_bytes(category) || is_address(category)
}

/// Whether the factory can build a faithful variable for this category,
/// as opposed to falling back to the integer abstraction.
pub fn is_supported_category(category: TypeCategory) -> bool {
    is_number(category) || is_array(category) || is_bool(category) || is_function(category)
}

pub fn is_supported_type(ty: &Type) -> bool {
    is_supported_category(ty.category())
}

/// Map a source type to its SMT sort, recursively for composite types.
///
/// Unsupported categories are an error here; the factory substitutes the
/// integer abstraction before ever asking for their sort.
pub fn smt_sort(ty: &Type) -> Result<Sort, EncodingError> {
    let category = ty.category();
    if is_number(category) {
        return Ok(Sort::Int);
    }
    if is_bool(category) {
        return Ok(Sort::Bool);
    }
    match ty {
        Type::Mapping { key, value } => Ok(Sort::array(smt_sort(key)?, smt_sort(value)?)),
        Type::Function { params, returns } => {
            let domain = smt_sorts(params)?;
            if returns.len() != 1 {
                return Err(EncodingError::InvariantViolation(
                    "function type must have exactly one return type",
                ));
            }
            Ok(Sort::function(domain, smt_sort(&returns[0])?))
        }
        _ => Err(EncodingError::UnsupportedType { category }),
    }
}

/// Elementwise [`smt_sort`], order-preserving.
pub fn smt_sorts(types: &[Type]) -> Result<Vec<Sort>, EncodingError> {
    types.iter().map(smt_sort).collect()
}

/// The sort discriminant for a category, without element sorts.
pub fn smt_kind(category: TypeCategory) -> Result<Kind, EncodingError> {
    if is_number(category) {
        Ok(Kind::Int)
    } else if is_bool(category) {
        Ok(Kind::Bool)
    } else if is_mapping(category) {
        Ok(Kind::Array)
    } else if is_function(category) {
        Ok(Kind::Function)
    } else {
        Err(EncodingError::UnsupportedType { category })
    }
}

/// The type's minimum representable value, as a solver literal.
pub fn min_value(ty: &IntegerType) -> Expression {
    Expression::int(ty.min_value())
}

/// The type's maximum representable value, as a solver literal.
pub fn max_value(ty: &IntegerType) -> Expression {
    Expression::int(ty.max_value())
}

/// The surrogate type behind every integer abstraction: values of types
/// the solver cannot model are over-approximated as unconstrained 256-bit
/// signed integers.
fn surrogate_type() -> IntegerType {
    IntegerType::signed(256)
}

/// Build the symbolic variable for a program value of the given type and
/// declare it under `unique_name` against the solver session.
///
/// Returns `(abstracted, variable)`. `abstracted` is `true` only when the
/// type's category is unsupported outright; function types and fractional
/// rational literals also receive the integer surrogate but keep the flag
/// `false`. Consumers depend on the current flag semantics, so the
/// asymmetry is deliberate and must not change on its own.
///
/// The caller guarantees `unique_name` is fresh for this session; no
/// registry or uniqueness check happens here.
pub fn new_symbolic_variable(
    ty: &Type,
    unique_name: &str,
    solver: &mut dyn Solver,
) -> Result<(bool, SymbolicVariable), EncodingError> {
    if !is_supported_type(ty) {
        debug!(
            "abstracting `{}` of unsupported category {:?} as an unconstrained integer",
            unique_name,
            ty.category()
        );
        let var = IntegerVariable::new(surrogate_type(), unique_name, solver);
        return Ok((true, SymbolicVariable::Integer(var)));
    }
    let var = match ty {
        Type::Mapping { key, value } => SymbolicVariable::Mapping(MappingVariable::new(
            (**key).clone(),
            (**value).clone(),
            unique_name,
            solver,
        )?),
        Type::Bool => SymbolicVariable::Bool(BoolVariable::new(unique_name, solver)),
        // Function values are not materialized as callable symbols yet,
        // only as opaque 256-bit identifiers.
        Type::Function { .. } => {
            SymbolicVariable::Integer(IntegerVariable::new(surrogate_type(), unique_name, solver))
        }
        Type::Integer(int_ty) => {
            SymbolicVariable::Integer(IntegerVariable::new(int_ty.clone(), unique_name, solver))
        }
        Type::FixedBytes { num_bytes } => {
            SymbolicVariable::FixedBytes(FixedBytesVariable::new(*num_bytes, unique_name, solver))
        }
        Type::Address => SymbolicVariable::Address(AddressVariable::new(unique_name, solver)),
        Type::Rational(rational) => {
            // Fractions have no faithful integer sort; a whole-number
            // literal keeps its own integer type.
            let int_ty = rational.integer_type().unwrap_or_else(surrogate_type);
            SymbolicVariable::Integer(IntegerVariable::new(int_ty, unique_name, solver))
        }
        Type::Struct { .. } | Type::Tuple(_) => {
            return Err(EncodingError::InvariantViolation(
                "supported category missed by the variable dispatch",
            ))
        }
    };
    Ok((false, var))
}
