// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Symbolic variables
//!
//! Each variant owns its sort-construction rule. Construction declares the
//! symbol against the solver session and keeps the returned current-value
//! expression; this layer never re-declares, versions, or destroys a
//! variable afterwards.

use crate::encode::{max_value, min_value, smt_sort};
use crate::error::EncodingError;
use crate::smt::{Expression, Kind, Solver, Sort};
use crate::ty::{IntegerType, Type};
use num::BigInt;

/// An `Int`-sorted variable for any number-category type. Also the
/// surrogate representation for types the solver cannot model precisely.
#[derive(Debug, Clone)]
pub struct IntegerVariable {
    ty: IntegerType,
    unique_name: String,
    current: Expression,
}

impl IntegerVariable {
    pub fn new(ty: IntegerType, unique_name: &str, solver: &mut dyn Solver) -> Self {
        let current = solver.declare_variable(unique_name, &Sort::Int);
        Self {
            ty,
            unique_name: unique_name.to_string(),
            current,
        }
    }

    /// The bounded-width type behind this variable, for bounds queries.
    pub fn integer_type(&self) -> &IntegerType {
        &self.ty
    }

    pub fn set_zero_value(&self, solver: &mut dyn Solver) {
        solver.add_assertion(self.current.clone().eq(Expression::int(BigInt::from(0))));
    }

    pub fn set_unknown_value(&self, solver: &mut dyn Solver) {
        solver.add_assertion(self.current.clone().ge(min_value(&self.ty)));
        solver.add_assertion(self.current.clone().le(max_value(&self.ty)));
    }
}

/// A `Bool`-sorted variable.
#[derive(Debug, Clone)]
pub struct BoolVariable {
    unique_name: String,
    current: Expression,
}

impl BoolVariable {
    pub fn new(unique_name: &str, solver: &mut dyn Solver) -> Self {
        let current = solver.declare_variable(unique_name, &Sort::Bool);
        Self {
            unique_name: unique_name.to_string(),
            current,
        }
    }

    pub fn set_zero_value(&self, solver: &mut dyn Solver) {
        solver.add_assertion(self.current.clone().eq(Expression::boolean(false)));
    }
}

/// A fixed-width byte array, modeled as an unsigned integer of
/// `num_bytes * 8` bits.
#[derive(Debug, Clone)]
pub struct FixedBytesVariable {
    num_bytes: u32,
    inner: IntegerVariable,
}

impl FixedBytesVariable {
    pub fn new(num_bytes: u32, unique_name: &str, solver: &mut dyn Solver) -> Self {
        let inner = IntegerVariable::new(IntegerType::unsigned(num_bytes * 8), unique_name, solver);
        Self { num_bytes, inner }
    }

    pub fn num_bytes(&self) -> u32 {
        self.num_bytes
    }

    pub fn integer_type(&self) -> &IntegerType {
        self.inner.integer_type()
    }
}

/// An address, modeled as an unsigned 160-bit integer.
#[derive(Debug, Clone)]
pub struct AddressVariable {
    inner: IntegerVariable,
}

impl AddressVariable {
    pub fn new(unique_name: &str, solver: &mut dyn Solver) -> Self {
        let inner = IntegerVariable::new(IntegerType::unsigned(160), unique_name, solver);
        Self { inner }
    }

    pub fn integer_type(&self) -> &IntegerType {
        self.inner.integer_type()
    }
}

/// A mapping, modeled as an `Array` over the key and value sorts.
#[derive(Debug, Clone)]
pub struct MappingVariable {
    key: Type,
    value: Type,
    unique_name: String,
    current: Expression,
}

impl MappingVariable {
    /// Fails when the key or value type has no faithful sort.
    pub fn new(
        key: Type,
        value: Type,
        unique_name: &str,
        solver: &mut dyn Solver,
    ) -> Result<Self, EncodingError> {
        let sort = Sort::array(smt_sort(&key)?, smt_sort(&value)?);
        let current = solver.declare_variable(unique_name, &sort);
        Ok(Self {
            key,
            value,
            unique_name: unique_name.to_string(),
            current,
        })
    }

    pub fn key_type(&self) -> &Type {
        &self.key
    }

    pub fn value_type(&self) -> &Type {
        &self.value
    }
}

/// A named solver-level unknown standing in for a program value.
#[derive(Debug, Clone)]
pub enum SymbolicVariable {
    Integer(IntegerVariable),
    Bool(BoolVariable),
    FixedBytes(FixedBytesVariable),
    Address(AddressVariable),
    Mapping(MappingVariable),
}

impl SymbolicVariable {
    pub fn unique_name(&self) -> &str {
        match self {
            SymbolicVariable::Integer(v) => &v.unique_name,
            SymbolicVariable::Bool(v) => &v.unique_name,
            SymbolicVariable::FixedBytes(v) => &v.inner.unique_name,
            SymbolicVariable::Address(v) => &v.inner.unique_name,
            SymbolicVariable::Mapping(v) => &v.unique_name,
        }
    }

    /// The current-value expression declared at construction.
    pub fn current_value(&self) -> &Expression {
        match self {
            SymbolicVariable::Integer(v) => &v.current,
            SymbolicVariable::Bool(v) => &v.current,
            SymbolicVariable::FixedBytes(v) => &v.inner.current,
            SymbolicVariable::Address(v) => &v.inner.current,
            SymbolicVariable::Mapping(v) => &v.current,
        }
    }

    /// The declared sort of this variable.
    pub fn sort(&self) -> &Sort {
        self.current_value().sort()
    }

    /// Constrain the variable to its type's zero value.
    pub fn set_zero_value(&self, solver: &mut dyn Solver) {
        match self {
            SymbolicVariable::Integer(v) => v.set_zero_value(solver),
            SymbolicVariable::Bool(v) => v.set_zero_value(solver),
            SymbolicVariable::FixedBytes(v) => v.inner.set_zero_value(solver),
            SymbolicVariable::Address(v) => v.inner.set_zero_value(solver),
            // TODO: constrain every element of the array to the value
            // type's zero value once quantified assertions are available.
            SymbolicVariable::Mapping(_) => {}
        }
    }

    /// Constrain the variable to the full range of its type. For
    /// integer-backed variables this asserts the min/max bounds; booleans
    /// and mappings need no range restriction.
    pub fn set_unknown_value(&self, solver: &mut dyn Solver) {
        match self {
            SymbolicVariable::Integer(v) => v.set_unknown_value(solver),
            SymbolicVariable::FixedBytes(v) => v.inner.set_unknown_value(solver),
            SymbolicVariable::Address(v) => v.inner.set_unknown_value(solver),
            SymbolicVariable::Bool(_) | SymbolicVariable::Mapping(_) => {}
        }
    }
}

/// A function-sorted solver declaration, applied to argument expressions.
///
/// The variable factory never produces one of these; function *values* are
/// still represented by the opaque integer surrogate. This is for callers
/// that need an uninterpreted function symbol directly.
#[derive(Debug, Clone)]
pub struct SymbolicFunctionDeclaration {
    declaration: Expression,
}

impl SymbolicFunctionDeclaration {
    pub fn new(
        sort: Sort,
        unique_name: &str,
        solver: &mut dyn Solver,
    ) -> Result<Self, EncodingError> {
        if sort.kind() != Kind::Function {
            return Err(EncodingError::InvariantViolation(
                "function declaration requires a function sort",
            ));
        }
        Ok(Self {
            declaration: solver.declare_variable(unique_name, &sort),
        })
    }

    pub fn from_type(
        ty: &Type,
        unique_name: &str,
        solver: &mut dyn Solver,
    ) -> Result<Self, EncodingError> {
        Self::new(smt_sort(ty)?, unique_name, solver)
    }

    pub fn apply(&self, args: Vec<Expression>) -> Result<Expression, EncodingError> {
        self.declaration.clone().apply(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSolver;
    use num::One;

    #[test]
    fn test_integer_variable_declares_int_symbol() {
        let mut solver = RecordingSolver::default();
        let var = IntegerVariable::new(IntegerType::unsigned(64), "x", &mut solver);
        assert_eq!(solver.declarations, vec![("x".to_string(), Sort::Int)]);
        assert_eq!(var.current.sort(), &Sort::Int);
    }

    #[test]
    fn test_integer_unknown_value_asserts_bounds() {
        let mut solver = RecordingSolver::default();
        let var = IntegerVariable::new(IntegerType::unsigned(8), "x", &mut solver);
        var.set_unknown_value(&mut solver);
        assert_eq!(solver.assertions.len(), 2);
        assert_eq!(solver.assertions[0].to_string(), "(>= x 0)");
        assert_eq!(solver.assertions[1].to_string(), "(<= x 255)");
    }

    #[test]
    fn test_integer_zero_value() {
        let mut solver = RecordingSolver::default();
        let var = IntegerVariable::new(IntegerType::signed(256), "x", &mut solver);
        var.set_zero_value(&mut solver);
        assert_eq!(solver.assertions.len(), 1);
        assert_eq!(solver.assertions[0].to_string(), "(= x 0)");
    }

    #[test]
    fn test_bool_zero_value() {
        let mut solver = RecordingSolver::default();
        let var = BoolVariable::new("b", &mut solver);
        assert_eq!(solver.declarations, vec![("b".to_string(), Sort::Bool)]);
        var.set_zero_value(&mut solver);
        assert_eq!(solver.assertions[0].to_string(), "(= b false)");
    }

    #[test]
    fn test_fixed_bytes_is_unsigned_integer_of_byte_width() {
        let mut solver = RecordingSolver::default();
        let var = FixedBytesVariable::new(20, "data", &mut solver);
        assert_eq!(var.num_bytes(), 20);
        assert_eq!(var.integer_type(), &IntegerType::unsigned(160));
        assert_eq!(solver.declarations, vec![("data".to_string(), Sort::Int)]);
    }

    #[test]
    fn test_address_is_unsigned_160_bit_integer() {
        let mut solver = RecordingSolver::default();
        let var = AddressVariable::new("owner", &mut solver);
        assert_eq!(var.integer_type(), &IntegerType::unsigned(160));
        let max = var.integer_type().max_value();
        assert_eq!(max, (num::BigInt::one() << 160) - 1);
    }

    #[test]
    fn test_mapping_declares_array_sort() {
        let mut solver = RecordingSolver::default();
        let var = MappingVariable::new(
            Type::Address,
            Type::Integer(IntegerType::unsigned(256)),
            "balances",
            &mut solver,
        )
        .unwrap();
        let expected = Sort::array(Sort::Int, Sort::Int);
        assert_eq!(solver.declarations, vec![("balances".to_string(), expected)]);
        assert_eq!(var.key_type(), &Type::Address);
    }

    #[test]
    fn test_mapping_with_unsupported_value_type_fails() {
        let mut solver = RecordingSolver::default();
        let result = MappingVariable::new(
            Type::Address,
            Type::Struct { name: "S".to_string() },
            "m",
            &mut solver,
        );
        assert!(matches!(result, Err(EncodingError::UnsupportedType { .. })));
        assert!(solver.declarations.is_empty());
    }

    #[test]
    fn test_function_declaration_applies() {
        let mut solver = RecordingSolver::default();
        let ty = Type::function(vec![Type::Address], vec![Type::Bool]);
        let decl = SymbolicFunctionDeclaration::from_type(&ty, "f", &mut solver).unwrap();

        let applied = decl.apply(vec![Expression::symbol("a", Sort::Int)]).unwrap();
        assert_eq!(applied.sort(), &Sort::Bool);
        assert_eq!(applied.to_string(), "(f a)");

        assert!(matches!(
            decl.apply(vec![]),
            Err(EncodingError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_function_declaration_rejects_non_function_sort() {
        let mut solver = RecordingSolver::default();
        let result = SymbolicFunctionDeclaration::new(Sort::Int, "f", &mut solver);
        assert!(matches!(result, Err(EncodingError::InvariantViolation(_))));
    }
}
