// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Source-language type model
//!
//! A closed tagged union over the type categories the checker sees. Each
//! variant carries exactly the fields its category needs, so dispatch is an
//! exhaustive match rather than a checked downcast.

use num::{BigInt, BigRational, One, Signed, Zero};

/// Coarse-grained classification tag of a source type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeCategory {
    Integer,
    RationalNumber,
    FixedBytes,
    Address,
    Bool,
    Mapping,
    Function,
    Struct,
    Tuple,
}

/// A bounded-width integer type: bit width plus signedness.
///
/// Widths are multiples of 8 in `8..=256`; the type-checker upstream only
/// produces such widths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerType {
    bits: u32,
    signed: bool,
}

impl IntegerType {
    pub fn new(bits: u32, signed: bool) -> Self {
        debug_assert!(bits % 8 == 0 && (8..=256).contains(&bits));
        Self { bits, signed }
    }

    pub fn signed(bits: u32) -> Self {
        Self::new(bits, true)
    }

    pub fn unsigned(bits: u32) -> Self {
        Self::new(bits, false)
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Smallest representable value: `-2^(bits-1)` signed, `0` unsigned.
    pub fn min_value(&self) -> BigInt {
        if self.signed {
            -(BigInt::one() << (self.bits - 1))
        } else {
            BigInt::zero()
        }
    }

    /// Largest representable value: `2^(bits-1) - 1` signed, `2^bits - 1`
    /// unsigned.
    pub fn max_value(&self) -> BigInt {
        if self.signed {
            (BigInt::one() << (self.bits - 1)) - 1
        } else {
            (BigInt::one() << self.bits) - 1
        }
    }
}

/// The type of a rational number literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RationalType {
    value: BigRational,
}

impl RationalType {
    pub fn new(value: BigRational) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &BigRational {
        &self.value
    }

    /// Whether the literal has a non-zero fractional part.
    pub fn is_fractional(&self) -> bool {
        !self.value.is_integer()
    }

    /// The smallest byte-aligned integer type that holds the literal,
    /// signed iff the literal is negative. `None` for fractional literals
    /// and for magnitudes beyond 256 bits.
    pub fn integer_type(&self) -> Option<IntegerType> {
        if self.is_fractional() {
            return None;
        }
        let value = self.value.to_integer();
        let negative = value.is_negative();
        // Two's complement: a negative value -v needs bitlen(v - 1) + 1 bits.
        let magnitude = if negative {
            -&value - BigInt::one()
        } else {
            value
        };
        let needed = magnitude.bits() as u32 + u32::from(negative);
        let bits = (needed.max(1)).div_ceil(8) * 8;
        if bits > 256 {
            None
        } else {
            Some(IntegerType::new(bits, negative))
        }
    }
}

/// A source type, as supplied by the type-checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Integer(IntegerType),
    Rational(RationalType),
    /// Fixed-width byte array of `num_bytes` bytes (1..=32).
    FixedBytes { num_bytes: u32 },
    Address,
    Bool,
    Mapping { key: Box<Type>, value: Box<Type> },
    /// Function signature. A well-formed function type has exactly one
    /// return type; the sort mapper enforces this.
    Function { params: Vec<Type>, returns: Vec<Type> },
    /// Aggregate types the solver model does not represent yet.
    Struct { name: String },
    Tuple(Vec<Type>),
}

impl Type {
    pub fn category(&self) -> TypeCategory {
        match self {
            Type::Integer(_) => TypeCategory::Integer,
            Type::Rational(_) => TypeCategory::RationalNumber,
            Type::FixedBytes { .. } => TypeCategory::FixedBytes,
            Type::Address => TypeCategory::Address,
            Type::Bool => TypeCategory::Bool,
            Type::Mapping { .. } => TypeCategory::Mapping,
            Type::Function { .. } => TypeCategory::Function,
            Type::Struct { .. } => TypeCategory::Struct,
            Type::Tuple(_) => TypeCategory::Tuple,
        }
    }

    pub fn mapping(key: Type, value: Type) -> Self {
        Type::Mapping {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn function(params: Vec<Type>, returns: Vec<Type>) -> Self {
        Type::Function { params, returns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rational(numer: i64, denom: i64) -> RationalType {
        RationalType::new(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    #[test]
    fn test_unsigned_bounds() {
        let u8_ty = IntegerType::unsigned(8);
        assert_eq!(u8_ty.min_value(), BigInt::from(0));
        assert_eq!(u8_ty.max_value(), BigInt::from(255));

        let u256_ty = IntegerType::unsigned(256);
        assert_eq!(u256_ty.min_value(), BigInt::from(0));
        assert_eq!(u256_ty.max_value(), (BigInt::one() << 256) - 1);
    }

    #[test]
    fn test_signed_bounds() {
        let i8_ty = IntegerType::signed(8);
        assert_eq!(i8_ty.min_value(), BigInt::from(-128));
        assert_eq!(i8_ty.max_value(), BigInt::from(127));

        let i256_ty = IntegerType::signed(256);
        assert_eq!(i256_ty.min_value(), -(BigInt::one() << 255u32));
        assert_eq!(i256_ty.max_value(), (BigInt::one() << 255) - 1);
    }

    #[test]
    fn test_rational_integer_type_is_byte_aligned() {
        assert_eq!(rational(255, 1).integer_type(), Some(IntegerType::unsigned(8)));
        assert_eq!(rational(256, 1).integer_type(), Some(IntegerType::unsigned(16)));
        assert_eq!(rational(0, 1).integer_type(), Some(IntegerType::unsigned(8)));
        assert_eq!(rational(-1, 1).integer_type(), Some(IntegerType::signed(8)));
        assert_eq!(rational(-128, 1).integer_type(), Some(IntegerType::signed(8)));
        assert_eq!(rational(-129, 1).integer_type(), Some(IntegerType::signed(16)));
    }

    #[test]
    fn test_fractional_rational_has_no_integer_type() {
        let third = rational(1, 3);
        assert!(third.is_fractional());
        assert_eq!(third.integer_type(), None);
    }

    #[test]
    fn test_oversized_rational_has_no_integer_type() {
        let huge = RationalType::new(BigRational::from_integer(BigInt::one() << 256));
        assert!(!huge.is_fractional());
        assert_eq!(huge.integer_type(), None);
    }

    #[test]
    fn test_category_tags() {
        assert_eq!(Type::Address.category(), TypeCategory::Address);
        assert_eq!(Type::Bool.category(), TypeCategory::Bool);
        assert_eq!(
            Type::mapping(Type::Address, Type::Bool).category(),
            TypeCategory::Mapping
        );
        assert_eq!(
            Type::Struct { name: "S".to_string() }.category(),
            TypeCategory::Struct
        );
    }
}
