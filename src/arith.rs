//! Arithmetic and comparison over the numeric tower.
//!
//! A fixnum operation's other operand is always one of three statically
//! known shapes, captured by the closed [`Number`] sum and matched
//! exhaustively at every call site. The pairwise rules:
//!
//! * `Int`: native arithmetic with an overflow gate
//!   ([`Integer::normalize`]), except `mul`, which runs a division-based
//!   pre-check so no out-of-range native product is ever formed.
//! * `Big`: delegate to the bignum engine in its own operand order and
//!   [`Integer::shrink`] the result.
//! * `Float`: coerce the fixnum to a double and compute natively; the
//!   result stays a float.
//!
//! Division and modulo are floored, not truncating: the quotient rounds
//! toward negative infinity and the remainder takes the divisor's sign.

use std::cmp::Ordering;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;

use crate::error::DivideByZeroError;
use crate::integer::Integer;
use crate::tagged::{Fixnum, FIXNUM_MAX, FIXNUM_MIN};

/// A value of the numeric tower: the counterpart type of every binary
/// operation, and the type operations producing floats return.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(Fixnum),
    Big(BigInt),
    Float(f64),
}

impl From<Fixnum> for Number {
    fn from(value: Fixnum) -> Self {
        Number::Int(value)
    }
}

impl From<Integer> for Number {
    fn from(value: Integer) -> Self {
        match value {
            Integer::Fix(n) => Number::Int(n),
            Integer::Big(n) => Number::Big(n),
        }
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(value) => write!(f, "{value}"),
            Number::Big(value) => write!(f, "{value}"),
            Number::Float(value) => write!(f, "{value}"),
        }
    }
}

/// Floored quotient of two in-range natives. Truncate, then step toward
/// negative infinity when a nonzero remainder was discarded on the wrong
/// side (remainder sign differing from the divisor's).
fn floor_div_raw(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder != 0 && (remainder < 0) != (denominator < 0) {
        quotient - 1
    } else {
        quotient
    }
}

/// Floored float modulo: the remainder takes the divisor's sign, matching
/// the integer semantics above.
fn floor_mod_float(numerator: f64, denominator: f64) -> f64 {
    let remainder = numerator % denominator;
    if remainder != 0.0 && (remainder < 0.0) != (denominator < 0.0) {
        remainder + denominator
    } else {
        remainder
    }
}

impl Add for Fixnum {
    type Output = Integer;

    fn add(self, rhs: Fixnum) -> Integer {
        // Two 56-bit values cannot overflow an i64 sum.
        Integer::normalize(self.to_native() + rhs.to_native())
    }
}

impl Sub for Fixnum {
    type Output = Integer;

    fn sub(self, rhs: Fixnum) -> Integer {
        Integer::normalize(self.to_native() - rhs.to_native())
    }
}

impl Mul for Fixnum {
    type Output = Integer;

    fn mul(self, rhs: Fixnum) -> Integer {
        let a = self.to_native();
        let b = rhs.to_native();

        if a == 0 || b == 0 {
            return Integer::Fix(Fixnum::ZERO);
        }

        // Division-based overflow test, cased on the operand signs. The
        // true product of two 56-bit values can exceed the native width,
        // so it must never be formed before this check passes. The test
        // may flag a near-boundary product that would still have fit;
        // shrink demotes those back.
        let overflows = if a > 0 {
            if b > 0 { a > FIXNUM_MAX / b } else { b < FIXNUM_MIN / a }
        } else if b > 0 {
            a < FIXNUM_MIN / b
        } else {
            b < FIXNUM_MAX / a
        };

        if overflows {
            Integer::shrink(BigInt::from(a) * b)
        } else {
            Integer::Fix(Fixnum::from_unchecked(a * b))
        }
    }
}

impl Neg for Fixnum {
    type Output = Integer;

    fn neg(self) -> Integer {
        // The range is asymmetric: -FIXNUM_MIN is one past FIXNUM_MAX, so
        // negation goes through the overflow gate like everything else.
        Integer::normalize(-self.to_native())
    }
}

impl Fixnum {
    /// Add the counterpart. Integer results promote on overflow; a float
    /// counterpart produces a float.
    pub fn add(self, other: &Number) -> Number {
        match other {
            Number::Int(b) => (self + *b).into(),
            // Addition commutes, so the bignum engine owns the mixed case.
            Number::Big(b) => Integer::shrink(b + self.to_native()).into(),
            Number::Float(f) => Number::Float(self.to_float() + f),
        }
    }

    /// Subtract the counterpart.
    pub fn sub(self, other: &Number) -> Number {
        match other {
            Number::Int(b) => (self - *b).into(),
            // self - big == (-big) + self, keeping the bignum on the left.
            Number::Big(b) => Integer::shrink(-b + self.to_native()).into(),
            Number::Float(f) => Number::Float(self.to_float() - f),
        }
    }

    /// Multiply by the counterpart.
    pub fn mul(self, other: &Number) -> Number {
        match other {
            Number::Int(b) => (self * *b).into(),
            Number::Big(b) => Integer::shrink(b * self.to_native()).into(),
            Number::Float(f) => Number::Float(self.to_float() * f),
        }
    }

    /// Floored division. Fails with [`DivideByZeroError`] on a zero fixnum
    /// divisor; a bignum divisor is never zero (canonical form keeps zero
    /// a fixnum), and a zero float divisor yields an IEEE infinity or NaN
    /// rather than an error.
    pub fn div(self, other: &Number) -> Result<Number, DivideByZeroError> {
        match other {
            Number::Int(b) => {
                let (quotient, _) = self.floor_divmod(*b)?;
                Ok(quotient.into())
            }
            Number::Big(b) => {
                let promoted = BigInt::from(self.to_native());
                Ok(Integer::shrink(num_integer::Integer::div_floor(&promoted, b)).into())
            }
            Number::Float(f) => Ok(Number::Float(self.to_float() / f)),
        }
    }

    /// Floored modulo: `self - other * div(self, other)`. The result's
    /// sign matches the divisor's, or it is zero.
    pub fn modulo(self, other: &Number) -> Result<Number, DivideByZeroError> {
        match other {
            Number::Int(b) => {
                let (_, remainder) = self.floor_divmod(*b)?;
                Ok(Number::Int(remainder))
            }
            Number::Big(b) => {
                let promoted = BigInt::from(self.to_native());
                Ok(Integer::shrink(num_integer::Integer::mod_floor(&promoted, b)).into())
            }
            Number::Float(f) => Ok(Number::Float(floor_mod_float(self.to_float(), *f))),
        }
    }

    /// Quotient and remainder together, consistent with [`Fixnum::div`]
    /// and [`Fixnum::modulo`] computed independently.
    pub fn divmod(self, other: &Number) -> Result<(Number, Number), DivideByZeroError> {
        match other {
            Number::Int(b) => {
                let (quotient, remainder) = self.floor_divmod(*b)?;
                Ok((quotient.into(), Number::Int(remainder)))
            }
            Number::Big(b) => {
                let promoted = BigInt::from(self.to_native());
                let (quotient, remainder) = num_integer::Integer::div_mod_floor(&promoted, b);
                Ok((Integer::shrink(quotient).into(), Integer::shrink(remainder).into()))
            }
            Number::Float(f) => {
                let quotient = (self.to_float() / f).floor();
                let remainder = floor_mod_float(self.to_float(), *f);
                Ok((Number::Float(quotient), Number::Float(remainder)))
            }
        }
    }

    /// Shared fixnum-by-fixnum floored division. The quotient can leave
    /// the range in exactly one case (`FIXNUM_MIN / -1`); the remainder's
    /// magnitude is always below the divisor's, so it never can.
    fn floor_divmod(self, other: Fixnum) -> Result<(Integer, Fixnum), DivideByZeroError> {
        let numerator = self.to_native();
        let denominator = other.to_native();
        if denominator == 0 {
            return Err(DivideByZeroError::new(self, other));
        }
        let quotient = floor_div_raw(numerator, denominator);
        let remainder = numerator - denominator * quotient;
        Ok((
            Integer::normalize(quotient),
            Fixnum::from_unchecked(remainder),
        ))
    }

    /// Three-way comparison with the counterpart. A bignum counterpart
    /// compares itself against us, so its answer comes back reversed.
    /// Float comparison widens to a double, which rounds fixnums beyond
    /// 2^53 to the nearest representable value; `None` only for NaN.
    pub fn compare(self, other: &Number) -> Option<Ordering> {
        match other {
            Number::Int(b) => Some(self.cmp(b)),
            Number::Big(b) => Some(b.cmp(&BigInt::from(self.to_native())).reverse()),
            Number::Float(f) => self.to_float().partial_cmp(f),
        }
    }

    /// Numeric equality with the counterpart. NaN is equal to nothing.
    #[allow(clippy::float_cmp)]
    pub fn num_eq(self, other: &Number) -> bool {
        match other {
            Number::Int(b) => self == *b,
            Number::Big(b) => *b == BigInt::from(self.to_native()),
            Number::Float(f) => self.to_float() == *f,
        }
    }

    /// `self > other`. The bignum engine's relations put itself on the
    /// left, so this asks for the complement: `other < self`.
    pub fn gt(self, other: &Number) -> bool {
        match other {
            Number::Int(b) => self > *b,
            Number::Big(b) => *b < BigInt::from(self.to_native()),
            Number::Float(f) => self.to_float() > *f,
        }
    }

    /// `self >= other`, via `other <= self` for bignums.
    pub fn ge(self, other: &Number) -> bool {
        match other {
            Number::Int(b) => self >= *b,
            Number::Big(b) => *b <= BigInt::from(self.to_native()),
            Number::Float(f) => self.to_float() >= *f,
        }
    }

    /// `self < other`, via `other > self` for bignums.
    pub fn lt(self, other: &Number) -> bool {
        match other {
            Number::Int(b) => self < *b,
            Number::Big(b) => *b > BigInt::from(self.to_native()),
            Number::Float(f) => self.to_float() < *f,
        }
    }

    /// `self <= other`, via `other >= self` for bignums.
    pub fn le(self, other: &Number) -> bool {
        match other {
            Number::Int(b) => self <= *b,
            Number::Big(b) => *b >= BigInt::from(self.to_native()),
            Number::Float(f) => self.to_float() <= *f,
        }
    }
}
