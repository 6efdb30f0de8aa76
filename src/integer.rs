//! The integer sum type: a fixnum that has spilled into a bignum.
//!
//! Every integer-valued operation in the crate produces an [`Integer`].
//! The canonical-form invariant holds throughout: a value is `Fix` if and
//! only if it lies in `[FIXNUM_MIN, FIXNUM_MAX]`; no `Big` ever holds an
//! in-range value. [`Integer::normalize`] and [`Integer::shrink`] are the
//! only construction sites for results, which is what enforces it.

use std::fmt::{self, Display};
use std::ops::{Add, Mul, Neg, Sub};

use anyhow::anyhow;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, One, ToPrimitive, Zero};

use crate::tagged::{Fixnum, FIXNUM_MAX, FIXNUM_MIN};

/// Either an immediate [`Fixnum`] or a heap-allocated [`BigInt`], with the
/// guarantee that `Big` never holds a value the fixnum range could hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Integer {
    Fix(Fixnum),
    Big(BigInt),
}

impl Integer {
    /// Wrap a native result, promoting to a bignum when it falls outside
    /// the fixnum range. The shared overflow gate: every operation whose
    /// native result can exceed the range funnels through here.
    pub(crate) fn normalize(value: i64) -> Integer {
        if (FIXNUM_MIN..=FIXNUM_MAX).contains(&value) {
            Integer::Fix(Fixnum::from_unchecked(value))
        } else {
            Integer::Big(BigInt::from(value))
        }
    }

    /// Demote a bignum result back to a fixnum when it fits. Results
    /// coming back from the bignum engine must pass through here so the
    /// canonical-form invariant survives delegation.
    pub(crate) fn shrink(value: BigInt) -> Integer {
        value
            .to_i64()
            .filter(|&n| (FIXNUM_MIN..=FIXNUM_MAX).contains(&n))
            .map_or_else(
                || Integer::Big(value),
                |n| Integer::Fix(Fixnum::from_unchecked(n)),
            )
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer::Fix(value) => write!(f, "{value}"),
            Integer::Big(value) => write!(f, "{value}"),
        }
    }
}

impl From<Fixnum> for Integer {
    fn from(value: Fixnum) -> Self {
        Integer::Fix(value)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer::normalize(value)
    }
}

impl From<BigInt> for Integer {
    fn from(value: BigInt) -> Self {
        Integer::shrink(value)
    }
}

impl From<Integer> for BigInt {
    fn from(value: Integer) -> BigInt {
        match value {
            Integer::Fix(n) => BigInt::from(n.to_native()),
            Integer::Big(n) => n,
        }
    }
}

impl TryFrom<f64> for Integer {
    type Error = anyhow::Error;

    fn try_from(value: f64) -> anyhow::Result<Self> {
        if value.is_nan() || value.is_infinite() {
            return Err(anyhow!("not a finite float: {value}"));
        }
        match value.to_i64() {
            Some(n) => Ok(Integer::normalize(n)),
            None => BigInt::from_f64(value)
                .map(Integer::shrink)
                .ok_or_else(|| anyhow!("float out of integer range: {value}")),
        }
    }
}

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Integer::Fix(n) => -n,
            // -Big can land back in range only at the -FIXNUM_MIN boundary,
            // which shrink catches.
            Integer::Big(n) => Integer::shrink(-n),
        }
    }
}

impl Add for Integer {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Integer::Fix(a), Integer::Fix(b)) => a + b,
            (Integer::Fix(a), Integer::Big(b)) => Integer::shrink(b + a.to_native()),
            (Integer::Big(a), Integer::Fix(b)) => Integer::shrink(a + b.to_native()),
            (Integer::Big(a), Integer::Big(b)) => Integer::shrink(a + b),
        }
    }
}

impl Sub for Integer {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Integer::Fix(a), Integer::Fix(b)) => a - b,
            (Integer::Fix(a), Integer::Big(b)) => Integer::shrink(-b + a.to_native()),
            (Integer::Big(a), Integer::Fix(b)) => Integer::shrink(a - b.to_native()),
            (Integer::Big(a), Integer::Big(b)) => Integer::shrink(a - b),
        }
    }
}

impl Mul for Integer {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Integer::Fix(a), Integer::Fix(b)) => a * b,
            (Integer::Fix(a), Integer::Big(b)) => Integer::shrink(b * a.to_native()),
            (Integer::Big(a), Integer::Fix(b)) => Integer::shrink(a * b.to_native()),
            (Integer::Big(a), Integer::Big(b)) => Integer::shrink(a * b),
        }
    }
}

impl Zero for Integer {
    #[inline]
    fn zero() -> Self {
        Integer::Fix(Fixnum::ZERO)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        matches!(self, Integer::Fix(n) if n.to_native() == 0)
    }
}

impl One for Integer {
    #[inline]
    fn one() -> Self {
        Integer::Fix(Fixnum::from_unchecked(1))
    }
}

impl ToPrimitive for Integer {
    fn to_i64(&self) -> Option<i64> {
        match self {
            Integer::Fix(n) => Some(n.to_native()),
            Integer::Big(n) => n.to_i64(),
        }
    }

    fn to_u64(&self) -> Option<u64> {
        match self {
            Integer::Fix(n) => n.to_native().to_u64(),
            Integer::Big(n) => n.to_u64(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fix(n: i64) -> Integer {
        Integer::Fix(Fixnum::from_unchecked(n))
    }

    #[test]
    fn normalize_picks_the_smallest_form() {
        assert_eq!(Integer::normalize(17), fix(17));
        assert_eq!(Integer::normalize(FIXNUM_MAX), fix(FIXNUM_MAX));
        assert_eq!(
            Integer::normalize(FIXNUM_MAX + 1),
            Integer::Big(BigInt::from(FIXNUM_MAX) + 1)
        );
        assert_eq!(
            Integer::normalize(FIXNUM_MIN - 1),
            Integer::Big(BigInt::from(FIXNUM_MIN) - 1)
        );
    }

    #[test]
    fn shrink_restores_canonical_form() {
        assert_eq!(Integer::shrink(BigInt::from(5)), fix(5));
        assert_eq!(Integer::shrink(BigInt::from(FIXNUM_MIN)), fix(FIXNUM_MIN));
        let wide: BigInt = BigInt::from(FIXNUM_MAX) * 2;
        assert_eq!(Integer::shrink(wide.clone()), Integer::Big(wide));
    }

    #[test]
    fn negating_a_boundary_bignum_shrinks() {
        // -(FIXNUM_MAX + 1) is exactly FIXNUM_MIN.
        let big = Integer::Big(BigInt::from(FIXNUM_MAX) + 1);
        assert_eq!(-big, fix(FIXNUM_MIN));
    }

    #[test]
    fn mixed_operators_stay_canonical() {
        let big = Integer::normalize(FIXNUM_MAX) + fix(1);
        assert!(matches!(big, Integer::Big(_)));
        // Coming back below the boundary demotes again.
        assert_eq!(big - fix(1), fix(FIXNUM_MAX));

        let product = fix(1 << 30) * fix(1 << 30);
        assert_eq!(product, Integer::Big(BigInt::from(1_i128 << 60)));
    }

    #[test]
    fn float_conversion() {
        assert_eq!(Integer::try_from(12.0).unwrap(), fix(12));
        assert_eq!(Integer::try_from(-3.9).unwrap(), fix(-3));
        assert!(Integer::try_from(f64::NAN).is_err());
        assert!(Integer::try_from(f64::INFINITY).is_err());
        assert!(matches!(Integer::try_from(2e80).unwrap(), Integer::Big(_)));
    }

    #[test]
    fn primitive_access() {
        assert_eq!(fix(9).to_i64(), Some(9));
        assert_eq!(Integer::normalize(FIXNUM_MAX + 1).to_i64(), Some(FIXNUM_MAX + 1));
        let huge = Integer::Big(BigInt::from(u128::MAX));
        assert_eq!(huge.to_i64(), None);
    }

    #[test]
    fn zero_and_one() {
        assert!(Integer::zero().is_zero());
        assert!(!Integer::one().is_zero());
        assert_eq!(Integer::one() + Integer::one(), fix(2));
    }
}
