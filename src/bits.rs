//! Bitwise operations and shifts.
//!
//! And/or/xor/invert on two in-range operands cannot leave the range, so
//! they skip the overflow gate. Left shift is the only bitwise operation
//! that can promote; it detects spill before shifting natively. A float
//! counterpart is truncated to a native integer first (lossy by design,
//! not an error).

use std::ops::{BitAnd, BitOr, BitXor, Not};

use num_bigint::BigInt;

use crate::arith::Number;
use crate::integer::Integer;
use crate::tagged::{Fixnum, TAG_BITS};

/// Bits available to a fixnum value below the sign bit.
const WIDTH: i64 = 63 - TAG_BITS as i64;

impl Not for Fixnum {
    type Output = Fixnum;

    fn not(self) -> Fixnum {
        // One's complement maps the range onto itself.
        Fixnum::from_unchecked(!self.to_native())
    }
}

impl BitAnd for Fixnum {
    type Output = Fixnum;

    fn bitand(self, rhs: Fixnum) -> Fixnum {
        Fixnum::from_unchecked(self.to_native() & rhs.to_native())
    }
}

impl BitOr for Fixnum {
    type Output = Fixnum;

    fn bitor(self, rhs: Fixnum) -> Fixnum {
        Fixnum::from_unchecked(self.to_native() | rhs.to_native())
    }
}

impl BitXor for Fixnum {
    type Output = Fixnum;

    fn bitxor(self, rhs: Fixnum) -> Fixnum {
        Fixnum::from_unchecked(self.to_native() ^ rhs.to_native())
    }
}

/// Truncate a float counterpart for a bitwise operation. Fractions are
/// dropped and out-of-native-range magnitudes saturate; NaN becomes zero.
/// Documented lossy behavior, not an error.
fn truncate(value: f64) -> i64 {
    value as i64
}

impl Fixnum {
    /// Bitwise and with the counterpart.
    pub fn bit_and(self, other: &Number) -> Integer {
        match other {
            Number::Int(b) => Integer::Fix(self & *b),
            Number::Big(b) => Integer::shrink(b & &BigInt::from(self.to_native())),
            Number::Float(f) => Integer::normalize(self.to_native() & truncate(*f)),
        }
    }

    /// Bitwise or with the counterpart.
    pub fn bit_or(self, other: &Number) -> Integer {
        match other {
            Number::Int(b) => Integer::Fix(self | *b),
            Number::Big(b) => Integer::shrink(b | &BigInt::from(self.to_native())),
            Number::Float(f) => Integer::normalize(self.to_native() | truncate(*f)),
        }
    }

    /// Bitwise xor with the counterpart.
    pub fn bit_xor(self, other: &Number) -> Integer {
        match other {
            Number::Int(b) => Integer::Fix(self ^ *b),
            Number::Big(b) => Integer::shrink(b ^ &BigInt::from(self.to_native())),
            Number::Float(f) => Integer::normalize(self.to_native() ^ truncate(*f)),
        }
    }

    /// Shift left, promoting when bits would spill past the fixnum width.
    /// A negative amount shifts right instead.
    pub fn left_shift(self, amount: i64) -> Integer {
        if amount < 0 {
            return self.right_shift(amount.saturating_neg());
        }
        let value = self.to_native();
        if value == 0 {
            return Integer::Fix(Fixnum::ZERO);
        }
        if amount >= WIDTH {
            return Integer::shrink(BigInt::from(value) << amount);
        }
        // Sign-extended spill check: the bits shifted past the usable
        // width must all equal the sign bit, otherwise the native result
        // would not round-trip.
        let spill = value >> (WIDTH - amount);
        if spill != 0 && spill != -1 {
            Integer::shrink(BigInt::from(value) << amount)
        } else {
            Integer::normalize(value << amount)
        }
    }

    /// Arithmetic shift right; sign-extending, so the result always stays
    /// in range. A negative amount shifts left instead.
    pub fn right_shift(self, amount: i64) -> Integer {
        if amount < 0 {
            return self.left_shift(amount.saturating_neg());
        }
        // Past the native width every bit is sign fill.
        let shift = amount.min(i64::BITS as i64 - 1);
        Integer::Fix(Fixnum::from_unchecked(self.to_native() >> shift))
    }

    /// One's complement. Always in range.
    pub fn invert(self) -> Fixnum {
        !self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tagged::{FIXNUM_MAX, FIXNUM_MIN};

    fn fix(n: i64) -> Fixnum {
        Fixnum::new(n).unwrap()
    }

    fn int(n: i64) -> Number {
        Number::Int(fix(n))
    }

    fn ifix(n: i64) -> Integer {
        Integer::Fix(fix(n))
    }

    #[test]
    fn native_bit_ops() {
        assert_eq!(fix(0b1100).bit_and(&int(0b1010)), ifix(0b1000));
        assert_eq!(fix(0b1100).bit_or(&int(0b1010)), ifix(0b1110));
        assert_eq!(fix(0b1100).bit_xor(&int(0b1010)), ifix(0b0110));
        assert_eq!(fix(-1).bit_and(&int(7)), ifix(7));
    }

    #[test]
    fn invert_stays_in_range() {
        assert_eq!(fix(0).invert(), fix(-1));
        assert_eq!(fix(-1).invert(), fix(0));
        assert_eq!(Fixnum::MAX.invert(), Fixnum::MIN);
        assert_eq!(Fixnum::MIN.invert(), Fixnum::MAX);
    }

    #[test]
    fn bit_ops_with_bignums() {
        // 2^55 | 1: the or keeps the high bit, so the result stays big.
        let big: BigInt = BigInt::from(FIXNUM_MAX) + 1;
        assert_eq!(
            fix(1).bit_or(&Number::Big(big.clone())),
            Integer::Big(big.clone() + 1)
        );
        // 2^55 & 1 is zero: the delegated result demotes.
        assert_eq!(fix(1).bit_and(&Number::Big(big.clone())), ifix(0));
        assert_eq!(
            fix(1).bit_xor(&Number::Big(big.clone())),
            Integer::Big(big + 1)
        );
    }

    #[test]
    fn bit_ops_with_floats_truncate() {
        assert_eq!(fix(0b1100).bit_and(&Number::Float(10.9)), ifix(0b1000));
        assert_eq!(fix(0).bit_or(&Number::Float(-3.7)), ifix(-3));
        assert_eq!(fix(0).bit_xor(&Number::Float(f64::NAN)), ifix(0));
        // Saturated truncation can push an or out of range.
        let huge = Fixnum::MAX.bit_or(&Number::Float(f64::MAX));
        assert_eq!(huge, Integer::Big(BigInt::from(i64::MAX)));
    }

    #[test]
    fn left_shift_in_range() {
        assert_eq!(fix(1).left_shift(4), ifix(16));
        assert_eq!(fix(-3).left_shift(2), ifix(-12));
        assert_eq!(fix(5).left_shift(0), ifix(5));
        assert_eq!(fix(0).left_shift(1000), ifix(0));
        // Up to the boundary without spilling.
        assert_eq!(fix(1).left_shift(54), ifix(1 << 54));
        assert_eq!(fix(-1).left_shift(55), ifix(FIXNUM_MIN));
    }

    #[test]
    fn left_shift_promotes_on_spill() {
        assert_eq!(
            fix(1).left_shift(55),
            Integer::Big(BigInt::from(FIXNUM_MAX) + 1)
        );
        assert_eq!(
            fix(3).left_shift(54),
            Integer::Big(BigInt::from(3) << 54)
        );
        assert_eq!(
            fix(-2).left_shift(55),
            Integer::Big(BigInt::from(-2) << 55)
        );
        // Far past the width.
        assert_eq!(
            fix(1).left_shift(200),
            Integer::Big(BigInt::from(1) << 200)
        );
    }

    #[test]
    fn right_shift_is_arithmetic() {
        assert_eq!(fix(16).right_shift(4), ifix(1));
        assert_eq!(fix(-16).right_shift(4), ifix(-1));
        assert_eq!(fix(-1).right_shift(1), ifix(-1));
        assert_eq!(fix(5).right_shift(0), ifix(5));
        // Amounts past the native width drain to the sign fill.
        assert_eq!(Fixnum::MAX.right_shift(1000), ifix(0));
        assert_eq!(Fixnum::MIN.right_shift(1000), ifix(-1));
    }

    #[test]
    fn negative_amounts_reverse_direction() {
        assert_eq!(fix(16).left_shift(-4), ifix(1));
        assert_eq!(fix(1).right_shift(-4), ifix(16));
        assert_eq!(
            fix(1).right_shift(-55),
            Integer::Big(BigInt::from(FIXNUM_MAX) + 1)
        );
    }

    #[test]
    fn shift_round_trip() {
        for value in [1, -1, 37, -37, FIXNUM_MAX >> 10, FIXNUM_MIN >> 10] {
            for amount in [0_i64, 1, 5, 10] {
                let shifted = fix(value).left_shift(amount);
                let Integer::Fix(shifted) = shifted else {
                    panic!("{value} << {amount} should fit")
                };
                assert_eq!(shifted.right_shift(amount), ifix(value));
            }
        }
    }
}
