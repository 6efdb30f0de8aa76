//! The tagged integer codec.
//!
//! A [`Fixnum`] is a native `i64` packed into a tagged machine word: the
//! value occupies the high bits and the low byte holds the type tag that
//! distinguishes immediate integers from heap references in the wider
//! object model. Only the integer tag lives here; everything else about
//! the word layout belongs to the runtime.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};

/// Number of low bits reserved for the type tag.
pub(crate) const TAG_BITS: u32 = 8;

/// Tag marking a word as an immediate integer.
const TAG_INT: i64 = 0x01;

/// Largest value representable as a [`Fixnum`] (2^55 - 1).
pub const FIXNUM_MAX: i64 = i64::MAX >> TAG_BITS;
/// Smallest value representable as a [`Fixnum`] (-2^55).
///
/// The range is asymmetric: `FIXNUM_MIN.abs() == FIXNUM_MAX + 1`, so
/// negating [`FIXNUM_MIN`] does not fit a `Fixnum`.
pub const FIXNUM_MIN: i64 = i64::MIN >> TAG_BITS;

/// An immediate integer in `[FIXNUM_MIN, FIXNUM_MAX]`, stored as a tagged
/// word. Copyable, immutable, and equal by value; two fixnums holding the
/// same integer are bit-identical.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Fixnum(i64);

impl Fixnum {
    pub const ZERO: Fixnum = Fixnum::from_unchecked(0);
    pub const MAX: Fixnum = Fixnum::from_unchecked(FIXNUM_MAX);
    pub const MIN: Fixnum = Fixnum::from_unchecked(FIXNUM_MIN);

    /// Create a fixnum from an untrusted value, or `None` if it is
    /// outside `[FIXNUM_MIN, FIXNUM_MAX]`.
    pub fn new(value: i64) -> Option<Fixnum> {
        (FIXNUM_MIN..=FIXNUM_MAX)
            .contains(&value)
            .then(|| Fixnum::from_unchecked(value))
    }

    /// Create a fixnum from a value already known to be in range.
    ///
    /// Calling this with a value outside `[FIXNUM_MIN, FIXNUM_MAX]` is a
    /// precondition violation: the value will not survive the tag
    /// round-trip. Call sites that cannot prove the range must use
    /// [`Fixnum::new`] instead.
    pub const fn from_unchecked(value: i64) -> Fixnum {
        debug_assert!(value >= FIXNUM_MIN && value <= FIXNUM_MAX);
        Fixnum((value << TAG_BITS) | TAG_INT)
    }

    /// Strip the tag. Exact inverse of [`Fixnum::from_unchecked`] for
    /// in-range values; the arithmetic shift restores the sign.
    pub const fn to_native(self) -> i64 {
        self.0 >> TAG_BITS
    }

    /// Widen to a float. Exact for magnitudes up to 2^53; beyond the
    /// mantissa range the nearest representable double is returned.
    pub fn to_float(self) -> f64 {
        self.to_native() as f64
    }

    /// Byte width of the native integer representation.
    pub fn size() -> Fixnum {
        Fixnum::from_unchecked(std::mem::size_of::<i64>() as i64)
    }
}

impl PartialOrd for Fixnum {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fixnum {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_native().cmp(&other.to_native())
    }
}

impl Display for Fixnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_native())
    }
}

impl Debug for Fixnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixnum({})", self.to_native())
    }
}
