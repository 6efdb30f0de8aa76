//! Tagged fixed-width integers with transparent bignum promotion.
//!
//! The fast path of a dynamic language's numeric tower: a [`Fixnum`] is an
//! `i64` carrying a type tag in its low byte, restricted to
//! `[FIXNUM_MIN, FIXNUM_MAX]`. Any arithmetic, bitwise, or shift result
//! that leaves the range promotes to a `num_bigint::BigInt`, and results
//! coming back from the bignum engine demote again whenever they fit, so
//! an in-range value is always represented as a fixnum ([`Integer`]'s
//! canonical form).
//!
//! Each operation's other operand is one of three statically known
//! shapes, the closed [`Number`] sum: another fixnum, a bignum, or a
//! float. Integer division and modulo are floored (quotient toward
//! negative infinity, remainder taking the divisor's sign) and fail with
//! [`DivideByZeroError`] on a zero fixnum divisor.
//!
//! ```
//! use flexnum::{Fixnum, Number, Integer};
//!
//! let seven = Fixnum::new(7).unwrap();
//! assert_eq!(seven.div(&Number::Int(Fixnum::new(-2).unwrap())).unwrap(),
//!            Number::Int(Fixnum::new(-4).unwrap()));
//!
//! // The boundary promotes; one step back demotes.
//! let top = Fixnum::MAX.add(&Number::Int(Fixnum::new(1).unwrap()));
//! assert!(matches!(top, Number::Big(_)));
//! assert!(matches!(-Fixnum::MAX, Integer::Fix(_)));
//! ```

#![warn(
    clippy::all,
    clippy::pedantic,
    unused_qualifications,
    meta_variable_misuse,
    missing_copy_implementations,
    noop_method_call,
    trivial_numeric_casts,
    unreachable_pub,
    unused_lifetimes
)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]

mod arith;
mod bits;
mod error;
mod integer;
mod tagged;

pub use arith::Number;
pub use error::DivideByZeroError;
pub use integer::Integer;
pub use tagged::{Fixnum, FIXNUM_MAX, FIXNUM_MIN};
