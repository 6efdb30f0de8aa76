//! The one error this crate originates.

use std::fmt::{Display, Formatter};

use crate::tagged::Fixnum;

/// Division or modulo by a zero fixnum divisor.
///
/// Carries the dividend and the offending divisor. Never recovered here;
/// callers propagate it (overflow, by contrast, is never an error; it
/// promotes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivideByZeroError {
    dividend: Fixnum,
    divisor: Fixnum,
}

impl std::error::Error for DivideByZeroError {}

impl Display for DivideByZeroError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} divided by 0", self.dividend)
    }
}

impl DivideByZeroError {
    pub(crate) fn new(dividend: Fixnum, divisor: Fixnum) -> Self {
        Self { dividend, divisor }
    }

    pub fn dividend(&self) -> Fixnum {
        self.dividend
    }

    pub fn divisor(&self) -> Fixnum {
        self.divisor
    }
}
