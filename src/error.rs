use std::convert::Infallible;

use thiserror::Error;

use crate::Char16;

/// Errors that can occur when constructing characters, ranges, and character sets.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The lower bound of an interval is greater than its upper bound.
    #[error("invalid interval: lower bound {low} is greater than upper bound {high}")]
    InvalidInterval { low: Char16, high: Char16 },
    /// The code point does not fit into the 16-bit character domain.
    #[error("code point {0:#x} is outside of the character domain")]
    OutOfDomain(u32),
}

/// Lets constructors take any `TryInto<Char16>`, including the infallible `u16` and `Char16` conversions.
impl From<Infallible> for Error {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}
