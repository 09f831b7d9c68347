//! Error type for the big integer engine.

use thiserror::Error;

/// Errors raised by [`BigInteger`](super::BigInteger) parsing and arithmetic.
///
/// Every failure is reported at the point of violation. Nothing here is ever
/// clamped or defaulted: a malformed digit string is an error, not a zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BigIntError {
    /// A character other than `0`-`9` (after the optional sign) was found.
    #[error("invalid digit {0:?} in decimal string")]
    InvalidDigit(char),

    /// A raw digit vector contained a value above 9.
    #[error("digit value {0} is outside 0..=9")]
    DigitOutOfRange(u8),

    /// Bad bounds, negative exponents, `0^0` and friends.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Division, remainder or modular exponentiation by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The value does not fit in the requested native or fixed-width form.
    #[error("value with {digits} digits does not fit in {target}")]
    Overflow {
        /// Decimal digit count of the offending value.
        digits: usize,
        /// Human-readable name of the target representation.
        target: String,
    },
}
