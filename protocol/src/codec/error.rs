//! Error type for the Borsh codec.

use thiserror::Error;

use super::ValueKind;
use crate::bignum::BigIntError;

/// Errors surfaced while encoding or decoding.
///
/// Programmer-contract violations (NaN floats, raw arrays of composite
/// elements) are not represented here: they panic at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The input ended before the layout being read was complete.
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes the current read required.
        needed: usize,
        /// Bytes that were left in the source.
        remaining: usize,
    },

    /// The decoder was asked for a kind it has no fixed layout for.
    #[error("unsupported value kind: {0}")]
    UnsupportedKind(ValueKind),

    /// A string or sequence is longer than the `u32` length prefix allows.
    #[error("length {0} does not fit in the u32 length prefix")]
    LengthOverflow(usize),

    /// A fixed-size array decoded to the wrong number of elements.
    #[error("expected {expected} elements, decoded {found}")]
    LengthMismatch {
        /// Static array length.
        expected: usize,
        /// Elements actually produced.
        found: usize,
    },

    /// An enum or variant discriminant byte has no matching alternative.
    #[error("invalid discriminant {value} for {type_name}")]
    InvalidDiscriminant {
        /// Name of the enum being decoded.
        type_name: &'static str,
        /// The byte that was read.
        value: u8,
    },

    /// A length-prefixed string was not valid UTF-8.
    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    /// Bytes were left over after a complete top-level value.
    #[error("{remaining} trailing bytes after decoding")]
    TrailingBytes {
        /// Number of unread bytes.
        remaining: usize,
    },

    /// A custom-encoded big integer could not produce or accept its bytes.
    #[error("big integer encoding failed: {0}")]
    BigInt(#[from] BigIntError),
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
