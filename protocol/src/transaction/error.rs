//! Errors raised while building, encoding or signing transactions.

use thiserror::Error;

use crate::bignum::BigIntError;
use crate::codec::CodecError;

/// Failures of the transaction layer.
///
/// Codec and big integer failures are wrapped rather than flattened so a
/// caller can still tell a malformed amount from a truncated payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// `build()` was called before a required field was set.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A human-entered or yocto amount could not be parsed.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A textual key, hash or signature could not be decoded.
    #[error("invalid {what}: {reason}")]
    InvalidEncoding {
        /// What was being decoded.
        what: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// The signer holds a different key than the one the transaction names.
    #[error("signer public key {signer} does not match transaction key {expected}")]
    KeyMismatch {
        /// Key embedded in the transaction.
        expected: String,
        /// Key the signer reported.
        signer: String,
    },

    /// The external signer refused or failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Encoding or decoding the wire form failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// An amount was well-formed text but not a valid integer.
    #[error(transparent)]
    BigInt(#[from] BigIntError),
}

/// Result alias for transaction operations.
pub type TransactionResult<T> = Result<T, TransactionError>;
