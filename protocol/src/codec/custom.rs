//! Hook for types that produce their own wire bytes.
//!
//! A custom type hands the encoder a finished byte string which is written
//! verbatim, with no length prefix. Decoding therefore needs to know the
//! byte count up front, which is why [`CustomDecode`] carries it as a
//! constant.

use super::CodecResult;

/// Produces the exact bytes that represent `self` on the wire.
pub trait CustomEncode {
    fn to_bytes(&self) -> CodecResult<Vec<u8>>;
}

/// Reads a custom type back from exactly [`Self::ENCODED_LEN`] bytes.
pub trait CustomDecode: Sized {
    /// Number of bytes [`CustomEncode::to_bytes`] always produces.
    const ENCODED_LEN: usize;

    fn from_bytes(bytes: &[u8]) -> CodecResult<Self>;
}
