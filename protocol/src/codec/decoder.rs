//! Bounds-checked Borsh reader.
//!
//! [`BorshDecoder`] is a cursor over a borrowed byte slice. Every read checks
//! the remaining length first and fails with [`CodecError::Truncated`]
//! instead of reading past the end. Reads either succeed completely or leave
//! the cursor where it was.

use serde::{Deserialize, Serialize};

use super::{CodecError, CodecResult, ValueKind};

/// A type that can be read back from its Borsh encoding.
pub trait BorshDecode: Sized {
    fn decode(decoder: &mut BorshDecoder<'_>) -> CodecResult<Self>;
}

/// A scalar produced by [`BorshDecoder::decode_kinds`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    F32(f32),
    F64(f64),
    String(String),
}

/// Cursor over an encoded buffer.
#[derive(Debug, Clone)]
pub struct BorshDecoder<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> BorshDecoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Takes the next `len` bytes.
    ///
    /// # Errors
    ///
    /// [`CodecError::Truncated`] if fewer than `len` bytes remain. The
    /// cursor does not move in that case.
    pub fn read_exact(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(CodecError::Truncated {
                needed: len,
                remaining,
            });
        }
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    /// Takes the next `N` bytes as an array.
    pub fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_exact(N)?);
        Ok(out)
    }

    /// Reads a one-byte enum ordinal or variant index.
    pub fn read_discriminant(&mut self) -> CodecResult<u8> {
        let [index] = self.read_array::<1>()?;
        Ok(index)
    }

    /// Reads a `u32` little-endian length prefix.
    pub fn read_length(&mut self) -> CodecResult<usize> {
        let prefix = u32::from_le_bytes(self.read_array()?);
        usize::try_from(prefix).map_err(|_| CodecError::LengthOverflow(usize::MAX))
    }

    /// Decodes one statically typed value.
    pub fn decode<T: BorshDecode>(&mut self) -> CodecResult<T> {
        T::decode(self)
    }

    /// Decodes one value of a runtime-selected kind.
    ///
    /// # Errors
    ///
    /// [`CodecError::UnsupportedKind`] for anything other than integers,
    /// floats and strings. Composite kinds need a static type to decode.
    pub fn decode_kind(&mut self, kind: ValueKind) -> CodecResult<Value> {
        let value = match kind {
            ValueKind::Integer { signed: false, width: 1 } => Value::U8(self.decode()?),
            ValueKind::Integer { signed: false, width: 2 } => Value::U16(self.decode()?),
            ValueKind::Integer { signed: false, width: 4 } => Value::U32(self.decode()?),
            ValueKind::Integer { signed: false, width: 8 } => Value::U64(self.decode()?),
            ValueKind::Integer { signed: false, width: 16 } => Value::U128(self.decode()?),
            ValueKind::Integer { signed: true, width: 1 } => Value::I8(self.decode()?),
            ValueKind::Integer { signed: true, width: 2 } => Value::I16(self.decode()?),
            ValueKind::Integer { signed: true, width: 4 } => Value::I32(self.decode()?),
            ValueKind::Integer { signed: true, width: 8 } => Value::I64(self.decode()?),
            ValueKind::Integer { signed: true, width: 16 } => Value::I128(self.decode()?),
            ValueKind::Float { width: 4 } => Value::F32(self.decode()?),
            ValueKind::Float { width: 8 } => Value::F64(self.decode()?),
            ValueKind::String => Value::String(self.decode()?),
            other => return Err(CodecError::UnsupportedKind(other)),
        };
        Ok(value)
    }

    /// Decodes a sequence of values, one per requested kind, in order.
    pub fn decode_kinds(&mut self, kinds: &[ValueKind]) -> CodecResult<Vec<Value>> {
        kinds.iter().map(|&kind| self.decode_kind(kind)).collect()
    }

    /// Succeeds only if the whole buffer has been consumed.
    pub fn finish(self) -> CodecResult<()> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(CodecError::TrailingBytes { remaining }),
        }
    }
}

/// Decodes one value that must span the whole of `bytes`.
pub fn from_slice<T: BorshDecode>(bytes: &[u8]) -> CodecResult<T> {
    let mut decoder = BorshDecoder::new(bytes);
    let value = decoder.decode()?;
    decoder.finish()?;
    Ok(value)
}

// ---------------------------------------------------------------------------
// Primitive impls
// ---------------------------------------------------------------------------

macro_rules! impl_fixed {
    ($($t:ty),*) => {$(
        impl BorshDecode for $t {
            fn decode(decoder: &mut BorshDecoder<'_>) -> CodecResult<Self> {
                Ok(<$t>::from_le_bytes(decoder.read_array()?))
            }
        }
    )*};
}

impl_fixed!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

impl BorshDecode for String {
    fn decode(decoder: &mut BorshDecoder<'_>) -> CodecResult<Self> {
        let len = decoder.read_length()?;
        let bytes = decoder.read_exact(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
    }
}

impl<T: BorshDecode> BorshDecode for Vec<T> {
    fn decode(decoder: &mut BorshDecoder<'_>) -> CodecResult<Self> {
        let count = decoder.read_length()?;
        // The prefix is untrusted input. Cap preallocation by what is left.
        let mut items = Vec::with_capacity(count.min(decoder.remaining()));
        for _ in 0..count {
            items.push(T::decode(decoder)?);
        }
        Ok(items)
    }
}

impl<T: BorshDecode> BorshDecode for Option<T> {
    fn decode(decoder: &mut BorshDecoder<'_>) -> CodecResult<Self> {
        match decoder.read_discriminant()? {
            0 => Ok(None),
            1 => Ok(Some(T::decode(decoder)?)),
            value => Err(CodecError::InvalidDiscriminant {
                type_name: "Option",
                value,
            }),
        }
    }
}

impl<T: BorshDecode, const N: usize> BorshDecode for [T; N] {
    fn decode(decoder: &mut BorshDecoder<'_>) -> CodecResult<Self> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::decode(decoder)?);
        }
        items.try_into().map_err(|items: Vec<T>| CodecError::LengthMismatch {
            expected: N,
            found: items.len(),
        })
    }
}

macro_rules! impl_tuple {
    ($($name:ident),+) => {
        impl<$($name: BorshDecode),+> BorshDecode for ($($name,)+) {
            fn decode(decoder: &mut BorshDecoder<'_>) -> CodecResult<Self> {
                Ok(($($name::decode(decoder)?,)+))
            }
        }
    };
}

impl_tuple!(A, B);
impl_tuple!(A, B, C);
impl_tuple!(A, B, C, D);
impl_tuple!(A, B, C, D, E);
impl_tuple!(A, B, C, D, E, F);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
