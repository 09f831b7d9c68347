//! The append-only Borsh writer.
//!
//! A [`BorshEncoder`] owns one growing buffer for the lifetime of a single
//! encoding call. Types describe themselves through [`BorshEncode`]; the
//! encoder walks a value depth-first and appends bytes in declaration
//! order. There is no seeking and no rewriting: once a byte is appended it
//! is part of the output.

use tracing::{debug, trace};

use super::{CodecError, CodecResult, ValueKind};
use crate::config::MAX_LENGTH_PREFIX;

/// A type with a canonical Borsh encoding.
///
/// Implemented here for the primitive kinds (integers, floats, strings,
/// fixed arrays, sequences, tuples). Records, enums, variants and custom
/// types get their impls from the `impl_borsh_*` macros.
pub trait BorshEncode {
    /// How the codec classifies this type.
    const KIND: ValueKind;

    /// Appends this value's bytes to `encoder`.
    fn encode(&self, encoder: &mut BorshEncoder) -> CodecResult<()>;
}

/// Stateful writer over one growing byte buffer.
///
/// # Examples
///
/// ```
/// use ntb_protocol::codec::BorshEncoder;
///
/// let mut encoder = BorshEncoder::new();
/// encoder.encode(&1u32).unwrap().encode("hi").unwrap();
/// assert_eq!(encoder.as_bytes(), &[1, 0, 0, 0, 2, 0, 0, 0, b'h', b'i']);
/// ```
#[derive(Debug, Default, Clone)]
pub struct BorshEncoder {
    buffer: Vec<u8>,
}

impl BorshEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Encodes one value and returns the encoder for chaining.
    pub fn encode<T: BorshEncode + ?Sized>(&mut self, value: &T) -> CodecResult<&mut Self> {
        value.encode(self)?;
        Ok(self)
    }

    /// Encodes a caller-sized array: elements in order, no length prefix.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not a scalar kind (integer, float or string). Raw
    /// arrays of records, variants or nested containers are a caller bug.
    pub fn encode_raw_array<T: BorshEncode>(&mut self, items: &[T]) -> CodecResult<&mut Self> {
        assert!(
            T::KIND.is_scalar(),
            "raw arrays of {} elements are not supported",
            T::KIND
        );
        for item in items {
            item.encode(self)?;
        }
        Ok(self)
    }

    /// Appends raw bytes verbatim.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        trace!(segment = %hex::encode(bytes), "appending segment");
        self.buffer.extend_from_slice(bytes);
    }

    /// Appends a `u32` little-endian length prefix.
    ///
    /// # Errors
    ///
    /// [`CodecError::LengthOverflow`] if `len` exceeds `u32::MAX`.
    pub fn write_length(&mut self, len: usize) -> CodecResult<()> {
        if len > MAX_LENGTH_PREFIX {
            return Err(CodecError::LengthOverflow(len));
        }
        self.write_bytes(&(len as u32).to_le_bytes());
        Ok(())
    }

    /// Appends a one-byte enum ordinal or variant index.
    pub fn write_discriminant(&mut self, index: u8) {
        self.write_bytes(&[index]);
    }

    /// The bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Releases the finished buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// Encodes a single top-level value into a fresh buffer.
///
/// Encode several top-level values in argument order by passing a tuple:
/// `to_vec(&(a, b, c))`.
pub fn to_vec<T: BorshEncode + ?Sized>(value: &T) -> CodecResult<Vec<u8>> {
    let mut encoder = BorshEncoder::new();
    value.encode(&mut encoder)?;
    debug!(kind = %T::KIND, bytes = encoder.len(), "encoded value");
    Ok(encoder.into_bytes())
}

// ---------------------------------------------------------------------------
// Primitive impls
// ---------------------------------------------------------------------------

macro_rules! impl_integer {
    ($($t:ty => $signed:expr),* $(,)?) => {$(
        impl BorshEncode for $t {
            const KIND: ValueKind = ValueKind::Integer {
                signed: $signed,
                width: std::mem::size_of::<$t>() as u8,
            };

            fn encode(&self, encoder: &mut BorshEncoder) -> CodecResult<()> {
                encoder.write_bytes(&self.to_le_bytes());
                Ok(())
            }
        }
    )*};
}

impl_integer!(
    u8 => false, u16 => false, u32 => false, u64 => false, u128 => false,
    i8 => true, i16 => true, i32 => true, i64 => true, i128 => true,
);

macro_rules! impl_float {
    ($($t:ty),*) => {$(
        impl BorshEncode for $t {
            const KIND: ValueKind = ValueKind::Float {
                width: std::mem::size_of::<$t>() as u8,
            };

            /// # Panics
            ///
            /// Panics on NaN, which has no canonical bit pattern.
            fn encode(&self, encoder: &mut BorshEncoder) -> CodecResult<()> {
                assert!(!self.is_nan(), "NaN cannot be encoded");
                encoder.write_bytes(&self.to_le_bytes());
                Ok(())
            }
        }
    )*};
}

impl_float!(f32, f64);

impl BorshEncode for str {
    const KIND: ValueKind = ValueKind::String;

    fn encode(&self, encoder: &mut BorshEncoder) -> CodecResult<()> {
        encoder.write_length(self.len())?;
        encoder.write_bytes(self.as_bytes());
        Ok(())
    }
}

impl BorshEncode for String {
    const KIND: ValueKind = ValueKind::String;

    fn encode(&self, encoder: &mut BorshEncoder) -> CodecResult<()> {
        self.as_str().encode(encoder)
    }
}

impl<T: BorshEncode, const N: usize> BorshEncode for [T; N] {
    const KIND: ValueKind = ValueKind::FixedArray;

    fn encode(&self, encoder: &mut BorshEncoder) -> CodecResult<()> {
        for item in self {
            item.encode(encoder)?;
        }
        Ok(())
    }
}

/// Slices are dynamically sized, so they carry a count prefix. Use
/// [`BorshEncoder::encode_raw_array`] for a slice whose length both sides
/// already know.
impl<T: BorshEncode> BorshEncode for [T] {
    const KIND: ValueKind = ValueKind::Sequence;

    fn encode(&self, encoder: &mut BorshEncoder) -> CodecResult<()> {
        encoder.write_length(self.len())?;
        for item in self {
            item.encode(encoder)?;
        }
        Ok(())
    }
}

impl<T: BorshEncode> BorshEncode for Vec<T> {
    const KIND: ValueKind = ValueKind::Sequence;

    fn encode(&self, encoder: &mut BorshEncoder) -> CodecResult<()> {
        self.as_slice().encode(encoder)
    }
}

/// `None` is index 0, `Some` is index 1 followed by the value.
impl<T: BorshEncode> BorshEncode for Option<T> {
    const KIND: ValueKind = ValueKind::Variant;

    fn encode(&self, encoder: &mut BorshEncoder) -> CodecResult<()> {
        match self {
            None => encoder.write_discriminant(0),
            Some(value) => {
                encoder.write_discriminant(1);
                value.encode(encoder)?;
            }
        }
        Ok(())
    }
}

impl<T: BorshEncode + ?Sized> BorshEncode for &T {
    const KIND: ValueKind = T::KIND;

    fn encode(&self, encoder: &mut BorshEncoder) -> CodecResult<()> {
        (**self).encode(encoder)
    }
}

macro_rules! impl_tuple {
    ($($name:ident),+) => {
        impl<$($name: BorshEncode),+> BorshEncode for ($($name,)+) {
            const KIND: ValueKind = ValueKind::Record;

            #[allow(non_snake_case)]
            fn encode(&self, encoder: &mut BorshEncoder) -> CodecResult<()> {
                let ($($name,)+) = self;
                $($name.encode(encoder)?;)+
                Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_little_endian_fixed_width() {
        assert_eq!(to_vec(&1u32).unwrap(), vec![1, 0, 0, 0]);
        assert_eq!(to_vec(&0x0102u16).unwrap(), vec![2, 1]);
        assert_eq!(to_vec(&-1i16).unwrap(), vec![0xff, 0xff]);
        assert_eq!(to_vec(&7u8).unwrap(), vec![7]);
        assert_eq!(to_vec(&1u128).unwrap().len(), 16);
        assert_eq!(
            to_vec(&0x0102_0304_0506_0708u64).unwrap(),
            vec![8, 7, 6, 5, 4, 3, 2, 1]
        );
    }

    #[test]
    fn floats_are_raw_bits() {
        assert_eq!(to_vec(&1.0f32).unwrap(), vec![0x00, 0x00, 0x80, 0x3f]);
        assert_eq!(to_vec(&-2.5f64).unwrap(), (-2.5f64).to_le_bytes().to_vec());
    }

    #[test]
    #[should_panic(expected = "NaN cannot be encoded")]
    fn nan_is_a_contract_violation() {
        let _ = to_vec(&f64::NAN);
    }

    #[test]
    fn strings_are_length_prefixed() {
        assert_eq!(to_vec("hi").unwrap(), vec![2, 0, 0, 0, 0x68, 0x69]);
        assert_eq!(to_vec(&String::new()).unwrap(), vec![0, 0, 0, 0]);
        assert_eq!(
            to_vec("é").unwrap(),
            vec![2, 0, 0, 0, 0xc3, 0xa9],
            "length counts bytes, not characters"
        );
    }

    #[test]
    fn sequences_carry_a_count() {
        assert_eq!(to_vec(&vec![1u8, 2]).unwrap(), vec![2, 0, 0, 0, 1, 2]);
        assert_eq!(to_vec(&Vec::<u64>::new()).unwrap(), vec![0, 0, 0, 0]);
        assert_eq!(
            to_vec(&vec!["a".to_string(), "bc".to_string()]).unwrap(),
            vec![2, 0, 0, 0, 1, 0, 0, 0, b'a', 2, 0, 0, 0, b'b', b'c']
        );
    }

    #[test]
    fn fixed_arrays_have_no_prefix() {
        assert_eq!(to_vec(&[1u8, 2, 3]).unwrap(), vec![1, 2, 3]);
        assert_eq!(to_vec(&[1u16, 2]).unwrap(), vec![1, 0, 2, 0]);
        assert_eq!(to_vec(&[0u8; 0]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn raw_arrays_of_scalars() {
        let values = [10u32, 20];
        let mut encoder = BorshEncoder::new();
        encoder.encode_raw_array(&values).unwrap();
        assert_eq!(encoder.as_bytes(), &[10, 0, 0, 0, 20, 0, 0, 0]);

        let names = ["x", "yz"];
        let mut encoder = BorshEncoder::new();
        encoder.encode_raw_array(&names).unwrap();
        assert_eq!(encoder.into_bytes(), to_vec(&("x", "yz")).unwrap());
    }

    #[test]
    #[should_panic(expected = "raw arrays of sequence elements are not supported")]
    fn raw_arrays_of_containers_are_rejected() {
        let nested = [vec![1u8], vec![2u8]];
        let mut encoder = BorshEncoder::new();
        let _ = encoder.encode_raw_array(&nested);
    }

    #[test]
    fn tuples_encode_in_argument_order() {
        let bytes = to_vec(&(1u8, "a", 2u16)).unwrap();
        assert_eq!(bytes, vec![1, 1, 0, 0, 0, b'a', 2, 0]);
    }

    #[test]
    fn options_are_two_way_variants() {
        assert_eq!(to_vec(&None::<u32>).unwrap(), vec![0]);
        assert_eq!(to_vec(&Some(7u16)).unwrap(), vec![1, 7, 0]);
        assert_eq!(<Option<u8> as BorshEncode>::KIND, ValueKind::Variant);
    }

    #[test]
    fn chained_encoding_accumulates() {
        let mut encoder = BorshEncoder::with_capacity(16);
        assert!(encoder.is_empty());
        encoder
            .encode(&1u8)
            .unwrap()
            .encode(&vec![3u8])
            .unwrap();
        assert_eq!(encoder.len(), 6);
        assert_eq!(encoder.as_bytes(), &[1, 1, 0, 0, 0, 3]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let value = (42u64, "alice.near", vec![[1u8; 4], [2u8; 4]]);
        assert_eq!(to_vec(&value).unwrap(), to_vec(&value).unwrap());
    }

    #[test]
    fn kinds_are_reported() {
        assert_eq!(<u32 as BorshEncode>::KIND, ValueKind::U32);
        assert_eq!(<i64 as BorshEncode>::KIND, ValueKind::I64);
        assert_eq!(<f32 as BorshEncode>::KIND, ValueKind::F32);
        assert_eq!(<Vec<u8> as BorshEncode>::KIND, ValueKind::Sequence);
        assert_eq!(<[u8; 32] as BorshEncode>::KIND, ValueKind::FixedArray);
        assert_eq!(<&str as BorshEncode>::KIND, ValueKind::String);
    }
}
