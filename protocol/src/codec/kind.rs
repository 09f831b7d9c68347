//! Value classification.
//!
//! Every encodable type declares one [`ValueKind`] through
//! [`BorshEncode::KIND`](super::BorshEncode::KIND). The codec uses it to
//! police raw-array element types, and the dynamic decoder takes a list of
//! kinds to know which fixed layouts to read.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of kinds the codec dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Fixed-width integer, `width` bytes, little-endian.
    Integer { signed: bool, width: u8 },
    /// Fixed-width IEEE-754 float, `width` bytes, little-endian raw bits.
    Float { width: u8 },
    /// `u32` byte length, then UTF-8 bytes.
    String,
    /// Elements in order, no prefix.
    FixedArray,
    /// `u32` element count, then elements.
    Sequence,
    /// One ordinal byte.
    Enum,
    /// One index byte, then the active alternative.
    Variant,
    /// Fields in declaration order, no tags.
    Record,
    /// The type writes its own bytes.
    Custom,
}

impl ValueKind {
    pub const U8: Self = Self::Integer { signed: false, width: 1 };
    pub const U16: Self = Self::Integer { signed: false, width: 2 };
    pub const U32: Self = Self::Integer { signed: false, width: 4 };
    pub const U64: Self = Self::Integer { signed: false, width: 8 };
    pub const U128: Self = Self::Integer { signed: false, width: 16 };
    pub const I8: Self = Self::Integer { signed: true, width: 1 };
    pub const I16: Self = Self::Integer { signed: true, width: 2 };
    pub const I32: Self = Self::Integer { signed: true, width: 4 };
    pub const I64: Self = Self::Integer { signed: true, width: 8 };
    pub const I128: Self = Self::Integer { signed: true, width: 16 };
    pub const F32: Self = Self::Float { width: 4 };
    pub const F64: Self = Self::Float { width: 8 };

    /// Encoded size for kinds with a static layout.
    pub fn fixed_width(&self) -> Option<usize> {
        match *self {
            Self::Integer { width, .. } | Self::Float { width } => Some(usize::from(width)),
            Self::Enum => Some(1),
            _ => None,
        }
    }

    /// Integers, floats and strings. These are the only element kinds a raw
    /// (unprefixed, caller-sized) array may hold.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Integer { .. } | Self::Float { .. } | Self::String
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer { signed, width } => {
                write!(f, "{}{}", if *signed { "i" } else { "u" }, u32::from(*width) * 8)
            }
            Self::Float { width } => write!(f, "f{}", u32::from(*width) * 8),
            Self::String => write!(f, "string"),
            Self::FixedArray => write!(f, "fixed array"),
            Self::Sequence => write!(f, "sequence"),
            Self::Enum => write!(f, "enum"),
            Self::Variant => write!(f, "variant"),
            Self::Record => write!(f, "record"),
            Self::Custom => write!(f, "custom"),
        }
    }
}
