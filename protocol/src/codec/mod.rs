//! # Borsh Codec
//!
//! Canonical binary encoding for everything that gets signed. One value maps
//! to exactly one byte sequence, so two parties that build the same
//! transaction independently produce the same signing payload.
//!
//! ## Wire layout
//!
//! | Kind            | Bytes                                                  |
//! |-----------------|--------------------------------------------------------|
//! | integer         | fixed width (1/2/4/8/16), little-endian                |
//! | float           | IEEE-754 bits, little-endian; NaN is rejected          |
//! | string          | `u32` LE byte length, then UTF-8 bytes                 |
//! | fixed array     | elements in order, no prefix                           |
//! | sequence        | `u32` LE element count, then elements                  |
//! | enum            | one ordinal byte                                       |
//! | variant         | one index byte, then the active alternative            |
//! | record          | fields in declaration order                            |
//! | custom          | bytes from [`CustomEncode::to_bytes`], verbatim        |
//!
//! There is no padding, no alignment and no self-description: the reader
//! must know the layout it expects.
//!
//! ## Usage
//!
//! Primitives implement [`BorshEncode`] and [`BorshDecode`] directly.
//! Composite types opt in with [`impl_borsh_record!`](crate::impl_borsh_record),
//! [`impl_borsh_enum!`](crate::impl_borsh_enum),
//! [`impl_borsh_variant!`](crate::impl_borsh_variant) or
//! [`impl_borsh_custom!`](crate::impl_borsh_custom).

mod custom;
mod decoder;
mod encoder;
mod error;
mod kind;
#[macro_use]
mod macros;

pub use custom::{CustomDecode, CustomEncode};
pub use decoder::{from_slice, BorshDecode, BorshDecoder, Value};
pub use encoder::{to_vec, BorshEncode, BorshEncoder};
pub use error::{CodecError, CodecResult};
pub use kind::ValueKind;
