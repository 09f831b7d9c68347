//! Declarative impls for records, enums, variants and custom types.
//!
//! The codec has no reflection, so a composite type states its layout once
//! through one of these macros and gets matching [`BorshEncode`] and
//! [`BorshDecode`] impls. Field and alternative order in the invocation is
//! the wire order.
//!
//! [`BorshEncode`]: crate::codec::BorshEncode
//! [`BorshDecode`]: crate::codec::BorshDecode

/// Record: fields in the listed order, no tags.
///
/// ```
/// use ntb_protocol::impl_borsh_record;
///
/// #[derive(Debug, PartialEq)]
/// struct Point { x: u32, y: u32 }
/// impl_borsh_record!(Point { x, y });
///
/// let bytes = ntb_protocol::codec::to_vec(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(bytes, [1, 0, 0, 0, 2, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! impl_borsh_record {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl $crate::codec::BorshEncode for $ty {
            const KIND: $crate::codec::ValueKind = $crate::codec::ValueKind::Record;

            fn encode(
                &self,
                encoder: &mut $crate::codec::BorshEncoder,
            ) -> $crate::codec::CodecResult<()> {
                $($crate::codec::BorshEncode::encode(&self.$field, encoder)?;)+
                Ok(())
            }
        }

        impl $crate::codec::BorshDecode for $ty {
            fn decode(
                decoder: &mut $crate::codec::BorshDecoder<'_>,
            ) -> $crate::codec::CodecResult<Self> {
                Ok($ty {
                    $($field: decoder.decode()?,)+
                })
            }
        }
    };
}

/// Simple enum: one ordinal byte.
#[macro_export]
macro_rules! impl_borsh_enum {
    ($ty:ident { $($index:literal => $variant:ident),+ $(,)? }) => {
        impl $crate::codec::BorshEncode for $ty {
            const KIND: $crate::codec::ValueKind = $crate::codec::ValueKind::Enum;

            fn encode(
                &self,
                encoder: &mut $crate::codec::BorshEncoder,
            ) -> $crate::codec::CodecResult<()> {
                let index: u8 = match self {
                    $($ty::$variant => $index,)+
                };
                encoder.write_discriminant(index);
                Ok(())
            }
        }

        impl $crate::codec::BorshDecode for $ty {
            fn decode(
                decoder: &mut $crate::codec::BorshDecoder<'_>,
            ) -> $crate::codec::CodecResult<Self> {
                match decoder.read_discriminant()? {
                    $($index => Ok($ty::$variant),)+
                    value => Err($crate::codec::CodecError::InvalidDiscriminant {
                        type_name: stringify!($ty),
                        value,
                    }),
                }
            }
        }
    };
}

/// Tagged union: one index byte, then the active alternative's fields.
///
/// Alternatives may be unit (`Name`), carry one positional value
/// (`Name(binding)`), or carry named fields (`Name { a, b }`).
#[macro_export]
macro_rules! impl_borsh_variant {
    ($ty:ident {
        $(
            $index:literal => $variant:ident
                $(( $inner:ident ))?
                $({ $($field:ident),* $(,)? })?
        ),+ $(,)?
    }) => {
        impl $crate::codec::BorshEncode for $ty {
            const KIND: $crate::codec::ValueKind = $crate::codec::ValueKind::Variant;

            fn encode(
                &self,
                encoder: &mut $crate::codec::BorshEncoder,
            ) -> $crate::codec::CodecResult<()> {
                match self {
                    $(
                        $ty::$variant $(( $inner ))? $({ $($field),* })? => {
                            encoder.write_discriminant($index);
                            $($crate::codec::BorshEncode::encode($inner, encoder)?;)?
                            $($($crate::codec::BorshEncode::encode($field, encoder)?;)*)?
                        }
                    )+
                }
                Ok(())
            }
        }

        impl $crate::codec::BorshDecode for $ty {
            fn decode(
                decoder: &mut $crate::codec::BorshDecoder<'_>,
            ) -> $crate::codec::CodecResult<Self> {
                match decoder.read_discriminant()? {
                    $(
                        $index => Ok($ty::$variant
                            $(({
                                let $inner = decoder.decode()?;
                                $inner
                            }))?
                            $({ $($field: decoder.decode()?),* })?
                        ),
                    )+
                    value => Err($crate::codec::CodecError::InvalidDiscriminant {
                        type_name: stringify!($ty),
                        value,
                    }),
                }
            }
        }
    };
}

/// Custom type: writes whatever [`CustomEncode`](crate::codec::CustomEncode)
/// returns, and reads back [`CustomDecode::ENCODED_LEN`](crate::codec::CustomDecode::ENCODED_LEN)
/// bytes.
#[macro_export]
macro_rules! impl_borsh_custom {
    ($ty:ty) => {
        impl $crate::codec::BorshEncode for $ty {
            const KIND: $crate::codec::ValueKind = $crate::codec::ValueKind::Custom;

            fn encode(
                &self,
                encoder: &mut $crate::codec::BorshEncoder,
            ) -> $crate::codec::CodecResult<()> {
                let bytes = $crate::codec::CustomEncode::to_bytes(self)?;
                encoder.write_bytes(&bytes);
                Ok(())
            }
        }

        impl $crate::codec::BorshDecode for $ty {
            fn decode(
                decoder: &mut $crate::codec::BorshDecoder<'_>,
            ) -> $crate::codec::CodecResult<Self> {
                let bytes = decoder.read_exact(
                    <$ty as $crate::codec::CustomDecode>::ENCODED_LEN,
                )?;
                <$ty as $crate::codec::CustomDecode>::from_bytes(bytes)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::codec::{from_slice, to_vec, BorshEncode, CodecError, ValueKind};

    #[derive(Debug, PartialEq)]
    struct Header {
        version: u8,
        name: String,
        flags: Vec<u16>,
    }
    crate::impl_borsh_record!(Header { version, name, flags });

    #[derive(Debug, PartialEq, Clone, Copy)]
    enum Color {
        Red,
        Green,
        Blue,
    }
    crate::impl_borsh_enum!(Color { 0 => Red, 1 => Green, 2 => Blue });

    #[derive(Debug, PartialEq)]
    enum Shape {
        Empty,
        Circle(u32),
        Rect { w: u16, h: u16 },
        Tagged { color: Color, header: Header },
    }
    crate::impl_borsh_variant!(Shape {
        0 => Empty,
        1 => Circle(radius),
        2 => Rect { w, h },
        3 => Tagged { color, header },
    });

    #[test]
    fn record_fields_in_order() {
        let header = Header {
            version: 3,
            name: "ab".into(),
            flags: vec![1],
        };
        let bytes = to_vec(&header).unwrap();
        assert_eq!(bytes, vec![3, 2, 0, 0, 0, b'a', b'b', 1, 0, 0, 0, 1, 0]);
        assert_eq!(from_slice::<Header>(&bytes).unwrap(), header);
        assert_eq!(<Header as BorshEncode>::KIND, ValueKind::Record);
    }

    #[test]
    fn enum_is_one_byte() {
        assert_eq!(to_vec(&Color::Blue).unwrap(), vec![2]);
        assert_eq!(from_slice::<Color>(&[1]).unwrap(), Color::Green);
        assert_eq!(
            from_slice::<Color>(&[7]),
            Err(CodecError::InvalidDiscriminant {
                type_name: "Color",
                value: 7
            })
        );
    }

    #[test]
    fn variant_index_then_payload() {
        assert_eq!(to_vec(&Shape::Empty).unwrap(), vec![0]);
        assert_eq!(to_vec(&Shape::Circle(5)).unwrap(), vec![1, 5, 0, 0, 0]);
        assert_eq!(
            to_vec(&Shape::Rect { w: 1, h: 2 }).unwrap(),
            vec![2, 1, 0, 2, 0]
        );

        let tagged = Shape::Tagged {
            color: Color::Red,
            header: Header {
                version: 1,
                name: String::new(),
                flags: vec![],
            },
        };
        let bytes = to_vec(&tagged).unwrap();
        assert_eq!(bytes[0], 3);
        assert_eq!(from_slice::<Shape>(&bytes).unwrap(), tagged);
    }

    #[test]
    fn variant_rejects_unknown_index() {
        assert!(matches!(
            from_slice::<Shape>(&[9]),
            Err(CodecError::InvalidDiscriminant {
                type_name: "Shape",
                value: 9
            })
        ));
    }
}
