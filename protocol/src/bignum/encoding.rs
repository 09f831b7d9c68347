//! Wire form of [`BigInteger`]: an unsigned 128-bit little-endian integer,
//! the width the ledger uses for balances.

use super::BigInteger;
use crate::codec::{CodecResult, CustomDecode, CustomEncode};
use crate::config::BALANCE_BYTE_WIDTH;

impl CustomEncode for BigInteger {
    /// # Errors
    ///
    /// Negative values and values of 2^128 or more cannot be represented.
    fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        Ok(self.to_le_bytes(BALANCE_BYTE_WIDTH)?)
    }
}

impl CustomDecode for BigInteger {
    const ENCODED_LEN: usize = BALANCE_BYTE_WIDTH;

    fn from_bytes(bytes: &[u8]) -> CodecResult<Self> {
        Ok(Self::from_le_bytes(bytes))
    }
}

crate::impl_borsh_custom!(BigInteger);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bignum::BigIntError;
    use crate::codec::{from_slice, to_vec, BorshEncode, CodecError, ValueKind};

    #[test]
    fn encodes_as_u128() {
        let one_near: BigInteger = "1000000000000000000000000".parse().unwrap();
        assert_eq!(
            to_vec(&one_near).unwrap(),
            to_vec(&1_000_000_000_000_000_000_000_000u128).unwrap()
        );
        assert_eq!(to_vec(&BigInteger::zero()).unwrap(), vec![0; 16]);
        assert_eq!(<BigInteger as BorshEncode>::KIND, ValueKind::Custom);
    }

    #[test]
    fn u128_max_is_the_ceiling() {
        let max = BigInteger::from(u128::MAX);
        assert_eq!(to_vec(&max).unwrap(), vec![0xff; 16]);

        let too_big = max.increment();
        assert!(matches!(
            to_vec(&too_big),
            Err(CodecError::BigInt(BigIntError::Overflow { .. }))
        ));
    }

    #[test]
    fn negative_values_are_rejected() {
        assert!(matches!(
            to_vec(&BigInteger::from(-1i64)),
            Err(CodecError::BigInt(BigIntError::InvalidArgument(_)))
        ));
    }

    #[test]
    fn decodes_back() {
        let value: BigInteger = "340282366920938463463374607431768211455".parse().unwrap();
        let bytes = to_vec(&value).unwrap();
        assert_eq!(from_slice::<BigInteger>(&bytes).unwrap(), value);
    }
}
