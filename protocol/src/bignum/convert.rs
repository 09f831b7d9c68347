//! Conversions between [`BigInteger`] and text, native integers and bytes.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{digits, BigIntError, BigIntResult, BigInteger};

impl BigInteger {
    /// Parses a decimal string with an optional leading `+` or `-`.
    ///
    /// The empty string is zero. Leading zeros are accepted and dropped.
    ///
    /// # Errors
    ///
    /// - [`BigIntError::InvalidDigit`] for any character that is not `0`-`9`
    ///   (other than the leading sign).
    /// - [`BigIntError::InvalidArgument`] for a sign with no digits after it
    ///   (`"-"`, `"+"`). No character is out of range, so this is not an
    ///   `InvalidDigit`, and unlike the empty string it is not read as zero:
    ///   a sign announces digits that never arrived.
    pub fn parse(text: &str) -> BigIntResult<Self> {
        if text.is_empty() {
            return Ok(Self::zero());
        }
        let (positive, body) = match text.as_bytes()[0] {
            b'-' => (false, &text[1..]),
            b'+' => (true, &text[1..]),
            _ => (true, text),
        };
        if body.is_empty() {
            return Err(BigIntError::InvalidArgument(format!(
                "sign without digits: {text:?}"
            )));
        }
        let mut magnitude = Vec::with_capacity(body.len());
        for c in body.chars().rev() {
            match c {
                '0'..='9' => magnitude.push(c as u8 - b'0'),
                _ => return Err(BigIntError::InvalidDigit(c)),
            }
        }
        Ok(Self::from_magnitude(positive, magnitude))
    }

    /// Builds a value from a binary string, most significant bit first.
    ///
    /// With `signed`, the first character is a sign bit (`0` positive,
    /// anything else negative) and the rest is the magnitude. Characters are
    /// not validated: only `1` counts as a set bit, everything else reads as
    /// `0`. Validating the input is the caller's job.
    pub fn from_binary(bits: &str, signed: bool) -> Self {
        let mut chars = bits.chars();
        let positive = if signed {
            chars.next().map_or(true, |c| c == '0')
        } else {
            true
        };
        let mut magnitude = vec![0u8];
        for c in chars {
            digits::mul_small_add(&mut magnitude, 2, u32::from(c == '1'));
        }
        Self::from_magnitude(positive, magnitude)
    }

    /// Minimal signed binary form: a sign bit followed by the magnitude bits.
    ///
    /// Zero is `"0"`, five is `"0101"`, minus five is `"1101"`.
    pub fn to_binary(&self) -> String {
        let mut bits = Vec::new();
        let mut remaining = self.digits.clone();
        while !digits::is_zero(&remaining) {
            let (half, bit) = digits::divmod_small(&remaining, 2);
            bits.push(if bit == 1 { '1' } else { '0' });
            remaining = half;
        }
        bits.push(if self.positive { '0' } else { '1' });
        bits.iter().rev().collect()
    }

    /// Converts to `i64`.
    ///
    /// # Errors
    ///
    /// [`BigIntError::Overflow`] if the value is outside the `i64` range.
    pub fn to_i64(&self) -> BigIntResult<i64> {
        let overflow = || BigIntError::Overflow {
            digits: self.length(),
            target: "i64".into(),
        };
        let mut value: i64 = 0;
        for &d in self.digits.iter().rev() {
            let d = i64::from(d);
            value = value
                .checked_mul(10)
                .and_then(|v| {
                    if self.positive {
                        v.checked_add(d)
                    } else {
                        v.checked_sub(d)
                    }
                })
                .ok_or_else(overflow)?;
        }
        Ok(value)
    }

    /// Multiplies by `10^times` by inserting low-order zero digits.
    pub fn times10(&self, times: usize) -> Self {
        Self::from_magnitude(self.positive, digits::shift_left(&self.digits, times))
    }

    /// Divides by `10^times` by dropping low-order digits (truncating).
    pub fn divide10(&self, times: usize) -> Self {
        if times >= self.length() {
            return Self::zero();
        }
        Self::from_magnitude(self.positive, self.digits[times..].to_vec())
    }

    /// Splits the magnitude into its low `position` digits and the remaining
    /// high digits, both returned as non-negative values. `position` is
    /// clamped to the digit count.
    ///
    /// ```
    /// use ntb_protocol::bignum::BigInteger;
    ///
    /// let (low, high) = BigInteger::from(123456u64).split_at(2);
    /// assert_eq!(low.to_string(), "56");
    /// assert_eq!(high.to_string(), "1234");
    /// ```
    pub fn split_at(&self, position: usize) -> (Self, Self) {
        let (low, high) = digits::split(&self.digits, position);
        (Self::from_magnitude(true, low), Self::from_magnitude(true, high))
    }

    /// Number of bytes needed to hold the magnitude as an unsigned integer.
    /// Zero needs one byte.
    pub fn byte_len(&self) -> usize {
        let mut count = 0;
        let mut remaining = self.digits.clone();
        loop {
            let (quotient, _) = digits::divmod_small(&remaining, 256);
            count += 1;
            if digits::is_zero(&quotient) {
                return count;
            }
            remaining = quotient;
        }
    }

    /// Fixed-width little-endian unsigned byte form.
    ///
    /// # Errors
    ///
    /// - [`BigIntError::InvalidArgument`] for negative values.
    /// - [`BigIntError::Overflow`] if the magnitude needs more than `width`
    ///   bytes.
    pub fn to_le_bytes(&self, width: usize) -> BigIntResult<Vec<u8>> {
        if self.is_negative() {
            return Err(BigIntError::InvalidArgument(format!(
                "negative value {self} has no unsigned byte form"
            )));
        }
        let mut bytes = Vec::with_capacity(width);
        let mut remaining = self.digits.clone();
        for _ in 0..width {
            let (quotient, byte) = digits::divmod_small(&remaining, 256);
            bytes.push(byte as u8);
            remaining = quotient;
        }
        if !digits::is_zero(&remaining) {
            return Err(BigIntError::Overflow {
                digits: self.length(),
                target: format!("u{}", width * 8),
            });
        }
        Ok(bytes)
    }

    /// Minimal little-endian unsigned byte form (see [`Self::byte_len`]).
    pub fn to_le_bytes_minimal(&self) -> BigIntResult<Vec<u8>> {
        self.to_le_bytes(self.byte_len())
    }

    /// Reads an unsigned little-endian byte string of any length.
    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        let mut magnitude = vec![0u8];
        for &byte in bytes.iter().rev() {
            digits::mul_small_add(&mut magnitude, 256, u32::from(byte));
        }
        Self::from_magnitude(true, magnitude)
    }
}

impl FromStr for BigInteger {
    type Err = BigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for BigInteger {
            fn from(value: $t) -> Self {
                Self::from_magnitude(true, digits::from_u128(value as u128))
            }
        }
    )*};
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for BigInteger {
            fn from(value: $t) -> Self {
                Self::from_magnitude(value >= 0, digits::from_u128(value.unsigned_abs() as u128))
            }
        }
    )*};
}

from_unsigned!(u8, u16, u32, u64, u128, usize);
from_signed!(i8, i16, i32, i64, i128, isize);

impl TryFrom<&BigInteger> for i64 {
    type Error = BigIntError;

    fn try_from(value: &BigInteger) -> Result<Self, Self::Error> {
        value.to_i64()
    }
}

// ---------------------------------------------------------------------------
// Serde: decimal strings, the form JSON RPC uses for balances
// ---------------------------------------------------------------------------

impl Serialize for BigInteger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct BigIntegerVisitor;

impl<'de> Visitor<'de> for BigIntegerVisitor {
    type Value = BigInteger;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal integer string or an integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        BigInteger::parse(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(BigInteger::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(BigInteger::from(v))
    }
}

impl<'de> Deserialize<'de> for BigInteger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BigIntegerVisitor)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn big(s: &str) -> BigInteger {
        s.parse().unwrap()
    }

    #[test]
    fn parse_normalizes() {
        assert_eq!(big("").to_string(), "0");
        assert_eq!(big("+0042").to_string(), "42");
        assert_eq!(big("-0042").to_string(), "-42");
        assert_eq!(big("+0").to_string(), "0");
        assert_eq!(
            big("123456789012345678901234567890").to_string(),
            "123456789012345678901234567890"
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(BigInteger::parse("12a4"), Err(BigIntError::InvalidDigit('a')));
        assert_eq!(BigInteger::parse("1 000"), Err(BigIntError::InvalidDigit(' ')));
        assert_eq!(BigInteger::parse("--1"), Err(BigIntError::InvalidDigit('-')));
        assert_eq!(BigInteger::parse("1.5"), Err(BigIntError::InvalidDigit('.')));
        assert_eq!(BigInteger::parse("٣"), Err(BigIntError::InvalidDigit('٣')));
        for lone_sign in ["-", "+"] {
            assert!(matches!(
                BigInteger::parse(lone_sign),
                Err(BigIntError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn native_conversions() {
        assert_eq!(BigInteger::from(-9_876_543_210i64).to_string(), "-9876543210");
        assert_eq!(BigInteger::from(u128::MAX).to_string(), u128::MAX.to_string());
        assert_eq!(BigInteger::from(i64::MIN).to_string(), i64::MIN.to_string());
        assert_eq!(BigInteger::from(0u8), BigInteger::zero());
    }

    #[test]
    fn to_i64_bounds() {
        assert_eq!(big("9223372036854775807").to_i64(), Ok(i64::MAX));
        assert_eq!(big("-9223372036854775808").to_i64(), Ok(i64::MIN));
        assert!(matches!(
            big("9223372036854775808").to_i64(),
            Err(BigIntError::Overflow { digits: 19, .. })
        ));
        assert_eq!(i64::try_from(&big("-17")), Ok(-17));
    }

    #[test]
    fn binary_round_trip() {
        assert_eq!(big("0").to_binary(), "0");
        assert_eq!(big("5").to_binary(), "0101");
        assert_eq!(big("-5").to_binary(), "1101");
        assert_eq!(BigInteger::from_binary("0101", true), big("5"));
        assert_eq!(BigInteger::from_binary("1101", true), big("-5"));
        assert_eq!(BigInteger::from_binary("101", false), big("5"));
        assert_eq!(BigInteger::from_binary("", true), BigInteger::zero());

        let big_value = big("340282366920938463463374607431768211455");
        assert_eq!(BigInteger::from_binary(&big_value.to_binary(), true), big_value);
    }

    #[test]
    fn binary_does_not_validate_characters() {
        // Non-binary characters read as zero bits.
        assert_eq!(BigInteger::from_binary("01x1", true), big("5"));
    }

    #[test]
    fn decimal_shifts() {
        assert_eq!(big("-12").times10(3), big("-12000"));
        assert_eq!(big("0").times10(5), BigInteger::zero());
        assert_eq!(big("12345").divide10(2), big("123"));
        assert_eq!(big("-12345").divide10(5), BigInteger::zero());
        assert_eq!(big("-12345").divide10(4), big("-1"));
    }

    #[test]
    fn split_at_low_and_high() {
        let (low, high) = big("-1200034").split_at(3);
        assert_eq!(low, big("34"));
        assert_eq!(high, big("1200"));

        let (low, high) = big("987").split_at(0);
        assert_eq!(low, BigInteger::zero());
        assert_eq!(high, big("987"));
    }

    #[test]
    fn le_bytes() {
        assert_eq!(big("1000").to_le_bytes(4).unwrap(), vec![0xe8, 0x03, 0, 0]);
        assert_eq!(big("0").to_le_bytes(2).unwrap(), vec![0, 0]);
        assert_eq!(
            BigInteger::from(u128::MAX).to_le_bytes(16).unwrap(),
            vec![0xff; 16]
        );
        assert!(matches!(
            big("65536").to_le_bytes(2),
            Err(BigIntError::Overflow { .. })
        ));
        assert!(matches!(
            big("-1").to_le_bytes(16),
            Err(BigIntError::InvalidArgument(_))
        ));
        assert_eq!(BigInteger::from_le_bytes(&[0xe8, 0x03, 0, 0]), big("1000"));
        assert_eq!(BigInteger::from_le_bytes(&[]), BigInteger::zero());
    }

    #[test]
    fn minimal_byte_form() {
        assert_eq!(big("0").byte_len(), 1);
        assert_eq!(big("255").byte_len(), 1);
        assert_eq!(big("256").byte_len(), 2);
        assert_eq!(big("65536").to_le_bytes_minimal().unwrap(), vec![0, 0, 1]);
    }

    #[test]
    fn serde_uses_decimal_strings() {
        let value = big("-1000000000000000000000000");
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"-1000000000000000000000000\"");
        let back: BigInteger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);

        let from_number: BigInteger = serde_json::from_str("42").unwrap();
        assert_eq!(from_number, big("42"));
        assert!(serde_json::from_str::<BigInteger>("\"4x\"").is_err());
    }
}
