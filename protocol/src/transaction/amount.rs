//! NEAR amounts: human text in, exact yoctoNEAR out.
//!
//! Amounts are never floats. A user-typed `"1.5"` is turned into the integer
//! `1500000000000000000000000` by string manipulation alone, then parsed into
//! a [`BigInteger`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{TransactionError, TransactionResult};
use crate::bignum::BigInteger;
use crate::codec::{BorshDecode, BorshDecoder, BorshEncode, BorshEncoder, CodecResult, ValueKind};
use crate::config::NEAR_NOMINATION_EXP;

/// Strips `,` thousands separators and surrounding whitespace.
pub fn cleanup_amount(amount: &str) -> String {
    amount.replace(',', "").trim().to_string()
}

/// Converts a decimal NEAR amount to a yoctoNEAR digit string.
///
/// Returns `Ok(None)` for empty input. The fractional part is right-padded
/// to 24 digits and leading zeros of the result are dropped (`"0.5"` becomes
/// `"500000000000000000000000"`, `"0"` stays `"0"`).
///
/// # Errors
///
/// [`TransactionError::InvalidAmount`] for more than one `.`, more than 24
/// fractional digits, or any character that is not a decimal digit.
pub fn parse_near_amount(amount: &str) -> TransactionResult<Option<String>> {
    if amount.is_empty() {
        return Ok(None);
    }
    let cleaned = cleanup_amount(amount);
    let invalid = || TransactionError::InvalidAmount(format!("cannot parse {cleaned:?} as NEAR amount"));

    let mut parts = cleaned.split('.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();
    if parts.next().is_some() || fraction.len() > NEAR_NOMINATION_EXP {
        return Err(invalid());
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let digits = format!("{whole}{fraction:0<width$}", width = NEAR_NOMINATION_EXP);
    let trimmed = digits.trim_start_matches('0');
    Ok(Some(if trimmed.is_empty() { "0" } else { trimmed }.to_string()))
}

/// A non-negative amount of NEAR, held in yoctoNEAR.
///
/// Encodes on the wire exactly like its [`BigInteger`] (a `u128`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "BigInteger", into = "BigInteger")]
pub struct NearAmount(BigInteger);

impl BorshEncode for NearAmount {
    const KIND: ValueKind = <BigInteger as BorshEncode>::KIND;

    fn encode(&self, encoder: &mut BorshEncoder) -> CodecResult<()> {
        self.0.encode(encoder)
    }
}

impl BorshDecode for NearAmount {
    fn decode(decoder: &mut BorshDecoder<'_>) -> CodecResult<Self> {
        Ok(Self(decoder.decode()?))
    }
}

impl NearAmount {
    /// Parses a decimal NEAR amount such as `"1,000.25"`.
    pub fn from_near(amount: &str) -> TransactionResult<Self> {
        let yocto = parse_near_amount(amount)?
            .ok_or_else(|| TransactionError::InvalidAmount("empty amount".into()))?;
        Ok(Self(yocto.parse()?))
    }

    /// Parses an integer yoctoNEAR amount.
    pub fn from_yocto(amount: &str) -> TransactionResult<Self> {
        let value: BigInteger = cleanup_amount(amount).parse()?;
        Self::try_from(value)
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn as_yocto(&self) -> &BigInteger {
        &self.0
    }

    pub fn into_yocto(self) -> BigInteger {
        self.0
    }

    /// Decimal NEAR text with trailing fractional zeros removed.
    pub fn to_near_string(&self) -> String {
        let (fraction, whole) = self.0.split_at(NEAR_NOMINATION_EXP);
        if fraction.is_zero() {
            return whole.to_string();
        }
        let fraction = format!("{:0>width$}", fraction.to_string(), width = NEAR_NOMINATION_EXP);
        format!("{whole}.{}", fraction.trim_end_matches('0'))
    }
}

impl From<u64> for NearAmount {
    /// Whole NEAR.
    fn from(near: u64) -> Self {
        Self(BigInteger::from(near).times10(NEAR_NOMINATION_EXP))
    }
}

impl TryFrom<BigInteger> for NearAmount {
    type Error = TransactionError;

    fn try_from(yocto: BigInteger) -> Result<Self, Self::Error> {
        if yocto.is_negative() {
            return Err(TransactionError::InvalidAmount(format!(
                "negative amount {yocto}"
            )));
        }
        Ok(Self(yocto))
    }
}

impl From<NearAmount> for BigInteger {
    fn from(amount: NearAmount) -> Self {
        amount.0
    }
}

impl fmt::Display for NearAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} NEAR", self.to_near_string())
    }
}
