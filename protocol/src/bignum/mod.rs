//! # Arbitrary-Precision Decimal Integers
//!
//! [`BigInteger`] is an unbounded signed integer stored as a vector of
//! decimal digits, least significant first. It exists because on-chain
//! balances are 128-bit yocto amounts, and parsing, scaling and checking
//! them has to be exact: a single wrong digit changes the signed payload.
//!
//! ## Representation
//!
//! ```text
//! "-321"  ->  BigInteger { positive: false, digits: [1, 2, 3] }
//! "0"     ->  BigInteger { positive: true,  digits: [0] }
//! ```
//!
//! Invariants, upheld by every constructor and every operation:
//!
//! - no high-order zero digits, except the single `[0]` for zero;
//! - zero is always positive (there is no `-0`);
//! - every digit is in `0..=9`.
//!
//! Values are immutable. Every operation returns a new `BigInteger`.
//!
//! ## Layout
//!
//! ```text
//! digits.rs   : magnitude helpers (carry/borrow, shifts, small division)
//! arith.rs    : +, -, * (native fast path + Karatsuba), division, pow, mod_pow
//! convert.rs  : decimal/binary/native/byte conversions, serde
//! random.rs   : random values by digit count or range
//! encoding.rs : registration with the Borsh codec as a custom-encodable type
//! ```

mod arith;
mod convert;
mod digits;
mod encoding;
mod error;
mod random;

use std::cmp::Ordering;
use std::fmt;

pub use error::BigIntError;

/// Result alias for big integer operations.
pub type BigIntResult<T> = Result<T, BigIntError>;

/// An arbitrary-precision signed decimal integer.
///
/// # Examples
///
/// ```
/// use ntb_protocol::bignum::BigInteger;
///
/// let a: BigInteger = "123".parse().unwrap();
/// let b: BigInteger = "877".parse().unwrap();
/// assert_eq!((&a + &b).to_string(), "1000");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInteger {
    /// Sign flag. Always `true` for zero.
    positive: bool,
    /// Magnitude, least significant digit first.
    digits: Vec<u8>,
}

impl BigInteger {
    /// The value zero.
    pub fn zero() -> Self {
        Self {
            positive: true,
            digits: vec![0],
        }
    }

    /// The value one.
    pub fn one() -> Self {
        Self {
            positive: true,
            digits: vec![1],
        }
    }

    /// Builds a value from digits ordered least significant first.
    ///
    /// Leading (high-order) zeros are dropped and an empty vector is zero.
    ///
    /// # Errors
    ///
    /// [`BigIntError::DigitOutOfRange`] if any element is above 9.
    pub fn from_digits_low_first(digits: Vec<u8>, positive: bool) -> BigIntResult<Self> {
        if let Some(&bad) = digits.iter().find(|&&d| d > 9) {
            return Err(BigIntError::DigitOutOfRange(bad));
        }
        Ok(Self::from_magnitude(positive, digits))
    }

    /// Builds a value from digits ordered most significant first, the way
    /// they are written.
    pub fn from_digits_high_first(mut digits: Vec<u8>, positive: bool) -> BigIntResult<Self> {
        digits.reverse();
        Self::from_digits_low_first(digits, positive)
    }

    /// Internal constructor for magnitudes already known to hold valid
    /// digits. Restores the trimming and no-negative-zero invariants.
    pub(crate) fn from_magnitude(positive: bool, mut digits: Vec<u8>) -> Self {
        digits::trim(&mut digits);
        let positive = positive || digits::is_zero(&digits);
        Self { positive, digits }
    }

    /// Number of decimal digits in the magnitude. Zero has length 1.
    pub fn length(&self) -> usize {
        self.digits.len()
    }

    /// Digits of the magnitude, least significant first.
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn is_zero(&self) -> bool {
        self.digits == [0]
    }

    /// `true` only for `+1`.
    pub fn is_one(&self) -> bool {
        self.positive && self.digits == [1]
    }

    /// `true` for zero and every value above it.
    pub fn is_positive(&self) -> bool {
        self.positive
    }

    pub fn is_negative(&self) -> bool {
        !self.positive
    }

    pub fn is_odd(&self) -> bool {
        self.digits[0] & 1 == 1
    }

    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// `true` when the magnitude has fewer than 19 digits, so the value
    /// converts to `i64` without overflow.
    pub fn fits_in_i64(&self) -> bool {
        self.length() < crate::config::DIV_FAST_PATH_DIGITS
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Self {
            positive: true,
            digits: self.digits.clone(),
        }
    }

    /// Returns `self + 1`.
    pub fn increment(&self) -> Self {
        self + &Self::one()
    }

    /// Returns `self - 1`.
    pub fn decrement(&self) -> Self {
        self - &Self::one()
    }
}

impl Default for BigInteger {
    fn default() -> Self {
        Self::zero()
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

impl Ord for BigInteger {
    /// Sign first, then digit count, then digits from the top. For two
    /// negative values the magnitude comparison is reversed.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.positive, other.positive) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (true, true) => digits::cmp_magnitude(&self.digits, &other.digits),
            (false, false) => digits::cmp_magnitude(&other.digits, &self.digits),
        }
    }
}

impl PartialOrd for BigInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self
            .digits
            .iter()
            .rev()
            .map(|&d| char::from(b'0' + d))
            .collect();
        f.pad_integral(self.positive, "", &text)
    }
}

impl fmt::Debug for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInteger({})", self)
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
    fn digit_vector_constructors() {
        let low = BigInteger::from_digits_low_first(vec![3, 2, 1, 0, 0], true).unwrap();
        let high = BigInteger::from_digits_high_first(vec![0, 0, 1, 2, 3], true).unwrap();
        assert_eq!(low, big("123"));
        assert_eq!(high, big("123"));

        assert_eq!(
            BigInteger::from_digits_low_first(vec![], true).unwrap(),
            BigInteger::zero()
        );
    }

    #[test]
    fn digit_vector_rejects_out_of_range() {
        assert_eq!(
            BigInteger::from_digits_low_first(vec![1, 12], true),
            Err(BigIntError::DigitOutOfRange(12))
        );
    }

    #[test]
    fn no_negative_zero() {
        let z = BigInteger::from_digits_low_first(vec![0, 0], false).unwrap();
        assert!(z.is_positive());
        assert_eq!(z, BigInteger::zero());
        assert_eq!(big("-0"), BigInteger::zero());
        assert_eq!(big("-000").to_string(), "0");
    }

    #[test]
    fn predicates() {
        assert!(big("0").is_zero());
        assert!(big("1").is_one());
        assert!(!big("-1").is_one());
        assert!(big("-7").is_odd());
        assert!(big("1234").is_even());
        assert!(big("-5").is_negative());
        assert_eq!(big("-12345").length(), 5);
        assert!(big("999999999999999999").fits_in_i64());
        assert!(!big("1000000000000000000000").fits_in_i64());
    }

    #[test]
    fn ordering_compares_sign_then_length_then_digits() {
        assert!(big("-1") < big("0"));
        assert!(big("99") < big("100"));
        assert!(big("-100") < big("-99"));
        assert!(big("123") < big("124"));
        assert!(big("-124") < big("-123"));
        assert_eq!(big("42").cmp(&big("+42")), Ordering::Equal);

        let mut values = vec![big("10"), big("-3"), big("0"), big("-30"), big("7")];
        values.sort();
        let sorted: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        assert_eq!(sorted, vec!["-30", "-3", "0", "7", "10"]);
    }

    #[test]
    fn display_and_debug() {
        assert_eq!(big("-00450").to_string(), "-450");
        assert_eq!(format!("{:?}", big("17")), "BigInteger(17)");
        assert_eq!(format!("{:>5}", big("42")), "   42");
    }

    #[test]
    fn abs_increment_decrement() {
        assert_eq!(big("-9").abs(), big("9"));
        assert_eq!(big("999").increment(), big("1000"));
        assert_eq!(big("0").decrement(), big("-1"));
        assert_eq!(big("-1").increment(), BigInteger::zero());
    }
}
