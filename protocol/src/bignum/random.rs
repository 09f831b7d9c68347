//! Random [`BigInteger`] generation.
//!
//! These helpers are for tests, fixtures and nonces that only need to look
//! random. They are not a substitute for a key-generation RNG.

use rand::Rng;

use super::{BigIntError, BigIntResult, BigInteger};

impl BigInteger {
    /// Returns a random value with exactly `length` decimal digits.
    ///
    /// # Errors
    ///
    /// [`BigIntError::InvalidArgument`] if `length` is zero.
    pub fn random_with_digits(length: usize) -> BigIntResult<Self> {
        Self::random_with_digits_from(&mut rand::thread_rng(), length)
    }

    /// Like [`Self::random_with_digits`] with a caller-supplied RNG.
    ///
    /// Digits come from concatenating the decimal text of random `u32`
    /// draws until `length` characters are available, then truncating.
    pub fn random_with_digits_from<R: Rng + ?Sized>(rng: &mut R, length: usize) -> BigIntResult<Self> {
        if length == 0 {
            return Err(BigIntError::InvalidArgument(
                "random digit count must be at least 1".into(),
            ));
        }
        let mut text = String::with_capacity(length + 10);
        while text.len() < length {
            let draw: u32 = rng.gen();
            // A leading zero draw would shorten the number.
            if text.is_empty() && draw == 0 {
                continue;
            }
            text.push_str(&draw.to_string());
        }
        text.truncate(length);
        Self::parse(&text)
    }

    /// Returns a random value in `[min, max)`.
    ///
    /// Computed as `min + random(len(max - min) + 1 digits) % (max - min)`.
    ///
    /// # Errors
    ///
    /// [`BigIntError::InvalidArgument`] unless `0 <= min < max`.
    pub fn random_in_range(min: &Self, max: &Self) -> BigIntResult<Self> {
        Self::random_in_range_from(&mut rand::thread_rng(), min, max)
    }

    /// Like [`Self::random_in_range`] with a caller-supplied RNG.
    pub fn random_in_range_from<R: Rng + ?Sized>(
        rng: &mut R,
        min: &Self,
        max: &Self,
    ) -> BigIntResult<Self> {
        if min >= max {
            return Err(BigIntError::InvalidArgument(format!(
                "lower bound {min} must be below upper bound {max}"
            )));
        }
        if min.is_negative() || max.is_negative() {
            return Err(BigIntError::InvalidArgument(
                "random range bounds must be non-negative".into(),
            ));
        }
        let span = max - min;
        let wide = Self::random_with_digits_from(rng, span.length() + 1)?;
        Ok(min + &wide.checked_rem(&span)?)
    }
}
