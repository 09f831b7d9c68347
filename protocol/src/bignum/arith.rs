//! Arithmetic on [`BigInteger`].
//!
//! Addition, subtraction and multiplication are total and exposed through
//! the `std::ops` traits. Division can fail, so the primary entry points are
//! [`BigInteger::div_rem`], [`BigInteger::checked_div`] and
//! [`BigInteger::checked_rem`]; the `/` and `%` operators exist for
//! convenience and panic on a zero divisor, like the primitive integers do.
//!
//! ## Division sign rule
//!
//! The quotient is the truncated magnitude quotient `|a| / |b|` carrying the
//! XOR of the operand signs. The remainder is always non-negative
//! (`|a| mod |b|`). So `-7 / 2 == -3` and `-7 % 2 == 1`.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Rem, Sub, SubAssign};

use super::{digits, BigIntError, BigIntResult, BigInteger};
use crate::config::{DIV_FAST_PATH_DIGITS, MUL_FAST_PATH_DIGITS};

impl BigInteger {
    fn add_ref(&self, other: &Self) -> Self {
        if self.positive == other.positive {
            return Self::from_magnitude(self.positive, digits::add(&self.digits, &other.digits));
        }
        // Opposite signs: subtract the smaller magnitude from the larger one
        // and keep the sign of the larger.
        match digits::cmp_magnitude(&self.digits, &other.digits) {
            Ordering::Equal => Self::zero(),
            Ordering::Greater => {
                Self::from_magnitude(self.positive, digits::sub(&self.digits, &other.digits))
            }
            Ordering::Less => {
                Self::from_magnitude(other.positive, digits::sub(&other.digits, &self.digits))
            }
        }
    }

    fn sub_ref(&self, other: &Self) -> Self {
        self.add_ref(&-other)
    }

    fn mul_ref(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        if self.is_one() {
            return other.clone();
        }
        if other.is_one() {
            return self.clone();
        }
        let magnitude = multiply_magnitudes(&self.digits, &other.digits, MUL_FAST_PATH_DIGITS);
        Self::from_magnitude(self.positive == other.positive, magnitude)
    }

    /// Divides, returning `(quotient, remainder)`.
    ///
    /// # Errors
    ///
    /// [`BigIntError::DivisionByZero`] if `divisor` is zero.
    pub fn div_rem(&self, divisor: &Self) -> BigIntResult<(Self, Self)> {
        if divisor.is_zero() {
            return Err(BigIntError::DivisionByZero);
        }
        let (quotient, remainder) = divide_magnitudes(&self.digits, &divisor.digits);
        Ok((
            Self::from_magnitude(self.positive == divisor.positive, quotient),
            Self::from_magnitude(true, remainder),
        ))
    }

    /// Truncated quotient. See the module docs for the sign rule.
    pub fn checked_div(&self, divisor: &Self) -> BigIntResult<Self> {
        self.div_rem(divisor).map(|(quotient, _)| quotient)
    }

    /// Non-negative remainder.
    pub fn checked_rem(&self, divisor: &Self) -> BigIntResult<Self> {
        self.div_rem(divisor).map(|(_, remainder)| remainder)
    }

    /// Raises `self` to `exponent` by repeated squaring.
    ///
    /// # Errors
    ///
    /// [`BigIntError::InvalidArgument`] for `0^0` and for a negative exponent.
    pub fn pow(&self, exponent: &Self) -> BigIntResult<Self> {
        check_exponent(self, exponent)?;
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let mut result = Self::one();
        let mut base = self.clone();
        let mut remaining = exponent.digits.clone();
        while !digits::is_zero(&remaining) {
            let (half, bit) = digits::divmod_small(&remaining, 2);
            if bit == 1 {
                result = &result * &base;
            }
            remaining = half;
            if !digits::is_zero(&remaining) {
                base = &base * &base;
            }
        }
        Ok(result)
    }

    /// Computes `self^exponent mod modulus` with square-and-multiply.
    ///
    /// The result always equals `self.pow(exponent) % modulus` under the
    /// non-negative remainder rule, without materialising the full power.
    ///
    /// # Errors
    ///
    /// [`BigIntError::DivisionByZero`] for a zero modulus,
    /// [`BigIntError::InvalidArgument`] for `0^0` or a negative exponent.
    pub fn mod_pow(&self, exponent: &Self, modulus: &Self) -> BigIntResult<Self> {
        if modulus.is_zero() {
            return Err(BigIntError::DivisionByZero);
        }
        check_exponent(self, exponent)?;
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let mut result = Self::one().checked_rem(modulus)?;
        let mut base = self.checked_rem(modulus)?;
        let mut remaining = exponent.digits.clone();
        while !digits::is_zero(&remaining) {
            let (half, bit) = digits::divmod_small(&remaining, 2);
            if bit == 1 {
                result = (&result * &base).checked_rem(modulus)?;
            }
            remaining = half;
            if !digits::is_zero(&remaining) {
                base = (&base * &base).checked_rem(modulus)?;
            }
        }
        Ok(result)
    }
}

fn check_exponent(base: &BigInteger, exponent: &BigInteger) -> BigIntResult<()> {
    if base.is_zero() && exponent.is_zero() {
        return Err(BigIntError::InvalidArgument(
            "zero to the power of zero is undefined".into(),
        ));
    }
    if exponent.is_negative() {
        return Err(BigIntError::InvalidArgument(
            "exponent cannot be negative".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Magnitude kernels
// ---------------------------------------------------------------------------

/// Multiplies two magnitudes. Operands with fewer than `threshold` digits
/// each are multiplied natively; anything larger goes through Karatsuba.
///
/// `threshold` must not exceed 20 so that the native product fits a `u128`.
pub(super) fn multiply_magnitudes(a: &[u8], b: &[u8], threshold: usize) -> Vec<u8> {
    debug_assert!(threshold <= 20);
    if digits::is_zero(a) || digits::is_zero(b) {
        return vec![0];
    }
    let native = a.len() < threshold && b.len() < threshold;
    if native || a.len().max(b.len()) == 1 {
        let product = u128::from(digits::to_u64(a)) * u128::from(digits::to_u64(b));
        return digits::from_u128(product);
    }
    karatsuba(a, b, threshold)
}

fn karatsuba(a: &[u8], b: &[u8], threshold: usize) -> Vec<u8> {
    let split = a.len().max(b.len()) / 2;
    let (a_low, a_high) = digits::split(a, split);
    let (b_low, b_high) = digits::split(b, split);

    let z0 = multiply_magnitudes(&a_low, &b_low, threshold);
    let z2 = multiply_magnitudes(&a_high, &b_high, threshold);
    let cross = multiply_magnitudes(
        &digits::add(&a_low, &a_high),
        &digits::add(&b_low, &b_high),
        threshold,
    );
    let z1 = digits::sub(&digits::sub(&cross, &z0), &z2);

    let upper = digits::add(
        &digits::shift_left(&z2, 2 * split),
        &digits::shift_left(&z1, split),
    );
    digits::add(&upper, &z0)
}

fn divide_magnitudes(dividend: &[u8], divisor: &[u8]) -> (Vec<u8>, Vec<u8>) {
    match digits::cmp_magnitude(dividend, divisor) {
        Ordering::Less => return (vec![0], dividend.to_vec()),
        Ordering::Equal => return (vec![1], vec![0]),
        Ordering::Greater => {}
    }
    if dividend.len() < DIV_FAST_PATH_DIGITS && divisor.len() < DIV_FAST_PATH_DIGITS {
        let (a, b) = (digits::to_u64(dividend), digits::to_u64(divisor));
        return (
            digits::from_u128(u128::from(a / b)),
            digits::from_u128(u128::from(a % b)),
        );
    }
    long_division(dividend, divisor)
}

/// Decimal long division: at each position, subtract `divisor * 10^position`
/// while it still fits and count the subtractions.
pub(super) fn long_division(dividend: &[u8], divisor: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let span = dividend.len().saturating_sub(divisor.len());
    let mut quotient = vec![0u8; span + 1];
    let mut remainder = dividend.to_vec();
    for position in (0..=span).rev() {
        let shifted = digits::shift_left(divisor, position);
        while digits::cmp_magnitude(&remainder, &shifted) != Ordering::Less {
            remainder = digits::sub(&remainder, &shifted);
            quotient[position] += 1;
        }
    }
    digits::trim(&mut quotient);
    (quotient, remainder)
}

// ---------------------------------------------------------------------------
// Operator traits
// ---------------------------------------------------------------------------

impl Neg for &BigInteger {
    type Output = BigInteger;

    fn neg(self) -> BigInteger {
        BigInteger::from_magnitude(!self.positive, self.digits.clone())
    }
}

impl Neg for BigInteger {
    type Output = BigInteger;

    fn neg(self) -> BigInteger {
        -&self
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $inner:ident) => {
        impl $trait<&BigInteger> for &BigInteger {
            type Output = BigInteger;

            fn $method(self, rhs: &BigInteger) -> BigInteger {
                self.$inner(rhs)
            }
        }

        impl $trait<BigInteger> for BigInteger {
            type Output = BigInteger;

            fn $method(self, rhs: BigInteger) -> BigInteger {
                self.$inner(&rhs)
            }
        }

        impl $trait<&BigInteger> for BigInteger {
            type Output = BigInteger;

            fn $method(self, rhs: &BigInteger) -> BigInteger {
                self.$inner(rhs)
            }
        }

        impl $trait<BigInteger> for &BigInteger {
            type Output = BigInteger;

            fn $method(self, rhs: BigInteger) -> BigInteger {
                self.$inner(&rhs)
            }
        }
    };
}

forward_binop!(Add, add, add_ref);
forward_binop!(Sub, sub, sub_ref);
forward_binop!(Mul, mul, mul_ref);
forward_binop!(Div, div, div_or_panic);
forward_binop!(Rem, rem, rem_or_panic);

impl BigInteger {
    /// # Panics
    ///
    /// Panics if `divisor` is zero.
    fn div_or_panic(&self, divisor: &Self) -> Self {
        match self.checked_div(divisor) {
            Ok(quotient) => quotient,
            Err(err) => panic!("BigInteger division failed: {err}"),
        }
    }

    /// # Panics
    ///
    /// Panics if `divisor` is zero.
    fn rem_or_panic(&self, divisor: &Self) -> Self {
        match self.checked_rem(divisor) {
            Ok(remainder) => remainder,
            Err(err) => panic!("BigInteger remainder failed: {err}"),
        }
    }
}

impl AddAssign<&BigInteger> for BigInteger {
    fn add_assign(&mut self, rhs: &BigInteger) {
        *self = self.add_ref(rhs);
    }
}

impl SubAssign<&BigInteger> for BigInteger {
    fn sub_assign(&mut self, rhs: &BigInteger) {
        *self = self.sub_ref(rhs);
    }
}

impl MulAssign<&BigInteger> for BigInteger {
    fn mul_assign(&mut self, rhs: &BigInteger) {
        *self = self.mul_ref(rhs);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
