//! Magnitude helpers over little-endian decimal digit vectors.
//!
//! Every function here works on magnitudes only (no sign) and returns a
//! trimmed vector: no high-order zeros, and zero is `[0]`, never `[]`.
//! Carries and borrows are propagated iteratively so that long runs of
//! nines cannot blow the stack.

use std::cmp::Ordering;

/// Drops high-order zero digits, keeping a single `0` for zero.
pub(super) fn trim(digits: &mut Vec<u8>) {
    while digits.len() > 1 && digits.last() == Some(&0) {
        digits.pop();
    }
    if digits.is_empty() {
        digits.push(0);
    }
}

/// Returns a trimmed copy of `digits`.
pub(super) fn trimmed(digits: &[u8]) -> Vec<u8> {
    let mut out = digits.to_vec();
    trim(&mut out);
    out
}

pub(super) fn is_zero(digits: &[u8]) -> bool {
    digits.iter().all(|&d| d == 0)
}

/// Compares two trimmed magnitudes: digit count first, then digit by digit
/// from the most significant end.
pub(super) fn cmp_magnitude(a: &[u8], b: &[u8]) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

/// Schoolbook addition with an explicit carry accumulator.
pub(super) fn add(a: &[u8], b: &[u8]) -> Vec<u8> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = Vec::with_capacity(long.len() + 1);
    let mut carry = 0u8;
    for (i, &digit) in long.iter().enumerate() {
        let sum = digit + short.get(i).copied().unwrap_or(0) + carry;
        out.push(sum % 10);
        carry = sum / 10;
    }
    if carry > 0 {
        out.push(carry);
    }
    trim(&mut out);
    out
}

/// Schoolbook subtraction. `larger` must not be smaller than `smaller`.
pub(super) fn sub(larger: &[u8], smaller: &[u8]) -> Vec<u8> {
    debug_assert!(cmp_magnitude(larger, smaller) != Ordering::Less);
    let mut out = Vec::with_capacity(larger.len());
    let mut borrow = 0u8;
    for (i, &digit) in larger.iter().enumerate() {
        let subtrahend = smaller.get(i).copied().unwrap_or(0) + borrow;
        if digit >= subtrahend {
            out.push(digit - subtrahend);
            borrow = 0;
        } else {
            out.push(digit + 10 - subtrahend);
            borrow = 1;
        }
    }
    trim(&mut out);
    out
}

/// Multiplies by `10^places` by inserting low-order zeros.
pub(super) fn shift_left(digits: &[u8], places: usize) -> Vec<u8> {
    if is_zero(digits) {
        return vec![0];
    }
    let mut out = Vec::with_capacity(digits.len() + places);
    out.resize(places, 0);
    out.extend_from_slice(digits);
    out
}

/// Splits a magnitude into its low `position` digits and the rest.
/// `position` is clamped to the digit count.
pub(super) fn split(digits: &[u8], position: usize) -> (Vec<u8>, Vec<u8>) {
    let position = position.min(digits.len());
    let (low, high) = digits.split_at(position);
    (trimmed(low), trimmed(high))
}

/// Divides by a small native divisor, returning quotient and remainder.
pub(super) fn divmod_small(digits: &[u8], divisor: u32) -> (Vec<u8>, u32) {
    debug_assert!(divisor > 0);
    let mut quotient = vec![0u8; digits.len()];
    let mut remainder = 0u64;
    for (i, &digit) in digits.iter().enumerate().rev() {
        let current = remainder * 10 + u64::from(digit);
        // current < 10 * divisor, so the quotient digit is at most 9.
        quotient[i] = (current / u64::from(divisor)) as u8;
        remainder = current % u64::from(divisor);
    }
    trim(&mut quotient);
    (quotient, remainder as u32)
}

/// Computes `digits * factor + addend` in place.
pub(super) fn mul_small_add(digits: &mut Vec<u8>, factor: u32, addend: u32) {
    let mut carry = u64::from(addend);
    for digit in digits.iter_mut() {
        let value = u64::from(*digit) * u64::from(factor) + carry;
        *digit = (value % 10) as u8;
        carry = value / 10;
    }
    while carry > 0 {
        digits.push((carry % 10) as u8);
        carry /= 10;
    }
    trim(digits);
}

/// Reads a magnitude of at most 19 digits as a native integer.
pub(super) fn to_u64(digits: &[u8]) -> u64 {
    debug_assert!(digits.len() <= 19);
    digits
        .iter()
        .rev()
        .fold(0u64, |acc, &digit| acc * 10 + u64::from(digit))
}

pub(super) fn from_u128(mut value: u128) -> Vec<u8> {
    if value == 0 {
        return vec![0];
    }
    let mut out = Vec::with_capacity(39);
    while value > 0 {
        out.push((value % 10) as u8);
        value /= 10;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_keeps_single_zero() {
        let mut digits = vec![0, 0, 0];
        trim(&mut digits);
        assert_eq!(digits, vec![0]);

        let mut empty = Vec::new();
        trim(&mut empty);
        assert_eq!(empty, vec![0]);
    }

    #[test]
    fn add_carries_through_long_run_of_nines() {
        let nines = vec![9u8; 10_000];
        let sum = add(&nines, &[1]);
        assert_eq!(sum.len(), 10_001);
        assert_eq!(sum.last(), Some(&1));
        assert!(sum[..10_000].iter().all(|&d| d == 0));
    }

    #[test]
    fn sub_borrows_across_zeros() {
        // 1000 - 1 = 999
        assert_eq!(sub(&[0, 0, 0, 1], &[1]), vec![9, 9, 9]);
        assert_eq!(sub(&[5], &[5]), vec![0]);
    }

    #[test]
    fn compare_by_length_then_digits() {
        assert_eq!(cmp_magnitude(&[9], &[0, 1]), Ordering::Less);
        assert_eq!(cmp_magnitude(&[1, 2], &[9, 1]), Ordering::Greater);
        assert_eq!(cmp_magnitude(&[3, 4], &[3, 4]), Ordering::Equal);
    }

    #[test]
    fn split_clamps_position() {
        let (low, high) = split(&[3, 2, 1], 10);
        assert_eq!(low, vec![3, 2, 1]);
        assert_eq!(high, vec![0]);

        let (low, high) = split(&[0, 0, 1], 2);
        assert_eq!(low, vec![0]);
        assert_eq!(high, vec![1]);
    }

    #[test]
    fn small_division_and_multiplication() {
        // 1000 / 256 = 3 rem 232
        let (q, r) = divmod_small(&[0, 0, 0, 1], 256);
        assert_eq!(q, vec![3]);
        assert_eq!(r, 232);

        let mut digits = vec![3];
        mul_small_add(&mut digits, 256, 232);
        assert_eq!(digits, vec![0, 0, 0, 1]);
    }

    #[test]
    fn native_round_trip() {
        assert_eq!(from_u128(0), vec![0]);
        assert_eq!(from_u128(120), vec![0, 2, 1]);
        assert_eq!(to_u64(&from_u128(987_654_321)), 987_654_321);
    }
}
