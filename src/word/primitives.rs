//! Division and remainder primitives
//!
//! The machine defines division and remainder as total operations: a zero
//! divisor yields 0 rather than a fault. Both the unsigned and the signed
//! variants are answered by one routine, `div_rem`, so the zero handling and
//! the MIN / -1 overflow edge live in exactly one place.

use super::signed::SignedWord;
use super::{Word, ZERO};

/// How `div_rem` interprets its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signedness {
    Unsigned,
    /// Two's complement, truncating toward zero
    Signed,
}

/// Quotient and remainder of `dividend / divisor`
///
/// A zero divisor gives `(0, 0)`. In signed mode the quotient truncates
/// toward zero and the remainder takes the dividend's sign, so
/// `quotient * divisor + remainder == dividend` holds modulo 2^256 for every
/// non-zero divisor, including MIN / -1 where the quotient wraps back to MIN.
pub fn div_rem(dividend: Word, divisor: Word, signedness: Signedness) -> (Word, Word) {
    if divisor == ZERO {
        return (ZERO, ZERO);
    }

    match signedness {
        Signedness::Unsigned => (dividend / divisor, dividend % divisor),
        Signedness::Signed => {
            let x = SignedWord::from_bits(dividend);
            let y = SignedWord::from_bits(divisor);
            let (x_abs, y_abs) = (x.unsigned_abs(), y.unsigned_abs());

            let quotient = SignedWord::from_sign_and_magnitude(
                x.is_negative() != y.is_negative(),
                x_abs / y_abs,
            );
            let remainder = SignedWord::from_sign_and_magnitude(x.is_negative(), x_abs % y_abs);

            (quotient.to_bits(), remainder.to_bits())
        }
    }
}

/// Unsigned floor division, 0 when `divisor` is 0
#[inline]
pub fn div_or_zero(dividend: Word, divisor: Word) -> Word {
    div_rem(dividend, divisor, Signedness::Unsigned).0
}

/// Signed truncating division, 0 when `divisor` is 0
#[inline]
pub fn sdiv_or_zero(dividend: Word, divisor: Word) -> Word {
    div_rem(dividend, divisor, Signedness::Signed).0
}

/// Unsigned remainder, 0 when `divisor` is 0
#[inline]
pub fn rem_or_zero(dividend: Word, divisor: Word) -> Word {
    div_rem(dividend, divisor, Signedness::Unsigned).1
}

/// Signed remainder with the dividend's sign, 0 when `divisor` is 0
#[inline]
pub fn srem_or_zero(dividend: Word, divisor: Word) -> Word {
    div_rem(dividend, divisor, Signedness::Signed).1
}
