//! Two's-complement view of a word
//!
//! A `SignedWord` carries the same 256 bits as a `Word` and only changes how
//! they are read: the top bit is the sign, giving the range [-2^255, 2^255).
//! Conversions in both directions are free and lossless.

use super::{Word, SIGN_BIT, ZERO};
use std::cmp::Ordering;
use std::fmt;

/// A 256-bit word read as a two's-complement signed integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignedWord(Word);

impl SignedWord {
    /// -2^255, whose bit pattern is the sign bit alone
    pub const MIN: SignedWord = SignedWord(SIGN_BIT);

    /// 2^255 - 1
    pub const MAX: SignedWord = SignedWord(Word::from_limbs([
        u64::MAX,
        u64::MAX,
        u64::MAX,
        u64::MAX >> 1,
    ]));

    /// -1, all bits set
    pub const MINUS_ONE: SignedWord = SignedWord(Word::MAX);

    /// Reinterpret a bit pattern as signed
    #[inline]
    pub const fn from_bits(bits: Word) -> Self {
        SignedWord(bits)
    }

    /// The underlying bit pattern
    #[inline]
    pub const fn to_bits(self) -> Word {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0.bit(255)
    }

    pub fn is_zero(self) -> bool {
        self.0 == ZERO
    }

    /// Absolute value as an unsigned word
    ///
    /// Total over the whole range: |MIN| is 2^255, which fits unsigned.
    pub fn unsigned_abs(self) -> Word {
        if self.is_negative() {
            self.0.wrapping_neg()
        } else {
            self.0
        }
    }

    /// Build a signed value from a sign and an unsigned magnitude, wrapping
    /// modulo 2^256 when the magnitude is out of range
    pub fn from_sign_and_magnitude(negative: bool, magnitude: Word) -> Self {
        if negative {
            SignedWord(magnitude.wrapping_neg())
        } else {
            SignedWord(magnitude)
        }
    }

    /// Two's-complement negation; MIN negates to itself
    pub fn wrapping_neg(self) -> Self {
        SignedWord(self.0.wrapping_neg())
    }
}

impl Ord for SignedWord {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flipping the sign bit maps [-2^255, 2^255) monotonically onto [0, 2^256).
        (self.0 ^ SIGN_BIT).cmp(&(other.0 ^ SIGN_BIT))
    }
}

impl PartialOrd for SignedWord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i64> for SignedWord {
    fn from(value: i64) -> Self {
        SignedWord::from(i128::from(value))
    }
}

impl From<i128> for SignedWord {
    fn from(value: i128) -> Self {
        SignedWord::from_sign_and_magnitude(value < 0, Word::from(value.unsigned_abs()))
    }
}

impl fmt::Display for SignedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}", self.unsigned_abs())
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Read a word as a two's-complement signed value
#[inline]
pub fn to_signed(word: Word) -> SignedWord {
    SignedWord::from_bits(word)
}

/// Encode a signed value back into its word bit pattern
#[inline]
pub fn from_signed(value: SignedWord) -> Word {
    value.to_bits()
}
