//! 256-bit machine words
//!
//! This module defines the `Word` type every semantic function operates on,
//! together with the two collaborators the word layer depends on:
//!
//! - `signed`: the two's-complement view of a word (`to_signed` / `from_signed`)
//! - `primitives`: the division and remainder helpers with zero-as-zero behavior
//!
//! Words are backed by `ruint::Uint<256, 4>`, four little-endian 64-bit limbs.
//! The type cannot represent a value outside [0, 2^256), so every operation
//! built on its wrapping methods is reduced by construction.

pub mod primitives;
pub mod signed;

use crate::vm::errors::VMError;
use ruint::Uint;
use std::fmt;

pub use primitives::{div_or_zero, div_rem, rem_or_zero, sdiv_or_zero, srem_or_zero, Signedness};
pub use signed::{from_signed, to_signed, SignedWord};

/// An unsigned 256-bit machine word
pub type Word = Uint<256, 4>;

/// Width of a word in bytes
pub const WORD_BYTES: usize = 32;

/// Width of a word in bits
pub const WORD_BITS: usize = 256;

/// The word 0, also the machine's `false`
pub const ZERO: Word = Word::ZERO;

/// The word 1, also the machine's `true`
pub const ONE: Word = Word::from_limbs([1, 0, 0, 0]);

/// All bits set: 2^256 - 1, or -1 under the signed interpretation
pub const ALL_ONES: Word = Word::MAX;

/// Only the top bit set: the bit pattern of the minimum signed value -2^255
pub const SIGN_BIT: Word = Word::from_limbs([0, 0, 0, 1 << 63]);

/// Encode a boolean the way the machine does: exactly 0 or 1
#[inline]
pub fn bool_to_word(value: bool) -> Word {
    if value {
        ONE
    } else {
        ZERO
    }
}

/// Convert a word to a host offset, if it fits in `usize`
pub fn word_to_usize(word: Word) -> Option<usize> {
    let limbs = word.as_limbs();
    if limbs[1..].iter().any(|&limb| limb != 0) {
        return None;
    }
    usize::try_from(limbs[0]).ok()
}

/// How words are rendered for humans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Minimal `0x`-prefixed hexadecimal
    #[default]
    Hex,
    /// Unsigned decimal
    Decimal,
}

impl std::str::FromStr for OutputFormat {
    type Err = VMError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hex" | "hexadecimal" => Ok(OutputFormat::Hex),
            "dec" | "decimal" => Ok(OutputFormat::Decimal),
            other => Err(VMError::Config(format!("unknown output format: {}", other))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Hex => write!(f, "hex"),
            OutputFormat::Decimal => write!(f, "decimal"),
        }
    }
}

/// Parse a word from text
///
/// Accepts decimal (`42`), prefixed hexadecimal (`0x2a`), octal and binary
/// prefixes as understood by `ruint`, and a leading `-` which produces the
/// two's-complement encoding of the negated value (`-1` is all ones).
pub fn parse_word(text: &str) -> Result<Word, VMError> {
    let trimmed = text.trim().replace('_', "");
    if trimmed.is_empty() {
        return Err(VMError::InvalidWord(text.to_string()));
    }

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.as_str()),
    };

    let magnitude: Word = digits
        .parse()
        .map_err(|_| VMError::InvalidWord(text.to_string()))?;

    if negative {
        if magnitude > SIGN_BIT {
            return Err(VMError::InvalidWord(text.to_string()));
        }
        Ok(magnitude.wrapping_neg())
    } else {
        Ok(magnitude)
    }
}

/// Render a word as minimal `0x`-prefixed hexadecimal
pub fn to_hex(word: Word) -> String {
    let encoded = hex::encode(word.to_be_bytes::<WORD_BYTES>());
    let digits = encoded.trim_start_matches('0');
    if digits.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{}", digits)
    }
}

/// Render a word in the requested format
pub fn format_word(word: Word, format: OutputFormat) -> String {
    match format {
        OutputFormat::Hex => to_hex(word),
        OutputFormat::Decimal => word.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(ONE, Word::from(1u64));
        assert_eq!(SIGN_BIT, ONE << 255usize);
        assert_eq!(ALL_ONES, ZERO.wrapping_sub(ONE));
        assert_eq!(SIGN_BIT.to_be_bytes::<32>()[0], 0x80);
    }

    #[test]
    fn test_parse_word() {
        assert_eq!(parse_word("42").unwrap(), Word::from(42u64));
        assert_eq!(parse_word("0x2a").unwrap(), Word::from(42u64));
        assert_eq!(parse_word(" 0xFF ").unwrap(), Word::from(255u64));
        assert_eq!(parse_word("-1").unwrap(), ALL_ONES);
        assert_eq!(parse_word("1_000").unwrap(), Word::from(1000u64));
        assert_eq!(
            parse_word("-0x8000000000000000000000000000000000000000000000000000000000000000")
                .unwrap(),
            SIGN_BIT
        );
    }

    #[test]
    fn test_parse_word_rejects_garbage() {
        assert!(matches!(parse_word(""), Err(VMError::InvalidWord(_))));
        assert!(matches!(parse_word("zz"), Err(VMError::InvalidWord(_))));
        // 2^256 does not fit
        let too_big = format!("0x1{}", "0".repeat(64));
        assert!(matches!(parse_word(&too_big), Err(VMError::InvalidWord(_))));
    }

    #[test]
    fn test_formatting() {
        assert_eq!(to_hex(ZERO), "0x0");
        assert_eq!(to_hex(Word::from(255u64)), "0xff");
        assert_eq!(to_hex(SIGN_BIT), format!("0x8{}", "0".repeat(63)));
        assert_eq!(format_word(Word::from(1000u64), OutputFormat::Decimal), "1000");
        assert_eq!("dec".parse::<OutputFormat>().unwrap(), OutputFormat::Decimal);
        assert!("octal".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_word_to_usize() {
        assert_eq!(word_to_usize(Word::from(64u64)), Some(64));
        assert_eq!(word_to_usize(SIGN_BIT), None);
        assert_eq!(word_to_usize(ONE << 64usize), None);
    }
}
