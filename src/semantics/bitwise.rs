//! Bit-level operators over 256-bit words
//!
//! Shift amounts come first, matching the machine's operand order: `shl(shift,
//! value)`. Shifts of 256 or more bits saturate instead of wrapping the
//! amount.

use crate::word::{to_signed, word_to_usize, Word, ALL_ONES, WORD_BITS, WORD_BYTES, ZERO};

/// Bitwise complement, equal to 2^256 - 1 - x
#[inline]
pub fn not(x: Word) -> Word {
    !x
}

/// Bitwise conjunction of both operands
#[inline]
pub fn and(x: Word, y: Word) -> Word {
    x & y
}

#[inline]
pub fn or(x: Word, y: Word) -> Word {
    x | y
}

#[inline]
pub fn xor(x: Word, y: Word) -> Word {
    x ^ y
}

/// The `index`-th byte of `x`, counting from the most significant byte;
/// 0 when `index` is 32 or more
pub fn byte(index: Word, x: Word) -> Word {
    match word_to_usize(index) {
        Some(i) if i < WORD_BYTES => Word::from(x.to_be_bytes::<WORD_BYTES>()[i]),
        _ => ZERO,
    }
}

/// Shift amount in bits, or `None` once the whole word is shifted out
fn shift_amount(shift: Word) -> Option<usize> {
    word_to_usize(shift).filter(|&bits| bits < WORD_BITS)
}

/// Logical left shift
pub fn shl(shift: Word, x: Word) -> Word {
    match shift_amount(shift) {
        Some(bits) => x << bits,
        None => ZERO,
    }
}

/// Logical right shift
pub fn shr(shift: Word, x: Word) -> Word {
    match shift_amount(shift) {
        Some(bits) => x >> bits,
        None => ZERO,
    }
}

/// Arithmetic right shift, filling with the sign bit
pub fn sar(shift: Word, x: Word) -> Word {
    let negative = to_signed(x).is_negative();
    match shift_amount(shift) {
        Some(bits) if negative => !((!x) >> bits),
        Some(bits) => x >> bits,
        None if negative => ALL_ONES,
        None => ZERO,
    }
}
