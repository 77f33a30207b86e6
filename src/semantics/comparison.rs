//! Ordering and equality predicates
//!
//! Each predicate returns the machine's boolean encoding, a word that is
//! exactly 0 or 1.

use crate::word::{bool_to_word, to_signed, Word, ZERO};

/// 1 iff x < y as unsigned words
#[inline]
pub fn lt(x: Word, y: Word) -> Word {
    bool_to_word(x < y)
}

/// 1 iff x > y as unsigned words
#[inline]
pub fn gt(x: Word, y: Word) -> Word {
    bool_to_word(x > y)
}

/// 1 iff x < y as two's-complement signed words
#[inline]
pub fn slt(x: Word, y: Word) -> Word {
    bool_to_word(to_signed(x) < to_signed(y))
}

/// 1 iff x > y as two's-complement signed words
#[inline]
pub fn sgt(x: Word, y: Word) -> Word {
    bool_to_word(to_signed(x) > to_signed(y))
}

/// 1 iff the bit patterns are identical
#[inline]
pub fn eq(x: Word, y: Word) -> Word {
    bool_to_word(x == y)
}

/// 1 iff x is 0
#[inline]
pub fn iszero(x: Word) -> Word {
    bool_to_word(x == ZERO)
}
