//! Modular arithmetic over 256-bit words
//!
//! Every function is total: results wrap modulo 2^256, and division or
//! remainder by zero yields 0. Division and remainder delegate to
//! `word::primitives`, which holds the single signed/unsigned core.

use crate::word::{
    div_or_zero, rem_or_zero, sdiv_or_zero, srem_or_zero, Word, ONE, WORD_BYTES, ZERO,
};

/// (x + y) mod 2^256
#[inline]
pub fn add(x: Word, y: Word) -> Word {
    x.wrapping_add(y)
}

/// (x - y) mod 2^256
#[inline]
pub fn sub(x: Word, y: Word) -> Word {
    x.wrapping_sub(y)
}

/// (x * y) mod 2^256; exact whenever the true product fits
#[inline]
pub fn mul(x: Word, y: Word) -> Word {
    x.wrapping_mul(y)
}

/// Unsigned floor division; `div(x, 0) == 0`
#[inline]
pub fn div(x: Word, y: Word) -> Word {
    div_or_zero(x, y)
}

/// Signed truncating division; `sdiv(x, 0) == 0` and `sdiv(MIN, -1) == MIN`
#[inline]
pub fn sdiv(x: Word, y: Word) -> Word {
    sdiv_or_zero(x, y)
}

/// Unsigned remainder; `modulo(x, 0) == 0`
#[inline]
pub fn modulo(x: Word, y: Word) -> Word {
    rem_or_zero(x, y)
}

/// Signed remainder taking the dividend's sign; `smod(x, 0) == 0`
#[inline]
pub fn smod(x: Word, y: Word) -> Word {
    srem_or_zero(x, y)
}

/// x^y mod 2^256 by square-and-multiply; `exp(x, 0) == 1` for every x
pub fn exp(base: Word, exponent: Word) -> Word {
    let mut result = ONE;
    let mut base = base;
    let mut exponent = exponent;

    while exponent != ZERO {
        if exponent.bit(0) {
            result = result.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exponent >>= 1usize;
    }

    result
}

/// (a + b) mod n for `a, b < n`, where the sum may carry past 2^256
fn add_reduced(a: Word, b: Word, n: Word) -> Word {
    let (sum, carried) = a.overflowing_add(b);
    if carried || sum >= n {
        // true sum < 2n
        sum.wrapping_sub(n)
    } else {
        sum
    }
}

/// (x + y) mod n over the unbounded sum; `addmod(x, y, 0) == 0`
pub fn addmod(x: Word, y: Word, n: Word) -> Word {
    if n == ZERO {
        return ZERO;
    }
    add_reduced(x % n, y % n, n)
}

/// (x * y) mod n over the unbounded product; `mulmod(x, y, 0) == 0`
pub fn mulmod(x: Word, y: Word, n: Word) -> Word {
    if n == ZERO {
        return ZERO;
    }

    let mut result = ZERO;
    let mut addend = x % n;
    let mut multiplier = y;

    while multiplier != ZERO {
        if multiplier.bit(0) {
            result = add_reduced(result, addend, n);
        }
        addend = add_reduced(addend, addend, n);
        multiplier >>= 1usize;
    }

    result
}

/// Sign-extend `x` from byte `byte_index`, counted from the least
/// significant byte. Indices of 31 and above leave `x` unchanged.
pub fn signextend(byte_index: Word, x: Word) -> Word {
    if byte_index >= Word::from(WORD_BYTES as u64 - 1) {
        return x;
    }

    let sign_position = byte_index.as_limbs()[0] as usize * 8 + 7;
    let low_mask = (ONE << (sign_position + 1)).wrapping_sub(ONE);

    if x.bit(sign_position) {
        x | !low_mask
    } else {
        x & low_mask
    }
}
