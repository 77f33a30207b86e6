//! Word-aligned memory access
//!
//! These operations are written against the `MemoryBuffer` contract only.
//! Each one expands first, then touches bytes that are guaranteed in range.

use crate::vm::errors::VMError;
use crate::vm::memory::MemoryBuffer;
use crate::word::{Word, WORD_BYTES};

/// Store the big-endian encoding of `value` at bytes `[address, address + 31]`
///
/// Afterwards the size is a multiple of 32 and at least `address + 32`, and
/// every byte outside the written range is unchanged. Fails only when the
/// memory container cannot represent the expanded size.
pub fn mstore<M: MemoryBuffer + ?Sized>(
    memory: &mut M,
    address: usize,
    value: Word,
) -> Result<(), VMError> {
    memory.expand(address, WORD_BYTES)?;
    memory.write_word(address, value);
    Ok(())
}

/// Store the least significant byte of `value` at `address`
pub fn mstore8<M: MemoryBuffer + ?Sized>(
    memory: &mut M,
    address: usize,
    value: Word,
) -> Result<(), VMError> {
    memory.expand(address, 1)?;
    memory.write_byte(address, value.as_limbs()[0] as u8);
    Ok(())
}

/// Load the word at `address`, expanding like a store would
pub fn mload<M: MemoryBuffer + ?Sized>(memory: &mut M, address: usize) -> Result<Word, VMError> {
    memory.expand(address, WORD_BYTES)?;
    Ok(memory.read_word(address))
}

/// Current memory size in bytes, as a word
pub fn msize<M: MemoryBuffer + ?Sized>(memory: &M) -> Word {
    Word::from(memory.size() as u64)
}
