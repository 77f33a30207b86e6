//! VM memory container
//!
//! This module provides the byte-addressable memory the memory-access
//! semantics write into. Callers see it only through the `MemoryBuffer`
//! contract: query the size, expand to cover an upcoming access, and read or
//! write raw bytes that are already in range.
//!
//! The size of a buffer is always a multiple of the word width. Expansion
//! rounds up to whole words and resizes once, so the invariant holds between
//! any two observable steps.

use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::vm::errors::VMError;
use crate::word::{Word, WORD_BYTES};

/// The narrow contract memory-access semantics are written against
pub trait MemoryBuffer {
    /// Current size in bytes, always a multiple of the word width
    fn size(&self) -> usize;

    /// Grow so that bytes `[address, address + num_bytes)` are in range
    ///
    /// Growth is rounded up to whole words and zero-filled. Expanding by zero
    /// bytes never changes the buffer. Memory never shrinks.
    fn expand(&mut self, address: usize, num_bytes: usize) -> Result<(), VMError>;

    /// Write the 32-byte big-endian encoding of `value` at `address`
    ///
    /// The range must already be in bounds (see `expand`).
    fn write_word(&mut self, address: usize, value: Word);

    /// Write a single byte at `address`, which must already be in bounds
    fn write_byte(&mut self, address: usize, value: u8);

    /// Read 32 bytes at `address` as a big-endian word
    fn read_word(&self, address: usize) -> Word;
}

/// Vector-backed memory for one execution context
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VMMemory {
    /// Raw contents; length is a multiple of `WORD_BYTES`
    bytes: Vec<u8>,

    /// Optional ceiling on the size in bytes
    limit: Option<usize>,
}

impl VMMemory {
    /// Create a new empty memory with no size limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty memory that refuses to grow past `limit` bytes
    pub fn with_limit(limit: usize) -> Self {
        Self {
            bytes: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Borrow the raw contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// SHA-256 of the contents, hex encoded
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }

    /// A serializable copy of the current state
    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            size: self.bytes.len(),
            contents: hex::encode(&self.bytes),
            digest: self.digest(),
        }
    }

    /// Format the memory as rows of one word each
    pub fn format_memory(&self) -> String {
        if self.bytes.is_empty() {
            return "Memory: []".to_string();
        }

        let mut result = "Memory: [\n".to_string();
        for (row, chunk) in self.bytes.chunks(WORD_BYTES).enumerate() {
            result.push_str(&format!("  {:#06x}: {}\n", row * WORD_BYTES, hex::encode(chunk)));
        }
        result.push(']');
        result
    }
}

impl MemoryBuffer for VMMemory {
    fn size(&self) -> usize {
        self.bytes.len()
    }

    fn expand(&mut self, address: usize, num_bytes: usize) -> Result<(), VMError> {
        if num_bytes == 0 {
            return Ok(());
        }

        // a Vec never holds more than isize::MAX bytes
        let required = address
            .checked_add(num_bytes)
            .and_then(|end| end.checked_next_multiple_of(WORD_BYTES))
            .filter(|&end| end <= isize::MAX as usize)
            .ok_or_else(|| VMError::AddressOverflow {
                address: format!("{:#x}", address),
            })?;

        if required <= self.bytes.len() {
            return Ok(());
        }

        if let Some(limit) = self.limit {
            if required > limit {
                return Err(VMError::MemoryLimitExceeded {
                    requested: required,
                    limit,
                });
            }
        }

        trace!("expanding memory from {} to {} bytes", self.bytes.len(), required);
        self.bytes
            .try_reserve_exact(required - self.bytes.len())
            .map_err(|_| VMError::AllocationFailed {
                requested: required,
            })?;
        self.bytes.resize(required, 0);
        debug_assert_eq!(self.bytes.len() % WORD_BYTES, 0);
        Ok(())
    }

    fn write_word(&mut self, address: usize, value: Word) {
        self.bytes[address..address + WORD_BYTES]
            .copy_from_slice(&value.to_be_bytes::<WORD_BYTES>());
    }

    fn write_byte(&mut self, address: usize, value: u8) {
        self.bytes[address] = value;
    }

    fn read_word(&self, address: usize) -> Word {
        let mut buf = [0u8; WORD_BYTES];
        buf.copy_from_slice(&self.bytes[address..address + WORD_BYTES]);
        Word::from_be_bytes(buf)
    }
}

impl fmt::Display for VMMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.format_memory())?;
        write!(f, "Size: {} bytes", self.bytes.len())
    }
}

/// Serializable view of a memory buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    /// Size in bytes
    pub size: usize,

    /// Hex-encoded contents
    pub contents: String,

    /// Hex-encoded SHA-256 of the contents
    pub digest: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::ONE;

    #[test]
    fn test_expand_rounds_to_words() {
        let mut memory = VMMemory::new();
        memory.expand(0, 1).unwrap();
        assert_eq!(memory.size(), 32);

        memory.expand(5, 32).unwrap();
        assert_eq!(memory.size(), 64);

        memory.expand(64, 1).unwrap();
        assert_eq!(memory.size(), 96);
    }

    #[test]
    fn test_expand_never_shrinks() {
        let mut memory = VMMemory::new();
        memory.expand(100, 32).unwrap();
        assert_eq!(memory.size(), 160);

        memory.expand(0, 32).unwrap();
        assert_eq!(memory.size(), 160);
    }

    #[test]
    fn test_expand_zero_bytes_is_noop() {
        let mut memory = VMMemory::new();
        memory.expand(1_000_000, 0).unwrap();
        assert_eq!(memory.size(), 0);
    }

    #[test]
    fn test_expand_overflow() {
        let mut memory = VMMemory::new();
        let result = memory.expand(usize::MAX - 3, 32);
        assert!(matches!(result, Err(VMError::AddressOverflow { .. })));
        assert_eq!(memory.size(), 0);
    }

    #[test]
    fn test_expand_past_allocation_bound() {
        let mut memory = VMMemory::new();
        memory.expand(0, 32).unwrap();

        // end fits usize but no Vec can be that large
        let result = memory.expand(usize::MAX - 63, 32);
        assert_eq!(
            result,
            Err(VMError::AddressOverflow {
                address: format!("{:#x}", usize::MAX - 63)
            })
        );
        assert_eq!(memory.size(), 32);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_expand_allocation_failure() {
        let mut memory = VMMemory::new();
        let result = memory.expand(1 << 62, 32);
        assert!(matches!(result, Err(VMError::AllocationFailed { .. })));
        assert_eq!(memory.size(), 0);
    }

    #[test]
    fn test_limit() {
        let mut memory = VMMemory::with_limit(64);
        memory.expand(32, 32).unwrap();
        assert_eq!(memory.size(), 64);

        let result = memory.expand(33, 32);
        assert_eq!(
            result,
            Err(VMError::MemoryLimitExceeded {
                requested: 96,
                limit: 64
            })
        );
        assert_eq!(memory.size(), 64);
    }

    #[test]
    fn test_word_round_trip() {
        let mut memory = VMMemory::new();
        memory.expand(0, 32).unwrap();
        memory.write_word(0, ONE);
        assert_eq!(memory.read_word(0), ONE);
        assert_eq!(memory.as_bytes()[31], 1);
        assert!(memory.as_bytes()[..31].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_snapshot() {
        let mut memory = VMMemory::new();
        let empty_digest = memory.digest();
        memory.expand(0, 1).unwrap();

        let snapshot = memory.snapshot();
        assert_eq!(snapshot.size, 32);
        assert_eq!(snapshot.contents, "00".repeat(32));
        assert_ne!(snapshot.digest, empty_digest);
        // sha256 of the empty string
        assert_eq!(
            empty_digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
