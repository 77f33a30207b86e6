//! Error types for the reference model's outer edges
//!
//! The word semantics themselves never fail. These errors come from the
//! surfaces around them: decoding an operation, checking operand counts,
//! parsing operand text, and the memory container's own limits.

use thiserror::Error;

/// Error variants raised outside the pure word semantics
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VMError {
    /// Mnemonic or opcode byte not in the catalogue
    #[error("Unknown operation: {0}")]
    UnknownOp(String),

    /// Wrong number of operands supplied to an operation
    #[error("{op_name} expects {expected} operand(s), found {found}")]
    ArityMismatch {
        op_name: String,
        expected: usize,
        found: usize,
    },

    /// Operand text is not a 256-bit value
    #[error("Invalid word: {0}")]
    InvalidWord(String),

    /// An address, or address plus length, does not fit the host's offsets
    #[error("Memory address out of range: {address}")]
    AddressOverflow { address: String },

    /// Memory expansion past the configured limit
    #[error("Memory limit exceeded: requested {requested} bytes, limit is {limit}")]
    MemoryLimitExceeded { requested: usize, limit: usize },

    /// The host could not allocate the expanded memory
    #[error("Memory allocation failed: requested {requested} bytes")]
    AllocationFailed { requested: usize },

    /// Memory operation attempted without an execution context
    #[error("{0} requires an execution context with memory")]
    RequiresMemory(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error while reading vectors
    #[error("IO error: {0}")]
    IOError(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<std::io::Error> for VMError {
    fn from(err: std::io::Error) -> Self {
        VMError::IOError(err.to_string())
    }
}

impl From<serde_json::Error> for VMError {
    fn from(err: serde_json::Error) -> Self {
        VMError::Deserialization(err.to_string())
    }
}
