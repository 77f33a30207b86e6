//! Virtual machine components the semantics are evaluated against
//!
//! This module contains the instruction catalogue, the memory container, the
//! error type, and the per-execution context that dispatches operations to
//! the semantic functions.

pub mod errors;
mod execution;
pub mod memory;
mod types;

pub use errors::VMError;
pub use execution::{evaluate_pure, ExecutionContext};
pub use memory::{MemoryBuffer, MemorySnapshot, VMMemory};
pub use types::Op;
