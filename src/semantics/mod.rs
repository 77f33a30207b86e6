//! Instruction semantics
//!
//! Pure functions over words, grouped the way the instruction set groups
//! them, plus the memory-access operations that thread a `MemoryBuffer`.
//!
//! - `arithmetic`: modular and signed arithmetic
//! - `comparison`: ordering and equality, returning 0 or 1
//! - `bitwise`: logical operators, byte extraction and shifts
//! - `memory`: word-aligned loads and stores

pub mod arithmetic;
pub mod bitwise;
pub mod comparison;
pub mod memory;

pub use arithmetic::{add, addmod, div, exp, modulo, mul, mulmod, sdiv, signextend, smod, sub};
pub use bitwise::{and, byte, not, or, sar, shl, shr, xor};
pub use comparison::{eq, gt, iszero, lt, sgt, slt};
pub use memory::{mload, msize, mstore, mstore8};
