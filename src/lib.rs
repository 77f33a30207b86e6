pub mod config;
pub mod conformance;
pub mod semantics;
pub mod vm;
pub mod word;

pub use crate::conformance::{run_suite, ConformanceSuite, SuiteReport};
pub use crate::vm::{evaluate_pure, ExecutionContext, MemoryBuffer, Op, VMError, VMMemory};
pub use crate::word::{from_signed, to_signed, SignedWord, Word};
