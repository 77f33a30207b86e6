//! Operation evaluation
//!
//! This module maps an `Op` and its operand words onto the semantic
//! functions. It is not an interpreter: there is no operand stack and no
//! program counter. An `ExecutionContext` owns the single memory buffer of
//! one execution and evaluates one operation at a time against it.

use log::{debug, trace};

use crate::semantics::{arithmetic, bitwise, comparison, memory};
use crate::vm::errors::VMError;
use crate::vm::memory::VMMemory;
use crate::vm::types::Op;
use crate::word::{to_hex, word_to_usize, Word};

/// Check that `args` has exactly the operand count `op` takes
fn check_arity(op: Op, args: &[Word]) -> Result<(), VMError> {
    if args.len() != op.arity() {
        return Err(VMError::ArityMismatch {
            op_name: op.to_string(),
            expected: op.arity(),
            found: args.len(),
        });
    }
    Ok(())
}

/// Convert a memory offset operand to a host offset
fn address_operand(word: Word) -> Result<usize, VMError> {
    word_to_usize(word).ok_or_else(|| VMError::AddressOverflow {
        address: to_hex(word),
    })
}

/// Evaluate an operation that does not touch memory
///
/// Memory operations are rejected with `RequiresMemory`; use an
/// `ExecutionContext` for those.
pub fn evaluate_pure(op: Op, args: &[Word]) -> Result<Word, VMError> {
    check_arity(op, args)?;

    let result = match op {
        Op::Add => arithmetic::add(args[0], args[1]),
        Op::Mul => arithmetic::mul(args[0], args[1]),
        Op::Sub => arithmetic::sub(args[0], args[1]),
        Op::Div => arithmetic::div(args[0], args[1]),
        Op::SDiv => arithmetic::sdiv(args[0], args[1]),
        Op::Mod => arithmetic::modulo(args[0], args[1]),
        Op::SMod => arithmetic::smod(args[0], args[1]),
        Op::AddMod => arithmetic::addmod(args[0], args[1], args[2]),
        Op::MulMod => arithmetic::mulmod(args[0], args[1], args[2]),
        Op::Exp => arithmetic::exp(args[0], args[1]),
        Op::SignExtend => arithmetic::signextend(args[0], args[1]),
        Op::Lt => comparison::lt(args[0], args[1]),
        Op::Gt => comparison::gt(args[0], args[1]),
        Op::SLt => comparison::slt(args[0], args[1]),
        Op::SGt => comparison::sgt(args[0], args[1]),
        Op::Eq => comparison::eq(args[0], args[1]),
        Op::IsZero => comparison::iszero(args[0]),
        Op::And => bitwise::and(args[0], args[1]),
        Op::Or => bitwise::or(args[0], args[1]),
        Op::Xor => bitwise::xor(args[0], args[1]),
        Op::Not => bitwise::not(args[0]),
        Op::Byte => bitwise::byte(args[0], args[1]),
        Op::Shl => bitwise::shl(args[0], args[1]),
        Op::Shr => bitwise::shr(args[0], args[1]),
        Op::Sar => bitwise::sar(args[0], args[1]),
        Op::MLoad | Op::MStore | Op::MStore8 | Op::MSize => {
            return Err(VMError::RequiresMemory(op.to_string()))
        }
    };

    trace!(
        "{} {:?} -> {}",
        op,
        args.iter().map(|w| to_hex(*w)).collect::<Vec<_>>(),
        to_hex(result)
    );
    Ok(result)
}

/// One execution's memory plus the operations that use it
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    memory: VMMemory,
}

impl ExecutionContext {
    /// Create a context with empty, unlimited memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context whose memory refuses to grow past `limit` bytes
    pub fn with_memory_limit(limit: Option<usize>) -> Self {
        let memory = match limit {
            Some(limit) => VMMemory::with_limit(limit),
            None => VMMemory::new(),
        };
        Self { memory }
    }

    pub fn memory(&self) -> &VMMemory {
        &self.memory
    }

    /// Give up the context, keeping its memory
    pub fn into_memory(self) -> VMMemory {
        self.memory
    }

    /// Evaluate `op` on `args`
    ///
    /// Returns the pushed word, or `None` for stores, which push nothing.
    pub fn evaluate(&mut self, op: Op, args: &[Word]) -> Result<Option<Word>, VMError> {
        check_arity(op, args)?;

        let result = match op {
            Op::MLoad => Some(memory::mload(&mut self.memory, address_operand(args[0])?)?),
            Op::MStore => {
                memory::mstore(&mut self.memory, address_operand(args[0])?, args[1])?;
                None
            }
            Op::MStore8 => {
                memory::mstore8(&mut self.memory, address_operand(args[0])?, args[1])?;
                None
            }
            Op::MSize => Some(memory::msize(&self.memory)),
            _ => return evaluate_pure(op, args).map(Some),
        };

        debug!("{} executed, memory size now {} bytes", op, self.memory.as_bytes().len());
        Ok(result)
    }
}
