//! Type definitions for the instruction catalogue
//!
//! `Op` names every instruction whose semantics this crate defines, together
//! with the byte it occupies in the machine's bytecode, its mnemonic and how
//! many operands it takes off the stack.
//!
//! Operand order follows the stack: the first operand is the top of the
//! stack, so `Sub` computes `a - b` for operands `[a, b]` and `MStore` takes
//! `[offset, value]`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::vm::errors::VMError;

/// Instructions with defined word or memory semantics
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    /// (a + b) mod 2^256
    Add,

    /// (a * b) mod 2^256
    Mul,

    /// (a - b) mod 2^256
    Sub,

    /// Unsigned division, 0 on a zero divisor
    Div,

    /// Signed division, 0 on a zero divisor
    SDiv,

    /// Unsigned remainder, 0 on a zero divisor
    Mod,

    /// Signed remainder, 0 on a zero divisor
    SMod,

    /// (a + b) mod n without intermediate truncation
    AddMod,

    /// (a * b) mod n without intermediate truncation
    MulMod,

    /// a^b mod 2^256
    Exp,

    /// Sign-extend the second operand from the byte named by the first
    SignExtend,

    Lt,
    Gt,
    SLt,
    SGt,
    Eq,
    IsZero,
    And,
    Or,
    Xor,
    Not,

    /// Byte of the second operand at the index given by the first
    Byte,

    /// Shift the second operand left by the first
    Shl,

    /// Logical right shift of the second operand by the first
    Shr,

    /// Arithmetic right shift of the second operand by the first
    Sar,

    /// Load the word at an offset
    MLoad,

    /// Store a word at an offset
    MStore,

    /// Store the low byte of a word at an offset
    MStore8,

    /// Current memory size in bytes
    MSize,
}

impl Op {
    /// Every operation, in opcode order
    pub const ALL: [Op; 29] = [
        Op::Add,
        Op::Mul,
        Op::Sub,
        Op::Div,
        Op::SDiv,
        Op::Mod,
        Op::SMod,
        Op::AddMod,
        Op::MulMod,
        Op::Exp,
        Op::SignExtend,
        Op::Lt,
        Op::Gt,
        Op::SLt,
        Op::SGt,
        Op::Eq,
        Op::IsZero,
        Op::And,
        Op::Or,
        Op::Xor,
        Op::Not,
        Op::Byte,
        Op::Shl,
        Op::Shr,
        Op::Sar,
        Op::MLoad,
        Op::MStore,
        Op::MStore8,
        Op::MSize,
    ];

    /// The instruction's byte in bytecode
    pub fn opcode(self) -> u8 {
        match self {
            Op::Add => 0x01,
            Op::Mul => 0x02,
            Op::Sub => 0x03,
            Op::Div => 0x04,
            Op::SDiv => 0x05,
            Op::Mod => 0x06,
            Op::SMod => 0x07,
            Op::AddMod => 0x08,
            Op::MulMod => 0x09,
            Op::Exp => 0x0a,
            Op::SignExtend => 0x0b,
            Op::Lt => 0x10,
            Op::Gt => 0x11,
            Op::SLt => 0x12,
            Op::SGt => 0x13,
            Op::Eq => 0x14,
            Op::IsZero => 0x15,
            Op::And => 0x16,
            Op::Or => 0x17,
            Op::Xor => 0x18,
            Op::Not => 0x19,
            Op::Byte => 0x1a,
            Op::Shl => 0x1b,
            Op::Shr => 0x1c,
            Op::Sar => 0x1d,
            Op::MLoad => 0x51,
            Op::MStore => 0x52,
            Op::MStore8 => 0x53,
            Op::MSize => 0x59,
        }
    }

    /// Look an operation up by its bytecode byte
    pub fn from_opcode(byte: u8) -> Result<Op, VMError> {
        Op::ALL
            .iter()
            .copied()
            .find(|op| op.opcode() == byte)
            .ok_or_else(|| VMError::UnknownOp(format!("{:#04x}", byte)))
    }

    /// Lowercase mnemonic, as accepted by `FromStr`
    pub fn mnemonic(self) -> &'static str {
        match self {
            Op::Add => "add",
            Op::Mul => "mul",
            Op::Sub => "sub",
            Op::Div => "div",
            Op::SDiv => "sdiv",
            Op::Mod => "mod",
            Op::SMod => "smod",
            Op::AddMod => "addmod",
            Op::MulMod => "mulmod",
            Op::Exp => "exp",
            Op::SignExtend => "signextend",
            Op::Lt => "lt",
            Op::Gt => "gt",
            Op::SLt => "slt",
            Op::SGt => "sgt",
            Op::Eq => "eq",
            Op::IsZero => "iszero",
            Op::And => "and",
            Op::Or => "or",
            Op::Xor => "xor",
            Op::Not => "not",
            Op::Byte => "byte",
            Op::Shl => "shl",
            Op::Shr => "shr",
            Op::Sar => "sar",
            Op::MLoad => "mload",
            Op::MStore => "mstore",
            Op::MStore8 => "mstore8",
            Op::MSize => "msize",
        }
    }

    /// Number of operands taken from the stack
    pub fn arity(self) -> usize {
        match self {
            Op::MSize => 0,
            Op::IsZero | Op::Not | Op::MLoad => 1,
            Op::AddMod | Op::MulMod => 3,
            _ => 2,
        }
    }

    /// Whether the operation pushes a result
    pub fn produces_value(self) -> bool {
        !matches!(self, Op::MStore | Op::MStore8)
    }

    /// Whether the operation reads or writes memory
    pub fn touches_memory(self) -> bool {
        matches!(self, Op::MLoad | Op::MStore | Op::MStore8 | Op::MSize)
    }
}

impl FromStr for Op {
    type Err = VMError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Op::ALL
            .iter()
            .copied()
            .find(|op| op.mnemonic() == wanted)
            .ok_or_else(|| VMError::UnknownOp(s.trim().to_string()))
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic().to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_opcodes_are_unique() {
        let bytes: HashSet<u8> = Op::ALL.iter().map(|op| op.opcode()).collect();
        assert_eq!(bytes.len(), Op::ALL.len());
    }

    #[test]
    fn test_opcode_lookup() {
        for op in Op::ALL {
            assert_eq!(Op::from_opcode(op.opcode()).unwrap(), op);
        }
        assert!(matches!(Op::from_opcode(0xfe), Err(VMError::UnknownOp(_))));
    }

    #[test]
    fn test_mnemonic_parsing() {
        assert_eq!("SDIV".parse::<Op>().unwrap(), Op::SDiv);
        assert_eq!(" mstore8 ".parse::<Op>().unwrap(), Op::MStore8);
        assert!(matches!("jump".parse::<Op>(), Err(VMError::UnknownOp(_))));
    }

    #[test]
    fn test_serde_uses_mnemonics() {
        for op in Op::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.mnemonic()));
        }
    }

    #[test]
    fn test_arity() {
        assert_eq!(Op::MSize.arity(), 0);
        assert_eq!(Op::Not.arity(), 1);
        assert_eq!(Op::Sub.arity(), 2);
        assert_eq!(Op::MulMod.arity(), 3);
        assert!(!Op::MStore.produces_value());
        assert!(Op::MLoad.produces_value());
    }
}
