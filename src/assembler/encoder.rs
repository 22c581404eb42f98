//! Instruction encoder for the 6502 assembler
//!
//! Opcode selection and byte encoding both go through [`OPCODE_TABLE`], so
//! the assembler accepts exactly the instructions the interpreter executes.

use std::fmt;

use crate::assembler::parser::Operand;
use crate::{AddressingMode, Mnemonic, OPCODE_TABLE};

/// Errors from encoding a resolved operand value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// A one-byte operand was given a value above 0xFF
    ValueTooLarge { value: u16 },

    /// Branch target further than a signed byte from the next instruction
    BranchOutOfRange { offset: i32 },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncodeError::ValueTooLarge { value } => {
                write!(f, "value ${:04X} does not fit in one byte", value)
            }
            EncodeError::BranchOutOfRange { offset } => {
                write!(f, "branch target is {} bytes away, outside -128..=127", offset)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

/// Opcode byte for `mnemonic` in `mode`, if the 6502 has one.
pub fn find_opcode(mnemonic: Mnemonic, mode: AddressingMode) -> Option<u8> {
    OPCODE_TABLE
        .iter()
        .position(|m| m.mnemonic == mnemonic && m.addressing_mode == mode)
        .map(|i| i as u8)
}

/// Pick the opcode for an operand form.
///
/// `zero_page` says the operand value is already known to fit in one byte.
/// When it does, zero-page forms are preferred; otherwise absolute forms
/// are, falling back to zero page for instructions that have nothing else
/// (`STX label,Y`). A bare operand on a branch is always relative.
pub fn select_opcode(mnemonic: Mnemonic, operand: &Operand, zero_page: bool) -> Result<u8, String> {
    use AddressingMode::*;

    let supports = |mode| find_opcode(mnemonic, mode);
    let sized = |zp, abs| {
        if zero_page {
            supports(zp).or_else(|| supports(abs))
        } else {
            supports(abs).or_else(|| supports(zp))
        }
    };

    let (found, form) = match operand {
        Operand::None => (
            supports(Implicit).or_else(|| supports(Accumulator)),
            "no operand",
        ),
        Operand::Accumulator => (supports(Accumulator), "the accumulator"),
        Operand::Immediate(_) => (supports(Immediate), "an immediate operand"),
        Operand::Direct(_) => (
            supports(Relative).or_else(|| sized(ZeroPage, Absolute)),
            "a direct address",
        ),
        Operand::IndexedX(_) => (sized(ZeroPageX, AbsoluteX), "X indexing"),
        Operand::IndexedY(_) => (sized(ZeroPageY, AbsoluteY), "Y indexing"),
        Operand::Indirect(_) => (supports(Indirect), "an indirect operand"),
        Operand::IndirectX(_) => (supports(IndirectX), "(zp,X)"),
        Operand::IndirectY(_) => (supports(IndirectY), "(zp),Y"),
    };

    found.ok_or_else(|| format!("{} does not take {}", mnemonic, form))
}

/// Encode one instruction placed at `address`.
///
/// `value` is the resolved operand and is ignored for operand-less modes.
/// Branch targets are converted to a displacement from `address + 2`.
pub fn encode(opcode: u8, value: u16, address: u16) -> Result<Vec<u8>, EncodeError> {
    use AddressingMode::*;

    match OPCODE_TABLE[opcode as usize].addressing_mode {
        Implicit | Accumulator => Ok(vec![opcode]),
        Relative => {
            let offset = value as i32 - (address as i32 + 2);
            if !(-128..=127).contains(&offset) {
                return Err(EncodeError::BranchOutOfRange { offset });
            }
            Ok(vec![opcode, offset as i8 as u8])
        }
        Absolute | AbsoluteX | AbsoluteY | Indirect => {
            let [lo, hi] = value.to_le_bytes();
            Ok(vec![opcode, lo, hi])
        }
        Immediate | ZeroPage | ZeroPageX | ZeroPageY | IndirectX | IndirectY => {
            let byte = u8::try_from(value).map_err(|_| EncodeError::ValueTooLarge { value })?;
            Ok(vec![opcode, byte])
        }
    }
}
