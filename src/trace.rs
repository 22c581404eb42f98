//! # Instruction Tracing
//!
//! Renders the instruction at an address as one line of assembly text, the
//! format used by the per-instruction `trace` log records.

use crate::addressing::{read_word, AddressingMode};
use crate::{MemoryBus, Mnemonic, OPCODE_TABLE};

/// Formats the instruction at `addr` as assembly text.
///
/// Operands are read straight from memory. Branch operands are shown as
/// their resolved target address. Undefined opcodes come out as a `.byte`
/// directive.
///
/// # Examples
///
/// ```
/// use em6502::{trace::format_at, FlatMemory, MemoryBus};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x0600, 0xA9); // LDA #$42
/// mem.write(0x0601, 0x42);
/// mem.write(0x0602, 0xD0); // BNE -4
/// mem.write(0x0603, 0xFC);
///
/// assert_eq!(format_at(&mem, 0x0600), "LDA #$42");
/// assert_eq!(format_at(&mem, 0x0602), "BNE $0600");
/// ```
pub fn format_at<M: MemoryBus>(bus: &M, addr: u16) -> String {
    let opcode = bus.read(addr);
    let metadata = &OPCODE_TABLE[opcode as usize];

    if metadata.mnemonic == Mnemonic::Illegal {
        return format!(".byte ${:02X}", opcode);
    }

    let operand = format_operand(bus, metadata.addressing_mode, addr);
    if operand.is_empty() {
        metadata.mnemonic.to_string()
    } else {
        format!("{} {}", metadata.mnemonic, operand)
    }
}

fn format_operand<M: MemoryBus>(bus: &M, mode: AddressingMode, addr: u16) -> String {
    use AddressingMode::*;

    let byte = bus.read(addr.wrapping_add(1));
    let word = read_word(bus, addr.wrapping_add(1));

    match mode {
        Implicit => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#${:02X}", byte),
        ZeroPage => format!("${:02X}", byte),
        ZeroPageX => format!("${:02X},X", byte),
        ZeroPageY => format!("${:02X},Y", byte),
        Relative => {
            let target = addr.wrapping_add(2).wrapping_add_signed(byte as i8 as i16);
            format!("${:04X}", target)
        }
        Absolute => format!("${:04X}", word),
        AbsoluteX => format!("${:04X},X", word),
        AbsoluteY => format!("${:04X},Y", word),
        Indirect => format!("(${:04X})", word),
        IndirectX => format!("(${:02X},X)", byte),
        IndirectY => format!("(${:02X}),Y", byte),
    }
}
