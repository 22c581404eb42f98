//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump to address
//! - JSR / RTS: Subroutine call and return
//! - BRK / RTI: Software interrupt and return from interrupt
//! - NOP: No operation
//!
//! BRK is a software interrupt that:
//! 1. Pushes PC+2 to the stack (high byte first, then low byte)
//! 2. Pushes processor status to stack with B flag set
//! 3. Sets the I (interrupt disable) flag
//! 4. Loads PC from IRQ vector at $FFFE/F

use crate::{MemoryBus, OpcodeMetadata, StatusFlags, CPU};

/// Executes the JMP (Jump) instruction.
///
/// Addressing modes:
/// - Absolute (0x4C): JMP $1234 - Jump to address $1234
/// - Indirect (0x6C): JMP ($1234) - Jump to address stored at $1234/$1235
///
/// The indirect pointer's high byte is read from `pointer + 1` with a normal
/// 16-bit carry; the NMOS `JMP ($xxFF)` page-wrap quirk is not reproduced.
///
/// Flags affected: None
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    cpu.pc = cpu.operand_address(metadata.addressing_mode);
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes PC+2 (the address of JSR's last byte) high byte first, then jumps.
/// RTS adds the missing 1 on return.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    let target = cpu.operand_address(metadata.addressing_mode);
    let return_address = cpu.pc.wrapping_add(2);

    cpu.push_word(return_address);
    cpu.pc = target;
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// Pops the low byte, then the high byte, and resumes at that address plus one.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>, _metadata: &OpcodeMetadata) {
    cpu.pc = cpu.pop_word().wrapping_add(1);
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// Flags affected:
/// - B: Set before the push, so both the live and the stacked copy carry it
/// - I: Set to 1 after the push
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>, _metadata: &OpcodeMetadata) {
    // BRK is one byte but pushes PC+2, leaving a padding byte after it
    let return_address = cpu.pc.wrapping_add(2);
    cpu.push_word(return_address);

    cpu.p.insert(StatusFlags::BREAK);
    cpu.push(cpu.p.bits());

    cpu.p.insert(StatusFlags::IRQ_DISABLE);
    cpu.pc = cpu.irq_vector();
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pops the status byte (restored verbatim, B included), then the PC low and
/// high bytes. Unlike RTS, the popped address is used as is.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>, _metadata: &OpcodeMetadata) {
    cpu.p = StatusFlags::from_bits_retain(cpu.pop());
    cpu.pc = cpu.pop_word();
}

/// Executes the NOP instruction.
pub(crate) fn execute_nop<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    cpu.advance(metadata);
}
