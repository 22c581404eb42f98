//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each works on the accumulator or, read-modify-write, on memory. The bit
//! shifted out lands in C; Z and N come from the result.

use crate::{AddressingMode, MemoryBus, OpcodeMetadata, StatusFlags, CPU};

/// Applies `op` to the accumulator or the memory operand.
///
/// `op` receives the old value and the incoming carry and returns the new
/// value and the outgoing carry. The memory writeback goes straight to the
/// bus, bypassing write listeners.
fn read_modify_write<M, F>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata, op: F)
where
    M: MemoryBus,
    F: FnOnce(u8, bool) -> (u8, bool),
{
    let carry_in = cpu.p.contains(StatusFlags::CARRY);

    let result = if metadata.addressing_mode == AddressingMode::Accumulator {
        let (result, carry_out) = op(cpu.a, carry_in);
        cpu.a = result;
        cpu.p.set(StatusFlags::CARRY, carry_out);
        result
    } else {
        let addr = cpu.operand_address(metadata.addressing_mode);
        let (result, carry_out) = op(cpu.memory.read(addr), carry_in);
        cpu.memory.write(addr, result);
        cpu.p.set(StatusFlags::CARRY, carry_out);
        result
    };

    cpu.p.set_zn(result);
    cpu.advance(metadata);
}

/// Executes the ASL (Arithmetic Shift Left) instruction.
///
/// Bit 0 is set to 0 and bit 7 is placed in the carry flag.
pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    read_modify_write(cpu, metadata, |value, _| (value << 1, value & 0x80 != 0));
}

/// Executes the LSR (Logical Shift Right) instruction.
///
/// Bit 7 is set to 0 and bit 0 is placed in the carry flag, so N always
/// ends up clear.
pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    read_modify_write(cpu, metadata, |value, _| (value >> 1, value & 0x01 != 0));
}

/// Executes the ROL (Rotate Left) instruction.
///
/// The old carry enters bit 0; the old bit 7 becomes the new carry.
pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    read_modify_write(cpu, metadata, |value, carry| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    });
}

/// Executes the ROR (Rotate Right) instruction.
///
/// The old carry enters bit 7; the old bit 0 becomes the new carry.
pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    read_modify_write(cpu, metadata, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    });
}
