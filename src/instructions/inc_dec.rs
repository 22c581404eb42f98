//! # Increment and Decrement Instructions
//!
//! - INC, DEC: Memory, read-modify-write
//! - INX, INY, DEX, DEY: Index registers
//!
//! All wrap modulo 256 and update only Z and N.

use crate::{MemoryBus, OpcodeMetadata, CPU};

fn step_memory<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata, delta: u8) {
    let addr = cpu.operand_address(metadata.addressing_mode);
    let result = cpu.memory.read(addr).wrapping_add(delta);
    cpu.memory.write(addr, result);
    cpu.p.set_zn(result);
    cpu.advance(metadata);
}

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    step_memory(cpu, metadata, 1);
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    step_memory(cpu, metadata, 0xFF);
}

/// Executes the INX (Increment X Register) instruction.
pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.p.set_zn(cpu.x);
    cpu.advance(metadata);
}

/// Executes the INY (Increment Y Register) instruction.
pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.p.set_zn(cpu.y);
    cpu.advance(metadata);
}

/// Executes the DEX (Decrement X Register) instruction.
pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.p.set_zn(cpu.x);
    cpu.advance(metadata);
}

/// Executes the DEY (Decrement Y Register) instruction.
pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.p.set_zn(cpu.y);
    cpu.advance(metadata);
}
