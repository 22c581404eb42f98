//! # Load and Store Instructions
//!
//! - LDA, LDX, LDY: Load a register, updating Z and N
//! - STA, STX, STY: Store a register, no flags
//!
//! Stores go through `CPU::write`, so they are the instructions that reach
//! the write listeners.

use crate::{MemoryBus, OpcodeMetadata, CPU};

/// Executes the LDA (Load Accumulator) instruction.
///
/// Flags affected: Z, N
pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    cpu.a = cpu.read_operand(metadata.addressing_mode);
    cpu.p.set_zn(cpu.a);
    cpu.advance(metadata);
}

/// Executes the LDX (Load X Register) instruction.
///
/// Flags affected: Z, N
pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    cpu.x = cpu.read_operand(metadata.addressing_mode);
    cpu.p.set_zn(cpu.x);
    cpu.advance(metadata);
}

/// Executes the LDY (Load Y Register) instruction.
///
/// Flags affected: Z, N
pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    cpu.y = cpu.read_operand(metadata.addressing_mode);
    cpu.p.set_zn(cpu.y);
    cpu.advance(metadata);
}

fn store<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata, value: u8) {
    let addr = cpu.operand_address(metadata.addressing_mode);
    cpu.write(addr, value);
    cpu.advance(metadata);
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    let value = cpu.a;
    store(cpu, metadata, value);
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    let value = cpu.x;
    store(cpu, metadata, value);
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    let value = cpu.y;
    store(cpu, metadata, value);
}
