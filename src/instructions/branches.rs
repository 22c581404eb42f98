//! # Branch Instructions
//!
//! This module implements conditional branch operations:
//! - BCC / BCS: Carry clear / set
//! - BEQ / BNE: Zero set / clear
//! - BMI / BPL: Negative set / clear
//! - BVC / BVS: Overflow clear / set
//!
//! All branch instructions use relative addressing with a signed 8-bit offset
//! measured from the address after the branch (PC + 2). No flags are affected.

use crate::{AddressingMode, MemoryBus, OpcodeMetadata, StatusFlags, CPU};

/// Branches to the relative target if `flag` is in state `when`, otherwise
/// falls through to the next instruction.
fn branch_if<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
    flag: StatusFlags,
    when: bool,
) {
    if cpu.p.contains(flag) == when {
        cpu.pc = cpu.operand_address(AddressingMode::Relative);
    } else {
        cpu.advance(metadata);
    }
}

pub(crate) fn execute_bcc<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    branch_if(cpu, metadata, StatusFlags::CARRY, false);
}

pub(crate) fn execute_bcs<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    branch_if(cpu, metadata, StatusFlags::CARRY, true);
}

pub(crate) fn execute_beq<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    branch_if(cpu, metadata, StatusFlags::ZERO, true);
}

pub(crate) fn execute_bne<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    branch_if(cpu, metadata, StatusFlags::ZERO, false);
}

pub(crate) fn execute_bmi<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    branch_if(cpu, metadata, StatusFlags::NEGATIVE, true);
}

pub(crate) fn execute_bpl<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    branch_if(cpu, metadata, StatusFlags::NEGATIVE, false);
}

pub(crate) fn execute_bvc<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    branch_if(cpu, metadata, StatusFlags::OVERFLOW, false);
}

pub(crate) fn execute_bvs<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    branch_if(cpu, metadata, StatusFlags::OVERFLOW, true);
}
