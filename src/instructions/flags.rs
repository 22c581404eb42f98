//! # Status Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED and CLV each touch exactly one flag.

use crate::{MemoryBus, OpcodeMetadata, StatusFlags, CPU};

fn set_flag<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
    flag: StatusFlags,
    value: bool,
) {
    cpu.p.set(flag, value);
    cpu.advance(metadata);
}

pub(crate) fn execute_clc<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    set_flag(cpu, metadata, StatusFlags::CARRY, false);
}

pub(crate) fn execute_sec<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    set_flag(cpu, metadata, StatusFlags::CARRY, true);
}

pub(crate) fn execute_cli<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    set_flag(cpu, metadata, StatusFlags::IRQ_DISABLE, false);
}

pub(crate) fn execute_sei<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    set_flag(cpu, metadata, StatusFlags::IRQ_DISABLE, true);
}

/// Only the flag changes; arithmetic stays binary.
pub(crate) fn execute_cld<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    set_flag(cpu, metadata, StatusFlags::DECIMAL, false);
}

/// Only the flag changes; arithmetic stays binary.
pub(crate) fn execute_sed<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    set_flag(cpu, metadata, StatusFlags::DECIMAL, true);
}

pub(crate) fn execute_clv<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    set_flag(cpu, metadata, StatusFlags::OVERFLOW, false);
}
