//! # Stack Instructions
//!
//! - PHA: Push Accumulator
//! - PHP: Push Processor Status
//! - PLA: Pull Accumulator
//! - PLP: Pull Processor Status
//!
//! The stack lives in page one (`$0100-$01FF`) and grows downward. SP wraps
//! within the page on overflow and underflow.

use crate::{MemoryBus, OpcodeMetadata, StatusFlags, CPU};

/// Executes the PHA (Push Accumulator) instruction. No flags affected.
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    let value = cpu.a;
    cpu.push(value);
    cpu.advance(metadata);
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The status byte is pushed exactly as stored. No flags affected.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    let status = cpu.p.bits();
    cpu.push(status);
    cpu.advance(metadata);
}

/// Executes the PLA (Pull Accumulator) instruction.
///
/// Flags affected: Z, N
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    cpu.a = cpu.pop();
    cpu.p.set_zn(cpu.a);
    cpu.advance(metadata);
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// Every bit of P is replaced by the pulled byte.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    cpu.p = StatusFlags::from_bits_retain(cpu.pop());
    cpu.advance(metadata);
}
