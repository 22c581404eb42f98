//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX copy a register and update Z and N.
//! TXS copies X into the stack pointer and leaves the flags alone.

use crate::{MemoryBus, OpcodeMetadata, CPU};

pub(crate) fn execute_tax<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    cpu.x = cpu.a;
    cpu.p.set_zn(cpu.x);
    cpu.advance(metadata);
}

pub(crate) fn execute_tay<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    cpu.y = cpu.a;
    cpu.p.set_zn(cpu.y);
    cpu.advance(metadata);
}

pub(crate) fn execute_txa<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    cpu.a = cpu.x;
    cpu.p.set_zn(cpu.a);
    cpu.advance(metadata);
}

pub(crate) fn execute_tya<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    cpu.a = cpu.y;
    cpu.p.set_zn(cpu.a);
    cpu.advance(metadata);
}

pub(crate) fn execute_tsx<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    cpu.x = cpu.sp;
    cpu.p.set_zn(cpu.x);
    cpu.advance(metadata);
}

/// TXS is the only transfer that does not touch the flags.
pub(crate) fn execute_txs<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    cpu.sp = cpu.x;
    cpu.advance(metadata);
}
