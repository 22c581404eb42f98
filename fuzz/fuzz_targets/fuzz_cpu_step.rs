//! Fuzz target for CPU step execution.
//!
//! Builds an arbitrary CPU state around a short instruction stream and runs
//! a few steps. Any panic is a bug: every byte either executes or stops with
//! `IllegalOpcode`, and a failed step must leave the state untouched.

#![no_main]

use arbitrary::Arbitrary;
use em6502::{ExecutionError, FlatMemory, MemoryBus, MemoryRegion, CPU};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
    /// Program start, anywhere in the address space
    pc: u16,
}

#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes placed at PC (instructions + operands)
    program: [u8; 16],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    irq_vector: u16,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    /// Optional watched region for store notifications
    watch: Option<(u16, u16)>,
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::filled(0xFF);

    for (i, &byte) in input.memory.zero_page.iter().enumerate() {
        memory.write(i as u16, byte);
    }
    for (i, &byte) in input.memory.stack_page.iter().enumerate() {
        memory.write(0x0100 + i as u16, byte);
    }
    let [lo, hi] = input.memory.irq_vector.to_le_bytes();
    memory.write(0xFFFE, lo);
    memory.write(0xFFFF, hi);

    // Program bytes wrap around the top of memory
    let pc = input.cpu_state.pc;
    for (i, &byte) in input.memory.program.iter().enumerate() {
        memory.write(pc.wrapping_add(i as u16), byte);
    }

    let mut cpu = CPU::new(memory);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);
    cpu.set_pc(pc);

    if let Some((low, high)) = input.watch {
        // Inverted ranges are rejected, which is fine
        let _ = cpu.register_write_listener(MemoryRegion::new(low, high), |_addr: u16| {});
    }

    for _ in 0..(input.steps % 8) {
        let before = (cpu.a(), cpu.x(), cpu.y(), cpu.sp(), cpu.pc(), cpu.status());
        let instructions = cpu.instructions();

        match cpu.step() {
            Ok(()) => assert_eq!(cpu.instructions(), instructions + 1),
            Err(ExecutionError::IllegalOpcode { pc, .. }) => {
                assert_eq!(pc, before.4);
                assert_eq!(
                    (cpu.a(), cpu.x(), cpu.y(), cpu.sp(), cpu.pc(), cpu.status()),
                    before
                );
                assert_eq!(cpu.instructions(), instructions);
                break;
            }
        }
    }
});
