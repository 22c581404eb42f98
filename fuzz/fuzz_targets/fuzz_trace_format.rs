//! Fuzz target for instruction trace formatting.
//!
//! Formats arbitrary bytes at an arbitrary address, including operands that
//! wrap past $FFFF. The formatter must never panic and never return an empty
//! line.

#![no_main]

use em6502::{trace::format_at, FlatMemory, MemoryBus};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (u16, [u8; 3])| {
    let (addr, bytes) = data;
    let mut memory = FlatMemory::new();
    for (i, &byte) in bytes.iter().enumerate() {
        memory.write(addr.wrapping_add(i as u16), byte);
    }

    let line = format_at(&memory, addr);
    assert!(!line.is_empty());
});
