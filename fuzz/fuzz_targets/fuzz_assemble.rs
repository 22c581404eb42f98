//! Fuzz target for the assembler.
//!
//! Arbitrary text must either assemble or return errors, never panic. Any
//! output must load into a CPU without running past the top of memory.

#![no_main]

use em6502::{assemble_at, CPU};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (u16, &str)| {
    let (origin, source) = data;

    match assemble_at(source, origin) {
        Ok(output) => {
            let mut cpu = CPU::default();
            output.load_into(&mut cpu);
        }
        Err(errors) => assert!(!errors.is_empty()),
    }
});
