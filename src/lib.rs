//! # em6502
//!
//! An instruction-level interpreter for the NMOS 6502 over a flat 64KB
//! address space.
//!
//! Each call to [`CPU::step`] fetches, decodes and executes exactly one
//! documented instruction and leaves the processor state as the real chip
//! would after that instruction completes. Timing is not modelled beyond an
//! approximate per-instruction cycle count.
//!
//! ## Quick Start
//!
//! ```rust
//! use em6502::CPU;
//!
//! let mut cpu = CPU::default();
//!
//! // LDA #$01 ; STA $0200 ; LDA #$05 ; STA $0201
//! let program = [0xA9, 0x01, 0x8D, 0x00, 0x02, 0xA9, 0x05, 0x8D, 0x01, 0x02];
//! cpu.load_program(&program, 0x0600);
//! cpu.run(Some(4)).unwrap();
//!
//! assert_eq!(cpu.read(0x0200), 0x01);
//! assert_eq!(cpu.read(0x0201), 0x05);
//! assert_eq!(cpu.pc(), 0x060A);
//! ```
//!
//! ## Modules
//!
//! - `cpu` - CPU state and the fetch-decode-execute loop
//! - `memory` - MemoryBus trait and the flat 64KB implementation
//! - `opcodes` - Mnemonics and the 256-entry opcode table
//! - `addressing` - Addressing modes and effective-address rules
//! - `status` - Status register flags
//! - `listeners` - Observers for memory-mapped regions
//! - `trace` - One-line instruction rendering for execution traces
//! - `assembler` - Two-pass assembler producing loadable segments
//!
//! ## Logging
//!
//! The crate logs through the `log` facade: one `trace` record per executed
//! instruction, `debug` records for initialization, loading and listener
//! registration, and an `error` record when a run stops on a bad opcode.
//! Install any logger (the `run6502` harness uses `env_logger`) to see them.

pub mod addressing;
pub mod assembler;
pub mod cpu;
pub mod listeners;
pub mod memory;
pub mod opcodes;
pub mod status;
pub mod trace;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use assembler::{assemble, assemble_at, AssemblerError, AssemblerOutput};
pub use cpu::CPU;
pub use listeners::{ListenerError, MemoryRegion, WriteObserver, MAX_WRITE_LISTENERS};
pub use memory::{FlatMemory, MemoryBus, MEMORY_SENTINEL, MEMORY_SIZE};
pub use opcodes::{Mnemonic, OpcodeMetadata, OPCODE_TABLE};
pub use status::StatusFlags;

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The byte at PC is not a documented 6502 opcode.
    ///
    /// Execution stops with every register, flag and memory byte exactly as
    /// it was before the fetch.
    IllegalOpcode {
        /// The undefined opcode byte
        opcode: u8,
        /// Address it was fetched from
        pc: u16,
    },
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::IllegalOpcode { opcode, pc } => {
                write!(f, "Illegal opcode 0x{:02X} at 0x{:04X}", opcode, pc)
            }
        }
    }
}

impl std::error::Error for ExecutionError {}
