//! # Memory Bus Abstraction
//!
//! The interpreter reaches its 64KB address space through the `MemoryBus`
//! trait. `FlatMemory` is the plain implementation: one contiguous array
//! holding code, data, the stack page and the vectors alike.
//!
//! The bus itself is side-effect free. Write notification for memory-mapped
//! devices lives one level up, in [`CPU::write`](crate::CPU::write).

/// Size of the 6502 address space in bytes.
pub const MEMORY_SIZE: usize = 0x10000;

/// Byte that `CPU::initialize` fills memory with.
///
/// `0xFF` is not a documented opcode, so running into uninitialized memory
/// stops with a decode error instead of sliding through zeroes (which would
/// execute as BRK).
pub const MEMORY_SENTINEL: u8 = 0xFF;

/// Memory bus trait for CPU to read/write bytes.
///
/// # Design
///
/// - `read(&self)`: Immutable reference allows shared reads
/// - `write(&mut self)`: Mutable reference makes side effects explicit
/// - No error types: 6502 hardware has no bus error mechanism
///
/// # Examples
///
/// ```
/// use em6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use em6502::MemoryBus;
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],
///     rom: [u8; 0x8000],
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&self, addr: u16) -> u8 {
///         if addr < 0x8000 {
///             self.ram[addr as usize]
///         } else {
///             self.rom[(addr - 0x8000) as usize]
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///         // Writes to ROM are silently ignored
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// Must never panic; every `u16` is a valid address.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// Must never panic. Read-only or unmapped addresses may ignore the write.
    fn write(&mut self, addr: u16, value: u8);

    /// Sets every address to `value`.
    ///
    /// The default goes through `write` one byte at a time; flat backends
    /// override it with a bulk fill.
    fn fill(&mut self, value: u8) {
        for addr in 0..=u16::MAX {
            self.write(addr, value);
        }
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses map to a single contiguous RAM array.
///
/// # Examples
///
/// ```
/// use em6502::{FlatMemory, MemoryBus};
///
/// let mem = FlatMemory::filled(0xFF);
/// assert_eq!(mem.read(0x0000), 0xFF);
/// assert_eq!(mem.read(0xFFFF), 0xFF);
/// ```
pub struct FlatMemory {
    data: Box<[u8; MEMORY_SIZE]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self::filled(0x00)
    }

    /// Creates a FlatMemory instance with every byte set to `value`.
    pub fn filled(value: u8) -> Self {
        Self {
            data: Box::new([value; MEMORY_SIZE]),
        }
    }

    /// Returns the whole address space as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }

    fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_memory_read_write() {
        let mut mem = FlatMemory::new();

        assert_eq!(mem.read(0x0000), 0x00);
        assert_eq!(mem.read(0xFFFF), 0x00);

        mem.write(0x1234, 0x42);
        assert_eq!(mem.read(0x1234), 0x42);

        // Neighbours untouched
        assert_eq!(mem.read(0x1233), 0x00);
        assert_eq!(mem.read(0x1235), 0x00);
    }

    #[test]
    fn test_flat_memory_fill() {
        let mut mem = FlatMemory::new();
        mem.write(0x0200, 0x11);

        mem.fill(MEMORY_SENTINEL);

        assert!(mem.as_slice().iter().all(|&b| b == MEMORY_SENTINEL));
    }

    struct CountingBus {
        writes: usize,
    }

    impl MemoryBus for CountingBus {
        fn read(&self, _addr: u16) -> u8 {
            0
        }

        fn write(&mut self, _addr: u16, _value: u8) {
            self.writes += 1;
        }
    }

    #[test]
    fn test_default_fill_covers_address_space() {
        let mut bus = CountingBus { writes: 0 };
        bus.fill(0xAA);
        assert_eq!(bus.writes, MEMORY_SIZE);
    }
}
