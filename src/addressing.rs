//! # Addressing Modes
//!
//! The 13 addressing modes of the 6502 and the effective-address rules for
//! each of them.
//!
//! Zero-page family modes add their index in 8-bit arithmetic, so the result
//! always stays inside `$0000-$00FF`. Absolute family modes add in 16-bit
//! arithmetic and may carry into the next page (wrapping at `$FFFF`).

use crate::MemoryBus;

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X register, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y register, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit displacement for branch instructions.
    ///
    /// The displacement is relative to the address after the branch.
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through 16-bit pointer. Only used by JMP.
    ///
    /// Example: JMP ($FFFC)
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_len(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// Reads a little-endian word from two independently supplied addresses.
pub(crate) fn read_word_at<M: MemoryBus>(bus: &M, lo_addr: u16, hi_addr: u16) -> u16 {
    u16::from_le_bytes([bus.read(lo_addr), bus.read(hi_addr)])
}

/// Reads a little-endian word from `addr` and `addr + 1`.
pub(crate) fn read_word<M: MemoryBus>(bus: &M, addr: u16) -> u16 {
    read_word_at(bus, addr, addr.wrapping_add(1))
}

/// Reads a pointer stored in zero page; the high byte wraps within page zero.
fn read_zp_pointer<M: MemoryBus>(bus: &M, zp: u8) -> u16 {
    read_word_at(bus, zp as u16, zp.wrapping_add(1) as u16)
}

/// Computes the effective address of the instruction at `pc`.
///
/// `pc` is the address of the opcode byte; operands are read from `pc + 1`
/// and `pc + 2`. Returns `None` for Implicit and Accumulator modes, which
/// have no memory operand.
///
/// - Immediate yields `pc + 1`, the address of the operand byte itself.
/// - Relative yields the branch target (`pc + 2 + displacement`).
/// - Indirect is a plain 16-bit pointer fetch; the NMOS page-wrap bug of
///   `JMP ($xxFF)` is not reproduced.
///
/// # Examples
///
/// ```
/// use em6502::{addressing::effective_address, AddressingMode, FlatMemory, MemoryBus};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x0601, 0xFF); // operand of e.g. LDA $FF,X
///
/// // Zero-page indexing wraps inside page zero
/// let addr = effective_address(&mem, AddressingMode::ZeroPageX, 0x0600, 0x02, 0x00);
/// assert_eq!(addr, Some(0x0001));
///
/// // Absolute indexing carries into the next page
/// mem.write(0x0602, 0x12);
/// let addr = effective_address(&mem, AddressingMode::AbsoluteY, 0x0600, 0x00, 0x02);
/// assert_eq!(addr, Some(0x1301));
/// ```
pub fn effective_address<M: MemoryBus>(
    bus: &M,
    mode: AddressingMode,
    pc: u16,
    x: u8,
    y: u8,
) -> Option<u16> {
    let operand_addr = pc.wrapping_add(1);
    let op = bus.read(operand_addr);

    let addr = match mode {
        AddressingMode::Implicit | AddressingMode::Accumulator => return None,
        AddressingMode::Immediate => operand_addr,
        AddressingMode::ZeroPage => op as u16,
        AddressingMode::ZeroPageX => op.wrapping_add(x) as u16,
        AddressingMode::ZeroPageY => op.wrapping_add(y) as u16,
        AddressingMode::Relative => pc
            .wrapping_add(2)
            .wrapping_add_signed(op as i8 as i16),
        AddressingMode::Absolute => read_word(bus, operand_addr),
        AddressingMode::AbsoluteX => read_word(bus, operand_addr).wrapping_add(x as u16),
        AddressingMode::AbsoluteY => read_word(bus, operand_addr).wrapping_add(y as u16),
        AddressingMode::Indirect => read_word(bus, read_word(bus, operand_addr)),
        AddressingMode::IndirectX => read_zp_pointer(bus, op.wrapping_add(x)),
        AddressingMode::IndirectY => read_zp_pointer(bus, op).wrapping_add(y as u16),
    };

    Some(addr)
}
