//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status register** (P): raw flag byte, see [`StatusFlags`]
//! - **Counters**: instructions executed and approximate cycles
//! - **Write listeners**: observers for memory-mapped I/O regions
//!
//! ## Execution Model
//!
//! - `step()`: Execute one instruction
//! - `run()`: Execute up to an instruction budget
//! - `run_until()`: Same, with a caller-supplied stop predicate
//! - `run_for_cycles()`: Execute until an approximate cycle budget is used up
//!
//! Fetching an undefined opcode stops execution with
//! [`ExecutionError::IllegalOpcode`] before any state is touched.

use log::{debug, error, log_enabled, trace, Level};

use crate::addressing::{effective_address, read_word};
use crate::instructions::{
    alu, branches, control, flags, inc_dec, load_store, shifts, stack, transfer,
};
use crate::listeners::{ListenerError, MemoryRegion, WriteListeners, WriteObserver};
use crate::memory::{FlatMemory, MEMORY_SENTINEL, MEMORY_SIZE};
use crate::opcodes::{Mnemonic, OpcodeMetadata};
use crate::{trace as disasm, AddressingMode, ExecutionError, MemoryBus, StatusFlags, OPCODE_TABLE};

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Stack pointer value after initialization (stack empty, top at `$01FF`).
pub const STACK_RESET: u8 = 0xFF;

/// Address of the IRQ/BRK vector (low byte; high byte at `IRQ_VECTOR + 1`).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// 6502 CPU state and execution context.
///
/// The CPU owns its memory bus and all processor state. It is generic over
/// the memory implementation via the `MemoryBus` trait and defaults to
/// [`FlatMemory`].
///
/// # Examples
///
/// ```
/// use em6502::CPU;
///
/// let mut cpu = CPU::default();
///
/// // LDA #$2A ; STA $0200
/// cpu.load_program(&[0xA9, 0x2A, 0x8D, 0x00, 0x02], 0x0600);
/// cpu.run(Some(2)).unwrap();
///
/// assert_eq!(cpu.read(0x0200), 0x2A);
/// assert_eq!(cpu.pc(), 0x0605);
/// assert_eq!(cpu.instructions(), 2);
/// ```
pub struct CPU<M: MemoryBus = FlatMemory> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Status register, stored verbatim
    pub(crate) p: StatusFlags,

    /// Instructions executed since initialization
    pub(crate) instructions: u64,

    /// Approximate cycles executed (base costs only)
    pub(crate) cycles: u64,

    /// Memory bus implementation
    pub(crate) memory: M,

    /// Observers for memory-mapped regions
    pub(crate) listeners: WriteListeners,
}

impl Default for CPU<FlatMemory> {
    /// A CPU over 64KB of memory filled with [`MEMORY_SENTINEL`].
    fn default() -> Self {
        Self::new(FlatMemory::filled(MEMORY_SENTINEL))
    }
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a CPU in the initialized register state over `memory`.
    ///
    /// Registers are zero, SP is `0xFF`, P is clear and PC is `0x0000`.
    /// Unlike [`initialize`](Self::initialize), the memory contents are left
    /// as supplied.
    ///
    /// # Examples
    ///
    /// ```
    /// use em6502::{CPU, FlatMemory};
    ///
    /// let cpu = CPU::new(FlatMemory::new());
    /// assert_eq!(cpu.pc(), 0x0000);
    /// assert_eq!(cpu.sp(), 0xFF);
    /// assert_eq!(cpu.status(), 0x00);
    /// ```
    pub fn new(memory: M) -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: 0x0000,
            sp: STACK_RESET,
            p: StatusFlags::empty(),
            instructions: 0,
            cycles: 0,
            memory,
            listeners: WriteListeners::new(),
        }
    }

    /// Resets the CPU to its known starting state.
    ///
    /// - A, X, Y and PC are zeroed, SP is `0xFF`, P is cleared
    /// - Every memory byte is set to [`MEMORY_SENTINEL`]
    /// - Instruction and cycle counters are reset
    /// - All write listeners are removed
    ///
    /// Safe to call any number of times on the same instance.
    pub fn initialize(&mut self) {
        self.a = 0x00;
        self.x = 0x00;
        self.y = 0x00;
        self.pc = 0x0000;
        self.sp = STACK_RESET;
        self.p = StatusFlags::empty();
        self.instructions = 0;
        self.cycles = 0;
        self.listeners.clear();
        self.memory.fill(MEMORY_SENTINEL);

        debug!("CPU initialized, memory filled with 0x{:02X}", MEMORY_SENTINEL);
    }

    /// Copies a raw program image into memory at `offset` and points PC at it.
    ///
    /// Existing memory in the destination range is overwritten; everything
    /// outside it is left alone. Listeners are not notified.
    ///
    /// # Panics
    ///
    /// Panics if the image does not fit, i.e. `offset + program.len()`
    /// exceeds 65536. Wrapping around to page zero is never done silently.
    ///
    /// # Examples
    ///
    /// ```
    /// use em6502::CPU;
    ///
    /// let mut cpu = CPU::default();
    /// cpu.load_program(&[0xEA, 0xEA], 0xC000);
    /// assert_eq!(cpu.pc(), 0xC000);
    /// assert_eq!(cpu.read(0xC001), 0xEA);
    /// ```
    pub fn load_program(&mut self, program: &[u8], offset: u16) {
        let end = offset as usize + program.len();
        assert!(
            end <= MEMORY_SIZE,
            "program of {} bytes at 0x{:04X} overruns the 64KB address space",
            program.len(),
            offset
        );

        for (i, &byte) in program.iter().enumerate() {
            self.memory.write(offset.wrapping_add(i as u16), byte);
        }
        self.pc = offset;

        debug!(
            "Loaded {} byte program at 0x{:04X}-0x{:04X}",
            program.len(),
            offset,
            end.saturating_sub(1).max(offset as usize)
        );
    }

    /// Registers an observer for stores into `region`.
    ///
    /// At most [`MAX_WRITE_LISTENERS`](crate::MAX_WRITE_LISTENERS) may be
    /// registered. When regions overlap, the one registered first wins.
    ///
    /// # Errors
    ///
    /// Returns `ListenerError` if the registry is full or the region is
    /// inverted.
    pub fn register_write_listener(
        &mut self,
        region: MemoryRegion,
        observer: impl WriteObserver + 'static,
    ) -> Result<(), ListenerError> {
        self.listeners.register(region, Box::new(observer))?;
        debug!("Write listener registered for {}", region);
        Ok(())
    }

    // ========== Memory Access Layer ==========

    /// Reads a byte from memory. No side effects.
    pub fn read(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    /// Writes a byte to memory, then notifies the first listener whose
    /// region contains `addr`.
    ///
    /// Store instructions go through here. Stack pushes and read-modify-write
    /// writebacks go straight to the bus.
    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
        if !self.listeners.is_empty() {
            self.listeners.notify(addr);
        }
    }

    // ========== Execution ==========

    /// Executes one instruction and advances the CPU state.
    ///
    /// Performs the fetch-decode-execute cycle:
    /// 1. Fetch opcode byte at current PC
    /// 2. Look up instruction metadata in opcode table
    /// 3. Dispatch to the handler for the mnemonic
    /// 4. Bump the instruction and cycle counters
    ///
    /// # Errors
    ///
    /// `ExecutionError::IllegalOpcode` if the byte at PC is not a documented
    /// opcode. Registers, flags, memory and counters are left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use em6502::{CPU, ExecutionError};
    ///
    /// let mut cpu = CPU::default();
    /// cpu.load_program(&[0xFF], 0x0000);
    ///
    /// assert_eq!(
    ///     cpu.step(),
    ///     Err(ExecutionError::IllegalOpcode { opcode: 0xFF, pc: 0x0000 })
    /// );
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        let pc = self.pc;
        let opcode = self.memory.read(pc);
        let metadata = &OPCODE_TABLE[opcode as usize];

        if log_enabled!(Level::Trace) {
            trace!(
                "{:04X}  {:<14} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
                pc,
                disasm::format_at(&self.memory, pc),
                self.a,
                self.x,
                self.y,
                self.p.bits(),
                self.sp
            );
        }

        use Mnemonic::*;
        match metadata.mnemonic {
            Lda => load_store::execute_lda(self, metadata),
            Ldx => load_store::execute_ldx(self, metadata),
            Ldy => load_store::execute_ldy(self, metadata),
            Sta => load_store::execute_sta(self, metadata),
            Stx => load_store::execute_stx(self, metadata),
            Sty => load_store::execute_sty(self, metadata),

            Adc => alu::execute_adc(self, metadata),
            Sbc => alu::execute_sbc(self, metadata),
            And => alu::execute_and(self, metadata),
            Ora => alu::execute_ora(self, metadata),
            Eor => alu::execute_eor(self, metadata),
            Cmp => alu::execute_cmp(self, metadata),
            Cpx => alu::execute_cpx(self, metadata),
            Cpy => alu::execute_cpy(self, metadata),
            Bit => alu::execute_bit(self, metadata),

            Asl => shifts::execute_asl(self, metadata),
            Lsr => shifts::execute_lsr(self, metadata),
            Rol => shifts::execute_rol(self, metadata),
            Ror => shifts::execute_ror(self, metadata),

            Inc => inc_dec::execute_inc(self, metadata),
            Dec => inc_dec::execute_dec(self, metadata),
            Inx => inc_dec::execute_inx(self, metadata),
            Iny => inc_dec::execute_iny(self, metadata),
            Dex => inc_dec::execute_dex(self, metadata),
            Dey => inc_dec::execute_dey(self, metadata),

            Tax => transfer::execute_tax(self, metadata),
            Tay => transfer::execute_tay(self, metadata),
            Txa => transfer::execute_txa(self, metadata),
            Tya => transfer::execute_tya(self, metadata),
            Tsx => transfer::execute_tsx(self, metadata),
            Txs => transfer::execute_txs(self, metadata),

            Pha => stack::execute_pha(self, metadata),
            Php => stack::execute_php(self, metadata),
            Pla => stack::execute_pla(self, metadata),
            Plp => stack::execute_plp(self, metadata),

            Bcc => branches::execute_bcc(self, metadata),
            Bcs => branches::execute_bcs(self, metadata),
            Beq => branches::execute_beq(self, metadata),
            Bne => branches::execute_bne(self, metadata),
            Bmi => branches::execute_bmi(self, metadata),
            Bpl => branches::execute_bpl(self, metadata),
            Bvc => branches::execute_bvc(self, metadata),
            Bvs => branches::execute_bvs(self, metadata),

            Jmp => control::execute_jmp(self, metadata),
            Jsr => control::execute_jsr(self, metadata),
            Rts => control::execute_rts(self, metadata),
            Rti => control::execute_rti(self, metadata),
            Brk => control::execute_brk(self, metadata),
            Nop => control::execute_nop(self, metadata),

            Clc => flags::execute_clc(self, metadata),
            Sec => flags::execute_sec(self, metadata),
            Cli => flags::execute_cli(self, metadata),
            Sei => flags::execute_sei(self, metadata),
            Cld => flags::execute_cld(self, metadata),
            Sed => flags::execute_sed(self, metadata),
            Clv => flags::execute_clv(self, metadata),

            Illegal => return Err(ExecutionError::IllegalOpcode { opcode, pc }),
        }

        self.instructions += 1;
        self.cycles += metadata.base_cycles as u64;

        Ok(())
    }

    /// Runs at most `max_instructions` instructions (`None` for no limit).
    ///
    /// Returns the number of instructions executed. An unbounded run only
    /// ends on an error, typically an illegal opcode reached after the
    /// program falls off its end into sentinel-filled memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use em6502::{CPU, ExecutionError};
    ///
    /// let mut cpu = CPU::default();
    /// // INX ; INX ; then sentinel memory (0xFF)
    /// cpu.load_program(&[0xE8, 0xE8], 0x0600);
    ///
    /// let err = cpu.run(None).unwrap_err();
    /// assert_eq!(err, ExecutionError::IllegalOpcode { opcode: 0xFF, pc: 0x0602 });
    /// assert_eq!(cpu.x(), 2);
    /// ```
    pub fn run(&mut self, max_instructions: Option<u64>) -> Result<u64, ExecutionError> {
        self.run_until(max_instructions, |_| false)
    }

    /// Like [`run`](Self::run), but checks `stop` before each instruction and
    /// returns early when it yields true.
    ///
    /// # Examples
    ///
    /// ```
    /// use em6502::CPU;
    ///
    /// let mut cpu = CPU::default();
    /// // LDX #$00 ; loop: INX ; BNE loop ; BRK
    /// cpu.load_program(&[0xA2, 0x00, 0xE8, 0xD0, 0xFD, 0x00], 0x0600);
    ///
    /// let executed = cpu.run_until(None, |cpu| cpu.read(cpu.pc()) == 0x00).unwrap();
    /// assert_eq!(executed, 1 + 256 * 2);
    /// assert_eq!(cpu.pc(), 0x0605);
    /// ```
    pub fn run_until<F>(
        &mut self,
        max_instructions: Option<u64>,
        mut stop: F,
    ) -> Result<u64, ExecutionError>
    where
        F: FnMut(&CPU<M>) -> bool,
    {
        let mut executed = 0;

        while max_instructions.map_or(true, |limit| executed < limit) {
            if stop(self) {
                break;
            }
            if let Err(err) = self.step() {
                error!("{} after {} instructions", err, executed);
                return Err(err);
            }
            executed += 1;
        }

        Ok(executed)
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes instructions until the cycle budget is exhausted or an error
    /// occurs. Returns the cycles consumed, which may overshoot the budget by
    /// part of one instruction. Cycle costs are base costs only.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles + cycle_budget;

        while self.cycles < target_cycles {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    // ========== Instruction Helpers ==========

    /// Effective address of the current instruction's operand.
    ///
    /// # Panics
    ///
    /// Panics for Implicit and Accumulator modes, which the opcode table
    /// never pairs with a memory-operand instruction.
    pub(crate) fn operand_address(&self, mode: AddressingMode) -> u16 {
        match effective_address(&self.memory, mode, self.pc, self.x, self.y) {
            Some(addr) => addr,
            None => panic!("{:?} addressing has no operand address", mode),
        }
    }

    /// Operand value: the accumulator in Accumulator mode, otherwise the
    /// byte at the effective address.
    pub(crate) fn read_operand(&self, mode: AddressingMode) -> u8 {
        match mode {
            AddressingMode::Accumulator => self.a,
            _ => self.memory.read(self.operand_address(mode)),
        }
    }

    /// Moves PC past the current instruction.
    pub(crate) fn advance(&mut self, metadata: &OpcodeMetadata) {
        self.pc = self.pc.wrapping_add(metadata.size_bytes as u16);
    }

    /// Pushes a byte: write at `$0100 | SP`, then decrement SP.
    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pops a byte: increment SP, then read at `$0100 | SP`.
    pub(crate) fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.sp as u16)
    }

    /// Pushes a word high byte first, so it sits little-endian in memory.
    pub(crate) fn push_word(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push(hi);
        self.push(lo);
    }

    /// Pops a word pushed by `push_word`.
    pub(crate) fn pop_word(&mut self) -> u16 {
        let lo = self.pop();
        let hi = self.pop();
        u16::from_le_bytes([lo, hi])
    }

    /// Reads the IRQ/BRK vector.
    pub(crate) fn irq_vector(&self) -> u16 {
        read_word(&self.memory, IRQ_VECTOR)
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte (NV-BDIZC).
    ///
    /// The byte is returned exactly as stored; bit 5 is not forced on.
    pub fn status(&self) -> u8 {
        self.p.bits()
    }

    /// Returns the status register as flags.
    pub fn flags(&self) -> StatusFlags {
        self.p
    }

    /// Returns the number of instructions executed since initialization.
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    /// Returns the approximate number of cycles executed since initialization.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns a shared reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    ///
    /// Writes made through the bus bypass the write listeners.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.p.contains(StatusFlags::NEGATIVE)
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.p.contains(StatusFlags::OVERFLOW)
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.p.contains(StatusFlags::BREAK)
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.p.contains(StatusFlags::DECIMAL)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.p.contains(StatusFlags::IRQ_DISABLE)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.p.contains(StatusFlags::ZERO)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.p.contains(StatusFlags::CARRY)
    }

    // ========== Setters ==========

    /// Sets the accumulator.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter. The next `step` fetches from here.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer (offset into page 0x01).
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Replaces the whole status register with `value`, bit for bit.
    pub fn set_status(&mut self, value: u8) {
        self.p = StatusFlags::from_bits_retain(value);
    }

    /// Sets or clears the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.p.set(StatusFlags::NEGATIVE, value);
    }

    /// Sets or clears the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.p.set(StatusFlags::OVERFLOW, value);
    }

    /// Sets or clears the Break flag.
    pub fn set_flag_b(&mut self, value: bool) {
        self.p.set(StatusFlags::BREAK, value);
    }

    /// Sets or clears the Decimal flag. Arithmetic stays binary either way.
    pub fn set_flag_d(&mut self, value: bool) {
        self.p.set(StatusFlags::DECIMAL, value);
    }

    /// Sets or clears the Interrupt Disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.p.set(StatusFlags::IRQ_DISABLE, value);
    }

    /// Sets or clears the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.p.set(StatusFlags::ZERO, value);
    }

    /// Sets or clears the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.p.set(StatusFlags::CARRY, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_initialization() {
        let mut cpu = CPU::new(FlatMemory::new());
        cpu.set_a(0x12);
        cpu.set_x(0x34);
        cpu.set_status(0xFF);
        cpu.set_sp(0x80);
        cpu.set_pc(0x1234);
        cpu.memory_mut().write(0x4000, 0x00);

        cpu.initialize();

        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.y(), 0x00);
        assert_eq!(cpu.pc(), 0x0000);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.status(), 0x00);
        assert_eq!(cpu.instructions(), 0);
        assert_eq!(cpu.cycles(), 0);
        assert_eq!(cpu.read(0x4000), MEMORY_SENTINEL);
    }

    #[test]
    fn test_initialize_clears_listeners() {
        let mut cpu = CPU::default();
        cpu.register_write_listener(MemoryRegion::new(0, 0xFFFF), |_addr: u16| {})
            .unwrap();
        assert_eq!(cpu.listeners.len(), 1);

        cpu.initialize();
        assert!(cpu.listeners.is_empty());
    }

    #[test]
    fn test_push_pop_wraps_within_stack_page() {
        let mut cpu = CPU::default();
        cpu.set_sp(0x00);

        cpu.push(0xAB);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.read(0x0100), 0xAB);

        assert_eq!(cpu.pop(), 0xAB);
        assert_eq!(cpu.sp(), 0x00);
    }

    #[test]
    fn test_push_word_layout() {
        let mut cpu = CPU::default();
        cpu.push_word(0x1234);

        assert_eq!(cpu.read(0x01FF), 0x12);
        assert_eq!(cpu.read(0x01FE), 0x34);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.pop_word(), 0x1234);
        assert_eq!(cpu.sp(), 0xFF);
    }

    #[test]
    fn test_step_counts_instructions_and_cycles() {
        let mut cpu = CPU::default();
        cpu.load_program(&[0xEA, 0xAD, 0x00, 0x02], 0x0600); // NOP ; LDA $0200

        cpu.step().unwrap();
        cpu.step().unwrap();

        assert_eq!(cpu.instructions(), 2);
        assert_eq!(cpu.cycles(), 2 + 4);
    }

    #[test]
    fn test_illegal_opcode_leaves_state_untouched() {
        let mut cpu = CPU::default();
        cpu.load_program(&[0x02], 0x0300);
        cpu.set_a(0x11);
        cpu.set_status(0x81);

        let err = cpu.step().unwrap_err();

        assert_eq!(err, ExecutionError::IllegalOpcode { opcode: 0x02, pc: 0x0300 });
        assert_eq!(cpu.pc(), 0x0300);
        assert_eq!(cpu.a(), 0x11);
        assert_eq!(cpu.status(), 0x81);
        assert_eq!(cpu.instructions(), 0);
        assert_eq!(cpu.cycles(), 0);
    }

    #[test]
    fn test_run_respects_budget() {
        let mut cpu = CPU::default();
        cpu.load_program(&[0xEA; 10], 0x0600);

        assert_eq!(cpu.run(Some(4)).unwrap(), 4);
        assert_eq!(cpu.pc(), 0x0604);
        assert_eq!(cpu.run(Some(0)).unwrap(), 0);
        assert_eq!(cpu.pc(), 0x0604);
    }

    #[test]
    fn test_run_for_cycles() {
        let mut cpu = CPU::default();
        cpu.load_program(&[0xEA; 16], 0x8000);

        // NOP costs 2 cycles, so 10 cycles is 5 NOPs
        assert_eq!(cpu.run_for_cycles(10).unwrap(), 10);
        assert_eq!(cpu.pc(), 0x8005);
    }

    #[test]
    #[should_panic(expected = "overruns the 64KB address space")]
    fn test_load_program_out_of_range_panics() {
        let mut cpu = CPU::default();
        cpu.load_program(&[0xEA, 0xEA], 0xFFFF);
    }

    #[test]
    fn test_load_program_to_top_of_memory() {
        let mut cpu = CPU::default();
        cpu.load_program(&[0x00, 0x06], 0xFFFE);
        assert_eq!(cpu.irq_vector(), 0x0600);
    }
}
