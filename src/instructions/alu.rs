//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND, ORA, EOR: Bitwise logic on the accumulator
//! - CMP, CPX, CPY: Register comparisons
//! - BIT: Bit test
//!
//! Arithmetic is binary only. The D flag is stored but never consulted.

use crate::{MemoryBus, OpcodeMetadata, StatusFlags, CPU};

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator. C and V are
/// decided by the accumulator and operand alone; the incoming carry only
/// feeds the result.
///
/// Flags affected:
/// - C: Set if `A + M` exceeds 0xFF
/// - V: Set if A and M share a sign and their signed sum leaves -128..=127
/// - Z, N: From the result
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    let value = cpu.read_operand(metadata.addressing_mode);
    let a = cpu.a;
    let carry_in = cpu.p.contains(StatusFlags::CARRY) as u8;

    let result = a.wrapping_add(value).wrapping_add(carry_in);

    cpu.p.set(StatusFlags::CARRY, a as u16 + value as u16 > 0xFF);

    let same_sign = (a ^ value) & 0x80 == 0;
    let signed = a as i8 as i16 + value as i8 as i16;
    cpu.p.set(
        StatusFlags::OVERFLOW,
        same_sign && !(-128..=127).contains(&signed),
    );

    cpu.a = result;
    cpu.p.set_zn(result);
    cpu.advance(metadata);
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Computes `A - (M + (1 - C))`. The flags are taken from the accumulator
/// and that adjusted subtrahend. Carry set afterwards means no borrow was
/// needed.
///
/// Flags affected:
/// - C: Set if `A - (M + borrow)` did not go below zero
/// - V: Set if A and the subtrahend differ in sign and their signed
///   difference leaves -128..=127
/// - Z, N: From the result
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    let value = cpu.read_operand(metadata.addressing_mode);
    let a = cpu.a;
    let borrow = !cpu.p.contains(StatusFlags::CARRY) as u16;

    let subtrahend = value as u16 + borrow;
    let result = a.wrapping_sub(subtrahend as u8);

    cpu.p.set(StatusFlags::CARRY, a as i16 - subtrahend as i16 >= 0);

    // 8-bit view of the subtrahend, as it would sit in a register
    let narrow = subtrahend as u8;
    let differ_sign = (a ^ narrow) & 0x80 != 0;
    let signed = a as i8 as i16 - narrow as i8 as i16;
    cpu.p.set(
        StatusFlags::OVERFLOW,
        differ_sign && !(-128..=127).contains(&signed),
    );

    cpu.a = result;
    cpu.p.set_zn(result);
    cpu.advance(metadata);
}

/// Executes the AND (Logical AND) instruction. Updates Z and N.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    let value = cpu.read_operand(metadata.addressing_mode);
    cpu.a &= value;
    cpu.p.set_zn(cpu.a);
    cpu.advance(metadata);
}

/// Executes the ORA (Logical Inclusive OR) instruction. Updates Z and N.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    let value = cpu.read_operand(metadata.addressing_mode);
    cpu.a |= value;
    cpu.p.set_zn(cpu.a);
    cpu.advance(metadata);
}

/// Executes the EOR (Exclusive OR) instruction. Updates Z and N.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    let value = cpu.read_operand(metadata.addressing_mode);
    cpu.a ^= value;
    cpu.p.set_zn(cpu.a);
    cpu.advance(metadata);
}

/// Shared comparison for CMP, CPX and CPY.
///
/// - C: Set if register >= operand (unsigned)
/// - Z: Set if register == operand
/// - N: Bit 7 of `register - operand`
fn compare<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata, register: u8) {
    let value = cpu.read_operand(metadata.addressing_mode);
    let result = register.wrapping_sub(value);

    cpu.p.set(StatusFlags::CARRY, register >= value);
    cpu.p.set_zn(result);
    cpu.advance(metadata);
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    let register = cpu.a;
    compare(cpu, metadata, register);
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    let register = cpu.x;
    compare(cpu, metadata, register);
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    let register = cpu.y;
    compare(cpu, metadata, register);
}

/// Executes the BIT (Bit Test) instruction.
///
/// The accumulator is not modified.
///
/// Flags affected:
/// - Z: Set if `A & M` is zero
/// - N: Copied from bit 7 of M
/// - V: Copied from bit 6 of M
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) {
    let value = cpu.read_operand(metadata.addressing_mode);

    cpu.p.set(StatusFlags::ZERO, cpu.a & value == 0);
    cpu.p.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
    cpu.p.set(StatusFlags::OVERFLOW, value & 0x40 != 0);

    cpu.advance(metadata);
}
