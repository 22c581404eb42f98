//! Tests for the arithmetic and logic instructions.
//!
//! Tests cover:
//! - ADC / SBC carry, overflow and borrow behaviour
//! - AND, ORA, EOR
//! - CMP, CPX, CPY flag results
//! - BIT flag sourcing

use em6502::{FlatMemory, CPU};

/// Helper function to create a CPU with `program` loaded at 0x0600
fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut cpu = CPU::default();
    cpu.load_program(program, 0x0600);
    cpu
}

// ========== ADC ==========

#[test]
fn test_adc_immediate_basic() {
    let mut cpu = setup_cpu(&[0x69, 0x05]); // ADC #$05
    cpu.set_a(0x10);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x15);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.pc(), 0x0602);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_adc_with_carry_in() {
    let mut cpu = setup_cpu(&[0x69, 0x05]);
    cpu.set_a(0x10);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x16);
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_positive_overflow() {
    let mut cpu = setup_cpu(&[0x69, 0x01]);
    cpu.set_a(0x7F);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_v());
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_adc_negative_overflow_with_carry_out() {
    let mut cpu = setup_cpu(&[0x69, 0xFF]);
    cpu.set_a(0x80);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x7F);
    assert!(cpu.flag_c());
    assert!(cpu.flag_v());
    assert!(!cpu.flag_n());
}

#[test]
fn test_adc_zero_result_from_wrap() {
    let mut cpu = setup_cpu(&[0x69, 0x01]);
    cpu.set_a(0xFF);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_v());
}

#[test]
fn test_adc_carry_in_does_not_set_overflow() {
    // 0x7F + 0x00 is in range, so the carry-in alone leaves V clear
    let mut cpu = setup_cpu(&[0x69, 0x00]);
    cpu.set_a(0x7F);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x80);
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_adc_carry_in_does_not_set_carry() {
    // 0xFF + 0x00 fits in a byte; the carry-in only wraps the result
    let mut cpu = setup_cpu(&[0x69, 0x00]);
    cpu.set_a(0xFF);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_v());
}

#[test]
fn test_adc_absolute_x() {
    let mut cpu = setup_cpu(&[0x7D, 0xF0, 0x12]); // ADC $12F0,X
    cpu.set_x(0x20);
    cpu.write(0x1310, 0x03);
    cpu.set_a(0x04);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x07);
    assert_eq!(cpu.pc(), 0x0603);
    assert_eq!(cpu.cycles(), 4);
}

// ========== SBC ==========

#[test]
fn test_sbc_no_borrow() {
    let mut cpu = setup_cpu(&[0xE9, 0x03]); // SBC #$03
    cpu.set_a(0x10);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x0D);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_v());
}

#[test]
fn test_sbc_borrow_in() {
    let mut cpu = setup_cpu(&[0xE9, 0x03]);
    cpu.set_a(0x10);
    cpu.set_flag_c(false);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x0C);
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_borrow_out() {
    let mut cpu = setup_cpu(&[0xE9, 0x02]);
    cpu.set_a(0x01);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xFF);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
    assert!(!cpu.flag_v());
}

#[test]
fn test_sbc_signed_overflow() {
    let mut cpu = setup_cpu(&[0xE9, 0x01]);
    cpu.set_a(0x80);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x7F);
    assert!(cpu.flag_v());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
}

#[test]
fn test_sbc_equal_operands_is_zero() {
    let mut cpu = setup_cpu(&[0xE5, 0x40]); // SBC $40
    cpu.write(0x0040, 0x42);
    cpu.set_a(0x42);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_borrow_in_joins_subtrahend_for_overflow() {
    // Subtrahend is 0x7F + 1 = 0x80 (-128); 0 - (-128) leaves the signed range
    let mut cpu = setup_cpu(&[0xE9, 0x7F]);
    cpu.set_a(0x00);
    cpu.set_flag_c(false);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_v());
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_sbc_without_borrow_in_stays_in_range() {
    // Same operand with C set: 0 - 0x7F is -127, no overflow
    let mut cpu = setup_cpu(&[0xE9, 0x7F]);
    cpu.set_a(0x00);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x81);
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_c());
}

#[test]
fn test_sbc_ff_with_borrow_in_always_borrows() {
    let mut cpu = setup_cpu(&[0xE9, 0xFF]);
    cpu.set_a(0x10);
    cpu.set_flag_c(false);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x10);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_v());
}

#[test]
fn test_decimal_flag_does_not_change_arithmetic() {
    let mut cpu = setup_cpu(&[0x69, 0x01]);
    cpu.set_flag_d(true);
    cpu.set_a(0x09);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x0A);
}

// ========== Logic ==========

#[test]
fn test_and_immediate() {
    let mut cpu = setup_cpu(&[0x29, 0x0F]);
    cpu.set_a(0xF3);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x03);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_and_zero_result() {
    let mut cpu = setup_cpu(&[0x29, 0x0F]);
    cpu.set_a(0xF0);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_ora_sets_negative() {
    let mut cpu = setup_cpu(&[0x09, 0x80]);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x81);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_eor_indirect_y() {
    let mut cpu = setup_cpu(&[0x51, 0x20]); // EOR ($20),Y
    cpu.write(0x0020, 0x00);
    cpu.write(0x0021, 0x30);
    cpu.write(0x3005, 0xFF);
    cpu.set_y(0x05);
    cpu.set_a(0x0F);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xF0);
    assert!(cpu.flag_n());
    assert_eq!(cpu.pc(), 0x0602);
}

#[test]
fn test_logic_leaves_carry_and_overflow() {
    let mut cpu = setup_cpu(&[0x49, 0xFF]);
    cpu.set_flag_c(true);
    cpu.set_flag_v(true);

    cpu.step().unwrap();

    assert!(cpu.flag_c());
    assert!(cpu.flag_v());
}

// ========== Compare ==========

#[test]
fn test_cmp_greater() {
    let mut cpu = setup_cpu(&[0xC9, 0x10]);
    cpu.set_a(0x20);

    cpu.step().unwrap();

    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.a(), 0x20);
}

#[test]
fn test_cmp_equal() {
    let mut cpu = setup_cpu(&[0xC9, 0x42]);
    cpu.set_a(0x42);

    cpu.step().unwrap();

    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_cmp_less() {
    let mut cpu = setup_cpu(&[0xC9, 0x20]);
    cpu.set_a(0x10);

    cpu.step().unwrap();

    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n()); // 0x10 - 0x20 = 0xF0
}

#[test]
fn test_cpx_zero_page() {
    let mut cpu = setup_cpu(&[0xE4, 0x10]); // CPX $10
    cpu.write(0x0010, 0x05);
    cpu.set_x(0x05);

    cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert_eq!(cpu.pc(), 0x0602);
}

#[test]
fn test_cpy_absolute() {
    let mut cpu = setup_cpu(&[0xCC, 0x00, 0x30]); // CPY $3000
    cpu.write(0x3000, 0x80);
    cpu.set_y(0x7F);

    cpu.step().unwrap();

    assert!(!cpu.flag_c());
    assert!(cpu.flag_n()); // 0x7F - 0x80 = 0xFF
    assert_eq!(cpu.pc(), 0x0603);
}

// ========== BIT ==========

#[test]
fn test_bit_sources_flags_from_memory() {
    let mut cpu = setup_cpu(&[0x24, 0x10]); // BIT $10
    cpu.write(0x0010, 0x40);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert!(cpu.flag_v());
    assert_eq!(cpu.a(), 0x01);
}

#[test]
fn test_bit_negative_and_nonzero() {
    let mut cpu = setup_cpu(&[0x2C, 0x00, 0x20]); // BIT $2000
    cpu.write(0x2000, 0x81);
    cpu.set_a(0x01);
    cpu.set_flag_v(true);

    cpu.step().unwrap();

    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
    assert!(!cpu.flag_v());
}
