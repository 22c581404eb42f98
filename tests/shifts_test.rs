//! Tests for ASL, LSR, ROL and ROR in accumulator and memory modes.

use em6502::{FlatMemory, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut cpu = CPU::default();
    cpu.load_program(program, 0x0600);
    cpu
}

#[test]
fn test_asl_accumulator() {
    let mut cpu = setup_cpu(&[0x0A]);
    cpu.set_a(0x81);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x02);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.pc(), 0x0601);
}

#[test]
fn test_asl_zero_page_writes_back() {
    let mut cpu = setup_cpu(&[0x06, 0x20]); // ASL $20
    cpu.write(0x0020, 0x40);

    cpu.step().unwrap();

    assert_eq!(cpu.read(0x0020), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_lsr_accumulator_to_zero() {
    let mut cpu = setup_cpu(&[0x4A]);
    cpu.set_a(0x01);
    cpu.set_flag_n(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_lsr_absolute_x() {
    let mut cpu = setup_cpu(&[0x5E, 0x00, 0x30]); // LSR $3000,X
    cpu.set_x(0x02);
    cpu.write(0x3002, 0xFE);

    cpu.step().unwrap();

    assert_eq!(cpu.read(0x3002), 0x7F);
    assert!(!cpu.flag_c());
}

#[test]
fn test_rol_accumulator_shifts_in_carry() {
    let mut cpu = setup_cpu(&[0x2A]);
    cpu.set_a(0x40);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x81);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_rol_carry_out_and_zero() {
    let mut cpu = setup_cpu(&[0x2A]);
    cpu.set_a(0x80);
    cpu.set_flag_c(false);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_ror_accumulator_shifts_carry_into_bit7() {
    let mut cpu = setup_cpu(&[0x6A]);
    cpu.set_a(0x02);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x81);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_ror_memory_carry_out() {
    let mut cpu = setup_cpu(&[0x66, 0x10]); // ROR $10
    cpu.write(0x0010, 0x01);
    cpu.set_flag_c(false);

    cpu.step().unwrap();

    assert_eq!(cpu.read(0x0010), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
}

#[test]
fn test_rol_then_ror_restores_value_and_carry() {
    let mut cpu = setup_cpu(&[0x2A, 0x6A]); // ROL A ; ROR A
    cpu.set_a(0xB5);
    cpu.set_flag_c(true);

    cpu.run(Some(2)).unwrap();

    assert_eq!(cpu.a(), 0xB5);
    assert!(cpu.flag_c());
}
