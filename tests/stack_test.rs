//! Tests for PHA, PHP, PLA and PLP.

use em6502::{FlatMemory, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut cpu = CPU::default();
    cpu.load_program(program, 0x0600);
    cpu
}

#[test]
fn test_pha_writes_then_decrements() {
    let mut cpu = setup_cpu(&[0x48]);
    cpu.set_a(0x42);

    cpu.step().unwrap();

    assert_eq!(cpu.read(0x01FF), 0x42);
    assert_eq!(cpu.sp(), 0xFE);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_pha_pla_round_trip() {
    // PHA ; LDA #$00 ; PLA
    let mut cpu = setup_cpu(&[0x48, 0xA9, 0x00, 0x68]);
    cpu.set_a(0x9C);

    cpu.run(Some(3)).unwrap();

    assert_eq!(cpu.a(), 0x9C);
    assert_eq!(cpu.sp(), 0xFF);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_php_plp_round_trip_including_break() {
    // PHP ; CLC ; CLV ; PLP
    let mut cpu = setup_cpu(&[0x08, 0x18, 0xB8, 0x28]);
    cpu.set_status(0xF1);

    cpu.step().unwrap();
    assert_eq!(cpu.read(0x01FF), 0xF1);

    cpu.run(Some(3)).unwrap();

    assert_eq!(cpu.status(), 0xF1);
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_plp_replaces_every_bit() {
    let mut cpu = setup_cpu(&[0x28]);
    cpu.set_sp(0xFE);
    cpu.write(0x01FF, 0x10);
    cpu.set_status(0xEF);

    cpu.step().unwrap();

    assert_eq!(cpu.status(), 0x10);
    assert!(cpu.flag_b());
}

#[test]
fn test_stack_pointer_wraps_within_page() {
    let mut cpu = setup_cpu(&[0x48, 0x68]); // PHA ; PLA
    cpu.set_sp(0x00);
    cpu.set_a(0x77);

    cpu.step().unwrap();
    assert_eq!(cpu.read(0x0100), 0x77);
    assert_eq!(cpu.sp(), 0xFF);

    cpu.set_a(0x00);
    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x77);
    assert_eq!(cpu.sp(), 0x00);
}
