//! Tests for register transfer instructions.

use em6502::{FlatMemory, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut cpu = CPU::default();
    cpu.load_program(program, 0x0600);
    cpu
}

#[test]
fn test_tax_tay() {
    let mut cpu = setup_cpu(&[0xAA, 0xA8]);
    cpu.set_a(0x80);

    cpu.run(Some(2)).unwrap();

    assert_eq!(cpu.x(), 0x80);
    assert_eq!(cpu.y(), 0x80);
    assert!(cpu.flag_n());
    assert_eq!(cpu.pc(), 0x0602);
}

#[test]
fn test_tax_txa_round_trip() {
    let mut cpu = setup_cpu(&[0xAA, 0xA9, 0x01, 0x8A]); // TAX ; LDA #$01 ; TXA
    cpu.set_a(0x00);

    cpu.run(Some(3)).unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_tay_tya_round_trip() {
    let mut cpu = setup_cpu(&[0xA8, 0xA9, 0x00, 0x98]); // TAY ; LDA #$00 ; TYA
    cpu.set_a(0xC3);

    cpu.run(Some(3)).unwrap();

    assert_eq!(cpu.a(), 0xC3);
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
}

#[test]
fn test_tsx_sets_flags() {
    let mut cpu = setup_cpu(&[0xBA]);

    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0xFF);
    assert!(cpu.flag_n());
}

#[test]
fn test_txs_leaves_flags() {
    let mut cpu = setup_cpu(&[0x9A]);
    cpu.set_x(0x00);
    cpu.set_status(0x80);

    cpu.step().unwrap();

    assert_eq!(cpu.sp(), 0x00);
    assert_eq!(cpu.status(), 0x80);
}
