//! Property-based tests for CPU invariants.
//!
//! These tests use proptest to verify that instruction execution maintains
//! fundamental invariants across arbitrary register and memory contents.

use em6502::{ExecutionError, FlatMemory, Mnemonic, CPU, OPCODE_TABLE};
use proptest::prelude::*;

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut cpu = CPU::default();
    cpu.load_program(program, 0x0600);
    cpu
}

/// Documented opcodes that fall through to the next instruction
fn sequential_opcodes() -> Vec<u8> {
    OPCODE_TABLE
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_documented() && !m.mnemonic.transfers_control())
        .map(|(i, _)| i as u8)
        .collect()
}

fn undocumented_opcodes() -> Vec<u8> {
    OPCODE_TABLE
        .iter()
        .enumerate()
        .filter(|(_, m)| !m.is_documented())
        .map(|(i, _)| i as u8)
        .collect()
}

fn store_opcodes() -> Vec<u8> {
    OPCODE_TABLE
        .iter()
        .enumerate()
        .filter(|(_, m)| matches!(m.mnemonic, Mnemonic::Sta | Mnemonic::Stx | Mnemonic::Sty))
        .map(|(i, _)| i as u8)
        .collect()
}

proptest! {
    /// Property: Sequential instructions advance PC by exactly their size
    #[test]
    fn prop_pc_advances_by_instruction_size(
        opcode in prop::sample::select(sequential_opcodes()),
        op1 in any::<u8>(),
        op2 in any::<u8>(),
        a in any::<u8>(),
        x in any::<u8>(),
        y in any::<u8>(),
        status in any::<u8>(),
    ) {
        let mut cpu = setup_cpu(&[opcode, op1, op2]);
        cpu.set_a(a);
        cpu.set_x(x);
        cpu.set_y(y);
        cpu.set_sp(0x80);
        cpu.set_status(status);

        cpu.step().unwrap();

        let size = OPCODE_TABLE[opcode as usize].size_bytes as u16;
        prop_assert_eq!(cpu.pc(), 0x0600 + size, "opcode 0x{:02X}", opcode);
        prop_assert_eq!(cpu.instructions(), 1);
    }

    /// Property: Undocumented opcodes stop execution without touching state
    #[test]
    fn prop_illegal_opcode_is_fatal_and_pure(
        opcode in prop::sample::select(undocumented_opcodes()),
        a in any::<u8>(),
        sp in any::<u8>(),
        status in any::<u8>(),
    ) {
        let mut cpu = setup_cpu(&[opcode, 0x00, 0x00]);
        cpu.set_a(a);
        cpu.set_sp(sp);
        cpu.set_status(status);

        let result = cpu.step();

        prop_assert_eq!(result, Err(ExecutionError::IllegalOpcode { opcode, pc: 0x0600 }));
        prop_assert_eq!(cpu.pc(), 0x0600);
        prop_assert_eq!(cpu.a(), a);
        prop_assert_eq!(cpu.sp(), sp);
        prop_assert_eq!(cpu.status(), status);
        prop_assert_eq!(cpu.cycles(), 0);
    }

    /// Property: Stores never modify the status register
    #[test]
    fn prop_stores_preserve_status(
        opcode in prop::sample::select(store_opcodes()),
        operand in any::<u8>(),
        a in any::<u8>(),
        x in any::<u8>(),
        y in any::<u8>(),
        status in any::<u8>(),
    ) {
        // High operand byte 0x30 keeps absolute stores away from the program
        let mut cpu = setup_cpu(&[opcode, operand, 0x30]);
        cpu.set_a(a);
        cpu.set_x(x);
        cpu.set_y(y);
        cpu.set_status(status);

        cpu.step().unwrap();

        prop_assert_eq!(cpu.status(), status);
    }

    /// Property: ADC wraps the full sum, but C and V ignore the carry-in
    #[test]
    fn prop_adc_flags_come_from_operands(a in any::<u8>(), m in any::<u8>(), carry in any::<bool>()) {
        let mut cpu = setup_cpu(&[0x69, m]);
        cpu.set_a(a);
        cpu.set_flag_c(carry);

        cpu.step().unwrap();

        let result = a.wrapping_add(m).wrapping_add(carry as u8);
        let signed = a as i8 as i16 + m as i8 as i16;
        let same_sign = (a ^ m) & 0x80 == 0;
        prop_assert_eq!(cpu.a(), result);
        prop_assert_eq!(cpu.flag_c(), a as u16 + m as u16 > 0xFF);
        prop_assert_eq!(cpu.flag_v(), same_sign && !(-128..=127).contains(&signed));
        prop_assert_eq!(cpu.flag_z(), result == 0);
        prop_assert_eq!(cpu.flag_n(), result & 0x80 != 0);
    }

    /// Property: SBC wraps `A - M - borrow`; without a borrow-in C is unsigned >=
    #[test]
    fn prop_sbc_result_and_carry(a in any::<u8>(), m in any::<u8>(), carry in any::<bool>()) {
        let mut cpu = setup_cpu(&[0xE9, m]);
        cpu.set_a(a);
        cpu.set_flag_c(carry);

        cpu.step().unwrap();

        let result = a.wrapping_sub(m).wrapping_sub(!carry as u8);
        prop_assert_eq!(cpu.a(), result);
        prop_assert_eq!(cpu.flag_z(), result == 0);
        prop_assert_eq!(cpu.flag_n(), result & 0x80 != 0);
        if carry {
            prop_assert_eq!(cpu.flag_c(), a >= m);
        } else {
            prop_assert_eq!(cpu.flag_c(), a as u16 > m as u16);
        }
    }

    /// Property: SBC never overflows when A and the adjusted subtrahend share a sign
    #[test]
    fn prop_sbc_like_signs_never_overflow(a in any::<u8>(), m in any::<u8>(), carry in any::<bool>()) {
        let subtrahend = m.wrapping_add(!carry as u8);
        prop_assume!((a ^ subtrahend) & 0x80 == 0);

        let mut cpu = setup_cpu(&[0xE9, m]);
        cpu.set_a(a);
        cpu.set_flag_c(carry);

        cpu.step().unwrap();

        prop_assert!(!cpu.flag_v());
    }

    /// Property: CMP carry is unsigned >=, zero is equality
    #[test]
    fn prop_cmp_flags(a in any::<u8>(), m in any::<u8>()) {
        let mut cpu = setup_cpu(&[0xC9, m]);
        cpu.set_a(a);

        cpu.step().unwrap();

        prop_assert_eq!(cpu.flag_c(), a >= m);
        prop_assert_eq!(cpu.flag_z(), a == m);
        prop_assert_eq!(cpu.flag_n(), a.wrapping_sub(m) & 0x80 != 0);
        prop_assert_eq!(cpu.a(), a);
    }

    /// Property: PHA then PLA restores A and SP from any starting SP
    #[test]
    fn prop_pha_pla_round_trip(a in any::<u8>(), sp in any::<u8>()) {
        let mut cpu = setup_cpu(&[0x48, 0xA9, 0x00, 0x68]); // PHA ; LDA #0 ; PLA
        cpu.set_a(a);
        cpu.set_sp(sp);

        cpu.run(Some(3)).unwrap();

        prop_assert_eq!(cpu.a(), a);
        prop_assert_eq!(cpu.sp(), sp);
    }

    /// Property: PHP then PLP restores P bit for bit
    #[test]
    fn prop_php_plp_round_trip(status in any::<u8>()) {
        let mut cpu = setup_cpu(&[0x08, 0xA9, 0x80, 0x38, 0x28]); // PHP ; LDA #$80 ; SEC ; PLP
        cpu.set_status(status);

        cpu.run(Some(4)).unwrap();

        prop_assert_eq!(cpu.status(), status);
    }

    /// Property: JSR followed by RTS resumes after the JSR
    #[test]
    fn prop_jsr_rts_round_trip(target in 0x1000u16..0xE000, sp in 0x02u8..=0xFF) {
        let [lo, hi] = target.to_le_bytes();
        let mut cpu = setup_cpu(&[0x20, lo, hi]);
        cpu.write(target, 0x60); // RTS
        cpu.set_sp(sp);

        cpu.run(Some(2)).unwrap();

        prop_assert_eq!(cpu.pc(), 0x0603);
        prop_assert_eq!(cpu.sp(), sp);
    }
}
