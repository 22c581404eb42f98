//! # Processor Status Register
//!
//! The 6502 packs its condition flags into a single byte (NV-BDIZC). The
//! register is kept as that raw byte so PLP and RTI restore whatever was on the
//! stack bit-for-bit, including the Break bit and the unused bit 5.

use bitflags::bitflags;

bitflags! {
    /// Status register (P) bit layout.
    ///
    /// | Bit | Flag | Meaning |
    /// |-----|------|---------|
    /// | 7 | N | Negative (bit 7 of the last result) |
    /// | 6 | V | Signed overflow |
    /// | 5 | - | Unused |
    /// | 4 | B | Break (set in the copy pushed by BRK) |
    /// | 3 | D | Decimal mode (stored only, BCD is not emulated) |
    /// | 2 | I | IRQ disable |
    /// | 1 | Z | Zero |
    /// | 0 | C | Carry |
    ///
    /// # Examples
    ///
    /// ```
    /// use em6502::StatusFlags;
    ///
    /// let p = StatusFlags::CARRY | StatusFlags::NEGATIVE;
    /// assert_eq!(p.bits(), 0x81);
    ///
    /// // Unknown bits are retained, not dropped
    /// let raw = StatusFlags::from_bits_retain(0x20);
    /// assert_eq!(raw.bits(), 0x20);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StatusFlags: u8 {
        const CARRY = 0b0000_0001;
        const ZERO = 0b0000_0010;
        const IRQ_DISABLE = 0b0000_0100;
        const DECIMAL = 0b0000_1000;
        const BREAK = 0b0001_0000;
        const UNUSED = 0b0010_0000;
        const OVERFLOW = 0b0100_0000;
        const NEGATIVE = 0b1000_0000;
    }
}

impl StatusFlags {
    /// Sets Z and N from a result byte, leaving every other bit alone.
    pub fn set_zn(&mut self, result: u8) {
        self.set(StatusFlags::ZERO, result == 0);
        self.set(StatusFlags::NEGATIVE, result & 0x80 != 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_zn_zero() {
        let mut p = StatusFlags::NEGATIVE | StatusFlags::CARRY;
        p.set_zn(0x00);
        assert!(p.contains(StatusFlags::ZERO));
        assert!(!p.contains(StatusFlags::NEGATIVE));
        assert!(p.contains(StatusFlags::CARRY));
    }

    #[test]
    fn test_set_zn_negative() {
        let mut p = StatusFlags::ZERO;
        p.set_zn(0x80);
        assert!(!p.contains(StatusFlags::ZERO));
        assert!(p.contains(StatusFlags::NEGATIVE));
    }

    #[test]
    fn test_raw_bits_round_trip() {
        for bits in 0..=0xFFu8 {
            assert_eq!(StatusFlags::from_bits_retain(bits).bits(), bits);
        }
    }
}
