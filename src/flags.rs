use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Status flags at their EFLAGS bit positions.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FlagSet: u16 {
        const CARRY = 1 << 0;
        const PARITY = 1 << 2;
        const AUX_CARRY = 1 << 4;
        const ZERO = 1 << 6;
        const SIGN = 1 << 7;
        const OVERFLOW = 1 << 11;
    }
}

impl FlagSet {
    pub const ARITHMETIC: FlagSet = FlagSet::all();

    /// Keeps only the status bits of a raw EFLAGS/RFLAGS value.
    pub fn from_eflags(raw: u64) -> FlagSet {
        FlagSet::from_bits_truncate((raw & 0xFFFF) as u16)
    }

    pub fn with_carry(carry: bool) -> FlagSet {
        let mut flags = FlagSet::empty();
        flags.set(FlagSet::CARRY, carry);
        flags
    }
}

pub fn equals_under_mask(a: FlagSet, b: FlagSet, mask: FlagSet) -> bool {
    (a & mask) == (b & mask)
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // fixed order, one letter per flag, '-' when clear
        let letters = [
            (FlagSet::OVERFLOW, 'O'),
            (FlagSet::SIGN, 'S'),
            (FlagSet::ZERO, 'Z'),
            (FlagSet::AUX_CARRY, 'A'),
            (FlagSet::PARITY, 'P'),
            (FlagSet::CARRY, 'C'),
        ];
        for (flag, letter) in letters {
            let c = if self.contains(flag) { letter } else { '-' };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
