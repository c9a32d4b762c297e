use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperandSize {
    Byte,
    Word,
    DoubleWord,
    QuadWord,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown operand size `{0}`")]
pub struct ParseSizeError(pub String);

impl OperandSize {
    pub const ALL: [OperandSize; 4] = [
        OperandSize::Byte,
        OperandSize::Word,
        OperandSize::DoubleWord,
        OperandSize::QuadWord,
    ];

    pub const fn bits(self) -> u32 {
        match self {
            OperandSize::Byte => 8,
            OperandSize::Word => 16,
            OperandSize::DoubleWord => 32,
            OperandSize::QuadWord => 64,
        }
    }

    /// Largest unsigned value at this width.
    pub const fn mask(self) -> u64 {
        u64::MAX >> (64 - self.bits())
    }

    pub const fn sign_bit(self) -> u64 {
        1 << (self.bits() - 1)
    }

    pub const fn truncate(self, value: u64) -> u64 {
        value & self.mask()
    }

    pub const fn sign_extend(self, value: u64) -> i64 {
        let shift = 64 - self.bits();
        ((value << shift) as i64) >> shift
    }

    pub const fn is_negative(self, value: u64) -> bool {
        value & self.sign_bit() != 0
    }

    /// Shift and rotate counts are masked to five bits, six for 64-bit operands.
    pub const fn count_mask(self) -> u64 {
        match self {
            OperandSize::QuadWord => 0x3F,
            _ => 0x1F,
        }
    }

    /// AT&T mnemonic suffix.
    pub const fn suffix(self) -> char {
        match self {
            OperandSize::Byte => 'b',
            OperandSize::Word => 'w',
            OperandSize::DoubleWord => 'l',
            OperandSize::QuadWord => 'q',
        }
    }
}

impl fmt::Display for OperandSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperandSize::Byte => "byte",
            OperandSize::Word => "word",
            OperandSize::DoubleWord => "dword",
            OperandSize::QuadWord => "qword",
        };
        f.write_str(name)
    }
}

impl FromStr for OperandSize {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "byte" => Ok(OperandSize::Byte),
            "w" | "word" => Ok(OperandSize::Word),
            "l" | "d" | "dword" | "doubleword" => Ok(OperandSize::DoubleWord),
            "q" | "qword" | "quadword" => Ok(OperandSize::QuadWord),
            _ => Err(ParseSizeError(s.to_string())),
        }
    }
}
