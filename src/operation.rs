use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{flags::FlagSet, operand::OperandSize, vector::TestVector};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Add,
    Sub,
    And,
    Or,
    Xor,
    Cmp,
    Adc,
    Sbb,
    Inc,
    Dec,
    Neg,
    Not,
    Shl,
    Shr,
    Sar,
    Rol,
    Ror,
    Rcl,
    Rcr,
    Shld,
    Shrd,
    Bt,
    Bts,
    Btr,
    Btc,
    Bsf,
    Bsr,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown operation `{0}`")]
pub struct ParseOperationError(pub String);

const ALU_FLAGS: FlagSet = FlagSet::ARITHMETIC;
const LOGIC_FLAGS: FlagSet = FlagSet::ARITHMETIC.difference(FlagSet::AUX_CARRY);
const SHIFT_FLAGS: FlagSet = FlagSet::ARITHMETIC.difference(FlagSet::AUX_CARRY);
const INC_DEC_FLAGS: FlagSet = FlagSet::ARITHMETIC.difference(FlagSet::CARRY);
const ROTATE_FLAGS: FlagSet = FlagSet::CARRY.union(FlagSet::OVERFLOW);

impl OperationKind {
    pub const ALL: [OperationKind; 27] = [
        OperationKind::Add,
        OperationKind::Sub,
        OperationKind::And,
        OperationKind::Or,
        OperationKind::Xor,
        OperationKind::Cmp,
        OperationKind::Adc,
        OperationKind::Sbb,
        OperationKind::Inc,
        OperationKind::Dec,
        OperationKind::Neg,
        OperationKind::Not,
        OperationKind::Shl,
        OperationKind::Shr,
        OperationKind::Sar,
        OperationKind::Rol,
        OperationKind::Ror,
        OperationKind::Rcl,
        OperationKind::Rcr,
        OperationKind::Shld,
        OperationKind::Shrd,
        OperationKind::Bt,
        OperationKind::Bts,
        OperationKind::Btr,
        OperationKind::Btc,
        OperationKind::Bsf,
        OperationKind::Bsr,
    ];

    pub const fn mnemonic(self) -> &'static str {
        match self {
            OperationKind::Add => "add",
            OperationKind::Sub => "sub",
            OperationKind::And => "and",
            OperationKind::Or => "or",
            OperationKind::Xor => "xor",
            OperationKind::Cmp => "cmp",
            OperationKind::Adc => "adc",
            OperationKind::Sbb => "sbb",
            OperationKind::Inc => "inc",
            OperationKind::Dec => "dec",
            OperationKind::Neg => "neg",
            OperationKind::Not => "not",
            OperationKind::Shl => "shl",
            OperationKind::Shr => "shr",
            OperationKind::Sar => "sar",
            OperationKind::Rol => "rol",
            OperationKind::Ror => "ror",
            OperationKind::Rcl => "rcl",
            OperationKind::Rcr => "rcr",
            OperationKind::Shld => "shld",
            OperationKind::Shrd => "shrd",
            OperationKind::Bt => "bt",
            OperationKind::Bts => "bts",
            OperationKind::Btr => "btr",
            OperationKind::Btc => "btc",
            OperationKind::Bsf => "bsf",
            OperationKind::Bsr => "bsr",
        }
    }

    /// Flags the family is architecturally defined to produce. Everything
    /// else is undefined after the instruction and must not be compared.
    pub const fn relevant_mask(self) -> FlagSet {
        use OperationKind::*;
        match self {
            Add | Sub | Cmp | Adc | Sbb | Neg => ALU_FLAGS,
            And | Or | Xor => LOGIC_FLAGS,
            Inc | Dec => INC_DEC_FLAGS,
            // NOT leaves every flag untouched
            Not => FlagSet::empty(),
            Shl | Shr | Sar | Shld | Shrd => SHIFT_FLAGS,
            Rol | Ror | Rcl | Rcr => ROTATE_FLAGS,
            Bt | Bts | Btr | Btc => FlagSet::CARRY,
            Bsf | Bsr => FlagSet::ZERO,
        }
    }

    pub const fn arity(self) -> usize {
        use OperationKind::*;
        match self {
            Inc | Dec | Neg | Not => 1,
            Shld | Shrd => 3,
            _ => 2,
        }
    }

    pub const fn consumes_carry(self) -> bool {
        matches!(
            self,
            OperationKind::Adc | OperationKind::Sbb | OperationKind::Rcl | OperationKind::Rcr
        )
    }

    /// Bit tests, bit scans and double shifts have no 8-bit encoding.
    pub const fn supports(self, size: OperandSize) -> bool {
        use OperationKind::*;
        match self {
            Shld | Shrd | Bt | Bts | Btr | Btc | Bsf | Bsr => {
                !matches!(size, OperandSize::Byte)
            }
            _ => true,
        }
    }

    pub const fn is_shift(self) -> bool {
        use OperationKind::*;
        matches!(self, Shl | Shr | Sar | Rol | Ror | Rcl | Rcr | Shld | Shrd)
    }

    /// Index of the count operand for the shift and rotate families.
    pub const fn count_operand(self) -> Option<usize> {
        use OperationKind::*;
        match self {
            Shl | Shr | Sar | Rol | Ror | Rcl | Rcr => Some(1),
            Shld | Shrd => Some(2),
            _ => None,
        }
    }
}

pub fn compute_mask(op: OperationKind) -> FlagSet {
    op.relevant_mask()
}

/// Narrows the family mask for one vector: OF is undefined for multi-bit
/// shifts and rotates, CF is undefined once shl or shr moves the whole
/// operand out. sar keeps CF: it is the sign bit.
pub fn effective_mask(op: OperationKind, size: OperandSize, vector: &TestVector) -> FlagSet {
    let mut mask = op.relevant_mask();
    let Some(index) = op.count_operand() else {
        return mask;
    };
    let count = vector.operand(index) & size.count_mask();
    if count == 0 {
        return mask;
    }
    if count != 1 {
        mask.remove(FlagSet::OVERFLOW);
    }
    if matches!(op, OperationKind::Shl | OperationKind::Shr)
        && count >= u64::from(size.bits())
    {
        mask.remove(FlagSet::CARRY);
    }
    mask
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for OperationKind {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        OperationKind::ALL
            .into_iter()
            .find(|op| op.mnemonic() == lower)
            .ok_or_else(|| ParseOperationError(s.to_string()))
    }
}
