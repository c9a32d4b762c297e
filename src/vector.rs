use std::fmt;

/// One concrete input: operands in declaration order and the CF value
/// loaded before the instruction runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestVector {
    pub operands: Vec<u64>,
    pub carry_in: Option<bool>,
}

impl TestVector {
    pub fn unary(a: u64) -> TestVector {
        TestVector {
            operands: vec![a],
            carry_in: None,
        }
    }

    pub fn binary(a: u64, b: u64) -> TestVector {
        TestVector {
            operands: vec![a, b],
            carry_in: None,
        }
    }

    pub fn ternary(a: u64, b: u64, c: u64) -> TestVector {
        TestVector {
            operands: vec![a, b, c],
            carry_in: None,
        }
    }

    pub fn with_carry(mut self, carry: bool) -> TestVector {
        self.carry_in = Some(carry);
        self
    }

    /// Missing operands read as zero; registration rejects vectors whose
    /// operand count does not match the family.
    pub fn operand(&self, index: usize) -> u64 {
        self.operands.get(index).copied().unwrap_or(0)
    }

    pub fn carry(&self) -> bool {
        self.carry_in.unwrap_or(false)
    }
}

impl fmt::Display for TestVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "0x{:X}", operand)?;
        }
        write!(f, ")")?;
        if let Some(carry) = self.carry_in {
            write!(f, " cf={}", u8::from(carry))?;
        }
        Ok(())
    }
}

/// Sign-extends a 32-bit table entry the way a `long` operand would be.
const fn l(value: i64) -> u64 {
    value as u64
}

const ALU_PAIRS: [(u64, u64); 25] = [
    (l(0x12345678), l(0x812FADA)),
    (l(0x12341), l(0x12341)),
    (l(0x12341), l(-0x12341)),
    (l(0xffffffff), l(0)),
    (l(0xffffffff), l(-1)),
    (l(0xffffffff), l(1)),
    (l(0xffffffff), l(2)),
    (l(0x7fffffff), l(0)),
    (l(0x7fffffff), l(1)),
    (l(0x7fffffff), l(-1)),
    (l(0x80000000), l(-1)),
    (l(0x80000000), l(1)),
    (l(0x80000000), l(-2)),
    (l(0x12347fff), l(0)),
    (l(0x12347fff), l(1)),
    (l(0x12347fff), l(-1)),
    (l(0x12348000), l(-1)),
    (l(0x12348000), l(1)),
    (l(0x12348000), l(-2)),
    (l(0x12347f7f), l(0)),
    (l(0x12347f7f), l(1)),
    (l(0x12347f7f), l(-1)),
    (l(0x12348080), l(-1)),
    (l(0x12348080), l(1)),
    (l(0x12348080), l(-2)),
];

/// (value, double-shift source) pairs walked through every count.
const SHIFT_SEEDS: [(u64, u64); 2] = [(0x21ad3d34, 0x12345678), (0x813f3421, 0x82345679)];

const SCAN_PRELOAD: u64 = 0x12345678;
const SCAN_SOURCES: [u64; 3] = [0, 0x12340128, 0x00340128];

pub fn alu_vectors() -> Vec<TestVector> {
    ALU_PAIRS
        .iter()
        .map(|&(a, b)| TestVector::binary(a, b))
        .collect()
}

/// Operands of the two-operand table, fed one at a time.
pub fn unary_vectors() -> Vec<TestVector> {
    ALU_PAIRS
        .iter()
        .flat_map(|&(a, b)| [a, b])
        .map(TestVector::unary)
        .collect()
}

/// Every vector once with CF clear, then once with CF set.
pub fn with_both_carries(vectors: Vec<TestVector>) -> Vec<TestVector> {
    let cleared = vectors.iter().cloned().map(|v| v.with_carry(false));
    let set = vectors.iter().cloned().map(|v| v.with_carry(true));
    cleared.chain(set).collect()
}

pub fn shift_vectors(counts: u64) -> Vec<TestVector> {
    SHIFT_SEEDS
        .iter()
        .flat_map(|&(value, _)| (0..counts).map(move |n| TestVector::binary(value, n)))
        .collect()
}

pub fn double_shift_vectors(counts: u64) -> Vec<TestVector> {
    SHIFT_SEEDS
        .iter()
        .flat_map(|&(dest, src)| (0..counts).map(move |n| TestVector::ternary(dest, src, n)))
        .collect()
}

pub fn scan_vectors() -> Vec<TestVector> {
    SCAN_SOURCES
        .iter()
        .map(|&src| TestVector::binary(SCAN_PRELOAD, src))
        .collect()
}
