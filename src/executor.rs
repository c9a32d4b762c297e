//! The boundary between the harness and whatever actually runs an
//! instruction.
//!
//! An executor is the only place ground truth can leak in from outside the
//! oracle: a wrong executor looks exactly like a wrong oracle to the harness.

use thiserror::Error;

use crate::{
    flags::FlagSet,
    operand::OperandSize,
    operation::OperationKind,
    operations::*,
    traits::NumericOps,
    vector::TestVector,
};

/// Destination value (truncated to the operand size) and status flags read
/// back after the instruction ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observed {
    pub value: u64,
    pub flags: FlagSet,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExecutorError {
    #[error("{op} has no {size} form")]
    Unsupported { op: OperationKind, size: OperandSize },
    #[error("{op} {size} is undefined for {vector}")]
    Undefined {
        op: OperationKind,
        size: OperandSize,
        vector: TestVector,
    },
    #[error("the {0} executor is not available on this host")]
    Unavailable(&'static str),
    #[error("executor panicked: {0}")]
    Panicked(String),
}

pub trait Executor {
    fn name(&self) -> &'static str;

    /// Runs `op` once with the vector's operands. CF is loaded from the
    /// vector's incoming carry and every other status flag starts clear.
    fn execute(
        &self,
        op: OperationKind,
        size: OperandSize,
        vector: &TestVector,
    ) -> Result<Observed, ExecutorError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SoftwareExecutor;

impl Executor for SoftwareExecutor {
    fn name(&self) -> &'static str {
        "software"
    }

    fn execute(
        &self,
        op: OperationKind,
        size: OperandSize,
        vector: &TestVector,
    ) -> Result<Observed, ExecutorError> {
        check_domain(op, size, vector)?;
        let value = match size {
            OperandSize::Byte => model::<u8>(op, vector),
            OperandSize::Word => model::<u16>(op, vector),
            OperandSize::DoubleWord => model::<u32>(op, vector),
            OperandSize::QuadWord => model::<u64>(op, vector),
        };
        Ok(value)
    }
}

/// Rejects inputs no executor can give a defined answer for: encodings that
/// do not exist and double shifts past the operand width.
pub fn check_domain(
    op: OperationKind,
    size: OperandSize,
    vector: &TestVector,
) -> Result<(), ExecutorError> {
    if !op.supports(size) {
        return Err(ExecutorError::Unsupported { op, size });
    }
    if matches!(op, OperationKind::Shld | OperationKind::Shrd)
        && vector.operand(2) & size.count_mask() > u64::from(size.bits())
    {
        return Err(ExecutorError::Undefined {
            op,
            size,
            vector: vector.clone(),
        });
    }
    Ok(())
}

fn model<T>(op: OperationKind, vector: &TestVector) -> Observed
where
    T: NumericOps,
{
    let mut flags = FlagSet::with_carry(vector.carry());
    let mut rm = T::truncate_from(vector.operand(0));
    let mut reg = T::truncate_from(vector.operand(1));
    // CL holds the count
    let count = vector.operand(op.count_operand().unwrap_or(1)) as u8;

    match op {
        OperationKind::Add => add(&mut rm, &mut reg, &mut flags),
        OperationKind::Sub => sub(&mut rm, &mut reg, &mut flags),
        OperationKind::And => bitwise_and(&mut rm, &mut reg, &mut flags),
        OperationKind::Or => bitwise_or(&mut rm, &mut reg, &mut flags),
        OperationKind::Xor => bitwise_xor(&mut rm, &mut reg, &mut flags),
        OperationKind::Cmp => cmp(&mut rm, &mut reg, &mut flags),
        OperationKind::Adc => add_with_carry(&mut rm, &mut reg, &mut flags),
        OperationKind::Sbb => sub_with_borrow(&mut rm, &mut reg, &mut flags),
        OperationKind::Inc => inc(&mut rm, &mut flags),
        OperationKind::Dec => dec(&mut rm, &mut flags),
        OperationKind::Neg => neg(&mut rm, &mut flags),
        OperationKind::Not => bitwise_not(&mut rm, &mut flags),
        OperationKind::Shl => shl(&mut rm, count, &mut flags),
        OperationKind::Shr => shr(&mut rm, count, &mut flags),
        OperationKind::Sar => sar(&mut rm, count, &mut flags),
        OperationKind::Rol => rol(&mut rm, count, &mut flags),
        OperationKind::Ror => ror(&mut rm, count, &mut flags),
        OperationKind::Rcl => rotate_through_carry_left(&mut rm, count, &mut flags),
        OperationKind::Rcr => rotate_through_carry_right(&mut rm, count, &mut flags),
        OperationKind::Shld => double_shift_left(&mut rm, &mut reg, count, &mut flags),
        OperationKind::Shrd => double_shift_right(&mut rm, &mut reg, count, &mut flags),
        OperationKind::Bt => bit_test(&mut rm, &mut reg, &mut flags),
        OperationKind::Bts => bit_test_set(&mut rm, &mut reg, &mut flags),
        OperationKind::Btr => bit_test_reset(&mut rm, &mut reg, &mut flags),
        OperationKind::Btc => bit_test_complement(&mut rm, &mut reg, &mut flags),
        OperationKind::Bsf => bit_scan_forward(&mut rm, &mut reg, &mut flags),
        OperationKind::Bsr => bit_scan_reverse(&mut rm, &mut reg, &mut flags),
    }

    Observed {
        value: rm.zero_extend(),
        flags,
    }
}
