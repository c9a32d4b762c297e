use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};

use tracing::{debug_span, trace, warn};

use crate::{
    executor::{Executor, ExecutorError, Observed},
    flags::{FlagSet, equals_under_mask},
    operand::OperandSize,
    operation::{OperationKind, effective_mask},
    oracle::{self, Expected},
    vector::TestVector,
};

/// One operation at one operand size with its ordered input vectors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCase {
    op: OperationKind,
    size: OperandSize,
    vectors: Vec<TestVector>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Mismatch,
    Fault,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestResult {
    pub case: String,
    pub op: OperationKind,
    pub size: OperandSize,
    pub index: usize,
    pub vector: TestVector,
    pub expected: Expected,
    pub outcome: Result<Observed, ExecutorError>,
    pub mask: FlagSet,
    pub verdict: Verdict,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass
    }
}

impl TestCase {
    pub fn new(op: OperationKind, size: OperandSize, vectors: Vec<TestVector>) -> TestCase {
        TestCase { op, size, vectors }
    }

    /// Mnemonic plus size suffix, e.g. `addw`.
    pub fn name(&self) -> String {
        format!("{}{}", self.op.mnemonic(), self.size.suffix())
    }

    pub fn op(&self) -> OperationKind {
        self.op
    }

    pub fn size(&self) -> OperandSize {
        self.size
    }

    pub fn vectors(&self) -> &[TestVector] {
        &self.vectors
    }

    /// Runs every vector in declaration order. A failing or faulting vector
    /// is recorded and the remaining vectors still run.
    pub fn run(&self, executor: &dyn Executor) -> Vec<TestResult> {
        let name = self.name();
        let _span_ = debug_span!("", case = %name).entered();

        self.vectors
            .iter()
            .enumerate()
            .map(|(index, vector)| {
                let expected = oracle::evaluate(self.op, self.size, vector);
                let mask = effective_mask(self.op, self.size, vector);
                let outcome = isolate(|| executor.execute(self.op, self.size, vector));
                let verdict = judge(&expected, &outcome, mask);
                trace!(index, %vector, ?verdict, "executed");

                let result = TestResult {
                    case: name.clone(),
                    op: self.op,
                    size: self.size,
                    index,
                    vector: vector.clone(),
                    expected,
                    outcome,
                    mask,
                    verdict,
                };
                if !result.passed() {
                    warn!(index, %vector, ?verdict, executor = executor.name(), "vector failed");
                }
                result
            })
            .collect()
    }
}

fn judge(expected: &Expected, outcome: &Result<Observed, ExecutorError>, mask: FlagSet) -> Verdict {
    match outcome {
        Err(_) => Verdict::Fault,
        Ok(observed)
            if observed.value == expected.value
                && equals_under_mask(observed.flags, expected.flags, mask) =>
        {
            Verdict::Pass
        }
        Ok(_) => Verdict::Mismatch,
    }
}

/// Confines a panicking executor to the one vector it was running.
fn isolate<F>(execute: F) -> Result<Observed, ExecutorError>
where
    F: FnOnce() -> Result<Observed, ExecutorError>,
{
    panic::catch_unwind(AssertUnwindSafe(execute))
        .unwrap_or_else(|payload| Err(ExecutorError::Panicked(panic_message(payload))))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::SoftwareExecutor;

    struct Panicking;

    impl Executor for Panicking {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn execute(
            &self,
            _: OperationKind,
            _: OperandSize,
            vector: &TestVector,
        ) -> Result<Observed, ExecutorError> {
            if vector.operand(0) == 0 {
                panic!("trap on zero");
            }
            SoftwareExecutor.execute(OperationKind::Inc, OperandSize::Byte, vector)
        }
    }

    struct CarryFlipping;

    impl Executor for CarryFlipping {
        fn name(&self) -> &'static str {
            "carry-flipping"
        }

        fn execute(
            &self,
            op: OperationKind,
            size: OperandSize,
            vector: &TestVector,
        ) -> Result<Observed, ExecutorError> {
            let mut observed = SoftwareExecutor.execute(op, size, vector)?;
            observed.flags.toggle(FlagSet::CARRY);
            Ok(observed)
        }
    }

    #[test]
    fn name_test() {
        let case = TestCase::new(OperationKind::Add, OperandSize::Word, vec![]);
        assert_eq!(case.name(), "addw");
        let case = TestCase::new(OperationKind::Bsr, OperandSize::QuadWord, vec![]);
        assert_eq!(case.name(), "bsrq");
    }

    #[test]
    fn results_follow_vector_order_test() {
        let vectors = vec![
            TestVector::binary(1, 2),
            TestVector::binary(3, 4),
            TestVector::binary(5, 6),
        ];
        let case = TestCase::new(OperationKind::Add, OperandSize::Byte, vectors.clone());
        let results = case.run(&SoftwareExecutor);
        assert_eq!(results.len(), 3);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.index, i);
            assert_eq!(result.vector, vectors[i]);
            assert_eq!(result.case, "addb");
            assert!(result.passed());
        }
    }

    #[test]
    fn panic_is_a_fault_test() {
        let case = TestCase::new(
            OperationKind::Inc,
            OperandSize::Byte,
            vec![TestVector::unary(0), TestVector::unary(1)],
        );
        let results = case.run(&Panicking);
        assert_eq!(results[0].verdict, Verdict::Fault);
        assert_eq!(
            results[0].outcome,
            Err(ExecutorError::Panicked("trap on zero".to_string()))
        );
        assert_eq!(results[1].verdict, Verdict::Pass);
    }

    #[test]
    fn oversized_double_shift_is_a_fault_test() {
        let case = TestCase::new(
            OperationKind::Shrd,
            OperandSize::Word,
            vec![TestVector::ternary(1, 2, 20), TestVector::ternary(1, 2, 1)],
        );
        let results = case.run(&SoftwareExecutor);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].verdict, Verdict::Fault);
        assert!(matches!(
            results[0].outcome,
            Err(ExecutorError::Undefined { .. })
        ));
        assert_eq!(results[1].verdict, Verdict::Pass);
    }

    #[test]
    fn oversized_sar_compares_carry_test() {
        let case = TestCase::new(
            OperationKind::Sar,
            OperandSize::Byte,
            vec![TestVector::binary(0x80, 9), TestVector::binary(0x40, 9)],
        );
        let results = case.run(&CarryFlipping);
        assert!(results.iter().all(|r| r.verdict == Verdict::Mismatch));
        assert!(results.iter().all(|r| r.mask.contains(FlagSet::CARRY)));

        let case = TestCase::new(
            OperationKind::Shr,
            OperandSize::Byte,
            vec![TestVector::binary(0x80, 9)],
        );
        assert_eq!(case.run(&CarryFlipping)[0].verdict, Verdict::Pass);
    }

    #[test]
    fn judge_uses_mask_test() {
        let expected = Expected {
            value: 4,
            flags: FlagSet::CARRY,
        };
        let observed = Ok(Observed {
            value: 4,
            flags: FlagSet::CARRY | FlagSet::OVERFLOW,
        });
        assert_eq!(judge(&expected, &observed, FlagSet::CARRY), Verdict::Pass);
        assert_eq!(
            judge(&expected, &observed, FlagSet::CARRY | FlagSet::OVERFLOW),
            Verdict::Mismatch
        );
        let wrong_value = Ok(Observed {
            value: 5,
            flags: FlagSet::CARRY,
        });
        assert_eq!(judge(&expected, &wrong_value, FlagSet::empty()), Verdict::Mismatch);
    }
}
