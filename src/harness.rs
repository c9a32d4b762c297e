use std::{fmt, thread};

use tracing::info;

use crate::{
    case::{TestCase, TestResult, Verdict},
    executor::{Executor, ExecutorError, Observed},
    flags::FlagSet,
    operand::OperandSize,
    operation::OperationKind,
    oracle::Expected,
    registry::Registry,
    vector::TestVector,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureKind {
    Mismatch { observed: Observed },
    Fault(ExecutorError),
}

/// Everything needed to reproduce one failing vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureRecord {
    pub case: String,
    pub op: OperationKind,
    pub size: OperandSize,
    pub index: usize,
    pub vector: TestVector,
    pub expected: Expected,
    pub mask: FlagSet,
    pub kind: FailureKind,
}

impl FailureRecord {
    fn from_result(result: TestResult) -> Option<FailureRecord> {
        let kind = match (result.verdict, result.outcome) {
            (Verdict::Pass, _) => return None,
            (_, Err(err)) => FailureKind::Fault(err),
            (_, Ok(observed)) => FailureKind::Mismatch { observed },
        };
        Some(FailureRecord {
            case: result.case,
            op: result.op,
            size: result.size,
            index: result.index,
            vector: result.vector,
            expected: result.expected,
            mask: result.mask,
            kind,
        })
    }

    pub fn is_fault(&self) -> bool {
        matches!(self.kind, FailureKind::Fault(_))
    }
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} #{} {}: expected 0x{:X} [{}]",
            self.case, self.index, self.vector, self.expected.value, self.expected.flags
        )?;
        match &self.kind {
            FailureKind::Mismatch { observed } => write!(
                f,
                ", observed 0x{:X} [{}] under mask [{}]",
                observed.value, observed.flags, self.mask
            ),
            FailureKind::Fault(err) => write!(f, ", fault: {}", err),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub cases: usize,
    pub total: usize,
    pub failed: usize,
    pub failures: Vec<FailureRecord>,
}

impl Summary {
    pub fn faults(&self) -> usize {
        self.failures.iter().filter(|f| f.is_fault()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, results: Vec<TestResult>) {
        self.cases += 1;
        self.total += results.len();
        for result in results {
            if let Some(failure) = FailureRecord::from_result(result) {
                self.failed += 1;
                self.failures.push(failure);
            }
        }
    }

    /// Appends `other` after this summary's failures.
    pub fn merge(&mut self, other: Summary) {
        self.cases += other.cases;
        self.total += other.total;
        self.failed += other.failed;
        self.failures.extend(other.failures);
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cases, {} vectors, {} failed ({} faults)",
            self.cases,
            self.total,
            self.failed,
            self.faults()
        )
    }
}

pub struct Harness<'r> {
    registry: &'r Registry,
    filter: Option<OperationKind>,
}

impl<'r> Harness<'r> {
    pub fn new(registry: &'r Registry) -> Harness<'r> {
        Harness {
            registry,
            filter: None,
        }
    }

    /// Runs only the cases for one operation.
    pub fn with_filter(mut self, op: OperationKind) -> Harness<'r> {
        self.filter = Some(op);
        self
    }

    fn selected(&self) -> Vec<&'r TestCase> {
        self.registry
            .iter()
            .filter(|case| self.filter.is_none_or(|op| case.op() == op))
            .collect()
    }

    pub fn run_all(&self, executor: &dyn Executor) -> Summary {
        let summary = run_cases(&self.selected(), executor);
        info!(executor = executor.name(), %summary, "run finished");
        summary
    }

    /// Same summary as `run_all`, with contiguous runs of cases spread over
    /// `workers` scoped threads.
    pub fn run_all_parallel(&self, executor: &(dyn Executor + Sync), workers: usize) -> Summary {
        let cases = self.selected();
        let workers = workers.max(1);
        let chunk = cases.len().div_ceil(workers).max(1);

        let partials: Vec<Summary> = thread::scope(|scope| {
            let handles: Vec<_> = cases
                .chunks(chunk)
                .map(|slice| scope.spawn(move || run_cases(slice, executor)))
                .collect();
            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(summary) => summary,
                    Err(payload) => std::panic::resume_unwind(payload),
                })
                .collect()
        });

        let mut summary = Summary::default();
        for partial in partials {
            summary.merge(partial);
        }
        info!(executor = executor.name(), workers, %summary, "parallel run finished");
        summary
    }
}

fn run_cases(cases: &[&TestCase], executor: &dyn Executor) -> Summary {
    let mut summary = Summary::default();
    for case in cases {
        summary.record(case.run(executor));
    }
    summary
}
