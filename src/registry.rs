use std::collections::HashSet;

use thiserror::Error;
use tracing::info;

use crate::{
    case::TestCase,
    executor::{ExecutorError, check_domain},
    operand::OperandSize,
    operation::OperationKind,
};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("{case} has no vectors")]
    Empty { case: String },
    #[error("{case} vector {index} has {found} operands, expected {expected}")]
    Arity {
        case: String,
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("{op} has no {size} form")]
    UnsupportedSize { op: OperationKind, size: OperandSize },
    #[error("{case} vector {index} is outside the operation's domain")]
    Domain { case: String, index: usize },
    #[error("{case} is registered twice")]
    Duplicate { case: String },
}

/// Collects cases in registration order; nothing runs until `build`
/// validates all of them.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    cases: Vec<TestCase>,
}

impl RegistryBuilder {
    pub fn new() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn register(&mut self, case: TestCase) -> &mut RegistryBuilder {
        self.cases.push(case);
        self
    }

    pub fn build(self) -> Result<Registry, RegistrationError> {
        let mut seen = HashSet::new();
        for case in &self.cases {
            validate(case)?;
            if !seen.insert(case.name()) {
                return Err(RegistrationError::Duplicate { case: case.name() });
            }
        }
        let registry = Registry { cases: self.cases };
        info!(
            cases = registry.len(),
            vectors = registry.vector_count(),
            "registry built"
        );
        Ok(registry)
    }
}

fn validate(case: &TestCase) -> Result<(), RegistrationError> {
    let (op, size) = (case.op(), case.size());
    if !op.supports(size) {
        return Err(RegistrationError::UnsupportedSize { op, size });
    }
    if case.vectors().is_empty() {
        return Err(RegistrationError::Empty { case: case.name() });
    }
    for (index, vector) in case.vectors().iter().enumerate() {
        if vector.operands.len() != op.arity() {
            return Err(RegistrationError::Arity {
                case: case.name(),
                index,
                expected: op.arity(),
                found: vector.operands.len(),
            });
        }
        if let Err(ExecutorError::Undefined { .. }) = check_domain(op, size, vector) {
            return Err(RegistrationError::Domain {
                case: case.name(),
                index,
            });
        }
    }
    Ok(())
}

/// Validated, immutable cases in registration order.
#[derive(Debug, Default)]
pub struct Registry {
    cases: Vec<TestCase>,
}

impl Registry {
    pub fn empty() -> Registry {
        Registry::default()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn vector_count(&self) -> usize {
        self.cases.iter().map(|case| case.vectors().len()).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.cases.iter()
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn get(&self, name: &str) -> Option<&TestCase> {
        self.cases.iter().find(|case| case.name() == name)
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
