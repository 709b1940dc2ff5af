//! Core types shared across the runner

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of a single CTS test case, `<fully.qualified.Class>#<method>`.
///
/// Opaque: only compared for equality and ordered for stable reporting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestId(String);

impl TestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TestId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TestId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for TestId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TestId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Set of test identifiers
pub type TestSet = BTreeSet<TestId>;

/// Pass and fail identifiers observed in a single run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestResults {
    pub passes: TestSet,
    pub failures: TestSet,
}

impl TestResults {
    /// Total number of distinct tests with a reported outcome
    pub fn total(&self) -> usize {
        self.passes.len() + self.failures.len()
    }
}
