//! Comparison of observed failures against expectations

use crate::expectations::ExpectedFailures;
use crate::types::TestSet;

/// Differences between observed failures and the expected-failure list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    /// Expected to fail but did not fail this run (passed or never ran)
    pub unexpected_passes: TestSet,
    /// Failed without being on the expected-failure list
    pub unexpected_failures: TestSet,
}

impl Comparison {
    pub fn new(failures: &TestSet, expected: &ExpectedFailures) -> Self {
        let expected = expected.as_set();
        Self {
            unexpected_passes: expected.difference(failures).cloned().collect(),
            unexpected_failures: failures.difference(expected).cloned().collect(),
        }
    }

    /// True when observed failures match the expectations exactly
    pub fn is_exact(&self) -> bool {
        self.unexpected_passes.is_empty() && self.unexpected_failures.is_empty()
    }
}
