//! Run configuration

use crate::runner::RunnerCommand;

/// Configuration for a single CTS run
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Runner invocation
    pub runner: RunnerCommand,

    /// Verdict thresholds
    pub thresholds: Thresholds,
}

/// Policy constants used when mapping a comparison to a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Fewer reported results than this means the run itself is broken
    pub min_results: usize,

    /// This many unexpected passes or more means the expectations are stale,
    /// or the wrong WebView implementation is under test
    pub stale_passes: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_results: 100,
            stale_passes: 5,
        }
    }
}
