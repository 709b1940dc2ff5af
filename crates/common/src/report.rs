//! Run summary and exit-code mapping

use std::fmt::Write as _;
use std::io::{self, Write};

use tracing::info;

use crate::classify::ResultClassifier;
use crate::compare::Comparison;
use crate::config::Thresholds;
use crate::expectations::ExpectedFailures;
use crate::types::{TestResults, TestSet};

/// Outcome of a run, in decreasing order of precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Too few results were reported for the run to be trusted
    TooFewResults,
    /// At least one test failed that is not on the expectation list
    Regressions,
    /// Enough expected failures now pass that the list is probably stale
    StaleExpectations,
    /// A few expected failures now pass
    UnexpectedPasses,
    /// Observed failures match the expectations exactly
    Clean,
}

impl Verdict {
    /// Process exit code reported to CI
    pub fn exit_code(self) -> u8 {
        match self {
            Verdict::Clean => 0,
            Verdict::Regressions => 1,
            Verdict::TooFewResults | Verdict::StaleExpectations => 2,
            Verdict::UnexpectedPasses => 3,
        }
    }
}

impl From<Verdict> for std::process::ExitCode {
    fn from(verdict: Verdict) -> Self {
        std::process::ExitCode::from(verdict.exit_code())
    }
}

/// Summary of one CTS run
#[derive(Debug, Clone)]
pub struct Report {
    pub results: TestResults,
    pub comparison: Comparison,
}

impl Report {
    pub fn new(results: TestResults, comparison: Comparison) -> Self {
        Self {
            results,
            comparison,
        }
    }

    /// Classify captured runner output and compare it against expectations
    pub fn from_output<C: ResultClassifier + ?Sized>(
        output: &str,
        classifier: &C,
        expected: &ExpectedFailures,
    ) -> Self {
        let results = classifier.classify(output);
        info!(
            "Parsed {} passes and {} failures",
            results.passes.len(),
            results.failures.len()
        );
        let comparison = Comparison::new(&results.failures, expected);
        Self::new(results, comparison)
    }

    pub fn verdict(&self, thresholds: &Thresholds) -> Verdict {
        let unexpected_passes = self.comparison.unexpected_passes.len();

        if self.results.total() < thresholds.min_results {
            Verdict::TooFewResults
        } else if !self.comparison.unexpected_failures.is_empty() {
            Verdict::Regressions
        } else if unexpected_passes >= thresholds.stale_passes {
            Verdict::StaleExpectations
        } else if self.comparison.is_exact() {
            Verdict::Clean
        } else {
            Verdict::UnexpectedPasses
        }
    }

    /// Operator-facing warning that accompanies a verdict, if any
    pub fn warning(&self, verdict: Verdict, thresholds: &Thresholds) -> Option<String> {
        match verdict {
            Verdict::TooFewResults => Some(format!(
                "Ran less than {} cts tests? Something must be wrong",
                thresholds.min_results
            )),
            Verdict::StaleExpectations => Some(format!(
                "{} or more new passes? Either you're running webview classic, or it really is time to fix failure expectations.",
                thresholds.stale_passes
            )),
            _ => None,
        }
    }

    /// Counts followed by the unexpected pass and failure lists
    pub fn summary(&self) -> String {
        let mut out = format!(
            "{} passes; {} failures",
            self.results.passes.len(),
            self.results.failures.len()
        );
        append_section(
            &mut out,
            "UNEXPECTED PASSES (update expectations!):",
            &self.comparison.unexpected_passes,
        );
        append_section(
            &mut out,
            "UNEXPECTED FAILURES (please fix!):",
            &self.comparison.unexpected_failures,
        );
        out
    }

    /// Write the full report and return the verdict.
    ///
    /// The summary is printed both before the raw dump (CI logs are read from
    /// the top) and after it (terminals are read from the bottom).
    pub fn write<W: Write>(
        &self,
        raw_stdout: &str,
        thresholds: &Thresholds,
        out: &mut W,
    ) -> io::Result<Verdict> {
        let summary = self.summary();
        let verdict = self.verdict(thresholds);

        writeln!(out, "{}", summary)?;
        writeln!(out)?;
        writeln!(out, "stdout dump follows...")?;
        writeln!(out, "{}", raw_stdout)?;
        writeln!(out)?;
        writeln!(out)?;
        writeln!(out, "{}", summary)?;
        if let Some(warning) = self.warning(verdict, thresholds) {
            writeln!(out, "{}", warning)?;
        }
        out.flush()?;

        info!(
            "Verdict: {:?} (exit code {})",
            verdict,
            verdict.exit_code()
        );
        Ok(verdict)
    }
}

fn append_section(out: &mut String, title: &str, tests: &TestSet) {
    if tests.is_empty() {
        return;
    }
    out.push('\n');
    out.push_str(title);
    for test in tests {
        let _ = write!(out, "\n\t{}", test);
    }
}
