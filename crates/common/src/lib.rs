//! WebView CTS Common Library
//!
//! Runs the Android CTS WebView package through `cts-tradefed`, classifies
//! the reported results and checks them against the known-failure list.

pub mod classify;
pub mod compare;
pub mod config;
pub mod error;
pub mod expectations;
pub mod report;
pub mod runner;
pub mod types;

// Re-export commonly used types
pub use classify::{RegexClassifier, ResultClassifier};
pub use compare::Comparison;
pub use config::{RunConfig, Thresholds};
pub use error::{Error, Result};
pub use expectations::ExpectedFailures;
pub use report::{Report, Verdict};
pub use runner::{RunOutput, RunnerCommand};
pub use types::*;
