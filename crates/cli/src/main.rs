//! WebView CTS CLI - Main Entry Point
//!
//! Runs the WebView CTS package, prints a summary around the raw runner
//! output and exits with a code CI can branch on:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0    | failures match the expectation list exactly |
//! | 1    | unexpected failures |
//! | 2    | too few results, or many unexpected passes |
//! | 3    | a few unexpected passes |
//! | 127  | the runner could not be launched |

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use webview_cts_common::runner::{DEFAULT_PACKAGE, DEFAULT_RUNNER};
use webview_cts_common::{
    Error, ExpectedFailures, RegexClassifier, Report, RunConfig, RunnerCommand, Thresholds, Verdict,
};

/// Exit code for fatal errors, outside the range used by verdicts
const FATAL_EXIT_CODE: u8 = 127;

/// Run the Android WebView CTS and check results against known failures
#[derive(Parser)]
#[command(name = "run-webview-cts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CTS runner executable
    #[arg(long, default_value = DEFAULT_RUNNER)]
    runner: String,

    /// CTS package to run
    #[arg(long, default_value = DEFAULT_PACKAGE)]
    package: String,

    /// Fewer reported results than this fails the run
    #[arg(long, default_value_t = Thresholds::default().min_results)]
    min_results: usize,

    /// Number of unexpected passes treated as stale expectations
    #[arg(long, default_value_t = Thresholds::default().stale_passes, value_parser = parse_threshold)]
    stale_threshold: usize,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> RunConfig {
        RunConfig {
            runner: RunnerCommand::tradefed(self.runner.clone(), &self.package),
            thresholds: Thresholds {
                min_results: self.min_results,
                stale_passes: self.stale_threshold,
            },
        }
    }
}

fn parse_threshold(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for the report
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.config()).await {
        Ok(verdict) => verdict.into(),
        Err(e) => {
            eprintln!("❌ {:#}", e);
            if e.downcast_ref::<Error>().is_some_and(Error::is_runner_missing) {
                eprintln!("   Put the CTS tools directory on PATH or pass --runner");
            }
            ExitCode::from(FATAL_EXIT_CODE)
        }
    }
}

async fn run(config: RunConfig) -> anyhow::Result<Verdict> {
    let expected = ExpectedFailures::webview();
    if expected.is_empty() {
        info!("No tests expected to fail");
    } else {
        info!("{} test(s) expected to fail", expected.len());
    }

    let output = config.runner.run().await.context("CTS run failed")?;
    if output.interrupted {
        warn!("Run was interrupted; results only cover tests that finished");
    }

    let report = Report::from_output(&output.stdout, &RegexClassifier, &expected);

    let stdout = std::io::stdout();
    let verdict = report
        .write(&output.stdout, &config.thresholds, &mut stdout.lock())
        .context("Failed to write report")?;

    Ok(verdict)
}
