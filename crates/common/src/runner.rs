//! CTS runner process management
//!
//! Launches `cts-tradefed`, captures its output and forwards Ctrl-C to it so
//! an aborted run still ends with the runner flushing what it has.

use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Default runner executable
pub const DEFAULT_RUNNER: &str = "cts-tradefed";

/// Default CTS package selecting the WebView tests
pub const DEFAULT_PACKAGE: &str = "android.webkit";

/// How to invoke the CTS runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerCommand {
    /// Executable to launch
    pub program: String,

    /// Arguments passed to the executable
    pub args: Vec<String>,
}

impl Default for RunnerCommand {
    fn default() -> Self {
        Self::tradefed(DEFAULT_RUNNER, DEFAULT_PACKAGE)
    }
}

/// Everything captured from a finished runner process
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
    /// An interrupt was received and forwarded while the runner was alive
    pub interrupted: bool,
}

impl RunnerCommand {
    /// `<program> run singleCommand cts -p <package>`
    pub fn tradefed(program: impl Into<String>, package: &str) -> Self {
        Self {
            program: program.into(),
            args: ["run", "singleCommand", "cts", "-p", package]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Arbitrary command, mostly useful for substituting a fake runner
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Run to completion, forwarding any SIGINT to the child.
    ///
    /// The interrupt listener is registered before the child is spawned, so a
    /// signal that lands in between is held and forwarded once the pid is known.
    pub async fn run(&self) -> Result<RunOutput> {
        let mut interrupts = imp::Interrupts::new().map_err(Error::SignalSetup)?;

        info!("Launching {} {}", self.program, self.args.join(" "));

        let child = Command::new(&self.program)
            .args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|error| Error::RunnerLaunch {
                program: self.program.clone(),
                error,
            })?;

        let pid = child.id();
        debug!("Runner started (pid: {:?})", pid);

        let output = child.wait_with_output();
        tokio::pin!(output);

        let mut interrupted = false;
        let output = loop {
            tokio::select! {
                result = &mut output => break result?,
                Some(()) = interrupts.recv() => {
                    interrupted = true;
                    match pid {
                        Some(pid) => {
                            warn!("Interrupted, forwarding SIGINT to runner (pid: {})", pid);
                            if let Err(e) = imp::forward_interrupt(pid) {
                                warn!("Failed to signal runner: {}", e);
                            }
                        }
                        None => warn!("Interrupted, runner has already exited"),
                    }
                }
            }
        };

        info!("Runner exited with {}", output.status);

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !stderr.is_empty() {
            info!("Runner wrote {} line(s) to stderr", stderr.lines().count());
            for line in stderr.lines() {
                debug!("runner stderr: {}", line);
            }
        }

        Ok(RunOutput {
            stdout,
            stderr,
            status: output.status,
            interrupted,
        })
    }
}

#[cfg(unix)]
mod imp {
    use nix::sys::signal::{kill, Signal as NixSignal};
    use nix::unistd::Pid;
    use tokio::signal::unix::{signal, Signal, SignalKind};

    /// SIGINT listener
    pub(super) struct Interrupts(Signal);

    impl Interrupts {
        pub(super) fn new() -> std::io::Result<Self> {
            Ok(Self(signal(SignalKind::interrupt())?))
        }

        pub(super) async fn recv(&mut self) -> Option<()> {
            self.0.recv().await
        }
    }

    pub(super) fn forward_interrupt(pid: u32) -> nix::Result<()> {
        kill(Pid::from_raw(pid as i32), NixSignal::SIGINT)
    }
}

#[cfg(not(unix))]
mod imp {
    /// Console interrupts reach the whole process group already; nothing to forward.
    pub(super) struct Interrupts;

    impl Interrupts {
        pub(super) fn new() -> std::io::Result<Self> {
            Ok(Self)
        }

        pub(super) async fn recv(&mut self) -> Option<()> {
            std::future::pending().await
        }
    }

    pub(super) fn forward_interrupt(_pid: u32) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cmd = RunnerCommand::default();
        assert_eq!(cmd.program, "cts-tradefed");
        assert_eq!(
            cmd.args,
            vec!["run", "singleCommand", "cts", "-p", "android.webkit"]
        );
    }

    #[test]
    fn test_custom_package() {
        let cmd = RunnerCommand::tradefed("/opt/cts/tools/cts-tradefed", "android.webkit.cts");
        assert_eq!(cmd.program, "/opt/cts/tools/cts-tradefed");
        assert_eq!(cmd.args.last().map(String::as_str), Some("android.webkit.cts"));
    }

    #[tokio::test]
    async fn test_captures_stdout_and_stderr() {
        let cmd = RunnerCommand::new(
            "sh",
            ["-c", "echo 'r: a.B#c PASS'; echo oops >&2; exit 3"],
        );
        let output = cmd.run().await.unwrap();

        assert_eq!(output.stdout, "r: a.B#c PASS\n");
        assert_eq!(output.stderr, "oops\n");
        assert_eq!(output.status.code(), Some(3));
        assert!(!output.interrupted);
    }

    #[tokio::test]
    async fn test_large_output() {
        let cmd = RunnerCommand::new(
            "sh",
            ["-c", "i=0; while [ $i -lt 5000 ]; do echo \"r: a.B#t$i PASS\"; i=$((i+1)); done"],
        );
        let output = cmd.run().await.unwrap();
        assert_eq!(output.stdout.lines().count(), 5000);
    }

    #[tokio::test]
    async fn test_launch_failure() {
        let cmd = RunnerCommand::tradefed("/nonexistent/cts-tradefed", DEFAULT_PACKAGE);
        let err = cmd.run().await.unwrap_err();

        assert!(matches!(err, Error::RunnerLaunch { .. }));
        assert!(err.is_runner_missing());
    }
}
