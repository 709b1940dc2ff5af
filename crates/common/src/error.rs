//! Error types for the WebView CTS runner

use thiserror::Error;

/// Result type alias using the runner Error
pub type Result<T> = std::result::Result<T, Error>;

/// Runner error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to launch test runner '{program}': {error}")]
    RunnerLaunch {
        program: String,
        error: std::io::Error,
    },

    #[error("Failed to install interrupt handler: {0}")]
    SignalSetup(std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the runner executable itself could not be found.
    pub fn is_runner_missing(&self) -> bool {
        matches!(
            self,
            Error::RunnerLaunch { error, .. } if error.kind() == std::io::ErrorKind::NotFound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_missing() {
        let err = Error::RunnerLaunch {
            program: "cts-tradefed".to_string(),
            error: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.is_runner_missing());
        assert!(err.to_string().contains("cts-tradefed"));

        let err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(!err.is_runner_missing());
    }
}
