//! Error type shared by the client, executors and session lookup.

use std::path::PathBuf;
use std::time::Duration;

/// Errors surfaced by [`crate::CopilotClient`] and the session functions.
///
/// Output parsing has no variant here: [`crate::parse_cli_output`] degrades to
/// zero-valued metrics instead of failing.
#[derive(Debug, thiserror::Error)]
pub enum CopilotError {
    /// Contradictory or invalid client configuration, raised before any spawn
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The CLI exited non-zero and wrote diagnostics to stderr
    #[error("Copilot CLI exited with code {exit_code}: {stderr}")]
    Execution { exit_code: i32, stderr: String },

    /// The CLI binary could not be started
    #[error("Failed to execute {}: {source}", binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CLI ran past its wall-clock budget and was killed
    #[error("Command timed out after {}ms", timeout.as_millis())]
    Timeout { timeout: Duration },

    /// A specifically requested session could not be resolved
    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CopilotError {
    /// Whether retrying the same call has a reasonable chance of succeeding.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CopilotError::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, CopilotError>;
