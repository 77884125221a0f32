use serde::{Deserialize, Serialize};

use super::{CodeChangeMetrics, DurationMetrics, UsageMetrics};

/// Raw result of one CLI execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Parsed response from one Copilot CLI execution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CopilotResponse {
    /// The answer text, without the trailing stats block
    pub output: String,

    /// Session this call was attributed to (empty if none could be resolved)
    pub session_id: String,

    pub usage: UsageMetrics,
    pub duration: DurationMetrics,
    pub code_changes: CodeChangeMetrics,

    /// CLI exit code (0 = success)
    pub exit_code: i32,
}

/// Which pipe a streamed chunk came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamChunkKind {
    Stdout,
    Stderr,
}

impl std::fmt::Display for StreamChunkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamChunkKind::Stdout => write!(f, "stdout"),
            StreamChunkKind::Stderr => write!(f, "stderr"),
        }
    }
}

/// A piece of output forwarded while the CLI is still running
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamChunk {
    pub kind: StreamChunkKind,
    pub data: String,
}

impl StreamChunk {
    pub fn stdout(data: impl Into<String>) -> Self {
        Self {
            kind: StreamChunkKind::Stdout,
            data: data.into(),
        }
    }

    pub fn stderr(data: impl Into<String>) -> Self {
        Self {
            kind: StreamChunkKind::Stderr,
            data: data.into(),
        }
    }

    pub fn is_stdout(&self) -> bool {
        self.kind == StreamChunkKind::Stdout
    }
}
