//! Core domain types for copilot-agent

mod metrics;
mod response;
mod session;

pub use metrics::{CodeChangeMetrics, DurationMetrics, UsageMetrics};
pub use response::{CopilotResponse, ExecutionResult, StreamChunk, StreamChunkKind};
pub use session::{SessionInfo, SessionListOptions, SessionSortKey, SortOrder};
