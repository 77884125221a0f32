//! Copilot CLI execution: process plumbing, output parsing and the client facade

mod client;
mod executor;
mod output;
mod stream;

pub use client::{CopilotClient, PromptStream, ReconcilePolicy};
pub use executor::{CommandExecutor, ExecutorOptions, ProcessExecutor};
pub use output::{ParsedOutput, parse_cli_output, parse_token_count};
pub use stream::{ExecStream, StreamResult};
