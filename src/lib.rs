//! Copilot Agent - typed Rust access to the GitHub Copilot CLI
//!
//! Runs `copilot` in programmatic mode, splits its output into the answer and
//! the trailing usage statistics, and tells you which stored session the run
//! belongs to so the conversation can be resumed later.
//!
//! ## Pieces
//!
//! 1. **Output parsing**: [`parse_cli_output`] turns raw stdout into the
//!    response text plus token, duration and code-change metrics.
//!
//! 2. **Session store**: [`session::SessionManager`] reads the CLI's
//!    `~/.copilot/session-state/<id>/workspace.yaml` descriptors.
//!
//! 3. **Client**: [`CopilotClient`] ties both together around a
//!    [`agent::CommandExecutor`], either waiting for the full answer or
//!    streaming it.

pub mod agent;
pub mod config;
pub mod domain;
pub mod error;
pub mod session;

pub use agent::{CopilotClient, PromptStream, parse_cli_output};
pub use config::{ClientConfig, models};
pub use domain::*;
pub use error::{CopilotError, Result};
