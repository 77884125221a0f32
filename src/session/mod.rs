//! Copilot session lookup
//!
//! The free functions take the store directory explicitly; [`SessionManager`]
//! wraps the same operations around a stored location.

mod manager;
mod parser;
mod store;

pub use manager::SessionManager;
pub use parser::{
    SessionParseError, WORKSPACE_FILE, parse_workspace_content, parse_workspace_file,
};
pub use store::{default_session_dir, list_raw};

use std::path::Path;

use crate::error::Result;
use crate::{SessionInfo, SessionListOptions};

/// List sessions in `store_dir`
pub async fn list_sessions(store_dir: &Path, options: &SessionListOptions) -> Vec<SessionInfo> {
    SessionManager::with_dir(store_dir)
        .list_sessions(options)
        .await
}

/// Get one session from `store_dir` by id
pub async fn get_session(store_dir: &Path, session_id: &str) -> Result<SessionInfo> {
    SessionManager::with_dir(store_dir)
        .get_session(session_id)
        .await
}

/// Most recently updated session in `store_dir`
pub async fn most_recent_session(store_dir: &Path) -> Option<SessionInfo> {
    SessionManager::with_dir(store_dir)
        .get_most_recent_session()
        .await
}

/// Whether `store_dir` holds a directory for `session_id`
pub async fn session_exists(store_dir: &Path, session_id: &str) -> bool {
    SessionManager::with_dir(store_dir)
        .session_exists(session_id)
        .await
}
