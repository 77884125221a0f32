//! Session discovery and retrieval

use std::path::{Path, PathBuf};

use super::parser::parse_workspace_file;
use super::store::{default_session_dir, list_raw, workspace_path};
use crate::error::{CopilotError, Result};
use crate::{SessionInfo, SessionListOptions, SortOrder};

/// Read-only view over a Copilot session store.
///
/// Holds nothing but the store location, so it is cheap to clone and can be
/// pointed at a fixture directory in tests.
#[derive(Debug, Clone)]
pub struct SessionManager {
    session_dir: PathBuf,
}

impl SessionManager {
    /// Manager over the default store (~/.copilot/session-state/)
    pub fn new() -> Self {
        Self::with_dir(default_session_dir())
    }

    pub fn with_dir(session_dir: impl Into<PathBuf>) -> Self {
        Self {
            session_dir: session_dir.into(),
        }
    }

    pub fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    /// List sessions, sorted and truncated per `options`
    pub async fn list_sessions(&self, options: &SessionListOptions) -> Vec<SessionInfo> {
        let mut sessions = list_raw(&self.session_dir).await;

        let key = options.sort_by;
        sessions.sort_by(|a, b| {
            let a_ms = a.timestamp(key).timestamp_millis();
            let b_ms = b.timestamp(key).timestamp_millis();
            match options.sort_order {
                SortOrder::Desc => b_ms.cmp(&a_ms),
                SortOrder::Asc => a_ms.cmp(&b_ms),
            }
        });

        if let Some(limit) = options.limit.filter(|n| *n > 0) {
            sessions.truncate(limit);
        }

        sessions
    }

    /// Get a specific session by id.
    ///
    /// A missing directory and a corrupt descriptor both yield
    /// [`CopilotError::SessionNotFound`].
    pub async fn get_session(&self, session_id: &str) -> Result<SessionInfo> {
        let not_found = || CopilotError::SessionNotFound {
            session_id: session_id.to_string(),
        };

        if !is_plain_id(session_id) {
            return Err(not_found());
        }

        parse_workspace_file(&workspace_path(&self.session_dir, session_id))
            .await
            .map_err(|e| {
                tracing::debug!("Session {} unreadable: {}", session_id, e);
                not_found()
            })
    }

    /// The most recently updated session, if any
    pub async fn get_most_recent_session(&self) -> Option<SessionInfo> {
        self.list_sessions(&SessionListOptions::most_recent())
            .await
            .into_iter()
            .next()
    }

    /// Whether a directory exists for this id (the descriptor may still be unreadable)
    pub async fn session_exists(&self, session_id: &str) -> bool {
        if !is_plain_id(session_id) {
            return false;
        }
        tokio::fs::metadata(self.session_dir.join(session_id))
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Ids are single path components; anything else cannot name a session directory.
fn is_plain_id(session_id: &str) -> bool {
    !session_id.is_empty()
        && session_id != "."
        && session_id != ".."
        && !session_id.contains(['/', '\\'])
}
