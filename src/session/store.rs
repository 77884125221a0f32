//! Session store enumeration
//!
//! The store is owned by the Copilot CLI and only ever read here: one
//! directory per session, each holding a workspace.yaml descriptor.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::parser::{WORKSPACE_FILE, parse_workspace_file};
use crate::SessionInfo;

/// Default store location (~/.copilot/session-state/)
pub fn default_session_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".copilot")
        .join("session-state")
}

/// Path of the descriptor for a session id inside a store
pub fn workspace_path(store_dir: &Path, session_id: &str) -> PathBuf {
    store_dir.join(session_id).join(WORKSPACE_FILE)
}

/// Read every parseable session in `store_dir`, in directory order.
///
/// A missing store yields an empty list. Subdirectories without a readable
/// descriptor are skipped.
pub async fn list_raw(store_dir: &Path) -> Vec<SessionInfo> {
    let mut entries = match tokio::fs::read_dir(store_dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No session directory at {}", store_dir.display());
            return Vec::new();
        }
        Err(e) => {
            warn!(
                "Failed to read session directory {}: {}",
                store_dir.display(),
                e
            );
            return Vec::new();
        }
    };

    let mut sessions = Vec::new();
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!("Stopped reading {}: {}", store_dir.display(), e);
                break;
            }
        };

        let is_dir = entry
            .file_type()
            .await
            .map(|t| t.is_dir())
            .unwrap_or(false);
        if !is_dir {
            continue;
        }

        let path = entry.path().join(WORKSPACE_FILE);
        match parse_workspace_file(&path).await {
            Ok(session) => sessions.push(session),
            Err(e) => {
                debug!("Skipping session {}: {}", entry.file_name().to_string_lossy(), e);
            }
        }
    }

    sessions
}
