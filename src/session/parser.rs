//! workspace.yaml parser
//!
//! Each session directory written by the CLI carries a descriptor:
//! ```yaml
//! id: 785385ec-8126-484d-bc01-292dcc7f8a60
//! cwd: /Users/test/projects
//! summary_count: 0
//! created_at: 2026-01-21T20:59:24.565Z
//! updated_at: 2026-01-21T20:59:28.817Z
//! summary: Refactor the session loader
//! ```

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;

use crate::SessionInfo;

/// Name of the per-session descriptor file
pub const WORKSPACE_FILE: &str = "workspace.yaml";

/// Error type for descriptor parsing
#[derive(Debug, thiserror::Error)]
pub enum SessionParseError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// On-disk shape of workspace.yaml. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct WorkspaceYaml {
    id: String,
    cwd: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    summary_count: Option<u32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<WorkspaceYaml> for SessionInfo {
    fn from(raw: WorkspaceYaml) -> Self {
        Self {
            id: raw.id,
            cwd: raw.cwd,
            summary: raw.summary.unwrap_or_default(),
            summary_count: raw.summary_count.unwrap_or(0),
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        }
    }
}

/// Read and parse a workspace.yaml file
pub async fn parse_workspace_file(path: &Path) -> Result<SessionInfo, SessionParseError> {
    let content = tokio::fs::read_to_string(path).await?;
    parse_workspace_content(&content)
}

/// Parse workspace.yaml content from a string
pub fn parse_workspace_content(content: &str) -> Result<SessionInfo, SessionParseError> {
    let raw: WorkspaceYaml = serde_yaml::from_str(content)?;
    Ok(raw.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_full_descriptor() {
        let content = r#"id: 785385ec-8126-484d-bc01-292dcc7f8a60
cwd: /Users/test/projects
summary_count: 0
created_at: 2026-01-21T20:59:24.565Z
updated_at: 2026-01-21T20:59:28.817Z
summary: You are the best senior LangChain curriculum designer..."#;

        let session = parse_workspace_content(content).unwrap();
        assert_eq!(session.id, "785385ec-8126-484d-bc01-292dcc7f8a60");
        assert_eq!(session.cwd, "/Users/test/projects");
        assert_eq!(session.summary_count, 0);
        assert!(session.summary.contains("LangChain"));
        assert_eq!(session.updated_at.timestamp_subsec_millis(), 817);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let content = r#"id: test-session-id
cwd: /home/user
created_at: 2026-01-20T10:00:00.000Z
updated_at: 2026-01-20T12:00:00.000Z"#;

        let session = parse_workspace_content(content).unwrap();
        assert_eq!(session.id, "test-session-id");
        assert_eq!(session.summary, "");
        assert_eq!(session.summary_count, 0);
    }

    #[test]
    fn test_dates_are_parsed() {
        let content = r#"id: date-test
cwd: /test
created_at: 2026-01-15T08:30:00.000Z
updated_at: "2026-01-22T14:45:30.500Z""#;

        let session = parse_workspace_content(content).unwrap();
        assert_eq!(session.created_at.year(), 2026);
        assert_eq!(session.created_at.month(), 1);
        assert_eq!(session.created_at.day(), 15);
        assert_eq!(session.created_at.hour(), 8);
        assert_eq!(session.updated_at.day(), 22);
        assert_eq!(session.updated_at.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_summary_count_greater_than_zero() {
        let content = r#"id: compacted-session
cwd: /projects
summary_count: 3
created_at: 2026-01-10T00:00:00.000Z
updated_at: 2026-01-22T00:00:00.000Z
summary: Compacted conversation about..."#;

        let session = parse_workspace_content(content).unwrap();
        assert_eq!(session.summary_count, 3);
    }

    #[test]
    fn test_missing_required_field_is_error() {
        let content = r#"id: no-cwd
created_at: 2026-01-10T00:00:00.000Z
updated_at: 2026-01-22T00:00:00.000Z"#;

        assert!(parse_workspace_content(content).is_err());
    }

    #[test]
    fn test_invalid_timestamp_is_error() {
        let content = r#"id: bad-date
cwd: /x
created_at: yesterday
updated_at: 2026-01-22T00:00:00.000Z"#;

        assert!(matches!(
            parse_workspace_content(content),
            Err(SessionParseError::YamlError(_))
        ));
    }

    #[test]
    fn test_garbage_is_error() {
        assert!(parse_workspace_content(":::\n- [").is_err());
        assert!(parse_workspace_content("").is_err());
    }
}
