use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of one session descriptor as it was on disk when read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Unique session identifier (UUID in practice)
    pub id: String,

    /// Working directory the session was started in
    pub cwd: String,

    /// Summary/title of the session, empty if the CLI has not written one
    pub summary: String,

    /// Number of times the session was compacted
    pub summary_count: u32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionInfo {
    /// Timestamp selected by a sort key
    pub fn timestamp(&self, key: SessionSortKey) -> DateTime<Utc> {
        match key {
            SessionSortKey::CreatedAt => self.created_at,
            SessionSortKey::UpdatedAt => self.updated_at,
        }
    }
}

/// Field used to order session listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionSortKey {
    CreatedAt,
    #[default]
    UpdatedAt,
}

impl std::str::FromStr for SessionSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" | "created_at" | "createdat" => Ok(SessionSortKey::CreatedAt),
            "updated" | "updated_at" | "updatedat" => Ok(SessionSortKey::UpdatedAt),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Options for listing sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionListOptions {
    /// Maximum number of sessions to return (`None` or `Some(0)` means all)
    #[serde(default)]
    pub limit: Option<usize>,

    #[serde(default)]
    pub sort_by: SessionSortKey,

    #[serde(default)]
    pub sort_order: SortOrder,
}

impl SessionListOptions {
    /// Options selecting the single most recently updated session
    pub fn most_recent() -> Self {
        Self {
            limit: Some(1),
            sort_by: SessionSortKey::UpdatedAt,
            sort_order: SortOrder::Desc,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn sort_by(mut self, key: SessionSortKey, order: SortOrder) -> Self {
        self.sort_by = key;
        self.sort_order = order;
        self
    }
}
