//! Client configuration and CLI argument construction

mod args;
pub mod models;
mod settings;

pub use args::build_cli_args;
pub use settings::{SessionSettings, Settings};

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CopilotError, Result};

/// Default wall-clock budget for one CLI run (5 minutes)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Default name of the Copilot CLI binary
pub const DEFAULT_BINARY: &str = "copilot";

/// Log level passed through to the CLI (`--log-level`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    None,
    Error,
    Warning,
    Info,
    Debug,
    All,
    Default,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::None => "none",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::All => "all",
            LogLevel::Default => "default",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options for one [`crate::CopilotClient`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Model to use (see [`models`] for known ids)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Resume a specific session by id (`--resume`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Resume the most recent session (`--continue`)
    pub continue_last_session: bool,

    /// Extra directories the agent may access
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_dirs: Vec<String>,

    /// Enable all permissions (tools, paths, URLs)
    pub allow_all: bool,
    pub allow_all_tools: bool,
    pub allow_all_paths: bool,
    pub allow_all_urls: bool,

    /// Tools allowed without prompting, e.g. `shell(git:*)`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_tools: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub denied_tools: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_urls: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub denied_urls: Vec<String>,

    /// Additional MCP server config. A string is passed verbatim, anything
    /// else is serialized to JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_mcp_config: Option<serde_json::Value>,
    pub disable_builtin_mcps: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disabled_mcp_servers: Vec<String>,

    /// Disable the ask_user tool (autonomous mode)
    pub no_ask_user: bool,
    /// Ignore AGENTS.md custom instructions
    pub no_custom_instructions: bool,
    /// `--stream on|off`; omitted when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streaming: Option<bool>,
    /// Only print the agent response (no stats block)
    pub silent: bool,
    pub no_color: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,
    /// Custom agent to use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    /// Working directory for the CLI process
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
    /// Timeout in milliseconds (default 5 minutes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// CLI binary (default `copilot`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<String>,
    /// Extra environment variables for the CLI process
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,
    /// Session store to read (default ~/.copilot/session-state/)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_dir: Option<PathBuf>,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        self.timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn binary(&self) -> &str {
        self.binary.as_deref().unwrap_or(DEFAULT_BINARY)
    }
}

/// Reject contradictory configurations
pub fn validate_config(config: &ClientConfig) -> Result<()> {
    if config.session_id.is_some() && config.continue_last_session {
        return Err(CopilotError::Configuration(
            "Cannot specify both session_id and continue_last_session".to_string(),
        ));
    }
    if config.timeout_ms == Some(0) {
        return Err(CopilotError::Configuration(
            "timeout_ms must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_configs() {
        assert!(validate_config(&ClientConfig::default()).is_ok());
        assert!(
            validate_config(&ClientConfig {
                model: Some(models::GPT_5_MINI.to_string()),
                ..Default::default()
            })
            .is_ok()
        );
        assert!(
            validate_config(&ClientConfig {
                session_id: Some("test-123".to_string()),
                ..Default::default()
            })
            .is_ok()
        );
    }

    #[test]
    fn test_resume_and_continue_conflict() {
        let config = ClientConfig {
            session_id: Some("test-123".to_string()),
            continue_last_session: true,
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, CopilotError::Configuration(_)));
        assert!(err.to_string().contains("session_id"));
        assert!(err.to_string().contains("continue_last_session"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = ClientConfig {
            timeout_ms: Some(0),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.binary(), "copilot");
    }

    #[test]
    fn test_config_from_toml() {
        let config: ClientConfig = toml::from_str(
            r#"
model = "gpt-5-mini"
allow_all = true
log_level = "debug"
timeout_ms = 30000
denied_tools = ["shell(rm)"]

[env]
NO_COLOR = "1"
"#,
        )
        .unwrap();

        assert_eq!(config.model.as_deref(), Some("gpt-5-mini"));
        assert!(config.allow_all);
        assert_eq!(config.log_level, Some(LogLevel::Debug));
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.denied_tools, vec!["shell(rm)"]);
        assert_eq!(config.env.get("NO_COLOR").map(String::as_str), Some("1"));
    }
}
