//! Settings file (~/.copilot-agent/config.toml)
//!
//! ```toml
//! [client]
//! model = "gpt-5-mini"
//! allow_all = true
//!
//! [session]
//! poll_attempts = 3
//! poll_interval_ms = 200
//! ```

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use super::ClientConfig;

/// Session store lookup and reconciliation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Session store override (default ~/.copilot/session-state/)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Extra reads when the newest session predates the call
    pub poll_attempts: u32,

    /// Delay between those reads
    pub poll_interval_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            dir: None,
            poll_attempts: 3,
            poll_interval_ms: 200,
        }
    }
}

impl SessionSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Contents of the settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Defaults for every client created by the CLI
    pub client: ClientConfig,

    pub session: SessionSettings,
}

impl Settings {
    /// Global settings directory (~/.copilot-agent/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".copilot-agent")
    }

    /// Global settings file (~/.copilot-agent/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load settings from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Load the global settings, or defaults when no file exists yet
    pub fn load() -> Result<Self> {
        let path = Self::global_config_path();
        if !path.exists() {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Session store named by the settings, if any.
    ///
    /// `[session] dir` wins over `[client] session_dir`. Both the prompt and
    /// session commands resolve the store through here.
    pub fn session_store(&self) -> Option<PathBuf> {
        self.session
            .dir
            .clone()
            .or_else(|| self.client.session_dir.clone())
    }

    /// Write settings to `path`, creating parent directories.
    ///
    /// Readers never see a half-written file, and concurrent writers are
    /// serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        replace_file_locked(path, content.as_bytes())
    }
}

/// Replace `path` with `bytes` through a sibling temp file.
///
/// An exclusive `fs2` lock on `<path>.lock` is held from before the temp file
/// is written until after the rename.
fn replace_file_locked(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let file_name = path
        .file_name()
        .with_context(|| format!("Not a file path: {}", path.display()))?
        .to_string_lossy();

    let lock_path = dir.join(format!("{file_name}.lock"));
    let lock = File::create(&lock_path)
        .with_context(|| format!("Failed to open {}", lock_path.display()))?;
    lock.lock_exclusive()
        .with_context(|| format!("Failed to lock {}", lock_path.display()))?;

    let staged = dir.join(format!(".{file_name}.{}.tmp", std::process::id()));
    let written = File::create(&staged)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| std::fs::rename(&staged, path));

    if written.is_err() {
        let _ = std::fs::remove_file(&staged);
    }
    let _ = FileExt::unlock(&lock);

    written.with_context(|| format!("Failed to write {}", path.display()))
}
