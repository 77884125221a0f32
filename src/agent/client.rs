//! Copilot CLI client: one prompt in, one typed response out

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::Stream;
use futures::future::BoxFuture;
use tokio::sync::mpsc;

use super::executor::{CommandExecutor, ExecutorOptions, ProcessExecutor};
use super::output::{ParsedOutput, parse_cli_output};
use super::stream::StreamResult;
use crate::config::{ClientConfig, SessionSettings, build_cli_args, validate_config};
use crate::error::{CopilotError, Result};
use crate::session::SessionManager;
use crate::{CopilotResponse, StreamChunk};

/// How hard to look for the session a finished run wrote.
///
/// The CLI persists its session on its own schedule. When the newest session
/// is older than the call, the store is read again up to `attempts` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcilePolicy {
    pub attempts: u32,
    pub interval: Duration,
    /// Allowance for the CLI's clock and timestamp rounding
    pub clock_skew: Duration,
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            interval: Duration::from_millis(200),
            clock_skew: Duration::from_secs(1),
        }
    }
}

impl ReconcilePolicy {
    /// Trust the first read
    pub fn single_read() -> Self {
        Self {
            attempts: 0,
            ..Self::default()
        }
    }
}

impl From<&SessionSettings> for ReconcilePolicy {
    fn from(settings: &SessionSettings) -> Self {
        Self {
            attempts: settings.poll_attempts,
            interval: settings.poll_interval(),
            ..Self::default()
        }
    }
}

/// Client for the GitHub Copilot CLI
///
/// ```rust,ignore
/// let mut client = CopilotClient::new(ClientConfig {
///     model: Some(models::GPT_5_MINI.to_string()),
///     allow_all: true,
///     ..Default::default()
/// })?;
/// let response = client.prompt("Explain this code").await?;
/// println!("{} ({} tokens in)", response.output, response.usage.input_tokens);
///
/// // Resume later
/// let mut follow_up = CopilotClient::new(ClientConfig {
///     session_id: Some(response.session_id),
///     ..Default::default()
/// })?;
/// ```
pub struct CopilotClient {
    config: ClientConfig,
    executor: Arc<dyn CommandExecutor>,
    sessions: SessionManager,
    reconcile: ReconcilePolicy,
    last_session_id: Option<String>,
}

impl CopilotClient {
    /// Create a client that runs the real CLI
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_executor(config, Arc::new(ProcessExecutor::new()))
    }

    /// Create a client with a custom executor
    pub fn with_executor(config: ClientConfig, executor: Arc<dyn CommandExecutor>) -> Result<Self> {
        validate_config(&config)?;

        let sessions = match config.session_dir.as_ref() {
            Some(dir) => SessionManager::with_dir(dir),
            None => SessionManager::new(),
        };

        Ok(Self {
            config,
            executor,
            sessions,
            reconcile: ReconcilePolicy::default(),
            last_session_id: None,
        })
    }

    /// Resolve sessions from another store
    pub fn with_session_manager(mut self, sessions: SessionManager) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn with_reconcile_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.reconcile = policy;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session_manager(&self) -> &SessionManager {
        &self.sessions
    }

    /// Session id resolved by the last completed prompt
    pub fn last_session_id(&self) -> Option<&str> {
        self.last_session_id.as_deref()
    }

    /// Session id this client was configured to resume, if any
    pub fn configured_session_id(&self) -> Option<&str> {
        self.config.session_id.as_deref()
    }

    /// Execute a prompt and wait for the parsed response
    pub async fn prompt(&mut self, text: &str) -> Result<CopilotResponse> {
        validate_config(&self.config)?;

        let args = build_cli_args(&self.config, text);
        let options = ExecutorOptions::from_config(&self.config);

        let started_at = Utc::now();
        let result = self.executor.execute(&args, &options).await?;
        check_exit_status(result.exit_code, &result.stderr)?;

        let parsed = parse_cli_output(&result.stdout);

        // Only after the process has exited
        let session_id = self.reconcile_session(started_at).await;
        Ok(self.complete(parsed, session_id, result.exit_code))
    }

    /// Execute a prompt and stream its output.
    ///
    /// Chunks already yielded stay with the caller even if the run later
    /// times out; [`PromptStream::finish`] then returns the timeout error.
    pub fn prompt_stream(&mut self, text: &str) -> Result<PromptStream<'_>> {
        validate_config(&self.config)?;

        let args = build_cli_args(&self.config, text);
        let options = ExecutorOptions::from_config(&self.config);

        let started_at = Utc::now();
        let exec = self.executor.execute_stream(&args, &options)?;

        Ok(PromptStream {
            client: self,
            chunks: exec.chunks,
            completion: exec.completion,
            started_at,
        })
    }

    /// Find the session the just-finished run belongs to.
    ///
    /// Returns an empty string when nothing can be resolved; a missing
    /// session never fails the prompt.
    async fn reconcile_session(&self, started_at: DateTime<Utc>) -> String {
        let skew = chrono::Duration::milliseconds(self.reconcile.clock_skew.as_millis() as i64);
        let threshold = started_at - skew;

        let mut attempt = 0;
        loop {
            let latest = self.sessions.get_most_recent_session().await;
            let exhausted = attempt >= self.reconcile.attempts;

            match latest {
                Some(session) if session.updated_at >= threshold => {
                    tracing::debug!("Resolved session {}", session.id);
                    return session.id;
                }
                Some(session) if exhausted => {
                    tracing::warn!(
                        "Newest session {} was last updated at {}, before this call started; using it anyway",
                        session.id,
                        session.updated_at
                    );
                    return session.id;
                }
                None if exhausted => {
                    tracing::warn!(
                        "No session found in {}",
                        self.sessions.session_dir().display()
                    );
                    return String::new();
                }
                _ => {}
            }

            attempt += 1;
            tokio::time::sleep(self.reconcile.interval).await;
        }
    }

    fn complete(
        &mut self,
        parsed: ParsedOutput,
        session_id: String,
        exit_code: i32,
    ) -> CopilotResponse {
        self.last_session_id = Some(session_id.clone());

        CopilotResponse {
            output: parsed.response,
            session_id,
            usage: parsed.usage,
            duration: parsed.duration,
            code_changes: parsed.code_changes,
            exit_code,
        }
    }
}

/// Non-zero exit is fatal only when the CLI explained itself on stderr
fn check_exit_status(exit_code: i32, stderr: &str) -> Result<()> {
    if exit_code == 0 {
        return Ok(());
    }

    if !stderr.is_empty() {
        return Err(CopilotError::Execution {
            exit_code,
            stderr: stderr.trim().to_string(),
        });
    }

    tracing::warn!(
        "Copilot CLI exited with code {} without stderr output; treating stdout as the response",
        exit_code
    );
    Ok(())
}

/// Output of a running prompt.
///
/// Poll it as a [`Stream`] of [`StreamChunk`]s, then call [`PromptStream::finish`]
/// for the parsed response and session id.
pub struct PromptStream<'a> {
    client: &'a mut CopilotClient,
    chunks: mpsc::Receiver<StreamChunk>,
    completion: BoxFuture<'static, Result<StreamResult>>,
    started_at: DateTime<Utc>,
}

impl PromptStream<'_> {
    /// Next chunk, or `None` once both pipes are closed
    pub async fn next_chunk(&mut self) -> Option<StreamChunk> {
        self.chunks.recv().await
    }

    /// Drain what is left, wait for exit and build the response.
    ///
    /// Updates the client's last session id.
    pub async fn finish(self) -> Result<CopilotResponse> {
        let PromptStream {
            client,
            mut chunks,
            completion,
            started_at,
        } = self;

        while chunks.recv().await.is_some() {}

        let result = completion.await?;
        check_exit_status(result.exit_code, &result.stderr)?;

        let parsed = parse_cli_output(&result.stdout);
        let session_id = client.reconcile_session(started_at).await;
        Ok(client.complete(parsed, session_id, result.exit_code))
    }
}

impl Stream for PromptStream<'_> {
    type Item = StreamChunk;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().chunks.poll_recv(cx)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
