//! Command executor abstraction and the subprocess-backed implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};

use super::stream::ExecStream;
use crate::ExecutionResult;
use crate::config::{ClientConfig, DEFAULT_BINARY, DEFAULT_TIMEOUT};
use crate::error::{CopilotError, Result};

/// Options for one CLI execution
#[derive(Debug, Clone)]
pub struct ExecutorOptions {
    pub binary: String,
    /// Working directory (inherits the caller's when `None`)
    pub cwd: Option<PathBuf>,
    pub timeout: Duration,
    /// Variables added on top of the inherited environment
    pub env: HashMap<String, String>,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            cwd: None,
            timeout: DEFAULT_TIMEOUT,
            env: HashMap::new(),
        }
    }
}

impl ExecutorOptions {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            binary: config.binary().to_string(),
            cwd: config.cwd.clone(),
            timeout: config.timeout(),
            env: config.env.clone(),
        }
    }
}

/// Runs the CLI. Swap in a test double to exercise the client without spawning processes.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run to completion and return the captured output.
    ///
    /// Fails with [`CopilotError::Timeout`] if the process outlives
    /// `options.timeout`; partial output is discarded.
    async fn execute(&self, args: &[String], options: &ExecutorOptions)
    -> Result<ExecutionResult>;

    /// Start the CLI and forward its output as it arrives.
    fn execute_stream(&self, args: &[String], options: &ExecutorOptions) -> Result<ExecStream>;
}

/// Executor that spawns the real CLI binary
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    async fn execute(
        &self,
        args: &[String],
        options: &ExecutorOptions,
    ) -> Result<ExecutionResult> {
        let mut child = spawn(args, options)?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("Failed to capture stdout pipe"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| std::io::Error::other("Failed to capture stderr pipe"))?;

        let stdout_task = tokio::spawn(read_pipe(stdout));
        let stderr_task = tokio::spawn(read_pipe(stderr));

        let wait_task = async {
            let status = child.wait().await?;
            let stdout = stdout_task.await.map_err(std::io::Error::other)??;
            let stderr = stderr_task.await.map_err(std::io::Error::other)??;
            Ok::<_, std::io::Error>((status, stdout, stderr))
        };

        let (status, stdout, stderr) = match tokio::time::timeout(options.timeout, wait_task).await
        {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(
                    "{} timed out after {}ms, killing",
                    options.binary,
                    options.timeout.as_millis()
                );
                let _ = child.start_kill();
                return Err(CopilotError::Timeout {
                    timeout: options.timeout,
                });
            }
        };

        let exit_code = status.code().unwrap_or(1);
        tracing::info!("{} exited with code {}", options.binary, exit_code);

        Ok(ExecutionResult {
            stdout,
            stderr,
            exit_code,
        })
    }

    fn execute_stream(&self, args: &[String], options: &ExecutorOptions) -> Result<ExecStream> {
        let child = spawn(args, options)?;
        ExecStream::from_child(child, options)
    }
}

/// Spawn the CLI with piped output and no stdin
pub(super) fn spawn(args: &[String], options: &ExecutorOptions) -> Result<Child> {
    tracing::info!("Starting {} ({} args)", options.binary, args.len());
    tracing::debug!("argv: {:?}", args);

    let mut command = Command::new(&options.binary);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .envs(&options.env)
        .kill_on_drop(true);

    if let Some(cwd) = options.cwd.as_ref() {
        command.current_dir(cwd);
    }

    command.spawn().map_err(|source| CopilotError::Spawn {
        binary: PathBuf::from(&options.binary),
        source,
    })
}

async fn read_pipe<R: AsyncRead + Unpin>(mut pipe: R) -> std::io::Result<String> {
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf).await?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> (Vec<String>, ExecutorOptions) {
        let options = ExecutorOptions {
            binary: "sh".to_string(),
            timeout: Duration::from_secs(10),
            ..Default::default()
        };
        (vec!["-c".to_string(), script.to_string()], options)
    }

    #[tokio::test]
    async fn test_captures_stdout_stderr_and_exit_code() {
        let (args, options) = sh("printf 'hello\\n'; printf 'oops' >&2; exit 3");

        let result = ProcessExecutor::new().execute(&args, &options).await.unwrap();

        assert_eq!(result.stdout, "hello\n");
        assert_eq!(result.stderr, "oops");
        assert_eq!(result.exit_code, 3);
    }

    #[tokio::test]
    async fn test_env_and_cwd_are_applied() {
        let dir = tempfile::TempDir::new().unwrap();
        let (args, mut options) = sh("printf '%s' \"$COPILOT_AGENT_TEST\"; pwd");
        options
            .env
            .insert("COPILOT_AGENT_TEST".to_string(), "42".to_string());
        options.cwd = Some(dir.path().to_path_buf());

        let result = ProcessExecutor::new().execute(&args, &options).await.unwrap();

        assert!(result.stdout.starts_with("42"));
        let reported = PathBuf::from(result.stdout[2..].trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[tokio::test]
    async fn test_timeout_kills_process() {
        let (args, mut options) = sh("echo partial; sleep 5");
        options.timeout = Duration::from_millis(200);

        let err = ProcessExecutor::new()
            .execute(&args, &options)
            .await
            .unwrap_err();

        assert!(matches!(err, CopilotError::Timeout { timeout } if timeout == Duration::from_millis(200)));
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let options = ExecutorOptions {
            binary: "copilot-agent-definitely-missing-binary".to_string(),
            ..Default::default()
        };

        let err = ProcessExecutor::new()
            .execute(&["-p".to_string(), "hi".to_string()], &options)
            .await
            .unwrap_err();

        assert!(matches!(err, CopilotError::Spawn { .. }));
    }
}
