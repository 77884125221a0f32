//! Streaming execution: output chunks while the CLI runs, plus a completion future

use futures::future::BoxFuture;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::sync::mpsc;

use super::executor::ExecutorOptions;
use crate::error::{CopilotError, Result};
use crate::{StreamChunk, StreamChunkKind};

/// Buffered chunks before the readers wait on the consumer
const CHUNK_CHANNEL_CAPACITY: usize = 64;

/// Final result of a streamed execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamResult {
    pub exit_code: i32,
    /// Everything written to stdout, in order
    pub stdout: String,
    pub stderr: String,
}

/// A running CLI process: its output chunks and a future resolving once it exits.
///
/// Drain `chunks` before (or while) awaiting `completion`; the readers block
/// once the channel is full.
pub struct ExecStream {
    pub chunks: mpsc::Receiver<StreamChunk>,
    pub completion: BoxFuture<'static, Result<StreamResult>>,
}

impl ExecStream {
    /// Build a stream from already-known parts (test doubles, replays)
    pub fn new(
        chunks: mpsc::Receiver<StreamChunk>,
        completion: BoxFuture<'static, Result<StreamResult>>,
    ) -> Self {
        Self { chunks, completion }
    }

    /// Wire up readers and a timed wait for a spawned child
    pub(super) fn from_child(mut child: Child, options: &ExecutorOptions) -> Result<Self> {
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("Failed to capture stdout pipe"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| std::io::Error::other("Failed to capture stderr pipe"))?;

        let (tx, rx) = mpsc::channel(CHUNK_CHANNEL_CAPACITY);
        let stdout_task = tokio::spawn(forward_pipe(stdout, StreamChunkKind::Stdout, tx.clone()));
        let stderr_task = tokio::spawn(forward_pipe(stderr, StreamChunkKind::Stderr, tx));

        let timeout = options.timeout;
        let binary = options.binary.clone();
        let handle = tokio::spawn(async move {
            let wait_task = async {
                let status = child.wait().await?;
                let stdout = stdout_task.await.map_err(std::io::Error::other)??;
                let stderr = stderr_task.await.map_err(std::io::Error::other)??;
                Ok::<_, std::io::Error>((status, stdout, stderr))
            };

            match tokio::time::timeout(timeout, wait_task).await {
                Ok(result) => {
                    let (status, stdout, stderr) = result?;
                    let exit_code = status.code().unwrap_or(1);
                    tracing::info!("{} exited with code {}", binary, exit_code);
                    Ok(StreamResult {
                        exit_code,
                        stdout,
                        stderr,
                    })
                }
                Err(_) => {
                    tracing::warn!(
                        "{} timed out after {}ms, killing",
                        binary,
                        timeout.as_millis()
                    );
                    let _ = child.start_kill();
                    Err(CopilotError::Timeout { timeout })
                }
            }
        });

        let completion: BoxFuture<'static, Result<StreamResult>> = Box::pin(async move {
            handle
                .await
                .map_err(|e| CopilotError::Io(std::io::Error::other(e)))?
        });

        Ok(Self::new(rx, completion))
    }
}

/// Forward a pipe line by line, returning everything read.
///
/// Lines keep their trailing newline so the chunks concatenate back to the
/// exact output. A closed receiver stops forwarding but not reading.
async fn forward_pipe<R: AsyncRead + Unpin>(
    pipe: R,
    kind: StreamChunkKind,
    tx: mpsc::Sender<StreamChunk>,
) -> std::io::Result<String> {
    let mut reader = BufReader::new(pipe);
    let mut collected = String::new();
    let mut buf = Vec::new();
    let mut forwarding = true;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let data = String::from_utf8_lossy(&buf).into_owned();
        collected.push_str(&data);

        if forwarding && tx.send(StreamChunk { kind, data }).await.is_err() {
            forwarding = false;
        }
    }

    Ok(collected)
}
