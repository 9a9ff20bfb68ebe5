// src/exec/process.rs

//! Single-command process runner.

use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{duration_millis, Invocation, ProcessError, ProcessOutcome};

/// Run one command to completion (or until its timeout), capturing both
/// output streams.
///
/// - stdout/stderr are piped and drained incrementally by background tasks;
///   stdin is connected to null so nothing inherits the terminal.
/// - The wait for exit *and* stream drain is bounded by
///   `invocation.options.timeout`. On expiry the child is killed and a
///   synthetic timed-out outcome carrying the partial output is returned.
///   `tokio::time::timeout` guarantees only one of the two paths resolves.
/// - Spawn failures (missing executable, permission denied) are returned as
///   [`ProcessError::Spawn`]; the caller decides what that means.
pub async fn run_process(invocation: &Invocation) -> Result<ProcessOutcome, ProcessError> {
    let command_line = invocation.command_line();
    let timeout = invocation.options.timeout;

    debug!(
        command = %command_line,
        timeout_ms = duration_millis(timeout),
        cwd = ?invocation.options.cwd,
        "spawning process"
    );

    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if let Some(cwd) = &invocation.options.cwd {
        cmd.current_dir(cwd);
    }

    let mut child = cmd.spawn().map_err(|source| ProcessError::Spawn {
        command: command_line.clone(),
        source,
    })?;

    let stdout_buf = OutputBuffer::default();
    let stderr_buf = OutputBuffer::default();

    let mut readers: Vec<JoinHandle<()>> = Vec::with_capacity(2);
    if let Some(stdout) = child.stdout.take() {
        readers.push(tokio::spawn(drain(stdout, stdout_buf.clone())));
    }
    if let Some(stderr) = child.stderr.take() {
        readers.push(tokio::spawn(drain(stderr, stderr_buf.clone())));
    }
    let abort_handles: Vec<_> = readers.iter().map(JoinHandle::abort_handle).collect();

    let child_ref = &mut child;
    let settle = async move {
        let status = child_ref.wait().await;
        for reader in readers {
            if let Err(e) = reader.await {
                debug!(error = %e, "output reader task ended abnormally");
            }
        }
        status
    };

    let settled = tokio::time::timeout(timeout, settle).await;

    match settled {
        Ok(Ok(status)) => {
            let outcome = ProcessOutcome {
                exit_code: status.code(),
                timed_out: false,
                stdout: stdout_buf.take_string(),
                stderr: stderr_buf.take_string(),
            };
            debug!(
                command = %command_line,
                exit_code = ?outcome.exit_code,
                stdout_len = outcome.stdout.len(),
                stderr_len = outcome.stderr.len(),
                "process exited"
            );
            Ok(outcome)
        }
        Ok(Err(source)) => Err(ProcessError::Wait {
            command: command_line,
            source,
        }),
        Err(_elapsed) => {
            info!(
                command = %command_line,
                timeout_ms = duration_millis(timeout),
                "process exceeded timeout; killing"
            );
            for handle in abort_handles {
                handle.abort();
            }
            // Forceful kill; graceful shutdown is not assumed.
            if let Err(e) = child.kill().await {
                warn!(
                    command = %command_line,
                    error = %e,
                    "failed to kill timed-out process; it may be orphaned"
                );
            }
            Ok(ProcessOutcome::timed_out(
                timeout,
                stdout_buf.take_string(),
                stderr_buf.take_string(),
            ))
        }
    }
}

/// Byte buffer shared between a reader task and the runner.
///
/// Bytes are kept raw and decoded once at the end so multi-byte characters
/// split across reads survive.
#[derive(Debug, Clone, Default)]
struct OutputBuffer(Arc<Mutex<Vec<u8>>>);

impl OutputBuffer {
    fn append(&self, bytes: &[u8]) {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        guard.extend_from_slice(bytes);
    }

    fn take_string(&self) -> String {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        let bytes = std::mem::take(&mut *guard);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

async fn drain<R>(mut reader: R, buf: OutputBuffer)
where
    R: AsyncRead + Unpin,
{
    let mut chunk = [0u8; 4096];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => buf.append(&chunk[..n]),
            Err(e) => {
                debug!(error = %e, "error reading process output; stopping");
                break;
            }
        }
    }
}
