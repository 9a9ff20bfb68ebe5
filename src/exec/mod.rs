// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running external commands using
//! `tokio::process::Command` and turning them into [`ProcessOutcome`]s that
//! checks can inspect.
//!
//! - [`process`] spawns a single command, captures its streams and enforces
//!   the wall-clock timeout.
//! - [`backend`] provides the `ProcessBackend` trait and the concrete
//!   `RealProcessBackend` used in production, which tests can replace with a
//!   fake implementation returning canned outcomes.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub mod backend;
pub mod process;

pub use backend::{ProcessBackend, RealProcessBackend};
pub use process::run_process;

/// Default per-command timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Default per-command timeout for the lightweight suite.
pub const LIGHTWEIGHT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Options for a single invocation.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub timeout: Duration,
    /// Working directory; `None` means the current working directory.
    pub cwd: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            cwd: None,
        }
    }
}

/// A command to run: program name (resolved via `PATH`) plus arguments.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub options: RunOptions,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            options: RunOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// `program arg1 arg2 ...`, for logs and error messages.
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Uniform result of one subprocess invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutcome {
    /// Exit code. `None` if the process never produced one (timed out, or
    /// was terminated by a signal).
    pub exit_code: Option<i32>,
    /// Set when the runner gave up waiting and killed the process.
    pub timed_out: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutcome {
    /// Outcome of a process that exited on its own.
    pub fn exited(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(code),
            timed_out: false,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Synthetic outcome for a process killed after `timeout`.
    ///
    /// Whatever was captured before the deadline is kept; `stderr` gets the
    /// timeout marker appended.
    pub fn timed_out(timeout: Duration, stdout: String, mut stderr: String) -> Self {
        if !stderr.is_empty() && !stderr.ends_with('\n') {
            stderr.push('\n');
        }
        stderr.push_str(&timeout_marker(timeout));
        Self {
            exit_code: None,
            timed_out: true,
            stdout,
            stderr,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// `d` in whole milliseconds, saturating at `u64::MAX`.
pub fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Marker text placed in `stderr` of a timed-out outcome.
pub fn timeout_marker(timeout: Duration) -> String {
    format!("Command timeout after {}ms", timeout.as_millis())
}

/// Errors surfaced by the process runner itself (as opposed to a process
/// that ran and failed).
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for `{command}`: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl ProcessError {
    /// True when the executable could not be found on `PATH`.
    pub fn is_not_found(&self) -> bool {
        match self {
            ProcessError::Spawn { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            ProcessError::Wait { .. } => false,
        }
    }
}
