// src/check/mod.rs

//! Checks: named, independently-failable units of verification.
//!
//! A check is anything implementing [`Check`]: it receives a shared
//! [`CheckContext`] and resolves to
//! - `Ok(Verdict::Pass)`,
//! - `Ok(Verdict::Skip(reason))` when a precondition (e.g. "tool is on
//!   `PATH`") does not hold, or
//! - `Err(CheckError)` carrying a human-readable message.
//!
//! Concrete checks live in the submodules:
//! - [`config`]: MCP config files exist, parse, and declare the right servers.
//! - [`filesystem`]: paths, executability, scratch file/dir round-trips.
//! - [`tooling`]: external commands and npm packages.
//! - [`agent`]: the coding-agent CLI (skips when absent).
//! - [`heuristics`]: the named output predicates the process-backed checks
//!   rely on.
//!
//! Closures can be turned into checks with [`check_fn`].

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::errors::SmokeError;
use crate::exec::{Invocation, ProcessBackend, ProcessError, ProcessOutcome, RunOptions};

pub mod agent;
pub mod config;
pub mod filesystem;
pub mod heuristics;
pub mod tooling;

/// Successful settlement of a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// The check chose not to run; the reason ends up in the report.
    Skip(String),
}

/// Why a check failed.
#[derive(Error, Debug)]
pub enum CheckError {
    /// An expectation about local state or process output was not met.
    #[error("{0}")]
    Assertion(String),

    /// A subprocess hung and was killed.
    #[error("Command timeout after {}ms: {command}", .timeout.as_millis())]
    TimedOut { command: String, timeout: Duration },

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Config(#[from] SmokeError),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl CheckError {
    pub fn assertion(message: impl Into<String>) -> Self {
        CheckError::Assertion(message.into())
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        CheckError::Io {
            context: context.into(),
            source,
        }
    }
}

pub type CheckOutput = Result<Verdict, CheckError>;

/// Future returned by [`Check::run`].
///
/// `'static` so the runner can move it onto its own task and survive a panic
/// inside it.
pub type CheckFuture = Pin<Box<dyn Future<Output = CheckOutput> + Send>>;

/// An asynchronous unit of verification.
pub trait Check: Send + Sync {
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture;
}

/// A check together with its display name, in suite order.
#[derive(Clone)]
pub struct CheckDescriptor {
    pub name: String,
    pub check: Arc<dyn Check>,
}

impl CheckDescriptor {
    pub fn new(name: impl Into<String>, check: impl Check + 'static) -> Self {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }
}

impl fmt::Debug for CheckDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Adapter turning a closure into a [`Check`].
pub struct FnCheck<F>(F);

/// Wrap `f` as a check.
///
/// ```ignore
/// let boom = check_fn(|_ctx| async { Err(CheckError::assertion("boom")) });
/// ```
pub fn check_fn<F, Fut>(f: F) -> FnCheck<F>
where
    F: Fn(Arc<CheckContext>) -> Fut + Send + Sync,
    Fut: Future<Output = CheckOutput> + Send + 'static,
{
    FnCheck(f)
}

impl<F, Fut> Check for FnCheck<F>
where
    F: Fn(Arc<CheckContext>) -> Fut + Send + Sync,
    Fut: Future<Output = CheckOutput> + Send + 'static,
{
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture {
        Box::pin((self.0)(ctx))
    }
}

/// Runs several checks in order as one; the first non-`Pass` settles it.
pub struct Sequence(Vec<Arc<dyn Check>>);

impl Sequence {
    pub fn new(steps: Vec<Arc<dyn Check>>) -> Self {
        Self(steps)
    }
}

impl Check for Sequence {
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture {
        let steps = self.0.clone();
        Box::pin(async move {
            for step in steps {
                match step.run(Arc::clone(&ctx)).await? {
                    Verdict::Pass => continue,
                    skip @ Verdict::Skip(_) => return Ok(skip),
                }
            }
            Ok(Verdict::Pass)
        })
    }
}

/// Everything a check may use: the project root, the process backend and
/// the suite's default command timeout.
pub struct CheckContext {
    project_root: PathBuf,
    timeout: Duration,
    process: Arc<dyn ProcessBackend>,
}

impl fmt::Debug for CheckContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckContext")
            .field("project_root", &self.project_root)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl CheckContext {
    pub fn new(
        project_root: impl Into<PathBuf>,
        timeout: Duration,
        process: Arc<dyn ProcessBackend>,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            timeout,
            process,
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve a path against the project root (absolute paths pass through).
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    /// An invocation running in the project root with the default timeout.
    pub fn invocation<I, S>(&self, program: &str, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(program, args).with_options(RunOptions {
            timeout: self.timeout,
            cwd: Some(self.project_root.clone()),
        })
    }

    /// Run through the backend and return whatever it produced, timeouts
    /// included.
    pub async fn run(&self, invocation: Invocation) -> Result<ProcessOutcome, ProcessError> {
        self.process.run(invocation).await
    }

    /// Like [`run`](Self::run), but a timed-out process becomes
    /// [`CheckError::TimedOut`] and spawn errors become
    /// [`CheckError::Process`].
    pub async fn run_to_completion(
        &self,
        invocation: Invocation,
    ) -> Result<ProcessOutcome, CheckError> {
        let command = invocation.command_line();
        let timeout = invocation.options.timeout;
        let outcome = self.process.run(invocation).await?;
        if outcome.timed_out {
            return Err(CheckError::TimedOut { command, timeout });
        }
        Ok(outcome)
    }
}
