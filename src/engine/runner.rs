// src/engine/runner.rs

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Notify;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use crate::check::{CheckContext, CheckDescriptor, CheckOutput, Verdict};
use crate::exec::duration_millis;
use crate::report::console;

use super::{CheckResult, RunnerState};

/// Message recorded for the check running when an interrupt arrives, and as
/// the skip reason for every check after it.
pub const INTERRUPTED: &str = "run interrupted";

/// Runs checks sequentially and records their outcomes.
///
/// - Each check runs on its own Tokio task, awaited to completion before the
///   next one starts, so a panic inside a check is caught as a `JoinError`
///   and recorded as `Failed`.
/// - Results are appended in registration order; the list always has one
///   entry per check, even after an interrupt.
pub struct TestRunner {
    ctx: Arc<CheckContext>,
    state: RunnerState,
    results: Vec<CheckResult>,
    interrupt: Arc<Notify>,
    console: bool,
}

impl fmt::Debug for TestRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestRunner")
            .field("state", &self.state)
            .field("results", &self.results.len())
            .field("console", &self.console)
            .finish_non_exhaustive()
    }
}

enum Settled {
    Done(CheckResult),
    Interrupted(CheckResult),
}

impl TestRunner {
    pub fn new(ctx: Arc<CheckContext>) -> Self {
        Self {
            ctx,
            state: RunnerState::Idle,
            results: Vec::new(),
            interrupt: Arc::new(Notify::new()),
            console: false,
        }
    }

    /// Abort the run when `interrupt` is notified (e.g. on Ctrl-C).
    pub fn with_interrupt(mut self, interrupt: Arc<Notify>) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Print a progress line per check to stdout.
    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    /// Run every check in order and return one result per check.
    ///
    /// Never fails: check errors, panics and interrupts all become records.
    /// Calling it again starts a fresh run.
    pub async fn run_all(&mut self, checks: Vec<CheckDescriptor>) -> Vec<CheckResult> {
        self.state = RunnerState::Running;
        self.results = Vec::with_capacity(checks.len());
        info!(checks = checks.len(), "test run started");

        let mut pending = checks.into_iter();
        while let Some(descriptor) = pending.next() {
            if self.console {
                println!("{}", console::check_started(&descriptor.name));
            }

            match self.execute(&descriptor).await {
                Settled::Done(result) => self.record(result),
                Settled::Interrupted(result) => {
                    warn!(check = %descriptor.name, "run interrupted; skipping remaining checks");
                    self.record(result);
                    for rest in pending.by_ref() {
                        self.record(CheckResult::skipped(rest.name, INTERRUPTED));
                    }
                }
            }
        }

        self.state = RunnerState::Completed;
        info!(results = self.results.len(), "test run completed");
        self.results.clone()
    }

    fn record(&mut self, result: CheckResult) {
        if self.console {
            println!("{}", console::check_settled(&result));
        }
        self.results.push(result);
    }

    async fn execute(&self, descriptor: &CheckDescriptor) -> Settled {
        let name = descriptor.name.clone();
        let check = Arc::clone(&descriptor.check);
        let ctx = Arc::clone(&self.ctx);

        debug!(check = %name, "starting check");
        let started = Instant::now();
        let mut handle = tokio::spawn(async move { check.run(ctx).await });

        tokio::select! {
            joined = &mut handle => {
                Settled::Done(settle(name, elapsed_ms(started), joined))
            }
            _ = self.interrupt.notified() => {
                handle.abort();
                Settled::Interrupted(CheckResult::failed(name, elapsed_ms(started), INTERRUPTED))
            }
        }
    }
}

fn settle(name: String, duration_ms: u64, joined: Result<CheckOutput, JoinError>) -> CheckResult {
    match joined {
        Ok(Ok(Verdict::Pass)) => {
            debug!(check = %name, duration_ms, "check passed");
            CheckResult::passed(name, duration_ms)
        }
        Ok(Ok(Verdict::Skip(reason))) => {
            info!(check = %name, reason = %reason, "check skipped");
            CheckResult::skipped(name, reason)
        }
        Ok(Err(err)) => {
            warn!(check = %name, duration_ms, error = %err, detail = ?err, "check failed");
            CheckResult::failed(name, duration_ms, err.to_string())
        }
        Err(join_err) if join_err.is_panic() => {
            let message = panic_message(join_err.into_panic());
            warn!(check = %name, panic = %message, "check panicked");
            CheckResult::failed(name, duration_ms, format!("check panicked: {message}"))
        }
        Err(join_err) => {
            warn!(check = %name, error = %join_err, "check task did not complete");
            CheckResult::failed(name, duration_ms, format!("check aborted: {join_err}"))
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    duration_millis(started.elapsed())
}
