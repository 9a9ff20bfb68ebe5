use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mcp_smoke::exec::backend::ProcessFuture;
use mcp_smoke::exec::{Invocation, ProcessBackend, ProcessError, ProcessOutcome};

#[derive(Clone)]
enum Scripted {
    Outcome(ProcessOutcome),
    Missing,
    /// Sleep this long before resolving as timed out.
    Hang(Duration),
}

/// A process backend that never spawns anything:
/// - outcomes are scripted per command line (`"program arg1 arg2"`)
/// - unscripted commands fail to spawn with `NotFound`
/// - every invocation is recorded, in order.
#[derive(Clone, Default)]
pub struct FakeProcessBackend {
    scripted: Arc<Mutex<HashMap<String, Scripted>>>,
    invoked: Arc<Mutex<Vec<Invocation>>>,
}

impl FakeProcessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(self, program: &str, args: &[&str], scripted: Scripted) -> Self {
        let key = Invocation::new(program, args.iter().copied()).command_line();
        self.scripted.lock().unwrap().insert(key, scripted);
        self
    }

    /// `program args...` resolves to `outcome`.
    pub fn on(self, program: &str, args: &[&str], outcome: ProcessOutcome) -> Self {
        self.script(program, args, Scripted::Outcome(outcome))
    }

    /// `program args...` exits 0 with `stdout`.
    pub fn ok(self, program: &str, args: &[&str], stdout: &str) -> Self {
        self.on(program, args, ProcessOutcome::exited(0, stdout, ""))
    }

    /// `program args...` exits with `code` and `stderr`.
    pub fn fail(self, program: &str, args: &[&str], code: i32, stderr: &str) -> Self {
        self.on(program, args, ProcessOutcome::exited(code, "", stderr))
    }

    /// `program args...` cannot be spawned (executable not on `PATH`).
    pub fn on_missing(self, program: &str, args: &[&str]) -> Self {
        self.script(program, args, Scripted::Missing)
    }

    /// `program args...` hangs for `delay`, then resolves as timed out.
    pub fn on_hang(self, program: &str, args: &[&str], delay: Duration) -> Self {
        self.script(program, args, Scripted::Hang(delay))
    }

    /// Every invocation seen so far.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invoked.lock().unwrap().clone()
    }

    /// Command lines of every invocation seen so far.
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations().iter().map(Invocation::command_line).collect()
    }
}

impl ProcessBackend for FakeProcessBackend {
    fn run(&self, invocation: Invocation) -> ProcessFuture<'_> {
        let command = invocation.command_line();
        let scripted = self
            .scripted
            .lock()
            .unwrap()
            .get(&command)
            .cloned()
            .unwrap_or(Scripted::Missing);
        let timeout = invocation.options.timeout;
        tracing::debug!(command = %command, "fake backend invocation");
        self.invoked.lock().unwrap().push(invocation);

        Box::pin(async move {
            match scripted {
                Scripted::Outcome(outcome) => Ok(outcome),
                Scripted::Missing => Err(ProcessError::Spawn {
                    command,
                    source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
                }),
                Scripted::Hang(delay) => {
                    tokio::time::sleep(delay).await;
                    Ok(ProcessOutcome::timed_out(timeout, String::new(), String::new()))
                }
            }
        })
    }
}
