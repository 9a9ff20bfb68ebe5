// src/exec/backend.rs

//! Pluggable process backend abstraction.
//!
//! Checks talk to a `ProcessBackend` instead of spawning processes directly.
//! This makes it easy to swap in a fake backend in tests (returning a canned
//! [`ProcessOutcome`]) while keeping the production implementation in
//! [`process`](super::process).

use std::future::Future;
use std::pin::Pin;

use super::process::run_process;
use super::{Invocation, ProcessError, ProcessOutcome};

/// Future returned by [`ProcessBackend::run`].
pub type ProcessFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ProcessOutcome, ProcessError>> + Send + 'a>>;

/// Trait abstracting how commands are executed.
///
/// Production code uses [`RealProcessBackend`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait ProcessBackend: Send + Sync {
    /// Run the invocation and resolve to its outcome.
    ///
    /// Implementations must resolve (never hang past the invocation's
    /// timeout) and report spawn failures as `Err`.
    fn run(&self, invocation: Invocation) -> ProcessFuture<'_>;
}

/// Real backend used in production: spawns OS processes via
/// [`run_process`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RealProcessBackend;

impl RealProcessBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessBackend for RealProcessBackend {
    fn run(&self, invocation: Invocation) -> ProcessFuture<'_> {
        Box::pin(async move { run_process(&invocation).await })
    }
}
