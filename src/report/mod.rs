// src/report/mod.rs

//! Reporting: aggregate the runner's results, persist them, print them.
//!
//! - [`summary`]: the pure `summarize` over a result list.
//! - [`artifact`]: the JSON report written once per run.
//! - [`console`]: human-readable progress lines and the summary banner.

pub mod artifact;
pub mod console;
pub mod summary;

pub use artifact::{persist, Environment, PersistedReport};
pub use summary::{success_rate, summarize, RunSummary};
