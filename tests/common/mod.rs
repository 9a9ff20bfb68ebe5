#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use mcp_smoke::check::CheckContext;
use mcp_smoke::exec::ProcessBackend;

pub use mcp_smoke_test_utils::{
    init_tracing, with_timeout, FakeProcessBackend, ProjectFixture, SettingsBuilder,
};

/// A check context rooted at `root` using `backend`, with a 1s command
/// timeout.
pub fn context(root: &std::path::Path, backend: &FakeProcessBackend) -> Arc<CheckContext> {
    let backend: Arc<dyn ProcessBackend> = Arc::new(backend.clone());
    Arc::new(CheckContext::new(root, Duration::from_secs(1), backend))
}
