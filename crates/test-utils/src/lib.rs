pub mod fake_backend;
pub mod fixture;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

pub use fake_backend::FakeProcessBackend;
pub use fixture::{ProjectFixture, SettingsBuilder};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Run a future with a 5-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    with_deadline(Duration::from_secs(5), f).await
}

/// Run a future, failing the test if it does not settle within `limit`.
pub async fn with_deadline<F, T>(limit: Duration, f: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(limit, f).await {
        Ok(value) => value,
        Err(_) => panic!("Test timed out after {}ms", limit.as_millis()),
    }
}
