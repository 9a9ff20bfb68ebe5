// src/report/summary.rs

use serde::{Deserialize, Serialize};

use crate::engine::{CheckResult, CheckStatus};

/// Aggregate over a completed batch.
///
/// `total == passed + failed + skipped` and `success_rate` is in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub success_rate: u8,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Process exit code for this run: 0 when nothing failed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() { 0 } else { 1 }
    }
}

/// Count results by status. Pure: the same input always gives the same
/// summary.
pub fn summarize(results: &[CheckResult]) -> RunSummary {
    let mut passed = 0;
    let mut failed = 0;
    let mut skipped = 0;

    for result in results {
        match result.status {
            CheckStatus::Passed => passed += 1,
            CheckStatus::Failed => failed += 1,
            CheckStatus::Skipped => skipped += 1,
        }
    }

    RunSummary {
        total: results.len(),
        passed,
        failed,
        skipped,
        success_rate: success_rate(passed, failed),
    }
}

/// `round(100 * passed / (passed + failed))`, halves rounding up.
///
/// Skipped checks do not count. With nothing countable the rate is 100.
pub fn success_rate(passed: usize, failed: usize) -> u8 {
    let counted = passed + failed;
    if counted == 0 {
        return 100;
    }
    let rate = (200 * passed + counted) / (2 * counted);
    u8::try_from(rate).unwrap_or(100)
}
