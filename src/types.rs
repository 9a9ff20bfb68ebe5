use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// Which battery of checks to run.
///
/// - `Server`: configuration, dependency, server-package, setup-script and
///   agent checks (default).
/// - `Functional`: exercises local filesystem operations and validates the
///   config structure in depth.
/// - `Simple`: a lightweight pass with shorter timeouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SuiteKind {
    #[default]
    Server,
    Functional,
    Simple,
}

impl fmt::Display for SuiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SuiteKind::Server => "server",
            SuiteKind::Functional => "functional",
            SuiteKind::Simple => "simple",
        };
        f.write_str(s)
    }
}

impl FromStr for SuiteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "server" => Ok(SuiteKind::Server),
            "functional" => Ok(SuiteKind::Functional),
            "simple" => Ok(SuiteKind::Simple),
            other => Err(format!(
                "invalid suite: {other} (expected \"server\", \"functional\" or \"simple\")"
            )),
        }
    }
}
