// src/check/tooling.rs

//! Process-backed checks for external tools and npm packages.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::heuristics::{exited_cleanly, reports_missing_module, reports_missing_package};
use super::{Check, CheckContext, CheckError, CheckFuture, Verdict};
use crate::exec::RunOptions;

/// Run a command; it must exit 0. `failure` is the message otherwise.
#[derive(Debug, Clone)]
pub struct CommandSucceeds {
    pub program: String,
    pub args: Vec<String>,
    pub failure: String,
}

impl CommandSucceeds {
    pub fn new(program: &str, args: &[&str], failure: impl Into<String>) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            failure: failure.into(),
        }
    }
}

impl Check for CommandSucceeds {
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture {
        let this = self.clone();
        Box::pin(async move {
            let invocation = ctx.invocation(&this.program, this.args.iter().cloned());
            let outcome = ctx.run_to_completion(invocation).await?;
            if !exited_cleanly(&outcome) {
                debug!(
                    program = %this.program,
                    exit_code = ?outcome.exit_code,
                    stderr = %outcome.stderr,
                    "command did not exit cleanly"
                );
                return Err(CheckError::assertion(this.failure));
            }
            Ok(Verdict::Pass)
        })
    }
}

/// `node <script> --help` must not fail to load a module.
///
/// The script may not understand `--help`; only the missing-module marker
/// counts as failure.
#[derive(Debug, Clone)]
pub struct ScriptLoads {
    pub script: std::path::PathBuf,
    pub failure: String,
}

impl Check for ScriptLoads {
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture {
        let this = self.clone();
        Box::pin(async move {
            let script = ctx.resolve(&this.script);
            let invocation = ctx.invocation(
                "node",
                [script.to_string_lossy().into_owned(), "--help".to_string()],
            );
            let outcome = ctx.run_to_completion(invocation).await?;
            if reports_missing_module(&outcome) {
                return Err(CheckError::assertion(this.failure));
            }
            Ok(Verdict::Pass)
        })
    }
}

/// A server package resolves through `npx`, or failing that is installed
/// globally.
///
/// The `npx -y <pkg> --help` probe passes unless it errors, times out, or
/// reports a missing package; in those cases `npm list -g <pkg>` decides.
#[derive(Debug, Clone)]
pub struct PackageResolvable {
    pub label: String,
    pub package: String,
}

impl Check for PackageResolvable {
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture {
        let this = self.clone();
        Box::pin(async move {
            let probe = ctx.invocation("npx", ["-y", this.package.as_str(), "--help"]);
            match ctx.run(probe).await {
                Ok(outcome) if !outcome.timed_out && !reports_missing_package(&outcome) => {
                    return Ok(Verdict::Pass);
                }
                Ok(outcome) => debug!(
                    package = %this.package,
                    timed_out = outcome.timed_out,
                    "npx probe inconclusive; checking global install"
                ),
                Err(e) => debug!(
                    package = %this.package,
                    error = %e,
                    "npx probe failed; checking global install"
                ),
            }

            let global = ctx.invocation("npm", ["list", "-g", this.package.as_str()]);
            let outcome = ctx.run_to_completion(global).await?;
            if !exited_cleanly(&outcome) {
                return Err(CheckError::assertion(format!(
                    "{} server not available globally or via npx",
                    this.label
                )));
            }
            Ok(Verdict::Pass)
        })
    }
}

/// Every package is installed globally (`npm list -g <pkg>` exits 0).
#[derive(Debug, Clone)]
pub struct GlobalPackagesInstalled {
    pub packages: Vec<String>,
}

impl Check for GlobalPackagesInstalled {
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture {
        let packages = self.packages.clone();
        Box::pin(async move {
            for package in packages.iter() {
                let invocation = ctx.invocation("npm", ["list", "-g", package.as_str()]);
                let outcome = ctx.run_to_completion(invocation).await?;
                if !exited_cleanly(&outcome) {
                    return Err(CheckError::assertion(format!(
                        "{package} not installed globally"
                    )));
                }
            }
            Ok(Verdict::Pass)
        })
    }
}

/// Best-effort `npx -y <pkg> --help` probe.
///
/// Packages frequently reject `--help`, so an inconclusive probe (spawn
/// error, timeout, missing-package output) is logged as a note rather than
/// failing the check.
#[derive(Debug, Clone)]
pub struct PackageProbe {
    pub package: String,
    pub timeout: Duration,
}

impl Check for PackageProbe {
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture {
        let this = self.clone();
        Box::pin(async move {
            let invocation = ctx
                .invocation("npx", ["-y", this.package.as_str(), "--help"])
                .with_options(RunOptions {
                    timeout: this.timeout,
                    cwd: Some(ctx.project_root().to_path_buf()),
                });

            let note = match ctx.run(invocation).await {
                Ok(outcome) if outcome.timed_out => Some("probe timed out".to_string()),
                Ok(outcome) if reports_missing_package(&outcome) => {
                    Some("package reported as not found".to_string())
                }
                Ok(_) => None,
                Err(e) => Some(e.to_string()),
            };

            if let Some(note) = note {
                info!(
                    package = %this.package,
                    note = %note,
                    "package may not support --help; treating probe as inconclusive"
                );
            }
            Ok(Verdict::Pass)
        })
    }
}
