// src/check/agent.rs

//! Checks for the coding-agent CLI.
//!
//! The agent is optional: when it cannot be found on `PATH` these checks
//! report `Skipped`, never `Passed`.

use std::path::PathBuf;
use std::sync::Arc;

use super::heuristics::{rejects_config, reports_config_error};
use super::{Check, CheckContext, CheckError, CheckFuture, Verdict};
use crate::exec::ProcessError;

fn not_on_path(program: &str) -> Verdict {
    Verdict::Skip(format!("{program} not available in PATH"))
}

fn skip_if_missing(program: &str, err: ProcessError) -> Result<Verdict, CheckError> {
    if err.is_not_found() {
        Ok(not_on_path(program))
    } else {
        Err(err.into())
    }
}

/// `<agent> --version` exits 0. Skips when the agent is absent or its
/// version query fails.
#[derive(Debug, Clone)]
pub struct AgentAvailable {
    pub program: String,
}

impl Check for AgentAvailable {
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture {
        let program = self.program.clone();
        Box::pin(async move {
            let invocation = ctx.invocation(&program, ["--version"]);
            let command = invocation.command_line();
            let timeout = invocation.options.timeout;

            match ctx.run(invocation).await {
                Err(e) => skip_if_missing(&program, e),
                Ok(outcome) if outcome.timed_out => Err(CheckError::TimedOut { command, timeout }),
                Ok(outcome) if !outcome.success() => Ok(not_on_path(&program)),
                Ok(_) => Ok(Verdict::Pass),
            }
        })
    }
}

/// Which heuristic decides that the agent rejected its MCP config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigRejection {
    /// Nonzero exit and stderr mentions `config`.
    NonZeroMentionsConfig,
    /// stderr contains `Invalid` or `Error`.
    ReportsError,
}

/// `<agent> --mcp-config <file> --help` accepts the config.
#[derive(Debug, Clone)]
pub struct AgentLoadsConfig {
    pub program: String,
    pub config: PathBuf,
    pub rule: ConfigRejection,
}

impl Check for AgentLoadsConfig {
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture {
        let this = self.clone();
        Box::pin(async move {
            let config = ctx.resolve(&this.config);
            let invocation = ctx.invocation(
                &this.program,
                [
                    "--mcp-config".to_string(),
                    config.to_string_lossy().into_owned(),
                    "--help".to_string(),
                ],
            );

            let outcome = match ctx.run_to_completion(invocation).await {
                Ok(outcome) => outcome,
                Err(CheckError::Process(e)) => return skip_if_missing(&this.program, e),
                Err(e) => return Err(e),
            };

            let rejected = match this.rule {
                ConfigRejection::NonZeroMentionsConfig => rejects_config(&outcome),
                ConfigRejection::ReportsError => reports_config_error(&outcome),
            };
            if rejected {
                return Err(CheckError::assertion(format!(
                    "{} cannot parse MCP configuration",
                    this.program
                )));
            }
            Ok(Verdict::Pass)
        })
    }
}
