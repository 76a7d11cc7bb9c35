//! Step execution port definition.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::AppError;

/// A resolved shell step ready to launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub step: String,
    pub command: String,
    /// Environment added on top of the runner's own environment.
    pub env: Vec<(String, String)>,
    pub working_dir: PathBuf,
}

/// How a launched command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Process exited; `code` is `None` when it was killed by a signal.
    Exited { code: Option<i32> },
    /// Process outlived its time budget and was killed.
    TimedOut,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        matches!(self, ExecutionResult::Exited { code: Some(0) })
    }
}

/// Port for running shell steps.
pub trait StepExecutor {
    /// Run `spec`, killing it if it exceeds `budget`.
    fn execute(&self, spec: &CommandSpec, budget: Duration) -> Result<ExecutionResult, AppError>;
}
