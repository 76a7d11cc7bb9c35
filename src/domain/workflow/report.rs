//! Outcome of a local job run.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    /// Command exited with status 0.
    Succeeded,
    /// Hosted action; supplied by the runner platform, nothing executed locally.
    Provided,
    Failed { reason: String },
    TimedOut,
    /// Not started because an earlier step failed or the job timed out.
    Skipped,
}

impl StepStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, StepStatus::Failed { .. } | StepStatus::TimedOut)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Succeeded => write!(f, "succeeded"),
            StepStatus::Provided => write!(f, "provided by runner"),
            StepStatus::Failed { reason } => write!(f, "failed: {}", reason),
            StepStatus::TimedOut => write!(f, "timed out"),
            StepStatus::Skipped => write!(f, "skipped"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub name: String,
    pub status: StepStatus,
    #[serde(serialize_with = "as_millis")]
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum JobOutcome {
    Succeeded,
    Failed { step: String },
    TimedOut { step: String },
}

impl fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobOutcome::Succeeded => write!(f, "succeeded"),
            JobOutcome::Failed { step } => write!(f, "step '{}' failed", step),
            JobOutcome::TimedOut { step } => write!(f, "timed out during step '{}'", step),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobReport {
    pub job: String,
    pub outcome: JobOutcome,
    pub steps: Vec<StepReport>,
    #[serde(serialize_with = "as_millis")]
    pub elapsed: Duration,
}

impl JobReport {
    pub fn succeeded(&self) -> bool {
        self.outcome == JobOutcome::Succeeded
    }
}

fn as_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}
