//! Workflow definition domain models.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::AppError;
use crate::domain::schedule::{Trigger, TriggerEvent};

/// Timeout applied when a job does not declare `timeout-minutes`.
pub const DEFAULT_TIMEOUT_MINUTES: u64 = 360;

/// A parsed workflow: when to run and what to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowDefinition {
    pub name: String,
    pub triggers: Vec<Trigger>,
    /// Jobs in declaration order.
    pub jobs: Vec<Job>,
}

impl WorkflowDefinition {
    /// Whether any trigger fires for `event`.
    pub fn should_run(&self, event: &TriggerEvent) -> bool {
        self.triggers.iter().any(|trigger| trigger.fires(event))
    }

    /// Look up a job by id, or the first job when `id` is `None`.
    pub fn job(&self, id: Option<&str>) -> Result<&Job, AppError> {
        let found = match id {
            Some(id) => self.jobs.iter().find(|job| job.id == id),
            None => self.jobs.first(),
        };
        found.ok_or_else(|| AppError::JobNotFound {
            job: id.unwrap_or("<first>").to_string(),
            available: self.jobs.iter().map(|job| job.id.as_str()).collect::<Vec<_>>().join(", "),
        })
    }

    /// Earliest scheduled run after `after` across all schedule triggers.
    pub fn next_scheduled(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.triggers.iter().filter_map(|trigger| trigger.next_scheduled(after)).min()
    }

    /// Upcoming scheduled runs, merged across schedule triggers.
    pub fn upcoming(&self, after: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
        let mut times = Vec::with_capacity(count);
        let mut cursor = after;
        while times.len() < count {
            match self.next_scheduled(cursor) {
                Some(next) => {
                    times.push(next);
                    cursor = next;
                }
                None => break,
            }
        }
        times
    }
}

/// One job: an ordered step list bounded by a wall-clock timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: String,
    pub runs_on: Option<String>,
    pub timeout: Duration,
    pub steps: Vec<Step>,
}

impl Job {
    /// Secret names referenced by any step, in first-use order.
    pub fn required_secrets(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for step in &self.steps {
            for binding in &step.env {
                if let EnvValue::Secret(name) = &binding.value
                    && !names.contains(&name.as_str())
                {
                    names.push(name);
                }
            }
        }
        names
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: String,
    pub action: StepAction,
    pub env: Vec<EnvBinding>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// A hosted action such as `actions/checkout@v2`, with its `with:` inputs.
    Uses { action: String, inputs: Vec<(String, String)> },
    /// A shell command.
    Run { command: String },
}

impl StepAction {
    pub fn describe(&self) -> String {
        match self {
            StepAction::Uses { action, inputs } if inputs.is_empty() => format!("uses {}", action),
            StepAction::Uses { action, inputs } => {
                let inputs: Vec<String> = inputs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                format!("uses {} ({})", action, inputs.join(", "))
            }
            StepAction::Run { command } => format!("run {}", command.trim()),
        }
    }
}

/// An environment variable a step receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvBinding {
    pub name: String,
    pub value: EnvValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvValue {
    Literal(String),
    /// Resolved from the secret store at run time (`${{ secrets.NAME }}`).
    Secret(String),
}

impl EnvValue {
    /// Interpret a raw workflow value, recognising secret references.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let secret = trimmed
            .strip_prefix("${{")
            .and_then(|rest| rest.strip_suffix("}}"))
            .map(str::trim)
            .and_then(|expr| expr.strip_prefix("secrets."))
            .filter(|name| {
                !name.is_empty() && name.chars().all(|c| c == '_' || c.is_ascii_alphanumeric())
            });
        match secret {
            Some(name) => EnvValue::Secret(name.to_string()),
            None => EnvValue::Literal(raw.to_string()),
        }
    }
}
