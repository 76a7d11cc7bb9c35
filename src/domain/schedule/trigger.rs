//! Workflow trigger conditions and the events they are evaluated against.

use std::fmt;

use chrono::{DateTime, Utc};
use glob_match::glob_match;

use super::cron::CronExpr;

/// Something that happened which may start a workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    /// The scheduler woke up at this instant.
    Scheduled(DateTime<Utc>),
    /// Someone started the workflow by hand.
    ManualDispatch,
    /// Commits were pushed to a branch.
    Push { branch: String },
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerEvent::Scheduled(at) => write!(f, "schedule at {}", at.to_rfc3339()),
            TriggerEvent::ManualDispatch => write!(f, "workflow_dispatch"),
            TriggerEvent::Push { branch } => write!(f, "push to '{}'", branch),
        }
    }
}

/// A declared trigger condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Fires at any minute matched by one of the cron expressions (UTC).
    Schedule(Vec<CronExpr>),
    /// Fires whenever a manual dispatch is requested.
    ManualDispatch,
    /// Fires on pushes to a branch accepted by the filter.
    Push(BranchFilter),
}

impl Trigger {
    pub fn kind(&self) -> &'static str {
        match self {
            Trigger::Schedule(_) => "schedule",
            Trigger::ManualDispatch => "workflow_dispatch",
            Trigger::Push(_) => "push",
        }
    }

    pub fn fires(&self, event: &TriggerEvent) -> bool {
        match (self, event) {
            (Trigger::Schedule(crons), TriggerEvent::Scheduled(at)) => {
                crons.iter().any(|cron| cron.matches(*at))
            }
            (Trigger::ManualDispatch, TriggerEvent::ManualDispatch) => true,
            (Trigger::Push(filter), TriggerEvent::Push { branch }) => filter.matches(branch),
            _ => false,
        }
    }

    /// Earliest scheduled minute after `after`, if this is a schedule trigger.
    pub fn next_scheduled(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Trigger::Schedule(crons) => crons.iter().filter_map(|c| c.next_after(after)).min(),
            _ => None,
        }
    }
}

/// Branch patterns for push triggers.
///
/// An empty filter accepts every branch. Patterns use GitHub's glob flavour:
/// `*` matches within one path segment, `**` matches across segments,
/// `?`, `[...]` and `{a,b}` work as in shell globs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchFilter {
    patterns: Vec<String>,
}

impl BranchFilter {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn matches(&self, branch: &str) -> bool {
        let branch = branch.strip_prefix("refs/heads/").unwrap_or(branch);
        self.patterns.is_empty()
            || self.patterns.iter().any(|pattern| glob_match(pattern, branch))
    }
}
