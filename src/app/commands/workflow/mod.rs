//! Workflow inspection and local runs.

pub mod runner;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::{AppError, JobReport, Trigger, TriggerEvent, WorkflowDefinition};
use crate::ports::{GitPort, SecretSource, StepExecutor};
use crate::services::scaffold_assets::{self, WORKFLOW_PATH};

pub use runner::JobRunner;

/// Where a workflow definition was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowSource {
    File(PathBuf),
    /// The workflow embedded in the binary.
    Bundled,
}

impl std::fmt::Display for WorkflowSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowSource::File(path) => write!(f, "{}", path.display()),
            WorkflowSource::Bundled => write!(f, "<bundled>"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedWorkflow {
    pub source: WorkflowSource,
    pub definition: WorkflowDefinition,
}

/// Load `file`, or the repository workflow under `root`, or the bundled one.
pub fn load_workflow(file: Option<&Path>, root: &Path) -> Result<LoadedWorkflow, AppError> {
    let path = match file {
        Some(file) if !file.exists() => {
            return Err(AppError::ConfigMissing(file.display().to_string()));
        }
        Some(file) => Some(file.to_path_buf()),
        None => Some(root.join(WORKFLOW_PATH)).filter(|path| path.exists()),
    };

    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading workflow");
            let content = std::fs::read_to_string(&path)?;
            let definition = WorkflowDefinition::parse_yaml(&content)?;
            Ok(LoadedWorkflow { source: WorkflowSource::File(path), definition })
        }
        None => {
            tracing::debug!("no workflow file found, using the bundled workflow");
            let content = scaffold_assets::scaffold_file_content(WORKFLOW_PATH).ok_or_else(|| {
                AppError::Configuration(format!("bundled workflow '{}' is missing", WORKFLOW_PATH))
            })?;
            let definition = WorkflowDefinition::parse_yaml(&content)?;
            Ok(LoadedWorkflow { source: WorkflowSource::Bundled, definition })
        }
    }
}

/// Human-readable outline of triggers and jobs.
pub fn describe(workflow: &WorkflowDefinition) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "workflow: {}", workflow.name);
    let _ = writeln!(out, "triggers:");
    for trigger in &workflow.triggers {
        match trigger {
            Trigger::Schedule(crons) => {
                for cron in crons {
                    let _ = writeln!(out, "  schedule: {} (UTC)", cron);
                }
            }
            Trigger::ManualDispatch => {
                let _ = writeln!(out, "  {}", trigger.kind());
            }
            Trigger::Push(filter) if filter.patterns().is_empty() => {
                let _ = writeln!(out, "  push: any branch");
            }
            Trigger::Push(filter) => {
                let _ = writeln!(out, "  push: {}", filter.patterns().join(", "));
            }
        }
    }

    for job in &workflow.jobs {
        let _ = writeln!(
            out,
            "job {} (runs-on: {}, timeout: {}m)",
            job.id,
            job.runs_on.as_deref().unwrap_or("-"),
            job.timeout.as_secs() / 60
        );
        for (index, step) in job.steps.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}: {}", index + 1, step.name, step.action.describe());
        }
        let secrets = job.required_secrets();
        if !secrets.is_empty() {
            let _ = writeln!(out, "  secrets: {}", secrets.join(", "));
        }
    }
    out
}

/// Result of `workflow run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No trigger fires for the event; nothing was executed.
    NotTriggered,
    Completed(JobReport),
}

/// Evaluate `event` against the workflow and run `job` when it fires.
pub fn run<E: StepExecutor, S: SecretSource>(
    workflow: &WorkflowDefinition,
    job: Option<&str>,
    event: &TriggerEvent,
    runner: &JobRunner<'_, E, S>,
) -> Result<RunOutcome, AppError> {
    let job = workflow.job(job)?;
    if !workflow.should_run(event) {
        tracing::info!(%event, "no trigger fires for event");
        return Ok(RunOutcome::NotTriggered);
    }

    tracing::info!(%event, job = %job.id, "running job");
    Ok(RunOutcome::Completed(runner.run(job)))
}

/// Push event for `branch`, or for the branch checked out when `None`.
pub fn push_event<G: GitPort>(git: &G, branch: Option<String>) -> Result<TriggerEvent, AppError> {
    let branch = match branch {
        Some(branch) => branch,
        None => git.get_current_branch()?,
    };
    Ok(TriggerEvent::Push { branch })
}

/// Upcoming scheduled runs after `after`.
pub fn next_runs(workflow: &WorkflowDefinition, after: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
    workflow.upcoming(after, count)
}
