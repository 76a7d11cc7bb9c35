//! Workflow command implementation.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

use crate::app::api::{self, RunOutcome, WorkflowRunOptions};
use crate::domain::{AppError, JobReport, StepStatus, TriggerEvent};

#[derive(Subcommand)]
pub enum WorkflowCommands {
    /// Print the workflow's triggers, jobs and steps
    Show {
        #[command(flatten)]
        file: FileArg,
    },
    /// Report whether an event starts a run
    Trigger {
        #[command(flatten)]
        file: FileArg,
        #[command(flatten)]
        event: EventArgs,
    },
    /// List upcoming scheduled runs
    Next {
        #[command(flatten)]
        file: FileArg,
        /// Start of the search (RFC3339, default: now)
        #[arg(long, value_name = "RFC3339")]
        after: Option<String>,
        /// Number of runs to list
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },
    /// Run a job locally when the event starts a run
    Run {
        #[command(flatten)]
        file: FileArg,
        /// Job id (default: first job)
        #[arg(long)]
        job: Option<String>,
        #[command(flatten)]
        event: EventArgs,
        /// Print the job report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct FileArg {
    /// Workflow file (default: .github/workflows/carrier_owl.yml, else the bundled workflow)
    #[arg(short, long)]
    file: Option<PathBuf>,
}

/// The event to evaluate; manual dispatch when none is given.
#[derive(Args, Debug)]
#[group(multiple = false)]
pub struct EventArgs {
    /// Scheduler wake-up at this instant (RFC3339, default: now)
    #[arg(long, value_name = "RFC3339", num_args = 0..=1, default_missing_value = "now")]
    schedule_at: Option<String>,
    /// Manual dispatch
    #[arg(long)]
    dispatch: bool,
    /// Push to BRANCH (default: the current git branch)
    #[arg(long, value_name = "BRANCH", num_args = 0..=1, default_missing_value = "")]
    push: Option<String>,
}

impl EventArgs {
    fn resolve(self) -> Result<TriggerEvent, AppError> {
        if self.dispatch {
            return Ok(TriggerEvent::ManualDispatch);
        }
        if let Some(at) = self.schedule_at {
            return Ok(TriggerEvent::Scheduled(parse_instant(&at)?));
        }
        match self.push {
            Some(branch) => {
                let branch = Some(branch).filter(|b| !b.is_empty());
                api::push_event(&std::env::current_dir()?, branch)
            }
            None => Ok(TriggerEvent::ManualDispatch),
        }
    }
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, AppError> {
    if value == "now" {
        return Ok(Utc::now());
    }
    DateTime::parse_from_rfc3339(value).map(|at| at.with_timezone(&Utc)).map_err(|e| {
        AppError::ParseError { what: format!("timestamp '{}'", value), details: e.to_string() }
    })
}

pub fn run_workflow(command: WorkflowCommands) -> Result<i32, AppError> {
    match command {
        WorkflowCommands::Show { file } => {
            print!("{}", api::workflow_describe(file.file.as_deref())?);
            Ok(0)
        }
        WorkflowCommands::Trigger { file, event } => {
            let event = event.resolve()?;
            if api::workflow_trigger(file.file.as_deref(), &event)? {
                println!("✅ {} starts a run", event);
                Ok(0)
            } else {
                println!("{} does not start a run", event);
                Ok(1)
            }
        }
        WorkflowCommands::Next { file, after, count } => {
            let after = match after {
                Some(after) => parse_instant(&after)?,
                None => Utc::now(),
            };
            let runs = api::workflow_next(file.file.as_deref(), after, count)?;
            if runs.is_empty() {
                println!("No scheduled runs.");
            }
            for at in runs {
                println!("{}", at.format("%Y-%m-%dT%H:%M:%SZ %a"));
            }
            Ok(0)
        }
        WorkflowCommands::Run { file, job, event, json } => {
            let options = WorkflowRunOptions {
                file: file.file,
                job,
                event: event.resolve()?,
                working_dir: std::env::current_dir()?,
            };
            match api::workflow_run(&options)? {
                RunOutcome::NotTriggered => {
                    println!("{} does not start a run; nothing executed", options.event);
                    Ok(0)
                }
                RunOutcome::Completed(report) => {
                    if json {
                        let out = serde_json::to_string_pretty(&report).map_err(|e| {
                            AppError::ParseError { what: "job report".into(), details: e.to_string() }
                        })?;
                        println!("{}", out);
                    } else {
                        print_report(&report);
                    }
                    Ok(if report.succeeded() { 0 } else { 1 })
                }
            }
        }
    }
}

fn print_report(report: &JobReport) {
    for step in &report.steps {
        let marker = match step.status {
            StepStatus::Succeeded | StepStatus::Provided => "✅",
            StepStatus::Skipped => "⏭️ ",
            _ => "❌",
        };
        println!("{} {} ({}, {} ms)", marker, step.name, step.status, step.elapsed.as_millis());
    }
    if report.succeeded() {
        println!("✅ Job '{}' succeeded in {} ms", report.job, report.elapsed.as_millis());
    } else {
        println!("❌ Job '{}' {}", report.job, report.outcome);
    }
}
