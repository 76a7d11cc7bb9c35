//! carrier-owl: post keyword-ranked arXiv papers to Slack and LINE on a weekday schedule.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    NotifyOptions, NotifyOutcome, RunOutcome, WorkflowRunOptions, init, notify, push_event,
    workflow_describe, workflow_next, workflow_run, workflow_trigger,
};
pub use domain::{AppError, CronExpr, JobReport, NotifierConfig, TriggerEvent, WorkflowDefinition};
