//! API Facade for the application.
//!
//! This module exposes high-level functions that wire the production adapters
//! into the command implementations.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};

use crate::app::AppContext;
use crate::app::commands::{init as init_cmd, notify as notify_cmd, workflow};
use crate::domain::{NotifyConfig, TranslationConfig, load_config};
use crate::ports::{Notifier, PassthroughTranslator, SecretSource, Translator};
use crate::services::{
    ConsoleNotifier, EnvSecrets, GitCommandAdapter, HttpArxivClient, HttpDeeplTranslator,
    LineNotifier, ShellStepExecutor, SlackWebhookNotifier,
};

pub use crate::app::commands::notify::NotifyOutcome;
pub use crate::app::commands::workflow::{LoadedWorkflow, RunOutcome, WorkflowSource};
pub use crate::domain::{AppError, JobReport, TriggerEvent};

/// Inputs for a notify run.
#[derive(Debug, Clone, Default)]
pub struct NotifyOptions {
    pub config_path: PathBuf,
    /// Slack incoming-webhook URL, used when `SLACK_ID` is unset.
    pub slack_id: Option<String>,
    /// LINE Notify access token, used when `LINE_TOKEN` is unset.
    pub line_token: Option<String>,
    /// Also print messages to stdout.
    pub console: bool,
    /// Run date; defaults to today in UTC.
    pub date: Option<NaiveDate>,
    /// Print messages to stdout instead of delivering them.
    pub dry_run: bool,
}

/// Fetch, score, translate and deliver today's papers.
pub fn notify(options: &NotifyOptions) -> Result<NotifyOutcome, AppError> {
    let config = load_config(&options.config_path)?;
    let today = options.date.unwrap_or_else(|| Utc::now().date_naive());

    let papers = HttpArxivClient::new(&config.arxiv)?;
    let translator = create_translator(&config.translation)?;
    let notifiers = create_notifiers(options, &config.notify, &EnvSecrets)?;

    let ctx = AppContext::new(papers, translator, notifiers);
    notify_cmd::execute(&ctx, &config, today)
}

fn create_translator(config: &TranslationConfig) -> Result<Box<dyn Translator>, AppError> {
    if !config.enabled {
        tracing::info!("translation disabled in config");
        return Ok(Box::new(PassthroughTranslator));
    }
    match HttpDeeplTranslator::from_env(config)? {
        Some(translator) => Ok(Box::new(translator)),
        None => {
            tracing::warn!("DEEPL_AUTH_KEY is not set; posting untranslated text");
            Ok(Box::new(PassthroughTranslator))
        }
    }
}

fn create_notifiers<S: SecretSource>(
    options: &NotifyOptions,
    config: &NotifyConfig,
    secrets: &S,
) -> Result<Vec<Box<dyn Notifier>>, AppError> {
    if options.dry_run {
        return Ok(vec![Box::new(ConsoleNotifier)]);
    }

    let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();
    if let Some(url) = destination(secrets, "SLACK_ID", &options.slack_id) {
        notifiers.push(Box::new(SlackWebhookNotifier::new(&url, config)?));
    }
    if let Some(token) = destination(secrets, "LINE_TOKEN", &options.line_token) {
        notifiers.push(Box::new(LineNotifier::new(token, config)?));
    }
    if options.console {
        notifiers.push(Box::new(ConsoleNotifier));
    }
    Ok(notifiers)
}

/// Injected secret `name`, falling back to the command-line value.
fn destination<S: SecretSource>(secrets: &S, name: &str, flag: &Option<String>) -> Option<String> {
    secrets
        .secret(name)
        .or_else(|| flag.clone())
        .filter(|value| !value.trim().is_empty())
}

/// Load the workflow at `file`, or the one found in the current directory.
pub fn workflow_load(file: Option<&Path>) -> Result<LoadedWorkflow, AppError> {
    workflow::load_workflow(file, &std::env::current_dir()?)
}

/// Outline of the workflow's triggers and jobs.
pub fn workflow_describe(file: Option<&Path>) -> Result<String, AppError> {
    let loaded = workflow_load(file)?;
    Ok(format!("source: {}\n{}", loaded.source, workflow::describe(&loaded.definition)))
}

/// Whether the workflow starts a run for `event`.
pub fn workflow_trigger(file: Option<&Path>, event: &TriggerEvent) -> Result<bool, AppError> {
    Ok(workflow_load(file)?.definition.should_run(event))
}

/// Next `count` scheduled runs after `after`.
pub fn workflow_next(
    file: Option<&Path>,
    after: DateTime<Utc>,
    count: usize,
) -> Result<Vec<DateTime<Utc>>, AppError> {
    Ok(workflow::next_runs(&workflow_load(file)?.definition, after, count))
}

/// Inputs for a local workflow run.
#[derive(Debug, Clone)]
pub struct WorkflowRunOptions {
    pub file: Option<PathBuf>,
    /// Job id; the first job when `None`.
    pub job: Option<String>,
    pub event: TriggerEvent,
    /// Directory the steps run in.
    pub working_dir: PathBuf,
}

/// Run a job locally with secrets taken from the environment.
pub fn workflow_run(options: &WorkflowRunOptions) -> Result<RunOutcome, AppError> {
    let loaded = workflow::load_workflow(options.file.as_deref(), &options.working_dir)?;
    let executor = ShellStepExecutor::default();
    let secrets = EnvSecrets;
    let runner = workflow::JobRunner::new(&executor, &secrets, options.working_dir.clone());
    workflow::run(&loaded.definition, options.job.as_deref(), &options.event, &runner)
}

/// Push event for `branch`, or for the branch checked out in `root`.
pub fn push_event(root: &Path, branch: Option<String>) -> Result<TriggerEvent, AppError> {
    workflow::push_event(&GitCommandAdapter::new(root.to_path_buf()), branch)
}

/// Scaffold `config.yaml` and the workflow under `path`.
pub fn init(path: &Path, force: bool) -> Result<Vec<PathBuf>, AppError> {
    init_cmd::execute(path, force)
}
