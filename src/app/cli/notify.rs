use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;

use crate::app::api::{self, NotifyOptions};
use crate::domain::AppError;

#[derive(Args, Debug)]
pub struct NotifyArgs {
    /// Notifier configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
    /// Slack incoming-webhook URL (SLACK_ID takes precedence)
    #[arg(long)]
    slack_id: Option<String>,
    /// LINE Notify access token (LINE_TOKEN takes precedence)
    #[arg(long)]
    line_token: Option<String>,
    /// Also print messages to stdout
    #[arg(long)]
    console: bool,
    /// Run as if today were DATE (YYYY-MM-DD, UTC)
    #[arg(long, value_name = "DATE")]
    date: Option<NaiveDate>,
    /// Print messages to stdout without delivering them
    #[arg(long)]
    dry_run: bool,
}

pub fn run_notify(args: NotifyArgs) -> Result<(), AppError> {
    let options = NotifyOptions {
        config_path: args.config,
        slack_id: args.slack_id,
        line_token: args.line_token,
        console: args.console,
        date: args.date,
        dry_run: args.dry_run,
    };
    let outcome = api::notify(&options)?;
    eprintln!(
        "✅ {} of {} papers submitted {}..{} posted ({} messages)",
        outcome.selected, outcome.fetched, outcome.window.from, outcome.window.to, outcome.messages
    );
    Ok(())
}
