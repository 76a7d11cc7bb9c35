//! CLI Adapter.

mod init;
mod logging;
mod notify;
mod workflow;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "carrier-owl")]
#[command(version)]
#[command(about = "Post keyword-ranked arXiv papers to Slack and LINE", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, rank, translate and post today's papers
    #[clap(visible_alias = "n")]
    Notify(notify::NotifyArgs),
    /// Inspect and locally run the notification workflow
    #[clap(visible_alias = "wf")]
    Workflow {
        #[command(subcommand)]
        command: workflow::WorkflowCommands,
    },
    /// Write the default config.yaml and workflow
    #[clap(visible_alias = "i")]
    Init {
        /// Target directory (default: current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<i32, AppError> = match cli.command {
        Commands::Notify(args) => notify::run_notify(args).map(|_| 0),
        Commands::Workflow { command } => workflow::run_workflow(command),
        Commands::Init { path, force } => init::run_init(path, force).map(|_| 0),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
