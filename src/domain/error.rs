use std::io;

use thiserror::Error;

/// Library-wide error type for carrier-owl operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration file parsed but holds invalid values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file missing.
    #[error("Config file not found: {0}")]
    ConfigMissing(String),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Cron expression rejected.
    #[error("Invalid cron expression '{expression}': {reason}")]
    InvalidCron { expression: String, reason: String },

    /// Workflow definition rejected.
    #[error("Invalid workflow: {0}")]
    InvalidWorkflow(String),

    /// Job id not present in the workflow.
    #[error("Job '{job}' not found. Available: {available}")]
    JobNotFound { job: String, available: String },

    /// Step requires a secret that is not set.
    #[error("Step '{step}' requires secret '{secret}', which is not set")]
    MissingSecret { step: String, secret: String },

    /// HTTP transport or status failure.
    #[error("{service} request failed: {details}")]
    Http { service: String, details: String },

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Message template could not be rendered.
    #[error("Template error: {0}")]
    Template(#[from] crate::domain::template::TemplateError),

    /// One or more destinations rejected a message.
    #[error("Notification failed for: {}", .0.join(", "))]
    NotificationFailed(Vec<String>),

    /// Scaffold target already exists.
    #[error("{0} already exists (use --force to overwrite)")]
    AlreadyExists(String),

    /// Git execution failed.
    #[error("Git error running '{command}': {details}")]
    GitError { command: String, details: String },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn http<S: Into<String>, D: Into<String>>(service: S, details: D) -> Self {
        AppError::Http { service: service.into(), details: details.into() }
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::InvalidConfig(_)
            | AppError::YamlParse(_)
            | AppError::InvalidCron { .. }
            | AppError::InvalidWorkflow(_)
            | AppError::MissingSecret { .. }
            | AppError::ParseError { .. }
            | AppError::Template(_) => io::ErrorKind::InvalidInput,
            AppError::ConfigMissing(_) | AppError::JobNotFound { .. } => io::ErrorKind::NotFound,
            AppError::AlreadyExists(_) => io::ErrorKind::AlreadyExists,
            AppError::Http { .. } | AppError::NotificationFailed(_) | AppError::GitError { .. } => {
                io::ErrorKind::Other
            }
        }
    }
}
