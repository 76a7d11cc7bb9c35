pub mod article;
pub mod configuration;
pub mod date_window;
pub mod digest;
pub mod error;
pub mod schedule;
pub mod scoring;
pub mod template;
pub mod workflow;

pub use article::Article;
pub use configuration::{
    ArxivApiConfig, Keyword, NotifierConfig, NotifyConfig, TranslationConfig, load_config,
    parse_config_content,
};
pub use date_window::DateWindow;
pub use digest::Digest;
pub use error::AppError;
pub use schedule::{BranchFilter, CronExpr, Trigger, TriggerEvent};
pub use scoring::{ScoredArticle, rank, score_text};
pub use template::{Template, TemplateError};
pub use workflow::{
    EnvBinding, EnvValue, Job, JobOutcome, JobReport, Step, StepAction, StepReport, StepStatus,
    WorkflowDefinition,
};
