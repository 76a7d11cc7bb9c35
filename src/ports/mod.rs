mod git;
mod notifier;
mod paper_source;
mod secret_source;
mod step_executor;
mod translator;

pub use git::GitPort;
pub use notifier::Notifier;
pub use paper_source::{PaperQuery, PaperSource};
pub use secret_source::{SecretSource, StaticSecrets};
pub use step_executor::{CommandSpec, ExecutionResult, StepExecutor};
pub use translator::{PassthroughTranslator, Translator};
