pub mod model;
mod parse;
pub mod report;

pub use model::{
    DEFAULT_TIMEOUT_MINUTES, EnvBinding, EnvValue, Job, Step, StepAction, WorkflowDefinition,
};
pub use report::{JobOutcome, JobReport, StepReport, StepStatus};
