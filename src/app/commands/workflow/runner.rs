//! Local execution of a workflow job.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::domain::{
    AppError, EnvValue, Job, JobOutcome, JobReport, Step, StepAction, StepReport, StepStatus,
};
use crate::ports::{CommandSpec, ExecutionResult, SecretSource, StepExecutor};

/// Runs a job's steps in order, stopping at the first failure.
///
/// Each `run:` step is launched with whatever is left of the job's timeout.
/// `uses:` steps belong to the hosting platform and are only recorded.
pub struct JobRunner<'a, E: StepExecutor, S: SecretSource> {
    executor: &'a E,
    secrets: &'a S,
    working_dir: PathBuf,
}

impl<'a, E: StepExecutor, S: SecretSource> JobRunner<'a, E, S> {
    pub fn new(executor: &'a E, secrets: &'a S, working_dir: PathBuf) -> Self {
        Self { executor, secrets, working_dir }
    }

    pub fn run(&self, job: &Job) -> JobReport {
        let started = Instant::now();
        let mut outcome = JobOutcome::Succeeded;
        let mut steps = Vec::with_capacity(job.steps.len());

        for step in &job.steps {
            if outcome != JobOutcome::Succeeded {
                steps.push(StepReport {
                    name: step.name.clone(),
                    status: StepStatus::Skipped,
                    elapsed: Duration::ZERO,
                });
                continue;
            }

            let step_started = Instant::now();
            let status = match job.timeout.checked_sub(started.elapsed()) {
                Some(budget) if !budget.is_zero() => self.run_step(step, budget),
                _ => StepStatus::TimedOut,
            };

            match &status {
                StepStatus::Failed { reason } => {
                    tracing::error!(step = %step.name, %reason, "step failed");
                    outcome = JobOutcome::Failed { step: step.name.clone() };
                }
                StepStatus::TimedOut => {
                    tracing::error!(step = %step.name, timeout = ?job.timeout, "job timed out");
                    outcome = JobOutcome::TimedOut { step: step.name.clone() };
                }
                _ => tracing::info!(step = %step.name, %status, "step finished"),
            }

            steps.push(StepReport { name: step.name.clone(), status, elapsed: step_started.elapsed() });
        }

        JobReport { job: job.id.clone(), outcome, steps, elapsed: started.elapsed() }
    }

    fn run_step(&self, step: &Step, budget: Duration) -> StepStatus {
        let command = match &step.action {
            StepAction::Uses { action, .. } => {
                tracing::debug!(step = %step.name, %action, "provided by the hosting runner");
                return StepStatus::Provided;
            }
            StepAction::Run { command } => command,
        };

        let env = match self.resolve_env(step) {
            Ok(env) => env,
            Err(e) => return StepStatus::Failed { reason: e.to_string() },
        };

        let spec = CommandSpec {
            step: step.name.clone(),
            command: command.clone(),
            env,
            working_dir: self.working_dir.clone(),
        };
        tracing::info!(step = %step.name, budget = ?budget, "launching step");

        match self.executor.execute(&spec, budget) {
            Ok(result) if result.success() => StepStatus::Succeeded,
            Ok(ExecutionResult::TimedOut) => StepStatus::TimedOut,
            Ok(ExecutionResult::Exited { code: Some(code) }) => {
                StepStatus::Failed { reason: format!("exit code {}", code) }
            }
            Ok(ExecutionResult::Exited { code: None }) => {
                StepStatus::Failed { reason: "terminated by signal".to_string() }
            }
            Err(e) => StepStatus::Failed { reason: e.to_string() },
        }
    }

    fn resolve_env(&self, step: &Step) -> Result<Vec<(String, String)>, AppError> {
        step.env
            .iter()
            .map(|binding| {
                let value = match &binding.value {
                    EnvValue::Literal(value) => value.clone(),
                    EnvValue::Secret(name) => {
                        self.secrets.secret(name).ok_or_else(|| AppError::MissingSecret {
                            step: step.name.clone(),
                            secret: name.clone(),
                        })?
                    }
                };
                Ok((binding.name.clone(), value))
            })
            .collect()
    }
}
