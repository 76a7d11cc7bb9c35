use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::domain::AppError;
use crate::ports::{CommandSpec, ExecutionResult, StepExecutor};

/// How a scripted command behaves when launched.
#[derive(Debug, Clone)]
pub struct ScriptedStep {
    pub result: ExecutionResult,
    /// Simulated run time; exceeding the budget yields `TimedOut`.
    pub duration: Duration,
}

impl ScriptedStep {
    pub fn exit(code: i32) -> Self {
        Self { result: ExecutionResult::Exited { code: Some(code) }, duration: Duration::ZERO }
    }

    pub fn slow(duration: Duration) -> Self {
        Self { result: ExecutionResult::Exited { code: Some(0) }, duration }
    }
}

/// Step executor keyed by command text; unscripted commands succeed instantly.
#[derive(Clone, Default)]
pub struct FakeStepExecutor {
    scripts: HashMap<String, ScriptedStep>,
    pub launched: Arc<Mutex<Vec<CommandSpec>>>,
}

impl FakeStepExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(mut self, command: &str, script: ScriptedStep) -> Self {
        self.scripts.insert(command.to_string(), script);
        self
    }

    pub fn get_launched(&self) -> Vec<CommandSpec> {
        self.launched.lock().unwrap().clone()
    }
}

impl StepExecutor for FakeStepExecutor {
    fn execute(&self, spec: &CommandSpec, budget: Duration) -> Result<ExecutionResult, AppError> {
        self.launched.lock().unwrap().push(spec.clone());
        let script = self.scripts.get(&spec.command).cloned().unwrap_or(ScriptedStep::exit(0));
        if script.duration > budget {
            thread::sleep(budget);
            return Ok(ExecutionResult::TimedOut);
        }
        thread::sleep(script.duration);
        Ok(script.result)
    }
}
