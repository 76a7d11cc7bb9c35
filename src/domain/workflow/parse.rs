//! Workflow YAML parsing (GitHub Actions subset).

use std::time::Duration;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::domain::AppError;
use crate::domain::schedule::{BranchFilter, CronExpr, Trigger};

use super::model::{
    DEFAULT_TIMEOUT_MINUTES, EnvBinding, EnvValue, Job, Step, StepAction, WorkflowDefinition,
};

impl WorkflowDefinition {
    pub fn parse_yaml(content: &str) -> Result<Self, AppError> {
        let dto: WorkflowDto = serde_yaml::from_str(content)?;
        let workflow = dto.into_definition()?;
        workflow.validate()?;
        Ok(workflow)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.triggers.is_empty() {
            return Err(AppError::InvalidWorkflow("'on' declares no triggers".into()));
        }
        if self.jobs.is_empty() {
            return Err(AppError::InvalidWorkflow("'jobs' must declare at least one job".into()));
        }
        for job in &self.jobs {
            if job.steps.is_empty() {
                return Err(AppError::InvalidWorkflow(format!("job '{}' has no steps", job.id)));
            }
            if job.timeout.is_zero() {
                return Err(AppError::InvalidWorkflow(format!(
                    "job '{}' timeout-minutes must be greater than 0",
                    job.id
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct WorkflowDto {
    name: Option<String>,
    on: Option<Value>,
    #[serde(default)]
    jobs: Mapping,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct JobDto {
    runs_on: Option<Value>,
    timeout_minutes: Option<u64>,
    #[serde(default)]
    env: Mapping,
    #[serde(default)]
    steps: Vec<StepDto>,
}

#[derive(Debug, Deserialize)]
struct StepDto {
    name: Option<String>,
    uses: Option<String>,
    run: Option<String>,
    #[serde(default)]
    with: Mapping,
    #[serde(default)]
    env: Mapping,
}

impl WorkflowDto {
    fn into_definition(self) -> Result<WorkflowDefinition, AppError> {
        let triggers = match self.on {
            Some(on) => parse_triggers(on)?,
            None => return Err(AppError::InvalidWorkflow("missing 'on'".into())),
        };

        let mut jobs = Vec::new();
        for (id, body) in self.jobs {
            let id = scalar_to_string(&id)
                .ok_or_else(|| AppError::InvalidWorkflow("job ids must be strings".into()))?;
            let dto: JobDto = serde_yaml::from_value(body).map_err(|e| {
                AppError::InvalidWorkflow(format!("job '{}': {}", id, e))
            })?;
            jobs.push(dto.into_job(id)?);
        }

        Ok(WorkflowDefinition {
            name: self.name.unwrap_or_else(|| "workflow".to_string()),
            triggers,
            jobs,
        })
    }
}

impl JobDto {
    fn into_job(self, id: String) -> Result<Job, AppError> {
        let job_env = env_bindings(&self.env, &id)?;
        let runs_on = self.runs_on.as_ref().and_then(|value| match value {
            Value::Sequence(labels) => Some(
                labels.iter().filter_map(scalar_to_string).collect::<Vec<_>>().join(", "),
            ),
            other => scalar_to_string(other),
        });

        let mut steps = Vec::with_capacity(self.steps.len());
        for (index, step) in self.steps.into_iter().enumerate() {
            steps.push(step.into_step(&id, index, &job_env)?);
        }

        let minutes = self.timeout_minutes.unwrap_or(DEFAULT_TIMEOUT_MINUTES);
        let seconds = minutes.checked_mul(60).ok_or_else(|| {
            AppError::InvalidWorkflow(format!("job '{}': timeout-minutes {} is too large", id, minutes))
        })?;

        Ok(Job { id, runs_on, timeout: Duration::from_secs(seconds), steps })
    }
}

impl StepDto {
    fn into_step(self, job: &str, index: usize, job_env: &[EnvBinding]) -> Result<Step, AppError> {
        let action = match (self.uses, self.run) {
            (Some(action), None) => StepAction::Uses {
                action,
                inputs: self
                    .with
                    .iter()
                    .filter_map(|(k, v)| Some((scalar_to_string(k)?, scalar_to_string(v)?)))
                    .collect(),
            },
            (None, Some(command)) => StepAction::Run { command },
            _ => {
                return Err(AppError::InvalidWorkflow(format!(
                    "job '{}' step {} must declare exactly one of 'uses' or 'run'",
                    job,
                    index + 1
                )));
            }
        };

        let name = self.name.unwrap_or_else(|| match &action {
            StepAction::Uses { action, .. } => format!("Run {}", action),
            StepAction::Run { command } => {
                format!("Run {}", command.lines().next().unwrap_or_default().trim())
            }
        });

        // Step-level variables override job-level ones of the same name.
        let step_env = env_bindings(&self.env, &name)?;
        let mut env: Vec<EnvBinding> = job_env
            .iter()
            .filter(|binding| !step_env.iter().any(|s| s.name == binding.name))
            .cloned()
            .collect();
        env.extend(step_env);

        Ok(Step { name, action, env })
    }
}

fn parse_triggers(on: Value) -> Result<Vec<Trigger>, AppError> {
    match on {
        Value::String(event) => Ok(vec![simple_trigger(&event)?]),
        Value::Sequence(events) => events
            .iter()
            .map(|event| {
                let event = scalar_to_string(event).ok_or_else(|| {
                    AppError::InvalidWorkflow("'on' list entries must be event names".into())
                })?;
                simple_trigger(&event)
            })
            .collect(),
        Value::Mapping(events) => {
            let mut triggers = Vec::new();
            for (event, config) in events {
                let event = scalar_to_string(&event).ok_or_else(|| {
                    AppError::InvalidWorkflow("'on' keys must be event names".into())
                })?;
                if let Some(trigger) = configured_trigger(&event, config)? {
                    triggers.push(trigger);
                }
            }
            Ok(triggers)
        }
        _ => Err(AppError::InvalidWorkflow("'on' must be a string, list, or mapping".into())),
    }
}

fn simple_trigger(event: &str) -> Result<Trigger, AppError> {
    match event {
        "workflow_dispatch" => Ok(Trigger::ManualDispatch),
        "push" => Ok(Trigger::Push(BranchFilter::default())),
        "schedule" => Err(AppError::InvalidWorkflow("'schedule' requires cron entries".into())),
        other => Err(AppError::InvalidWorkflow(format!("unsupported trigger '{}'", other))),
    }
}

fn configured_trigger(event: &str, config: Value) -> Result<Option<Trigger>, AppError> {
    match event {
        "schedule" => {
            let entries = match config {
                Value::Sequence(entries) => entries,
                _ => {
                    return Err(AppError::InvalidWorkflow(
                        "'schedule' must be a list of cron entries".into(),
                    ));
                }
            };
            let mut crons = Vec::with_capacity(entries.len());
            for entry in entries {
                let cron = entry.get("cron").and_then(Value::as_str).ok_or_else(|| {
                    AppError::InvalidWorkflow("each schedule entry needs a 'cron' string".into())
                })?;
                crons.push(CronExpr::parse(cron)?);
            }
            if crons.is_empty() {
                return Err(AppError::InvalidWorkflow("'schedule' has no cron entries".into()));
            }
            Ok(Some(Trigger::Schedule(crons)))
        }
        "workflow_dispatch" => Ok(Some(Trigger::ManualDispatch)),
        "push" => {
            let branches = match config.get("branches") {
                Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
                Some(value) => scalar_to_string(value).into_iter().collect(),
                None => Vec::new(),
            };
            Ok(Some(Trigger::Push(BranchFilter::new(branches))))
        }
        other => {
            tracing::warn!(event = other, "ignoring unsupported workflow trigger");
            Ok(None)
        }
    }
}

fn env_bindings(env: &Mapping, owner: &str) -> Result<Vec<EnvBinding>, AppError> {
    env.iter()
        .map(|(key, value)| {
            let name = scalar_to_string(key).ok_or_else(|| {
                AppError::InvalidWorkflow(format!("env keys in '{}' must be strings", owner))
            })?;
            let raw = scalar_to_string(value).ok_or_else(|| {
                AppError::InvalidWorkflow(format!("env '{}' in '{}' must be a scalar", name, owner))
            })?;
            Ok(EnvBinding { name, value: EnvValue::parse(&raw) })
        })
        .collect()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::schedule::TriggerEvent;

    const WORKFLOW: &str = r#"
name: notify
on:
  schedule:
    - cron: "0 0 * * 1,2,3,4,5"
  workflow_dispatch:
  push:
    branches:
      - test-send-to-slack
jobs:
  build:
    runs-on: ubuntu-latest
    timeout-minutes: 10
    env:
      SHARED: job
      SLACK_ID: overridden
    steps:
      - uses: actions/checkout@v2
      - name: Set up Python
        uses: actions/setup-python@v2
        with:
          python-version: 3.9
      - name: Run
        run: python src/carrier_owl.py
        env:
          SLACK_ID: ${{ secrets.SLACK_ID }}
          LINE_TOKEN: ${{ secrets.LINE_TOKEN }}
"#;

    #[test]
    fn parses_triggers_job_and_steps() {
        let workflow = WorkflowDefinition::parse_yaml(WORKFLOW).unwrap();
        assert_eq!(workflow.name, "notify");
        let kinds: Vec<_> = workflow.triggers.iter().map(Trigger::kind).collect();
        assert_eq!(kinds, vec!["schedule", "workflow_dispatch", "push"]);

        let job = workflow.job(None).unwrap();
        assert_eq!(job.id, "build");
        assert_eq!(job.runs_on.as_deref(), Some("ubuntu-latest"));
        assert_eq!(job.timeout, Duration::from_secs(600));
        assert_eq!(job.steps.len(), 3);
        assert_eq!(job.steps[0].name, "Run actions/checkout@v2");
        assert_eq!(
            job.steps[1].action,
            StepAction::Uses {
                action: "actions/setup-python@v2".into(),
                inputs: vec![("python-version".into(), "3.9".into())],
            }
        );
    }

    #[test]
    fn step_env_overrides_job_env() {
        let workflow = WorkflowDefinition::parse_yaml(WORKFLOW).unwrap();
        let run = &workflow.jobs[0].steps[2];
        let find = |name: &str| run.env.iter().find(|b| b.name == name).map(|b| b.value.clone());
        assert_eq!(find("SHARED"), Some(EnvValue::Literal("job".into())));
        assert_eq!(find("SLACK_ID"), Some(EnvValue::Secret("SLACK_ID".into())));
        assert_eq!(run.env.iter().filter(|b| b.name == "SLACK_ID").count(), 1);
    }

    #[test]
    fn evaluates_events() {
        let workflow = WorkflowDefinition::parse_yaml(WORKFLOW).unwrap();
        let saturday = Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap();
        let monday = Utc.with_ymd_and_hms(2024, 3, 18, 0, 0, 0).unwrap();
        assert!(workflow.should_run(&TriggerEvent::Scheduled(monday)));
        assert!(!workflow.should_run(&TriggerEvent::Scheduled(saturday)));
        assert!(workflow.should_run(&TriggerEvent::ManualDispatch));
        assert!(!workflow.should_run(&TriggerEvent::Push { branch: "main".into() }));
        assert_eq!(workflow.next_scheduled(saturday), Some(monday));
    }

    #[test]
    fn on_accepts_string_and_list_forms() {
        let jobs = "jobs:\n  j:\n    steps:\n      - run: 'true'\n";
        let single = WorkflowDefinition::parse_yaml(&format!("on: push\n{}", jobs)).unwrap();
        assert_eq!(single.triggers, vec![Trigger::Push(BranchFilter::default())]);

        let list =
            WorkflowDefinition::parse_yaml(&format!("on: [push, workflow_dispatch]\n{}", jobs))
                .unwrap();
        assert_eq!(list.triggers.len(), 2);
        assert_eq!(list.jobs[0].timeout, Duration::from_secs(DEFAULT_TIMEOUT_MINUTES * 60));
    }

    #[test]
    fn invalid_cron_is_rejected() {
        let content = "on:\n  schedule:\n    - cron: '0 0 * *'\njobs:\n  j:\n    steps:\n      - run: 'true'\n";
        let err = WorkflowDefinition::parse_yaml(content).unwrap_err();
        assert!(matches!(err, AppError::InvalidCron { .. }));
    }

    #[test]
    fn oversized_timeout_is_rejected() {
        let content = "on: push\njobs:\n  j:\n    timeout-minutes: 18446744073709551615\n    steps:\n      - run: 'true'\n";
        let err = WorkflowDefinition::parse_yaml(content).unwrap_err();
        assert!(matches!(err, AppError::InvalidWorkflow(message) if message.contains("timeout-minutes")));
    }

    #[test]
    fn step_needs_exactly_one_action() {
        let content = "on: push\njobs:\n  j:\n    steps:\n      - name: both\n        uses: a@v1\n        run: 'true'\n";
        assert!(WorkflowDefinition::parse_yaml(content).is_err());
    }

    #[test]
    fn jobs_and_steps_are_required() {
        assert!(WorkflowDefinition::parse_yaml("on: push\njobs: {}\n").is_err());
        assert!(WorkflowDefinition::parse_yaml("on: push\njobs:\n  j:\n    steps: []\n").is_err());
        assert!(WorkflowDefinition::parse_yaml("jobs:\n  j:\n    steps:\n      - run: x\n").is_err());
    }

    #[test]
    fn unknown_job_is_reported_with_alternatives() {
        let workflow = WorkflowDefinition::parse_yaml(WORKFLOW).unwrap();
        let err = workflow.job(Some("deploy")).unwrap_err();
        assert_eq!(err.to_string(), "Job 'deploy' not found. Available: build");
    }
}
