mod common;

use std::fs;

use carrier_owl::{CronExpr, TriggerEvent, WorkflowDefinition, init, workflow_next, workflow_trigger};
use chrono::{TimeZone, Utc};
use common::PYTHON_WORKFLOW;
use tempfile::TempDir;

fn python_workflow_file() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("carrier_owl.yml");
    fs::write(&path, PYTHON_WORKFLOW).unwrap();
    (dir, path)
}

#[test]
fn python_workflow_keeps_its_contract() {
    let workflow = WorkflowDefinition::parse_yaml(PYTHON_WORKFLOW).unwrap();
    let job = workflow.job(None).unwrap();

    assert_eq!(job.id, "build");
    assert_eq!(job.timeout.as_secs(), 600);
    assert_eq!(job.required_secrets(), vec!["SLACK_ID", "LINE_TOKEN"]);
    assert_eq!(job.steps.last().unwrap().name, "Run owl");
}

#[test]
fn trigger_evaluation_through_the_public_api() {
    let (_dir, path) = python_workflow_file();
    let monday = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap();
    let sunday = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();

    assert!(workflow_trigger(Some(&path), &TriggerEvent::Scheduled(monday)).unwrap());
    assert!(!workflow_trigger(Some(&path), &TriggerEvent::Scheduled(sunday)).unwrap());
    assert!(workflow_trigger(Some(&path), &TriggerEvent::ManualDispatch).unwrap());
    assert!(
        workflow_trigger(Some(&path), &TriggerEvent::Push { branch: "refs/heads/test-send-to-slack".into() })
            .unwrap()
    );
}

#[test]
fn next_runs_match_the_cron_expression() {
    let (_dir, path) = python_workflow_file();
    let cron: CronExpr = "0 0 * * 1,2,3,4,5".parse().unwrap();
    let after = Utc.with_ymd_and_hms(2024, 3, 13, 0, 0, 0).unwrap();

    assert_eq!(workflow_next(Some(&path), after, 4).unwrap(), cron.upcoming(after, 4));
}

#[test]
fn init_then_load_config() {
    let dir = TempDir::new().unwrap();

    let written = init(dir.path(), false).unwrap();

    assert_eq!(written.len(), 2);
    let config = carrier_owl::domain::load_config(&dir.path().join("config.yaml")).unwrap();
    assert_eq!(config.lang, "ja");
    assert_eq!(config.max_posts, Some(10));
}
