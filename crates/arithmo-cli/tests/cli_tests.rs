//! CLI integration tests using assert_cmd.

use std::collections::BTreeMap;

use assert_cmd::Command;
use chrono::{TimeZone, Utc};
use predicates::prelude::*;
use tempfile::TempDir;

use arithmo_core::model::Tier;
use arithmo_core::tracker::{LearningVelocity, SessionSummary};
use arithmo_store::SessionStore;

fn arithmo() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("arithmo").unwrap()
}

fn sample_summary(username: &str, finished_at_secs: i64) -> SessionSummary {
    SessionSummary {
        username: username.to_string(),
        total_questions: 8,
        correct_answers: 6,
        accuracy_percentage: 75.0,
        average_time_secs: 4.5,
        final_tier: Tier::Medium,
        tier_progression: vec![Tier::Easy; 8],
        session_duration_secs: 90,
        operation_breakdown: BTreeMap::new(),
        learning_velocity: LearningVelocity::Improving {
            start_accuracy: 0.5,
            end_accuracy: 1.0,
        },
        finished_at: Utc.timestamp_opt(finished_at_secs, 0).unwrap(),
    }
}

#[test]
fn history_with_no_sessions() {
    let dir = TempDir::new().unwrap();

    arithmo()
        .arg("history")
        .arg("--name")
        .arg("kim")
        .arg("--session-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved sessions for kim"));
}

#[test]
fn history_lists_saved_sessions() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());
    store.save(&sample_summary("kim", 1_700_000_000)).unwrap();
    store.save(&sample_summary("kim", 1_700_100_000)).unwrap();

    arithmo()
        .arg("history")
        .arg("--name")
        .arg("kim")
        .arg("--session-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Sessions for kim"))
        .stdout(predicate::str::contains("75.0%"))
        .stdout(predicate::str::contains("improving"));
}

#[test]
fn play_quit_immediately_reports_no_attempts() {
    let dir = TempDir::new().unwrap();

    arithmo()
        .current_dir(dir.path())
        .arg("play")
        .arg("--name")
        .arg("kim")
        .arg("--session-dir")
        .arg(dir.path())
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No attempts recorded"))
        .stdout(predicate::str::contains("Thanks for practicing"));
}

#[test]
fn play_records_attempts_and_prints_report() {
    let dir = TempDir::new().unwrap();

    arithmo()
        .current_dir(dir.path())
        .arg("play")
        .arg("--name")
        .arg("kim")
        .arg("--session-dir")
        .arg(dir.path())
        .write_stdin("0\n0\n0\nquit\nno\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("FINAL SESSION REPORT"))
        .stdout(predicate::str::contains("Total questions"));
}

#[test]
fn play_saves_session_when_asked() {
    let dir = TempDir::new().unwrap();
    let sessions = dir.path().join("sessions");

    arithmo()
        .current_dir(dir.path())
        .arg("play")
        .arg("--name")
        .arg("kim")
        .arg("--session-dir")
        .arg(&sessions)
        .write_stdin("0\nquit\nyes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session saved"));

    let saved: Vec<_> = sessions.read_dir().unwrap().collect();
    assert_eq!(saved.len(), 1);
}

#[test]
fn play_rejects_unknown_tier() {
    arithmo()
        .arg("play")
        .arg("--name")
        .arg("kim")
        .arg("--tier")
        .arg("brutal")
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown difficulty tier"));
}

#[test]
fn show_saved_session() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());
    let handle = store.save(&sample_summary("kim", 1_700_000_000)).unwrap();

    arithmo()
        .arg("show")
        .arg(&handle.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("kim"))
        .stdout(predicate::str::contains("medium"));
}

#[test]
fn show_missing_file_fails() {
    arithmo()
        .arg("show")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_config_once() {
    let dir = TempDir::new().unwrap();

    arithmo()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created arithmo.toml"));

    assert!(dir.path().join("arithmo.toml").exists());

    arithmo()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));
}
