//! End-to-end tests for the `undo-stress` binary using shell-script actors.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

/// Write `body` as the actor script and a config running it through
/// `/bin/sh`. Returns the config path.
fn actor(dir: &Path, body: &str) -> PathBuf {
    actor_with(dir, body, "")
}

fn actor_with(dir: &Path, body: &str, extra_toml: &str) -> PathBuf {
    let script = dir.join("actor.sh");
    std::fs::write(&script, format!("{body}\n")).unwrap();
    let config = dir.join("stress.toml");
    std::fs::write(
        &config,
        format!(
            "[actor]\nbinary = \"/bin/sh\"\nargs = [{:?}]\n{extra_toml}",
            script.display().to_string()
        ),
    )
    .unwrap();
    config
}

fn undo_stress(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("undo-stress").unwrap();
    cmd.env("RUST_LOG", "warn")
        .arg("--no-build")
        .arg("--no-viewer")
        .arg("--config")
        .arg(config);
    cmd
}

#[test]
fn three_actors_share_one_document() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");
    let config = actor(dir.path(), &format!("echo \"$1 $2\" >> {}", log.display()));

    undo_stress(&config)
        .args(["--num", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("actor 0 completed"))
        .stdout(predicate::str::contains("actor 1 completed"))
        .stdout(predicate::str::contains("actor 2 completed"))
        .stdout(predicate::str::contains("succeeded: 3 actors"));

    let calls = std::fs::read_to_string(&log).unwrap();
    let mut indices = Vec::new();
    let mut documents = Vec::new();
    for line in calls.lines() {
        let (index, document) = line.split_once(' ').unwrap();
        indices.push(index.parse::<u32>().unwrap());
        documents.push(document.to_string());
    }
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 2]);
    assert!(documents.iter().all(|d| d == &documents[0]));
    assert_eq!(documents[0].len(), 36);
}

#[test]
fn failing_actor_fails_run_but_others_report() {
    let dir = tempfile::tempdir().unwrap();
    let config = actor(dir.path(), "if [ \"$1\" = \"2\" ]; then exit 7; fi\nexit 0");

    let assert = undo_stress(&config).args(["--num", "5"]).assert().failure();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("actor 2 failed with exit code 7"));
    assert_eq!(stdout.matches("completed in").count(), 4);
    assert!(stdout.contains("FAILED: 5 actors (4 succeeded, 1 failed)"));
}

#[test]
fn actor_stdout_is_discarded_and_stderr_passes_through() {
    let dir = tempfile::tempdir().unwrap();
    let config = actor(
        dir.path(),
        "echo ACTOR_STDOUT_$1\necho ACTOR_STDERR_$1 >&2",
    );

    undo_stress(&config)
        .args(["--num", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ACTOR_STDOUT_").not())
        .stdout(predicate::str::contains("succeeded: 2 actors"))
        .stderr(predicate::str::contains("ACTOR_STDERR_0"))
        .stderr(predicate::str::contains("ACTOR_STDERR_1"));
}

#[test]
fn zero_actors_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");
    let config = actor(dir.path(), &format!("touch {}", marker.display()));

    undo_stress(&config)
        .args(["--num", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid actor count 0"));
    assert!(!marker.exists());
}

#[test]
fn build_failure_aborts_before_actors() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");
    let config = actor_with(
        dir.path(),
        &format!("touch {}", marker.display()),
        "[build]\ncommand = [\"sh\", \"-c\", \"exit 2\"]\n",
    );

    Command::cargo_bin("undo-stress")
        .unwrap()
        .env("RUST_LOG", "warn")
        .arg("--no-viewer")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to build actor executable"));
    assert!(!marker.exists());
}

#[test]
fn timeout_kills_hung_actor() {
    let dir = tempfile::tempdir().unwrap();
    let config = actor(dir.path(), "exec sleep 30");

    undo_stress(&config)
        .args(["--num", "2", "--timeout", "1"])
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .failure()
        .stdout(predicate::str::contains("timed out"));
}

#[test]
fn json_report_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let config = actor(dir.path(), "exit 0");
    let report = dir.path().join("summary.json");

    undo_stress(&config)
        .args([
            "--num",
            "2",
            "--document",
            "00000003-0003-0003-0003-000000000003",
        ])
        .arg("--report")
        .arg(&report)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["document"], "00000003-0003-0003-0003-000000000003");
    assert_eq!(json["actor_count"], 2);
    assert_eq!(json["runs"].as_array().unwrap().len(), 2);
}
