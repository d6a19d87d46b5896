use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CONFIG: &str = r#"
budgets:
  - resource_id: APP-2
    monthly_amount: 50
    rules:
      - name: over-20
        type: fixed
        value: 20
rules:
  - name: compute-overrun
    type: overrun
    value: 10
    categories: [compute]
"#;

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join(".wrangler.yaml");
    std::fs::write(&path, contents).unwrap();
    path
}

fn wrangler(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wrangler").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("WRANGLER_CONFIG")
        .env_remove("WRANGLER_MSTEAMS_WEBHOOK_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn reports_violations_and_fails() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, CONFIG);

    wrangler(&dir)
        .write_stdin("1714521600,app-2,monthly,100,GBP,compute\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("app-2"))
        .stdout(predicate::str::contains("over-20"))
        .stdout(predicate::str::contains("actual amount >= 20.00"))
        .stdout(predicate::str::contains("compute-overrun"))
        .stdout(predicate::str::contains("£50.00"))
        .stdout(predicate::str::contains("£100.00"));
}

#[test]
fn succeeds_without_violations() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, CONFIG);

    wrangler(&dir)
        .write_stdin("1714521600,app-2,monthly,10,GBP\n1714521600,app-9,monthly,1000,GBP\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn unbudgeted_resources_are_skipped() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "rules:\n  - name: any\n    type: fixed\n    value: 0\n");

    // CLI rows carry no baseline, so unbudgeted resources are never checked
    wrangler(&dir)
        .write_stdin("0,app-1,daily,5\n")
        .assert()
        .success();
}

#[test]
fn json_output() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, CONFIG);

    let output = wrangler(&dir)
        .args(["--output", "json"])
        .write_stdin("2024-05-01T12:00:00Z,app-2,monthly,25\n")
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let violations = value.as_array().unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0]["name"], "over-20");
    assert_eq!(violations[0]["budget_amount"], 50.0);
    assert_eq!(violations[0]["actual_amount"], 25.0);
    assert_eq!(violations[0]["date"], "2024-05-01");
}

#[test]
fn no_stdin_reads_nothing() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, CONFIG);

    wrangler(&dir)
        .arg("--no-stdin")
        .write_stdin("0,app-2,monthly,100\n")
        .assert()
        .success();
}

#[test]
fn explicit_config_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.yaml");
    std::fs::write(&path, CONFIG).unwrap();

    wrangler(&dir)
        .arg("--config")
        .arg(&path)
        .write_stdin("0,app-2,monthly,100\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("over-20"));
}

#[test]
fn missing_config_fails() {
    let dir = TempDir::new().unwrap();

    wrangler(&dir)
        .arg("--no-stdin")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn malformed_row_fails() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, CONFIG);

    wrangler(&dir)
        .write_stdin("0,app-2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("row 1"));
}
