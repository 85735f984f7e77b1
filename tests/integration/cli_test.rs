use assert_cmd::Command;
use chrono::{Duration, Local};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn deskkit(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("deskkit-cli").unwrap();
    cmd.current_dir(dir.path()).env_remove("DESKKIT_LOG");
    cmd
}

fn todo(dir: &TempDir, args: &[&str]) -> Command {
    let mut cmd = deskkit(dir);
    cmd.arg("todo").args(args);
    cmd
}

fn list_json(dir: &TempDir, args: &[&str]) -> Vec<Value> {
    let output = deskkit(dir)
        .args(["--json", "todo", "list"])
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    parsed.as_array().unwrap().clone()
}

fn titles(tasks: &[Value]) -> Vec<String> {
    tasks
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect()
}

fn yesterday() -> String {
    (Local::now().date_naive() - Duration::days(1))
        .format("%Y-%m-%d")
        .to_string()
}

#[test]
fn add_creates_default_file() {
    let dir = TempDir::new().unwrap();
    todo(&dir, &["add", "  First task  "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added task #1: First task"));

    let stored: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("todo.json")).unwrap()).unwrap();
    assert_eq!(stored[0]["title"], "First task");
    assert_eq!(stored[0]["done"], false);
    assert!(stored[0]["due"].is_null());
}

#[test]
fn add_with_tags_and_due() {
    let dir = TempDir::new().unwrap();
    todo(&dir, &["add", "Write tests", "--tags", "dev, qa,dev", "--due", "2999-09-05"])
        .assert()
        .success();

    let tasks = list_json(&dir, &[]);
    assert_eq!(tasks[0]["tags"], serde_json::json!(["dev", "qa"]));
    assert_eq!(tasks[0]["due"], "2999-09-05");
}

#[test]
fn add_empty_title_fails() {
    let dir = TempDir::new().unwrap();
    todo(&dir, &["add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title cannot be empty"));
    assert!(!dir.path().join("todo.json").exists());
}

#[test]
fn add_bad_due_fails() {
    let dir = TempDir::new().unwrap();
    todo(&dir, &["add", "Task", "--due", "2025/09/01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date format"));
}

#[test]
fn past_due_prompt_declined() {
    let dir = TempDir::new().unwrap();
    let due = yesterday();
    todo(&dir, &["add", "Late", "--due", &due])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("is in the past"))
        .stdout(predicate::str::contains("Task creation cancelled."));
    assert!(!dir.path().join("todo.json").exists());
}

#[test]
fn past_due_prompt_accepted() {
    let dir = TempDir::new().unwrap();
    let due = yesterday();
    todo(&dir, &["add", "Late", "--due", &due])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added task #1: Late"));
}

#[test]
fn past_due_allowed_without_prompt() {
    let dir = TempDir::new().unwrap();
    let due = yesterday();
    todo(&dir, &["add", "Late", "--due", &due, "--allow-past-due"])
        .assert()
        .success()
        .stdout(predicate::str::contains("in the past").not());
}

#[test]
fn list_empty() {
    let dir = TempDir::new().unwrap();
    todo(&dir, &["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn list_text_format() {
    let dir = TempDir::new().unwrap();
    todo(&dir, &["add", "Write tests", "--tags", "dev,qa", "--due", "2999-09-05"])
        .assert()
        .success();
    todo(&dir, &["add", "Docs"]).assert().success();
    todo(&dir, &["complete", "2"]).assert().success();

    let output = todo(&dir, &["list"]).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines[0], "  1 [ ] Write tests due:2999-09-05 tags:dev,qa");
    assert_eq!(lines[1], "  2 [✓] Docs");
}

#[test]
fn list_same_due_in_insertion_order() {
    let dir = TempDir::new().unwrap();
    todo(&dir, &["add", "A", "--due", "2999-09-05"]).assert().success();
    todo(&dir, &["add", "B", "--due", "2999-09-05"]).assert().success();
    todo(&dir, &["add", "C"]).assert().success();
    todo(&dir, &["add", "D", "--due", "2999-01-01"]).assert().success();

    assert_eq!(titles(&list_json(&dir, &["--sort-by", "due"])), vec!["D", "A", "B", "C"]);
}

#[test]
fn list_filters() {
    let dir = TempDir::new().unwrap();
    todo(&dir, &["add", "Write tests", "--tags", "dev,qa", "--due", "2999-09-05"])
        .assert()
        .success();
    todo(&dir, &["add", "Refactor core", "--tags", "backend", "--due", "2999-09-10"])
        .assert()
        .success();
    todo(&dir, &["add", "Update documentation", "--tags", "docs"]).assert().success();
    todo(&dir, &["complete", "3"]).assert().success();

    assert_eq!(titles(&list_json(&dir, &["--status", "open"])).len(), 2);
    assert_eq!(titles(&list_json(&dir, &["--status", "done"])), vec!["Update documentation"]);
    assert_eq!(titles(&list_json(&dir, &["--tags", "dev"])), vec!["Write tests"]);
    assert_eq!(
        titles(&list_json(&dir, &["--due-before", "2999-09-06"])),
        vec!["Write tests"]
    );
    assert_eq!(
        titles(&list_json(&dir, &["--sort-by", "title"])),
        vec!["Refactor core", "Update documentation", "Write tests"]
    );
}

#[test]
fn list_rejects_bad_arguments() {
    let dir = TempDir::new().unwrap();
    todo(&dir, &["list", "--status", "closed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid argument"));
    todo(&dir, &["list", "--sort-by", "priority"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid argument"));
    todo(&dir, &["list", "--due-before", "tomorrow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date format"));
}

#[test]
fn complete_missing_fails() {
    let dir = TempDir::new().unwrap();
    todo(&dir, &["add", "Task"]).assert().success();
    let before = fs::read(dir.path().join("todo.json")).unwrap();

    todo(&dir, &["complete", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("task #999 not found"));
    assert_eq!(fs::read(dir.path().join("todo.json")).unwrap(), before);
}

#[test]
fn update_and_clear_due() {
    let dir = TempDir::new().unwrap();
    todo(&dir, &["add", "Task", "--due", "2999-01-01", "--tags", "a"]).assert().success();

    todo(&dir, &["update", "1", "--title", "Renamed", "--tags", "b,c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated task #1"));
    let tasks = list_json(&dir, &[]);
    assert_eq!(tasks[0]["title"], "Renamed");
    assert_eq!(tasks[0]["tags"], serde_json::json!(["b", "c"]));
    assert_eq!(tasks[0]["due"], "2999-01-01");

    todo(&dir, &["update", "1", "--clear-due"]).assert().success();
    assert!(list_json(&dir, &[])[0]["due"].is_null());
}

#[test]
fn update_empty_title_keeps_task() {
    let dir = TempDir::new().unwrap();
    todo(&dir, &["add", "Keep me"]).assert().success();
    todo(&dir, &["update", "1", "--title", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title cannot be empty"));
    assert_eq!(list_json(&dir, &[])[0]["title"], "Keep me");
}

#[test]
fn update_past_due_declined() {
    let dir = TempDir::new().unwrap();
    todo(&dir, &["add", "Task"]).assert().success();
    let due = yesterday();
    todo(&dir, &["update", "1", "--due", &due])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Task update cancelled."));
    assert!(list_json(&dir, &[])[0]["due"].is_null());
}

#[test]
fn update_missing_fails() {
    let dir = TempDir::new().unwrap();
    todo(&dir, &["update", "7", "--title", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("task #7 not found"));
}

#[test]
fn update_without_fields_fails() {
    let dir = TempDir::new().unwrap();
    todo(&dir, &["add", "One"]).assert().success();
    let before = fs::read(dir.path().join("todo.json")).unwrap();
    todo(&dir, &["update", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nothing to update"));
    assert_eq!(fs::read(dir.path().join("todo.json")).unwrap(), before);
}

#[test]
fn delete_task() {
    let dir = TempDir::new().unwrap();
    todo(&dir, &["add", "One"]).assert().success();
    todo(&dir, &["add", "Two"]).assert().success();
    todo(&dir, &["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted task #1"));
    assert_eq!(titles(&list_json(&dir, &[])), vec!["Two"]);
    todo(&dir, &["delete", "1"]).assert().failure();
}

#[test]
fn custom_file_flag() {
    let dir = TempDir::new().unwrap();
    todo(&dir, &["add", "Elsewhere", "--file", "work.json"]).assert().success();
    assert!(dir.path().join("work.json").exists());
    assert!(!dir.path().join("todo.json").exists());
    assert_eq!(
        titles(&list_json(&dir, &["--file", "work.json"])),
        vec!["Elsewhere"]
    );
}

#[test]
fn config_sets_default_file_and_log() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("deskkit.toml"),
        "[todo]\nfile = \"from-config.json\"\n\n[log]\nfile = \"app.log\"\nlevel = \"info\"\n",
    )
    .unwrap();

    todo(&dir, &["add", "Configured"]).assert().success();
    assert!(dir.path().join("from-config.json").exists());
    let log = fs::read_to_string(dir.path().join("app.log")).unwrap();
    assert!(log.contains("task added"));
}

#[test]
fn explicit_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    deskkit(&dir)
        .args(["--config", "missing.toml", "todo", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read config file"));
}

#[test]
fn malformed_task_file_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("todo.json"), "{oops").unwrap();
    todo(&dir, &["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("json error"));
}

#[test]
fn bank_statement() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tx.csv"),
        "type,amount,note\ndeposit,50.00,bonus\nwithdraw,25.50,lunch\nwithdraw,10.00,coffee\n",
    )
    .unwrap();

    let output = deskkit(&dir)
        .args(["bank", "--owner", "Alice", "--balance", "100.00", "--from-csv", "tx.csv"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Statement for Alice\n"));
    assert!(stdout.contains("1      deposit    50.00        150.00       bonus"));
    assert!(stdout.contains("3      withdraw   10.00        114.50       coffee"));
    assert!(stdout.trim_end().ends_with("Final Balance: 114.50"));
}

#[test]
fn bank_overdraft_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tx.csv"),
        "type,amount,note\nwithdraw,50.00,valid\nwithdraw,60.00,overdraft\n",
    )
    .unwrap();
    deskkit(&dir)
        .args(["bank", "--owner", "Alice", "--balance", "100", "--from-csv", "tx.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("transaction failed: insufficient funds"));
}

#[test]
fn bank_overflow_is_an_error() {
    let dir = TempDir::new().unwrap();
    let max = "79228162514264337593543950335";
    fs::write(
        dir.path().join("tx.csv"),
        format!("type,amount,note\ndeposit,{},boom\n", max),
    )
    .unwrap();
    deskkit(&dir)
        .args(["bank", "--owner", "Max", "--balance", max, "--from-csv", "tx.csv"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: transaction failed: amount overflow"));
}

#[test]
fn bank_missing_csv_fails() {
    let dir = TempDir::new().unwrap();
    deskkit(&dir)
        .args(["bank", "--owner", "A", "--balance", "1", "--from-csv", "none.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn expenses_summary() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("exp.csv"),
        "category,amount,date\nfood,12.50,2025-08-01\ntravel,100,2025-08-03\nfood,30,\nmisc,-5,\n",
    )
    .unwrap();

    deskkit(&dir)
        .args(["expenses", "--path", "exp.csv"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning: Skipped 1 invalid rows."))
        .stdout(predicate::str::contains("travel       100.00\nfood          42.50"));

    deskkit(&dir)
        .args(["expenses", "--path", "exp.csv", "--filter", "category=food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("travel").not());

    deskkit(&dir)
        .args(["expenses", "--path", "exp.csv", "--sort", "amount_asc", "--top", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("food").and(predicate::str::contains("travel").not()));
}

#[test]
fn expenses_bad_sort_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("exp.csv"), "category,amount\nfood,1\n").unwrap();
    deskkit(&dir)
        .args(["expenses", "--path", "exp.csv", "--sort", "size"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid sort method"));
}
