#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains as str_contains;
use std::io::Write;
use tempfile::NamedTempFile;

const PLAN: &str = "\
项目开始时间: 2024-03-04
* task1 -- 2 [bob]<50%>
* review -- 1 [alice]
* task2 -- 1 [bob]
* alice -- 2024-03-05
";

fn plan_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(text.as_bytes()).expect("write plan");
    file
}

#[allow(deprecated)]
fn cli() -> Command {
    Command::cargo_bin("cli").expect("cli binary")
}

#[test]
fn cli_prints_schedule_table() {
    let file = plan_file(PLAN);
    cli()
        .arg(file.path())
        .assert()
        .success()
        .stdout(str_contains("task1  | bob    | 2.0      | 2024-03-04 | 2024-03-05 | 50%"))
        .stdout(str_contains("review | alice  | 1.0      | 2024-03-04 | 2024-03-04"))
        .stdout(str_contains("completion: 25.00%"));
}

#[test]
fn cli_filters_by_assignee() {
    let file = plan_file(PLAN);
    cli()
        .args(["-m", "bob"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(str_contains("task2"))
        .stdout(str_contains("review").not())
        .stdout(str_contains("completion: 33.33%"));
}

#[test]
fn cli_reports_missing_start_date() {
    let file = plan_file("* task1 -- 2 [bob]\n");
    cli()
        .env_remove("RUST_LOG")
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr("error: please provide the project start date\n");
}

#[test]
fn cli_adds_file_context_to_other_errors() {
    let file = plan_file("项目开始时间: 2024-03-04\n* task1 -- 2 [bob]<150%>\n");
    cli()
        .env_remove("RUST_LOG")
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(str_contains("error: cannot schedule "))
        .stderr(str_contains("line 2"));
}

#[test]
fn cli_filter_keeps_the_full_task_column() {
    let file = plan_file(PLAN);
    cli()
        .args(["-m", "bob"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(str_contains("Task   | Owner  |"))
        .stdout(str_contains("task1  | bob    | 2.0      |"));
}

#[test]
fn cli_csv_for_unknown_assignee_prints_header() {
    let file = plan_file(PLAN);
    cli()
        .args(["-m", "nobody", "--format", "csv"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("name,assignee,effort,start_date,end_date,completion\n");
}

#[test]
fn cli_accepts_custom_working_days() {
    let file = plan_file("项目开始时间: 2024-03-08\n* a -- 1 [bob]\n* b -- 1 [bob]\n");
    cli()
        .args(["--working-days", "mon,tue,wed,thu,fri,sat"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(str_contains("b    | bob    | 1.0      | 2024-03-09 | 2024-03-09"));

    cli()
        .arg(file.path())
        .assert()
        .success()
        .stdout(str_contains("b    | bob    | 1.0      | 2024-03-11 | 2024-03-11"));
}

#[test]
fn cli_rejects_unknown_weekday() {
    let file = plan_file(PLAN);
    cli()
        .args(["--working-days", "funday"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(str_contains("funday"));
}

#[test]
fn cli_requires_exactly_one_plan_file() {
    cli().assert().failure().stderr(str_contains("Usage"));

    let file = plan_file(PLAN);
    cli()
        .arg(file.path())
        .arg(file.path())
        .assert()
        .failure()
        .stderr(str_contains("Usage"));
}

#[test]
fn cli_emits_json() {
    let file = plan_file(PLAN);
    let assert = cli()
        .args(["--format", "json"])
        .arg(file.path())
        .assert()
        .success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid json");
    assert_eq!(value["tasks"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["tasks"][2]["end_date"], "2024-03-06");
}

#[test]
fn cli_appends_assignee_summary() {
    let file = plan_file(PLAN);
    cli()
        .arg("--summary")
        .arg(file.path())
        .assert()
        .success()
        .stdout(str_contains("bob    | 2 tasks | 3.0 man-days"))
        .stdout(str_contains("alice  | 1 tasks | 1.0 man-days"));
}
