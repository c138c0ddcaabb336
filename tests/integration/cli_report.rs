use predicates::prelude::*;
use test_support::{cmd_bin, search_pages_env, SEARCH_PAGES_ENV};

fn report(fixture: &str, extra: &[&str]) -> assert_cmd::Command {
  let mut cmd = cmd_bin("jira-task-report");
  cmd.env(SEARCH_PAGES_ENV, search_pages_env(fixture)).args([
    "--assignee",
    "Jane Doe",
    "--created-after",
    "2025-03-01",
    "--today",
    "2025-03-12",
    "--pages",
    "3",
    "--page-size",
    "3",
  ]);
  cmd.args(extra);
  cmd
}

#[test]
fn markdown_report_for_one_assignee() {
  let out = report("search_pages.json", &[]).output().unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

  let stdout = String::from_utf8(out.stdout).unwrap();
  insta::assert_snapshot!(stdout.trim_end(), @r"
  |  | project.name | summary | status.name | assignee.displayName | issuetype.name | timespent.hr | timeestimate.hr | created.date | updated.date |
  |---:|:---|:---|:---|:---|:---|:---|:---|:---|:---|
  | 0 | Operations | Rotate database credentials | Done | Jane Doe | Task | 2.00 | 1.00 | 2025-03-11 | 2025-03-12 |
  | 1 | Operations | Fix flaky backup job | Done | Jane Doe | Bug | 0.50 | 0.00 | 2025-03-05 | 2025-03-06 |
  | 2 | Operations | Write runbook for failover | To Do | Jane Doe | Task |  | 8.00 | 2025-03-02 | 2025-03-03 |
  ");
}

#[test]
fn summaries_follow_fetch_order() {
  report("search_pages.json", &["--format", "summaries"])
    .assert()
    .success()
    .stdout("- Rotate database credentials\n- Fix flaky backup job\n- Write runbook for failover\n");
}

#[test]
fn json_rows_carry_derived_columns() {
  let out = report("search_pages.json", &["--format", "json"]).output().unwrap();
  assert!(out.status.success());

  let rows: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  let rows = rows.as_array().unwrap();
  assert_eq!(rows.len(), 3);
  assert_eq!(rows[0]["timespent.hr"], 2.0);
  assert_eq!(rows[2]["timespent.hr"], serde_json::Value::Null);
  assert_eq!(rows[2]["timeestimate.hr"], 8.0);
}

#[test]
fn schema_drift_keeps_earlier_pages_and_warns() {
  report("schema_drift.json", &["--format", "summaries"])
    .assert()
    .success()
    .stdout("- Rotate database credentials\n- Fix flaky backup job\n")
    .stderr(predicate::str::contains("customfield_10016"));
}

#[test]
fn unknown_assignee_gets_a_message() {
  let mut cmd = cmd_bin("jira-task-report");
  cmd
    .env(SEARCH_PAGES_ENV, search_pages_env("search_pages.json"))
    .args(["--assignee", "Nobody", "--created-after", "2025-03-01", "--today", "2025-03-12"])
    .assert()
    .success()
    .stdout("No tasks found for Nobody created after 2025-03-01.\n");
}

#[test]
fn future_start_date_fails() {
  report("search_pages.json", &["--created-after", "2025-04-01"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("is after today"));
}

#[test]
fn missing_credentials_fail_before_any_request() {
  cmd_bin("jira-task-report")
    .args(["--assignee", "Jane Doe", "--created-after", "2025-03-01"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("JIRA_URL"));
}

#[test]
fn bad_fixture_json_is_reported() {
  cmd_bin("jira-task-report")
    .env(SEARCH_PAGES_ENV, "{ not json")
    .args(["--assignee", "Jane Doe", "--created-after", "2025-03-01", "--today", "2025-03-12"])
    .assert()
    .failure()
    .stderr(predicate::str::contains(SEARCH_PAGES_ENV));
}
