// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Post-process concatenated task rows: parse timestamps, derive calendar dates, hours and working days
// role: metrics/derivation
// inputs: Vec<TaskRow> in fetch order
// outputs: TaskTable with created.date, updated.date and <duration>.hr / <duration>.days columns
// invariants:
// - Rounding is half away from zero, computed on integer seconds (7200s => 2.00h, 0.3d)
// - A working day is 8 hours (28800s)
// - Null inputs derive null outputs; row order is preserved
// errors: Unparseable created/updated text is a FetchError::Timestamp
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, FixedOffset};

use crate::error::FetchError;
use crate::model::{Task, TaskRow, TaskTable, Tracked};

pub const SECONDS_PER_HOUR: i64 = 3600;
pub const SECONDS_PER_WORKING_DAY: i64 = 8 * SECONDS_PER_HOUR;

/// Jira's own timestamp shape, e.g. `2025-03-10T09:15:00.000+0000`.
const JIRA_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Parse an RFC 3339 or Jira-style timestamp, keeping its offset.
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
  DateTime::parse_from_rfc3339(s)
    .or_else(|_| DateTime::parse_from_str(s, JIRA_TIMESTAMP))
    .ok()
}

/// `numerator / denominator` rounded half away from zero. `denominator` must be positive.
fn round_div(numerator: i128, denominator: i128) -> i128 {
  let half = denominator / 2;
  if numerator >= 0 {
    (numerator + half) / denominator
  } else {
    -((-numerator + half) / denominator)
  }
}

/// Seconds as hours, rounded to 2 decimals.
pub fn hours(seconds: i64) -> f64 {
  round_div(i128::from(seconds) * 100, i128::from(SECONDS_PER_HOUR)) as f64 / 100.0
}

/// Seconds as 8-hour working days, rounded to 1 decimal.
pub fn working_days(seconds: i64) -> f64 {
  round_div(i128::from(seconds) * 10, i128::from(SECONDS_PER_WORKING_DAY)) as f64 / 10.0
}

pub fn track(seconds: Option<i64>) -> Tracked {
  Tracked {
    seconds,
    hr: seconds.map(hours),
    days: seconds.map(working_days),
  }
}

fn timestamp(column: &'static str, raw: Option<String>) -> Result<Option<DateTime<FixedOffset>>, FetchError> {
  match raw {
    None => Ok(None),
    Some(s) => parse_timestamp(&s)
      .map(Some)
      .ok_or(FetchError::Timestamp { column, value: s }),
  }
}

pub fn derive_task(row: TaskRow) -> Result<Task, FetchError> {
  let created = timestamp("created", row.created)?;
  let updated = timestamp("updated", row.updated)?;

  let te = track(row.timeestimate);
  let ate = track(row.aggregatetimeestimate);
  let toe = track(row.timeoriginalestimate);
  let atoe = track(row.aggregatetimeoriginalestimate);
  let ts = track(row.timespent);
  let ats = track(row.aggregatetimespent);

  Ok(Task {
    project_name: row.project_name,
    key: row.key,
    status_name: row.status_name,
    issuetype_name: row.issuetype_name,
    assignee_display_name: row.assignee_display_name,
    priority_name: row.priority_name,
    customfield_10016: row.customfield_10016,
    created,
    updated,
    duedate: row.duedate,
    timeestimate: te.seconds,
    aggregatetimeestimate: ate.seconds,
    timeoriginalestimate: toe.seconds,
    aggregatetimeoriginalestimate: atoe.seconds,
    timespent: ts.seconds,
    aggregatetimespent: ats.seconds,
    summary: row.summary,
    created_date: created.map(|d| d.date_naive()),
    updated_date: updated.map(|d| d.date_naive()),
    timeestimate_hr: te.hr,
    timeestimate_days: te.days,
    aggregatetimeestimate_hr: ate.hr,
    aggregatetimeestimate_days: ate.days,
    timeoriginalestimate_hr: toe.hr,
    timeoriginalestimate_days: toe.days,
    aggregatetimeoriginalestimate_hr: atoe.hr,
    aggregatetimeoriginalestimate_days: atoe.days,
    timespent_hr: ts.hr,
    timespent_days: ts.days,
    aggregatetimespent_hr: ats.hr,
    aggregatetimespent_days: ats.days,
  })
}

/// Build the final table from concatenated rows. An empty input is an empty table.
pub fn derive_table(rows: Vec<TaskRow>) -> Result<TaskTable, FetchError> {
  let tasks = rows.into_iter().map(derive_task).collect::<Result<Vec<_>, _>>()?;
  Ok(TaskTable::new(tasks))
}
