// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Flatten raw search issues into dotted columns and project a page onto the fixed output schema
// role: schema/projection
// inputs: `issues` array elements from the search response
// outputs: Vec<TaskRow> or SchemaError::MissingColumn naming the first absent column
// invariants:
// - A column exists for a page when at least one issue carries the key (null values count)
// - Issues lacking a column that exists elsewhere in the page yield None for that cell
// - Extra columns returned by the server are dropped
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::ext::serde_json::JsonFlatten;
use crate::model::TaskRow;

/// Output columns, in order.
pub const REQUIRED_COLUMNS: [&str; 17] = [
  "project.name",
  "key",
  "status.name",
  "issuetype.name",
  "assignee.displayName",
  "priority.name",
  "customfield_10016",
  "created",
  "updated",
  "duedate",
  "timeestimate",
  "aggregatetimeestimate",
  "timeoriginalestimate",
  "aggregatetimeoriginalestimate",
  "timespent",
  "aggregatetimespent",
  "summary",
];

/// Second-count columns that get `.hr` / `.days` companions.
pub const DURATION_COLUMNS: [&str; 6] = [
  "timeestimate",
  "aggregatetimeestimate",
  "timeoriginalestimate",
  "aggregatetimeoriginalestimate",
  "timespent",
  "aggregatetimespent",
];

pub type FlatIssue = Map<String, Value>;

/// Top-level members of the issue except `fields`, plus `fields` flattened to dotted keys.
pub fn flatten_issue(issue: &Value) -> FlatIssue {
  let mut flat = Map::new();

  if let Some(obj) = issue.as_object() {
    for (k, v) in obj {
      if k != "fields" {
        flat.insert(k.clone(), v.clone());
      }
    }
  }

  if let Some(fields) = issue.get("fields") {
    if fields.is_object() {
      flat.extend(fields.flatten_dotted());
    }
  }

  flat
}

/// Project a page of flattened issues onto `REQUIRED_COLUMNS`.
pub fn project_page(page: &[FlatIssue]) -> Result<Vec<TaskRow>, SchemaError> {
  let present: HashSet<&str> = page.iter().flat_map(|f| f.keys().map(String::as_str)).collect();

  if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !present.contains(**c)) {
    return Err(SchemaError::MissingColumn((*missing).to_string()));
  }

  Ok(page.iter().map(project_row).collect())
}

fn project_row(flat: &FlatIssue) -> TaskRow {
  TaskRow {
    project_name: text(flat, "project.name"),
    key: text(flat, "key"),
    status_name: text(flat, "status.name"),
    issuetype_name: text(flat, "issuetype.name"),
    assignee_display_name: text(flat, "assignee.displayName"),
    priority_name: text(flat, "priority.name"),
    customfield_10016: flat.get("customfield_10016").and_then(Value::as_f64),
    created: text(flat, "created"),
    updated: text(flat, "updated"),
    duedate: text(flat, "duedate"),
    timeestimate: seconds(flat, "timeestimate"),
    aggregatetimeestimate: seconds(flat, "aggregatetimeestimate"),
    timeoriginalestimate: seconds(flat, "timeoriginalestimate"),
    aggregatetimeoriginalestimate: seconds(flat, "aggregatetimeoriginalestimate"),
    timespent: seconds(flat, "timespent"),
    aggregatetimespent: seconds(flat, "aggregatetimespent"),
    summary: text(flat, "summary"),
  }
}

fn text(flat: &FlatIssue, col: &str) -> Option<String> {
  match flat.get(col)? {
    Value::Null => None,
    Value::String(s) => Some(s.clone()),
    other => Some(other.to_string()),
  }
}

fn seconds(flat: &FlatIssue, col: &str) -> Option<i64> {
  let v = flat.get(col)?;
  v.as_i64().or_else(|| v.as_f64().map(|f| f.round() as i64))
}
