// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the task rows and the derived task table shared by fetching, caching, and rendering
// role: model/types
// outputs: TaskRow (projected search columns), Task (row + derived dates/durations), TaskTable
// invariants: Serialized field names are the dotted column names; column order is fixed; tables are not mutated once built
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One search result projected onto the fixed output columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRow {
  #[serde(rename = "project.name")]
  pub project_name: Option<String>,
  pub key: Option<String>,
  #[serde(rename = "status.name")]
  pub status_name: Option<String>,
  #[serde(rename = "issuetype.name")]
  pub issuetype_name: Option<String>,
  #[serde(rename = "assignee.displayName")]
  pub assignee_display_name: Option<String>,
  #[serde(rename = "priority.name")]
  pub priority_name: Option<String>,
  /// Story points.
  pub customfield_10016: Option<f64>,
  pub created: Option<String>,
  pub updated: Option<String>,
  pub duedate: Option<String>,
  pub timeestimate: Option<i64>,
  pub aggregatetimeestimate: Option<i64>,
  pub timeoriginalestimate: Option<i64>,
  pub aggregatetimeoriginalestimate: Option<i64>,
  pub timespent: Option<i64>,
  pub aggregatetimespent: Option<i64>,
  pub summary: Option<String>,
}

/// Hours and 8-hour working days derived from a second count.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tracked {
  pub seconds: Option<i64>,
  pub hr: Option<f64>,
  pub days: Option<f64>,
}

/// A row of the final table: the projected row with parsed timestamps and derived columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
  #[serde(rename = "project.name")]
  pub project_name: Option<String>,
  pub key: Option<String>,
  #[serde(rename = "status.name")]
  pub status_name: Option<String>,
  #[serde(rename = "issuetype.name")]
  pub issuetype_name: Option<String>,
  #[serde(rename = "assignee.displayName")]
  pub assignee_display_name: Option<String>,
  #[serde(rename = "priority.name")]
  pub priority_name: Option<String>,
  pub customfield_10016: Option<f64>,
  pub created: Option<DateTime<FixedOffset>>,
  pub updated: Option<DateTime<FixedOffset>>,
  pub duedate: Option<String>,
  pub timeestimate: Option<i64>,
  pub aggregatetimeestimate: Option<i64>,
  pub timeoriginalestimate: Option<i64>,
  pub aggregatetimeoriginalestimate: Option<i64>,
  pub timespent: Option<i64>,
  pub aggregatetimespent: Option<i64>,
  pub summary: Option<String>,

  #[serde(rename = "created.date")]
  pub created_date: Option<NaiveDate>,
  #[serde(rename = "updated.date")]
  pub updated_date: Option<NaiveDate>,

  #[serde(rename = "timeestimate.hr")]
  pub timeestimate_hr: Option<f64>,
  #[serde(rename = "timeestimate.days")]
  pub timeestimate_days: Option<f64>,
  #[serde(rename = "aggregatetimeestimate.hr")]
  pub aggregatetimeestimate_hr: Option<f64>,
  #[serde(rename = "aggregatetimeestimate.days")]
  pub aggregatetimeestimate_days: Option<f64>,
  #[serde(rename = "timeoriginalestimate.hr")]
  pub timeoriginalestimate_hr: Option<f64>,
  #[serde(rename = "timeoriginalestimate.days")]
  pub timeoriginalestimate_days: Option<f64>,
  #[serde(rename = "aggregatetimeoriginalestimate.hr")]
  pub aggregatetimeoriginalestimate_hr: Option<f64>,
  #[serde(rename = "aggregatetimeoriginalestimate.days")]
  pub aggregatetimeoriginalestimate_days: Option<f64>,
  #[serde(rename = "timespent.hr")]
  pub timespent_hr: Option<f64>,
  #[serde(rename = "timespent.days")]
  pub timespent_days: Option<f64>,
  #[serde(rename = "aggregatetimespent.hr")]
  pub aggregatetimespent_hr: Option<f64>,
  #[serde(rename = "aggregatetimespent.days")]
  pub aggregatetimespent_days: Option<f64>,
}

impl Task {
  /// Look up a cell by its column name, e.g. `timespent.hr` or `assignee.displayName`.
  ///
  /// Returns `None` for unknown column names; a known column with no value is `Value::Null`.
  pub fn column(&self, name: &str) -> Option<Value> {
    let v = match name {
      "project.name" => Value::from(self.project_name.clone()),
      "key" => Value::from(self.key.clone()),
      "status.name" => Value::from(self.status_name.clone()),
      "issuetype.name" => Value::from(self.issuetype_name.clone()),
      "assignee.displayName" => Value::from(self.assignee_display_name.clone()),
      "priority.name" => Value::from(self.priority_name.clone()),
      "customfield_10016" => Value::from(self.customfield_10016),
      "created" => Value::from(self.created.map(|d| d.to_rfc3339())),
      "updated" => Value::from(self.updated.map(|d| d.to_rfc3339())),
      "duedate" => Value::from(self.duedate.clone()),
      "timeestimate" => Value::from(self.timeestimate),
      "aggregatetimeestimate" => Value::from(self.aggregatetimeestimate),
      "timeoriginalestimate" => Value::from(self.timeoriginalestimate),
      "aggregatetimeoriginalestimate" => Value::from(self.aggregatetimeoriginalestimate),
      "timespent" => Value::from(self.timespent),
      "aggregatetimespent" => Value::from(self.aggregatetimespent),
      "summary" => Value::from(self.summary.clone()),
      "created.date" => Value::from(self.created_date.map(|d| d.to_string())),
      "updated.date" => Value::from(self.updated_date.map(|d| d.to_string())),
      "timeestimate.hr" => Value::from(self.timeestimate_hr),
      "timeestimate.days" => Value::from(self.timeestimate_days),
      "aggregatetimeestimate.hr" => Value::from(self.aggregatetimeestimate_hr),
      "aggregatetimeestimate.days" => Value::from(self.aggregatetimeestimate_days),
      "timeoriginalestimate.hr" => Value::from(self.timeoriginalestimate_hr),
      "timeoriginalestimate.days" => Value::from(self.timeoriginalestimate_days),
      "aggregatetimeoriginalestimate.hr" => Value::from(self.aggregatetimeoriginalestimate_hr),
      "aggregatetimeoriginalestimate.days" => Value::from(self.aggregatetimeoriginalestimate_days),
      "timespent.hr" => Value::from(self.timespent_hr),
      "timespent.days" => Value::from(self.timespent_days),
      "aggregatetimespent.hr" => Value::from(self.aggregatetimespent_hr),
      "aggregatetimespent.days" => Value::from(self.aggregatetimespent_days),
      _ => return None,
    };

    Some(v)
  }
}

/// The ordered result of one fetch (or one cache load).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTable {
  tasks: Vec<Task>,
}

impl TaskTable {
  pub fn new(tasks: Vec<Task>) -> Self {
    Self { tasks }
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Task> {
    self.tasks.iter()
  }

  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  /// Rows whose `assignee.displayName` equals `assignee` exactly, in table order.
  pub fn for_assignee(&self, assignee: &str) -> TaskTable {
    let tasks = self
      .tasks
      .iter()
      .filter(|t| t.assignee_display_name.as_deref() == Some(assignee))
      .cloned()
      .collect();

    TaskTable { tasks }
  }
}

impl<'a> IntoIterator for &'a TaskTable {
  type Item = &'a Task;
  type IntoIter = std::slice::Iter<'a, Task>;

  fn into_iter(self) -> Self::IntoIter {
    self.tasks.iter()
  }
}
