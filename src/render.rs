// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Render a projection of a TaskTable as a markdown table, a plain summary list, or JSON
// role: output/rendering
// inputs: TaskTable, ordered column names, OutputFormat
// outputs: Text for the calling agent or terminal
// invariants:
// - Column order follows the requested list; unknown column names render as empty cells
// - `.hr` cells show 2 decimals, `.days` cells 1 decimal; nulls render empty (markdown) or null (JSON)
// - Pipes and newlines inside cells are escaped so rows stay on one line
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{Task, TaskTable};

/// Columns returned to the calling agent.
pub const SHOW_COLUMNS: [&str; 9] = [
  "project.name",
  "summary",
  "status.name",
  "assignee.displayName",
  "issuetype.name",
  "timespent.hr",
  "timeestimate.hr",
  "created.date",
  "updated.date",
];

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
  #[default]
  Markdown,
  Summaries,
  Json,
}

pub fn render(table: &TaskTable, columns: &[&str], format: OutputFormat) -> String {
  match format {
    OutputFormat::Markdown => markdown_table(table, columns),
    OutputFormat::Summaries => summary_list(table),
    OutputFormat::Json => json_rows(table, columns),
  }
}

fn cell_text(task: &Task, column: &str) -> String {
  let value = task.column(column).unwrap_or(Value::Null);

  match value {
    Value::Null => String::new(),
    Value::String(s) => s.replace('|', "\\|").replace(['\r', '\n'], " "),
    Value::Number(n) => match n.as_f64() {
      Some(f) if column.ends_with(".hr") => format!("{f:.2}"),
      Some(f) if column.ends_with(".days") => format!("{f:.1}"),
      _ => n.to_string(),
    },
    other => other.to_string(),
  }
}

/// Pipe table with a leading row-index column.
pub fn markdown_table(table: &TaskTable, columns: &[&str]) -> String {
  let mut lines = Vec::with_capacity(table.len() + 2);

  let header: Vec<&str> = std::iter::once("").chain(columns.iter().copied()).collect();
  lines.push(format!("| {} |", header.join(" | ")));

  let rule: Vec<&str> = std::iter::once("---:").chain(columns.iter().map(|_| ":---")).collect();
  lines.push(format!("|{}|", rule.join("|")));

  for (i, task) in table.iter().enumerate() {
    let cells: Vec<String> = std::iter::once(i.to_string())
      .chain(columns.iter().map(|c| cell_text(task, c)))
      .collect();
    lines.push(format!("| {} |", cells.join(" | ")));
  }

  lines.join("\n")
}

pub const NO_SUMMARY: &str = "(no summary)";

/// One `- summary` line per task; tasks without a summary fall back to their key, then a placeholder.
pub fn summary_list(table: &TaskTable) -> String {
  table
    .iter()
    .map(|t| t.summary.as_deref().or(t.key.as_deref()).unwrap_or(NO_SUMMARY))
    .map(|s| format!("- {}", s.replace(['\r', '\n'], " ")))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Array of objects restricted to `columns`.
pub fn json_rows(table: &TaskTable, columns: &[&str]) -> String {
  let rows: Vec<Value> = table
    .iter()
    .map(|task| {
      let obj: Map<String, Value> = columns
        .iter()
        .map(|c| ((*c).to_string(), task.column(c).unwrap_or(Value::Null)))
        .collect();
      Value::Object(obj)
    })
    .collect();

  serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string())
}
