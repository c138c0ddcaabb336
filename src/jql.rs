// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Build the JQL search string from a lookback window and optional issue-type / assignee allow-lists
// role: query/builder
// inputs: FilterCriteria (days, issue_types, assignees)
// outputs: JQL string ending in a newest-first sort
// invariants:
// - Never fails; empty lists contribute no clause
// - Issue types are inserted verbatim; assignees are double-quoted
// - Output always ends with `order by created DESC` (the page loop relies on newest-first traversal)
// - Deterministic: no clock or random input
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::{Deserialize, Serialize};

pub const ORDER_CLAUSE: &str = "order by created DESC";

/// Search filters for one fetch. Passed per call; nothing is kept on the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
  /// Lookback window: issues created within the last `days` days.
  pub days: u32,
  /// Issue type names, e.g. `Bug`. Must be safe to interpolate as bare JQL tokens.
  pub issue_types: Vec<String>,
  /// Assignee display names; each is quoted so spaces are fine.
  pub assignees: Vec<String>,
}

impl FilterCriteria {
  pub fn new(days: u32) -> Self {
    Self {
      days,
      ..Self::default()
    }
  }

  pub fn with_issue_types<I, S>(mut self, types: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.issue_types = types.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_assignees<I, S>(mut self, assignees: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.assignees = assignees.into_iter().map(Into::into).collect();
    self
  }
}

pub fn build_query(criteria: &FilterCriteria) -> String {
  build_query_parts(criteria.days, &criteria.issue_types, &criteria.assignees)
}

pub fn build_query_parts<T, A>(days: u32, issue_types: &[T], assignees: &[A]) -> String
where
  T: AsRef<str>,
  A: AsRef<str>,
{
  let mut clauses = vec![format!("created >= -{days}d")];

  if !issue_types.is_empty() {
    let list = issue_types.iter().map(|t| t.as_ref()).collect::<Vec<_>>().join(", ");
    clauses.push(format!("AND issuetype in ({list})"));
  }

  if !assignees.is_empty() {
    let list = assignees
      .iter()
      .map(|a| format!("\"{}\"", a.as_ref()))
      .collect::<Vec<_>>()
      .join(", ");
    clauses.push(format!("AND assignee in ({list})"));
  }

  clauses.push(ORDER_CLAUSE.to_string());
  clauses.join(" ")
}
