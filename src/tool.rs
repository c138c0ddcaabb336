// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: The `list_tasks_for_assignee` tool: lookback from a date, cache-or-fetch, exact assignee filter, display projection
// role: tool/entry
// inputs: ToolContext (search backend, cache, today, page size); ListTasksRequest (assignee, created_after, pages, format)
// outputs: Rendered text for the calling agent; list_tasks_for_assignee turns failures into a descriptive message, answer keeps them as errors
// side_effects: Search requests on cache miss; cache store after a successful fetch
// invariants:
// - days = today - created_after in whole days; future dates are rejected
// - The assignee is the only search filter and is matched exactly against assignee.displayName
// - A cache hit bypasses the fetcher entirely
// - A failed cache store is logged and the fetched table is still returned
// errors: Collected with anyhow context in tasks_for_assignee; propagated by answer, flattened to text by list_tasks_for_assignee
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::{CacheKey, TaskCache};
use crate::jira::api::SearchApi;
use crate::jira::fetch::fetch_tasks;
use crate::jql::FilterCriteria;
use crate::model::TaskTable;
use crate::render::{render, OutputFormat, SHOW_COLUMNS};

pub const DEFAULT_PAGES: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Collaborators for one tool call.
pub struct ToolContext<'a> {
  pub api: &'a dyn SearchApi,
  pub cache: &'a dyn TaskCache,
  pub today: NaiveDate,
  pub page_size: usize,
}

/// Arguments as the agent runtime sends them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTasksRequest {
  /// Exact `assignee.displayName`.
  pub assignee: String,
  /// `YYYY-MM-DD`.
  pub created_after: String,
  #[serde(default)]
  pub pages: Option<usize>,
  #[serde(default)]
  pub format: OutputFormat,
}

pub fn parse_created_after(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
    .with_context(|| format!("invalid created_after {s:?}, expected YYYY-MM-DD"))
}

/// Whole days from `created_after` to `today`.
pub fn lookback_days(today: NaiveDate, created_after: NaiveDate) -> Result<u32> {
  let days = (today - created_after).num_days();

  if days < 0 {
    bail!("created_after {created_after} is after today ({today})");
  }

  u32::try_from(days).context("lookback window too large")
}

/// Cache-or-fetch, then keep only the requested assignee's tasks.
pub fn tasks_for_assignee(ctx: &ToolContext<'_>, req: &ListTasksRequest) -> Result<TaskTable> {
  let created_after = parse_created_after(&req.created_after)?;
  let days = lookback_days(ctx.today, created_after)?;
  let pages = req.pages.unwrap_or(DEFAULT_PAGES);

  if pages == 0 {
    bail!("pages must be at least 1");
  }

  let key = CacheKey {
    retrieved_on: ctx.today,
    assignee: req.assignee.clone(),
    created_after,
  };

  let cached = ctx.cache.load(&key).unwrap_or_else(|e| {
    warn!(error = %e, "ignoring unreadable cache entry");
    None
  });

  let table = match cached {
    Some(t) => {
      debug!(file = %key.file_name(), rows = t.len(), "cache hit");
      t
    }
    None => {
      let criteria = FilterCriteria::new(days).with_assignees([req.assignee.as_str()]);
      let fetched = fetch_tasks(ctx.api, &criteria, pages, ctx.page_size)
        .with_context(|| format!("fetching tasks created in the last {days} days"))?;

      if let Err(e) = ctx.cache.store(&key, &fetched) {
        warn!(error = %e, "could not store fetched tasks in cache");
      }
      fetched
    }
  };

  Ok(table.for_assignee(&req.assignee))
}

/// Rendered answer, or the error that prevented one.
pub fn answer(ctx: &ToolContext<'_>, req: &ListTasksRequest) -> Result<String> {
  let table = tasks_for_assignee(ctx, req)?;

  if table.is_empty() {
    return Ok(format!(
      "No tasks found for {} created after {}.",
      req.assignee, req.created_after
    ));
  }

  Ok(render(&table, &SHOW_COLUMNS, req.format))
}

/// Tool entry point: always answers with text.
pub fn list_tasks_for_assignee(ctx: &ToolContext<'_>, req: &ListTasksRequest) -> String {
  answer(ctx, req).unwrap_or_else(|e| format!("Failed to list tasks for {}: {e:#}", req.assignee))
}
