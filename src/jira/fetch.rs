// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Walk the search endpoint page by page, project each page, concatenate, and derive time metrics
// role: jira/fetch
// inputs: SearchApi backend, page count, page size, JQL string (or FilterCriteria)
// outputs: TaskTable in fetch order (newest first given the query's sort clause)
// side_effects: One search request per page, strictly sequential
// invariants:
// - offset = page * page_size for page in 0..num_pages; an offset that would overflow stops the loop
// - An empty page or a schema mismatch stops the loop; accumulated pages are kept
// - A short, non-empty page does not stop the loop
// - Zero retained pages yield an empty table, not an error
// errors: Transport/decode/timestamp failures propagate and fail the whole fetch
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde_json::Value;
use tracing::{info, warn};

use crate::error::{FetchError, SchemaError};
use crate::ext::serde_json::JsonFetch;
use crate::jira::api::{PageRequest, SearchApi};
use crate::jql::{build_query, FilterCriteria};
use crate::metrics::derive_table;
use crate::model::{TaskRow, TaskTable};
use crate::schema::{flatten_issue, project_page, FlatIssue};

/// What a single page contributed.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
  Rows(Vec<TaskRow>),
  /// No `issues`, or an empty array: the normal end of pagination.
  Exhausted,
  /// The page is unusable; pagination stops here.
  SchemaMismatch(SchemaError),
}

fn fetch_page(api: &dyn SearchApi, query: &str, offset: usize, limit: usize) -> Result<PageOutcome, FetchError> {
  let body = api.search(&PageRequest { query, offset, limit })?;

  let issues = match body.fetch("issues").value().and_then(Value::as_array) {
    Some(arr) if !arr.is_empty() => arr,
    _ => {
      if let Some(messages) = body.fetch("errorMessages").to::<Vec<String>>().filter(|m| !m.is_empty()) {
        warn!(offset, ?messages, "search returned error messages and no issues");
      }
      info!(offset, "no issues found");
      return Ok(PageOutcome::Exhausted);
    }
  };

  let flat: Vec<FlatIssue> = issues.iter().map(flatten_issue).collect();

  match project_page(&flat) {
    Ok(rows) => Ok(PageOutcome::Rows(rows)),
    Err(e) => {
      warn!(offset, error = %e, "error while filtering columns from search response");
      Ok(PageOutcome::SchemaMismatch(e))
    }
  }
}

/// Fetch up to `num_pages` pages of `page_size` issues for a prepared query.
pub fn fetch(api: &dyn SearchApi, num_pages: usize, page_size: usize, query: &str) -> Result<TaskTable, FetchError> {
  let mut pages: Vec<Vec<TaskRow>> = Vec::new();

  for page in 0..num_pages {
    let Some(offset) = page.checked_mul(page_size) else {
      warn!(page, page_size, "page offset overflows; stopping");
      break;
    };

    match fetch_page(api, query, offset, page_size)? {
      PageOutcome::Rows(rows) => {
        info!(page, rows = rows.len(), "fetched page");
        pages.push(rows);
      }
      PageOutcome::Exhausted | PageOutcome::SchemaMismatch(_) => {
        info!(page, "no more issues found or an error occurred; stopping");
        break;
      }
    }
  }

  derive_table(pages.into_iter().flatten().collect())
}

/// Build the query from `criteria` once, then fetch.
pub fn fetch_tasks(
  api: &dyn SearchApi,
  criteria: &FilterCriteria,
  num_pages: usize,
  page_size: usize,
) -> Result<TaskTable, FetchError> {
  let query = build_query(criteria);
  info!(%query, num_pages, page_size, "fetching tasks");
  fetch(api, num_pages, page_size, &query)
}
