// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Jira search API seam: HTTP backend (Basic auth, timeout) and a fixture backend for offline runs
// role: jira/api
// inputs: JiraConnection (url, email, token, timeout); env JTR_TEST_SEARCH_PAGES_JSON for fixtures
// outputs: Raw JSON search response bodies, one per PageRequest
// side_effects: Network calls to the configured search endpoint
// invariants:
// - Backends hold connection settings only; query/offset/limit arrive per request
// - Non-2xx statuses, timeouts and connection errors surface as FetchError::Transport
// - Fixture backend serves page `startAt / maxResults`; past the end it answers with no issues
// errors: Propagated to the page loop; never retried
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::cell::RefCell;
use std::fmt;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::FetchError;

pub const FIXTURE_ENV: &str = "JTR_TEST_SEARCH_PAGES_JSON";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// One page of a search: the fixed query plus pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<'a> {
  pub query: &'a str,
  pub offset: usize,
  pub limit: usize,
}

/// Where and how to reach the search endpoint.
#[derive(Clone)]
pub struct JiraConnection {
  /// Full search endpoint, e.g. `https://acme.atlassian.net/rest/api/2/search`.
  pub url: String,
  pub email: String,
  pub token: String,
  pub timeout: Duration,
}

impl fmt::Debug for JiraConnection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("JiraConnection")
      .field("url", &self.url)
      .field("email", &self.email)
      .field("token", &"<redacted>")
      .field("timeout", &self.timeout)
      .finish()
  }
}

// --- Trait seam for the search endpoint ---
pub trait SearchApi {
  fn search(&self, page: &PageRequest<'_>) -> Result<Value, FetchError>;
}

pub struct JiraHttpApi {
  url: String,
  authorization: String,
  agent: ureq::Agent,
}

impl JiraHttpApi {
  pub fn new(conn: &JiraConnection) -> Self {
    let agent: ureq::Agent = ureq::Agent::config_builder()
      .timeout_global(Some(conn.timeout))
      .build()
      .into();

    Self {
      url: conn.url.clone(),
      authorization: basic_auth(&conn.email, &conn.token),
      agent,
    }
  }
}

fn basic_auth(user: &str, secret: &str) -> String {
  format!("Basic {}", STANDARD.encode(format!("{user}:{secret}")))
}

impl SearchApi for JiraHttpApi {
  fn search(&self, page: &PageRequest<'_>) -> Result<Value, FetchError> {
    debug!(url = %self.url, offset = page.offset, limit = page.limit, "GET search page");

    let resp = self
      .agent
      .get(&self.url)
      .header("Accept", "application/json")
      .header("Authorization", &self.authorization)
      .query("jql", page.query)
      .query("startAt", page.offset.to_string())
      .query("maxResults", page.limit.to_string())
      .call();

    let mut resp = resp.map_err(|e| FetchError::Transport {
      offset: page.offset,
      source: Box::new(e),
    })?;

    resp
      .body_mut()
      .read_json::<Value>()
      .map_err(|e| FetchError::Decode {
        offset: page.offset,
        reason: e.to_string(),
      })
  }
}

/// Serves canned search bodies in page order and records every request it sees.
#[derive(Debug, Default)]
pub struct FixtureApi {
  pages: Vec<Value>,
  requests: RefCell<Vec<(usize, usize)>>,
}

impl FixtureApi {
  pub fn new(pages: Vec<Value>) -> Self {
    Self {
      pages,
      requests: RefCell::new(Vec::new()),
    }
  }

  /// `(offset, limit)` of each request served so far.
  pub fn requests(&self) -> Vec<(usize, usize)> {
    self.requests.borrow().clone()
  }
}

impl SearchApi for FixtureApi {
  fn search(&self, page: &PageRequest<'_>) -> Result<Value, FetchError> {
    self.requests.borrow_mut().push((page.offset, page.limit));

    let index = page.offset.checked_div(page.limit).unwrap_or(0);

    Ok(self.pages.get(index).cloned().unwrap_or_else(|| json!({ "issues": [] })))
  }
}

fn fixture_pages_from_env() -> Option<Result<Vec<Value>, FetchError>> {
  let raw = std::env::var(FIXTURE_ENV).ok()?;

  let parsed = serde_json::from_str::<Vec<Value>>(&raw).map_err(|e| FetchError::Decode {
    offset: 0,
    reason: format!("{FIXTURE_ENV}: {e}"),
  });

  Some(parsed)
}

pub fn env_wants_fixture() -> bool {
  std::env::var(FIXTURE_ENV).is_ok()
}

/// Pick the backend: env fixtures when present, otherwise the HTTP endpoint.
pub fn build_api(conn: &JiraConnection) -> Result<Box<dyn SearchApi>, FetchError> {
  match fixture_pages_from_env() {
    Some(pages) => {
      debug!("serving search pages from {FIXTURE_ENV}");
      Ok(Box::new(FixtureApi::new(pages?)))
    }
    None => Ok(Box::new(JiraHttpApi::new(conn))),
  }
}
