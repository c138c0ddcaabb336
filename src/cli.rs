// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Command-line surface and normalization into an EffectiveConfig
// role: cli/config
// inputs: argv and JIRA_URL / JIRA_EMAIL / JIRA_TOKEN from the environment (main loads a .env first)
// outputs: EffectiveConfig (connection, tool request, page size, cache dir, today)
// invariants:
// - Assignee and created-after are both required; created-after must be YYYY-MM-DD
// - Pages, page size and timeout must all be positive
// - Connection settings are required unless the offline search fixture is active
// - The API token never appears in Debug output
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::jira::api::{env_wants_fixture, JiraConnection, DEFAULT_TIMEOUT};
use crate::render::OutputFormat;
use crate::tool::{parse_created_after, ListTasksRequest, DEFAULT_PAGES, DEFAULT_PAGE_SIZE};
use crate::util;

#[derive(Parser, Debug)]
#[command(
    name = "jira-task-report",
    version,
    about = "List an assignee's recent Jira tasks with time spent and estimates",
    long_about = None
)]
pub struct Cli {
  /// Assignee display name (matched exactly)
  #[arg(long)]
  pub assignee: Option<String>,

  /// Only tasks created on or after this date, e.g. 2025-03-01
  #[arg(long)]
  pub created_after: Option<String>,

  /// Number of result pages to fetch
  #[arg(long, default_value_t = DEFAULT_PAGES)]
  pub pages: usize,

  /// Issues per page (maxResults)
  #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
  pub page_size: usize,

  /// Output shape
  #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
  pub format: OutputFormat,

  /// Directory for cached task tables (one JSON file per day/assignee/start date)
  #[arg(long)]
  pub cache_dir: Option<PathBuf>,

  /// Per-request timeout in seconds
  #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
  pub timeout_secs: u64,

  /// Search endpoint, e.g. https://acme.atlassian.net/rest/api/2/search
  #[arg(long, env = "JIRA_URL")]
  pub url: Option<String>,

  /// Account email for Basic auth
  #[arg(long, env = "JIRA_EMAIL")]
  pub email: Option<String>,

  /// API token for Basic auth
  #[arg(long, env = "JIRA_TOKEN", hide_env_values = true)]
  pub token: Option<String>,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override "today" as YYYY-MM-DD (hidden; tests only)
  #[arg(long = "today", hide = true)]
  pub today_override: Option<String>,
}

#[derive(Debug)]
pub struct EffectiveConfig {
  pub connection: JiraConnection,
  pub request: ListTasksRequest,
  pub page_size: usize,
  pub cache_dir: Option<PathBuf>,
  pub today: NaiveDate,
}

fn non_empty(v: Option<String>) -> Option<String> {
  v.filter(|s| !s.trim().is_empty())
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let (assignee, created_after) = match (non_empty(cli.assignee), non_empty(cli.created_after)) {
    (Some(a), Some(c)) => (a, c),
    _ => bail!("Provide both --assignee and --created-after"),
  };

  // Reject malformed dates before any network work
  parse_created_after(&created_after)?;

  if cli.pages == 0 {
    bail!("--pages must be at least 1");
  }
  if cli.page_size == 0 {
    bail!("--page-size must be at least 1");
  }
  if cli.timeout_secs == 0 {
    bail!("--timeout-secs must be at least 1");
  }

  let today = match cli.today_override.as_deref() {
    Some(s) => Some(NaiveDate::parse_from_str(s, "%Y-%m-%d").context("parsing --today")?),
    None => None,
  };

  let (url, email, token) = match (non_empty(cli.url), non_empty(cli.email), non_empty(cli.token)) {
    (Some(u), Some(e), Some(t)) => (u, e, t),
    (u, e, t) if env_wants_fixture() => (u.unwrap_or_default(), e.unwrap_or_default(), t.unwrap_or_default()),
    _ => bail!("Missing Jira connection settings: set JIRA_URL, JIRA_EMAIL and JIRA_TOKEN (or --url/--email/--token)"),
  };

  Ok(EffectiveConfig {
    connection: JiraConnection {
      url,
      email,
      token,
      timeout: Duration::from_secs(cli.timeout_secs),
    },
    request: ListTasksRequest {
      assignee,
      created_after,
      pages: Some(cli.pages),
      format: cli.format,
    },
    page_size: cli.page_size,
    cache_dir: cli.cache_dir,
    today: util::effective_today(today),
  })
}
