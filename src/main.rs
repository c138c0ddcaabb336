use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jira_task_report::cache::{JsonFileCache, NoCache, TaskCache};
use jira_task_report::cli::{normalize, Cli};
use jira_task_report::jira::api::build_api;
use jira_task_report::tool::{self, ToolContext};
use jira_task_report::util;

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() -> Result<()> {
  // A missing .env is fine; real env vars win over its entries
  dotenvy::dotenv().ok();

  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  init_tracing();

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: wire search backend and cache
  let api = build_api(&cfg.connection)?;
  let cache: Box<dyn TaskCache> = match &cfg.cache_dir {
    Some(dir) => Box::new(JsonFileCache::new(dir)),
    None => Box::new(NoCache),
  };

  let ctx = ToolContext {
    api: api.as_ref(),
    cache: cache.as_ref(),
    today: cfg.today,
    page_size: cfg.page_size,
  };

  // Phase 3: answer once
  let out = tool::answer(&ctx, &cfg.request)?;
  println!("{out}");

  Ok(())
}
