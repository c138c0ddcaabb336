// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for the "today" override and man page rendering
// role: utilities/helpers
// inputs: Optional date override; clap CommandFactory
// outputs: Effective calendar date; man page text
// invariants: effective_today is the only place the binary reads the local clock
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{Local, NaiveDate};
use clap::CommandFactory;

/// Returns the effective "today" given an optional override.
///
/// When `override_today` is `Some`, that date is returned; otherwise the
/// current local date is used. Keeps tests deterministic without sprinkling
/// `Local::now()` throughout the code.
pub fn effective_today(override_today: Option<NaiveDate>) -> NaiveDate {
  override_today.unwrap_or_else(|| Local::now().date_naive())
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
