// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Namespace for the Jira search integration (API seam and page loop)
// role: jira/namespace
// outputs: Public submodules `api` and `fetch`
// invariants: Network access stays behind the SearchApi trait
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod api;
pub mod fetch;
