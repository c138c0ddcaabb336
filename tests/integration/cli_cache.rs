use test_support::{cmd_bin, search_pages_env, tempdir, SEARCH_PAGES_ENV};

fn run(pages_json: &str, cache_dir: &std::path::Path) -> String {
  let out = cmd_bin("jira-task-report")
    .env(SEARCH_PAGES_ENV, pages_json)
    .args(["--assignee", "Jane Doe", "--created-after", "2025-03-01", "--today", "2025-03-12"])
    .args(["--pages", "3", "--page-size", "3", "--format", "summaries"])
    .arg("--cache-dir")
    .arg(cache_dir)
    .output()
    .unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  String::from_utf8(out.stdout).unwrap()
}

#[test]
fn second_run_is_served_from_cache() {
  let td = tempdir();
  let first = run(&search_pages_env("search_pages.json"), td.path());

  let file = td.path().join("2025-03-12_jane-doe_2025-03-01.json");
  assert!(file.exists());

  // The whole fetched table is cached, not just the requested assignee
  let cached: serde_json::Value = serde_json::from_slice(&std::fs::read(&file).unwrap()).unwrap();
  assert_eq!(cached.as_array().unwrap().len(), 4);

  // No search pages at all now; a hit must not need them
  let second = run("[]", td.path());
  assert_eq!(first, second);
  assert!(second.starts_with("- Rotate database credentials"));
}
