use jira_task_report::jql::{build_query, build_query_parts, FilterCriteria, ORDER_CLAUSE};
use proptest::prelude::*;

fn token() -> impl Strategy<Value = String> {
  "[A-Za-z][A-Za-z0-9]{0,11}"
}

fn name() -> impl Strategy<Value = String> {
  "[A-Za-z][A-Za-z .'-]{0,20}"
}

proptest! {
  #[test]
  fn lookback_only_has_no_filter_clauses(days in 0u32..10_000) {
    let q = build_query_parts::<&str, &str>(days, &[], &[]);
    prop_assert_eq!(q, format!("created >= -{days}d {ORDER_CLAUSE}"));
  }

  #[test]
  fn clauses_keep_their_order(
    days in 0u32..400,
    types in prop::collection::vec(token(), 0..4),
    people in prop::collection::vec(name(), 0..4),
  ) {
    let q = build_query(&FilterCriteria::new(days).with_issue_types(types.clone()).with_assignees(people.clone()));

    let starts_with_lookback = q.starts_with(&format!("created >= -{days}d"));
    prop_assert!(starts_with_lookback);
    prop_assert!(q.ends_with(ORDER_CLAUSE));
    prop_assert_eq!(q.matches(ORDER_CLAUSE).count(), 1);

    if types.is_empty() {
      prop_assert!(!q.contains("issuetype in"));
    } else {
      let clause = format!("AND issuetype in ({})", types.join(", "));
      prop_assert!(q.contains(&clause));
    }

    if people.is_empty() {
      prop_assert!(!q.contains("assignee in"));
    } else {
      let quoted: Vec<String> = people.iter().map(|p| format!("\"{p}\"")).collect();
      let clause = format!("AND assignee in ({})", quoted.join(", "));
      prop_assert!(q.contains(&clause));
    }

    if !types.is_empty() && !people.is_empty() {
      prop_assert!(q.find("issuetype in") < q.find("assignee in"));
    }
  }

  #[test]
  fn building_is_deterministic(days in 0u32..400, people in prop::collection::vec(name(), 0..3)) {
    let criteria = FilterCriteria::new(days).with_assignees(people);
    prop_assert_eq!(build_query(&criteria), build_query(&criteria.clone()));
  }
}
