// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed error outcomes for schema projection, page fetching, and the task cache
// role: model/errors
// outputs: SchemaError, FetchError, CacheError (thiserror enums)
// invariants: SchemaError is a page-level outcome (absorbed by the page loop); FetchError aborts the whole fetch
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use thiserror::Error;

/// A page's flattened data did not carry a column the output schema requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
  #[error("required column `{0}` missing from search response")]
  MissingColumn(String),
}

/// Request-level failures. These are not absorbed by the page loop.
#[derive(Debug, Error)]
pub enum FetchError {
  /// Timeout, connection failure, or a non-2xx status.
  #[error("search request failed (startAt={offset}): {source}")]
  Transport {
    offset: usize,
    #[source]
    source: Box<ureq::Error>,
  },

  /// The response body was not the JSON document we expected.
  #[error("search response at startAt={offset} is not valid JSON: {reason}")]
  Decode { offset: usize, reason: String },

  /// A `created`/`updated` value could not be parsed as a timestamp.
  #[error("cannot parse `{column}` timestamp {value:?}")]
  Timestamp { column: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum CacheError {
  #[error("cache I/O at {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("cache entry {path} is not a task table: {source}")]
  Format {
    path: String,
    #[source]
    source: serde_json::Error,
  },
}
