// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Pluggable task-table cache keyed by (retrieval date, assignee, lookback start)
// role: cache/storage
// inputs: CacheKey, TaskTable
// outputs: Option<TaskTable> on load; JSON files under the cache dir for JsonFileCache
// side_effects: JsonFileCache creates its directory and writes one file per key
// invariants:
// - A hit is returned verbatim; callers skip fetching entirely
// - File names are stable: <retrieved_on>_<assignee-slug>_<created_after>.json
// - NoCache never hits and never writes
// errors: CacheError with the file path; callers decide whether a store failure matters
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::CacheError;
use crate::model::TaskTable;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
  pub retrieved_on: NaiveDate,
  pub assignee: String,
  pub created_after: NaiveDate,
}

impl CacheKey {
  pub fn file_name(&self) -> String {
    format!(
      "{}_{}_{}.json",
      self.retrieved_on.format("%Y-%m-%d"),
      slug(&self.assignee),
      self.created_after.format("%Y-%m-%d")
    )
  }
}

/// Lowercase ASCII alphanumerics; every other run of characters becomes one `-`.
fn slug(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut pending_dash = false;

  for c in s.chars() {
    if c.is_ascii_alphanumeric() {
      if pending_dash && !out.is_empty() {
        out.push('-');
      }
      pending_dash = false;
      out.push(c.to_ascii_lowercase());
    } else {
      pending_dash = true;
    }
  }

  if out.is_empty() {
    out.push('_');
  }
  out
}

pub trait TaskCache {
  fn load(&self, key: &CacheKey) -> Result<Option<TaskTable>, CacheError>;
  fn store(&self, key: &CacheKey, table: &TaskTable) -> Result<(), CacheError>;
}

pub struct NoCache;

impl TaskCache for NoCache {
  fn load(&self, _key: &CacheKey) -> Result<Option<TaskTable>, CacheError> {
    Ok(None)
  }

  fn store(&self, _key: &CacheKey, _table: &TaskTable) -> Result<(), CacheError> {
    Ok(())
  }
}

#[derive(Default)]
pub struct MemoryCache {
  entries: RefCell<HashMap<CacheKey, TaskTable>>,
}

impl MemoryCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.entries.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.borrow().is_empty()
  }
}

impl TaskCache for MemoryCache {
  fn load(&self, key: &CacheKey) -> Result<Option<TaskTable>, CacheError> {
    Ok(self.entries.borrow().get(key).cloned())
  }

  fn store(&self, key: &CacheKey, table: &TaskTable) -> Result<(), CacheError> {
    self.entries.borrow_mut().insert(key.clone(), table.clone());
    Ok(())
  }
}

/// One pretty-printed JSON table per key under `dir`.
pub struct JsonFileCache {
  dir: PathBuf,
}

impl JsonFileCache {
  pub fn new<P: AsRef<Path>>(dir: P) -> Self {
    Self {
      dir: dir.as_ref().to_path_buf(),
    }
  }

  pub fn path_for(&self, key: &CacheKey) -> PathBuf {
    self.dir.join(key.file_name())
  }
}

impl TaskCache for JsonFileCache {
  fn load(&self, key: &CacheKey) -> Result<Option<TaskTable>, CacheError> {
    let path = self.path_for(key);

    let bytes = match std::fs::read(&path) {
      Ok(b) => b,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
      Err(source) => {
        return Err(CacheError::Io {
          path: path.display().to_string(),
          source,
        })
      }
    };

    serde_json::from_slice::<TaskTable>(&bytes)
      .map(Some)
      .map_err(|source| CacheError::Format {
        path: path.display().to_string(),
        source,
      })
  }

  fn store(&self, key: &CacheKey, table: &TaskTable) -> Result<(), CacheError> {
    let path = self.path_for(key);
    let io_err = |source: std::io::Error| CacheError::Io {
      path: path.display().to_string(),
      source,
    };

    std::fs::create_dir_all(&self.dir).map_err(io_err)?;

    let bytes = serde_json::to_vec_pretty(table).map_err(|source| CacheError::Format {
      path: path.display().to_string(),
      source,
    })?;

    std::fs::write(&path, bytes).map_err(io_err)
  }
}
