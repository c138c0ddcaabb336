// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path access into serde_json::Value and flattening of nested objects into dotted columns
// role: extension/serde_json
// outputs: JsonFetch trait + JsonFetched wrapper; JsonFlatten trait producing a flat column map
// invariants: No panics; missing paths yield None; objects are descended, arrays and scalars (null included) are leaves
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Wrapper around a JSON location to allow typed extraction via a clear second step.
pub struct JsonFetched<'a> {
  inner: Option<&'a Value>,
}

impl<'a> JsonFetched<'a> {
  /// Attempt to deserialize the fetched value as `T`.
  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self.inner.and_then(|v| serde_json::from_value::<T>(v.clone()).ok())
  }

  /// Borrow the raw value at the path, if any.
  pub fn value(&self) -> Option<&'a Value> {
    self.inner
  }
}

/// Extension to fetch nested values via dotted paths like "fields.assignee.displayName".
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
}

impl JsonFetch for Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    let mut cur = self;

    for key in path.split('.') {
      match cur.get(key) {
        Some(next) => cur = next,
        None => return JsonFetched { inner: None },
      }
    }

    JsonFetched { inner: Some(cur) }
  }
}

/// Flatten nested objects into a single-level map keyed by dotted paths.
pub trait JsonFlatten {
  fn flatten_dotted(&self) -> Map<String, Value>;
}

impl JsonFlatten for Value {
  fn flatten_dotted(&self) -> Map<String, Value> {
    let mut out = Map::new();

    match self {
      Value::Object(obj) => flatten_into(&mut out, None, obj),
      other => {
        out.insert(String::new(), other.clone());
      }
    }

    out
  }
}

fn flatten_into(out: &mut Map<String, Value>, prefix: Option<&str>, obj: &Map<String, Value>) {
  for (k, v) in obj {
    let key = match prefix {
      Some(p) => format!("{p}.{k}"),
      None => k.clone(),
    };

    match v {
      // An empty object still names its column, like a null would.
      Value::Object(child) if !child.is_empty() => flatten_into(out, Some(&key), child),
      Value::Object(_) => {
        out.insert(key, Value::Null);
      }
      leaf => {
        out.insert(key, leaf.clone());
      }
    }
  }
}
