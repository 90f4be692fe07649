//! JSON-file context.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use round_tracker_models::ScheduledEvent;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::atomic::{atomic_write_json, read_json_optional};
use crate::config::contexts_dir;
use crate::context::EventContext;
use crate::error::{PersistenceError, Result};

/// A context stored as a single JSON document on disk.
///
/// The document is an object of scopes, each an object of keys:
/// ```text
/// {
///   "round-tracker": {
///     "events": [ { "id": "...", "round": 3, ... } ]
///   }
/// }
/// ```
///
/// Writes are atomic and run on the blocking thread pool. Nothing is cached
/// between calls.
#[derive(Debug, Clone)]
pub struct FileContext {
    path: PathBuf,
}

impl FileContext {
    /// Creates a context backed by the file at `path`.
    ///
    /// The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens a named context under the configured contexts directory.
    ///
    /// # Errors
    /// Rejects names that are empty or would escape the directory.
    pub fn open_named(name: &str) -> Result<Self> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(PersistenceError::Rejected(format!(
                "invalid context name: {:?}",
                name
            )));
        }
        Ok(Self::new(contexts_dir().join(format!("{}.json", name))))
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_document(path: &Path) -> Result<Map<String, Value>> {
        match read_json_optional::<Value>(path)? {
            None => Ok(Map::new()),
            Some(Value::Object(doc)) => Ok(doc),
            Some(_) => {
                warn!(path = %path.display(), "context file is not a JSON object, replacing it");
                Ok(Map::new())
            }
        }
    }
}

#[async_trait]
impl EventContext for FileContext {
    fn get(&self, scope: &str, key: &str) -> Result<Option<Value>> {
        let doc = match read_json_optional::<Value>(&self.path)? {
            Some(doc) => doc,
            None => return Ok(None),
        };
        Ok(doc.get(scope).and_then(|s| s.get(key)).cloned())
    }

    async fn set(&self, scope: &str, key: &str, events: Vec<ScheduledEvent>) -> Result<()> {
        let path = self.path.clone();
        let scope = scope.to_string();
        let key = key.to_string();
        let count = events.len();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let value = serde_json::to_value(events)?;
            let mut doc = Self::load_document(&path)?;

            let entry = doc
                .entry(scope)
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(scoped) = entry {
                scoped.insert(key, value);
            }

            atomic_write_json(&path, &Value::Object(doc))
        })
        .await
        .map_err(|e| PersistenceError::Rejected(format!("write task failed: {}", e)))??;

        debug!(path = %self.path.display(), count, "context written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_get_missing_file() {
        let dir = tempdir().unwrap();
        let ctx = FileContext::new(dir.path().join("combat.json"));

        assert!(ctx.get("round-tracker", "events").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("combat.json");
        let event = ScheduledEvent::new(4, "Portal closes");

        FileContext::new(&path)
            .set("round-tracker", "events", vec![event.clone()])
            .await
            .unwrap();

        let reopened = FileContext::new(&path);
        let raw = reopened.get("round-tracker", "events").unwrap().unwrap();
        let stored: Vec<ScheduledEvent> = serde_json::from_value(raw).unwrap();
        assert_eq!(stored, vec![event]);
    }

    #[tokio::test]
    async fn test_set_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("combat.json");
        fs::write(&path, r#"{"host":{"turn":7},"round-tracker":{"notes":"keep"}}"#).unwrap();

        let ctx = FileContext::new(&path);
        ctx.set("round-tracker", "events", Vec::new()).await.unwrap();

        let doc: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["host"]["turn"], json!(7));
        assert_eq!(doc["round-tracker"]["notes"], json!("keep"));
        assert_eq!(doc["round-tracker"]["events"], json!([]));
    }

    #[tokio::test]
    async fn test_set_replaces_non_object_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("combat.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let ctx = FileContext::new(&path);
        ctx.set("round-tracker", "events", Vec::new()).await.unwrap();

        assert_eq!(ctx.get("round-tracker", "events").unwrap(), Some(json!([])));
    }

    #[test]
    fn test_get_returns_malformed_value_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("combat.json");
        fs::write(&path, r#"{"round-tracker":{"events":"oops"}}"#).unwrap();

        let ctx = FileContext::new(&path);
        assert_eq!(ctx.get("round-tracker", "events").unwrap(), Some(json!("oops")));
    }

    #[test]
    fn test_open_named_rejects_traversal() {
        assert!(FileContext::open_named("").is_err());
        assert!(FileContext::open_named("..").is_err());
        assert!(FileContext::open_named("../escape").is_err());
        assert!(FileContext::open_named("a\\b").is_err());
    }

    #[test]
    fn test_open_named_uses_contexts_dir() {
        let ctx = FileContext::open_named("combat-42").unwrap();

        assert_eq!(ctx.path(), contexts_dir().join("combat-42.json"));
    }
}
