//! In-memory context.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use round_tracker_models::ScheduledEvent;
use serde_json::Value;

use crate::context::EventContext;
use crate::error::{PersistenceError, Result};

/// A context backed by a map in memory.
///
/// Counts every successful [`set`](EventContext::set), which lets callers
/// assert how many writes an operation performed.
#[derive(Debug, Default)]
pub struct MemoryContext {
    values: RwLock<HashMap<(String, String), Value>>,
    writes: AtomicUsize,
}

impl MemoryContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw value without going through the event encoding.
    ///
    /// Does not count as a write.
    pub fn insert_raw(&self, scope: &str, key: &str, value: Value) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| PersistenceError::LockPoisoned(e.to_string()))?;
        values.insert((scope.to_string(), key.to_string()), value);
        Ok(())
    }

    /// Returns the number of writes performed through `set`.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventContext for MemoryContext {
    fn get(&self, scope: &str, key: &str) -> Result<Option<Value>> {
        let values = self
            .values
            .read()
            .map_err(|e| PersistenceError::LockPoisoned(e.to_string()))?;
        Ok(values.get(&(scope.to_string(), key.to_string())).cloned())
    }

    async fn set(&self, scope: &str, key: &str, events: Vec<ScheduledEvent>) -> Result<()> {
        let value = serde_json::to_value(events)?;
        self.insert_raw(scope, key, value)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_absent() {
        let ctx = MemoryContext::new();
        assert!(ctx.get("round-tracker", "events").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let ctx = MemoryContext::new();
        let event = ScheduledEvent::new(2, "Goblins flee");

        ctx.set("round-tracker", "events", vec![event.clone()])
            .await
            .unwrap();

        let raw = ctx.get("round-tracker", "events").unwrap().unwrap();
        let stored: Vec<ScheduledEvent> = serde_json::from_value(raw).unwrap();
        assert_eq!(stored, vec![event]);
        assert_eq!(ctx.write_count(), 1);
    }

    #[tokio::test]
    async fn test_scopes_are_independent() {
        let ctx = MemoryContext::new();

        ctx.set("a", "events", vec![ScheduledEvent::new(1, "a")])
            .await
            .unwrap();

        assert!(ctx.get("b", "events").unwrap().is_none());
        assert!(ctx.get("a", "other").unwrap().is_none());
    }

    #[test]
    fn test_insert_raw_not_counted() {
        let ctx = MemoryContext::new();
        ctx.insert_raw("s", "k", json!({"not": "a list"})).unwrap();

        assert_eq!(ctx.get("s", "k").unwrap(), Some(json!({"not": "a list"})));
        assert_eq!(ctx.write_count(), 0);
    }
}
