//! The context capability the store operates on.

use std::sync::Arc;

use async_trait::async_trait;
use round_tracker_models::ScheduledEvent;
use serde_json::Value;

use crate::error::Result;

/// A caller-owned key/value document holding event lists.
///
/// The store never caches what it reads from a context: every operation
/// calls [`get`](EventContext::get), mutates a local copy, and hands the full
/// list back through [`set`](EventContext::set).
///
/// `get` returns the raw stored value so the store can tell an absent list
/// apart from one that is present but malformed.
///
/// # Object Safety
///
/// This trait is object-safe (`&dyn EventContext`), so hosts can plug in
/// their own document types behind a single store.
#[async_trait]
pub trait EventContext: Send + Sync {
    /// Reads the raw value stored under `(scope, key)`, or `None` if absent.
    fn get(&self, scope: &str, key: &str) -> Result<Option<Value>>;

    /// Replaces the value stored under `(scope, key)` with `events`.
    async fn set(&self, scope: &str, key: &str, events: Vec<ScheduledEvent>) -> Result<()>;
}

#[async_trait]
impl<T: EventContext + ?Sized> EventContext for Arc<T> {
    fn get(&self, scope: &str, key: &str) -> Result<Option<Value>> {
        (**self).get(scope, key)
    }

    async fn set(&self, scope: &str, key: &str, events: Vec<ScheduledEvent>) -> Result<()> {
        (**self).set(scope, key, events).await
    }
}

#[async_trait]
impl<T: EventContext + ?Sized> EventContext for &T {
    fn get(&self, scope: &str, key: &str) -> Result<Option<Value>> {
        (**self).get(scope, key)
    }

    async fn set(&self, scope: &str, key: &str, events: Vec<ScheduledEvent>) -> Result<()> {
        (**self).set(scope, key, events).await
    }
}
