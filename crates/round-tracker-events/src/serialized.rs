//! SerializedContext - a context that admits one store operation at a time.
//!
//! Bare [`EventStore`] calls against one context can interleave between
//! their read and their write and lose updates. `SerializedContext` owns the
//! context together with an async mutex and holds the lock for the whole
//! read-modify-write of every operation, reads included.

use round_tracker_models::{EventId, Round, ScheduledEvent};
use round_tracker_persistence::EventContext;
use tokio::sync::Mutex;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::filter::EventFilter;
use crate::round::IntoRound;
use crate::store::EventStore;

/// A context paired with the store and a per-context lock.
///
/// Share it behind an `Arc` between tasks that may touch the same context
/// concurrently (e.g. a round-advance hook and a user adding an event).
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use round_tracker_events::SerializedContext;
/// use round_tracker_persistence::MemoryContext;
///
/// # async fn demo() -> round_tracker_events::Result<()> {
/// let combat = Arc::new(SerializedContext::new(MemoryContext::new()));
///
/// let hook = Arc::clone(&combat);
/// let advance = tokio::spawn(async move { hook.fire_events(2).await });
/// combat.add_event(3, "Ceiling collapses").await?;
/// advance.await.expect("task panicked")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SerializedContext<C> {
    context: C,
    store: EventStore,
    lock: Mutex<()>,
}

impl<C: EventContext> SerializedContext<C> {
    /// Wraps a context using the default store configuration.
    pub fn new(context: C) -> Self {
        Self::with_config(context, StoreConfig::default())
    }

    /// Wraps a context using a custom store configuration.
    pub fn with_config(context: C, config: StoreConfig) -> Self {
        Self {
            context,
            store: EventStore::with_config(config),
            lock: Mutex::new(()),
        }
    }

    /// Returns the wrapped context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Unwraps the context.
    pub fn into_inner(self) -> C {
        self.context
    }

    /// See [`EventStore::reset_context`].
    pub async fn reset(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.store.reset_context(&self.context).await
    }

    /// See [`EventStore::list_events`].
    pub async fn list_events(&self) -> Result<Vec<ScheduledEvent>> {
        let _guard = self.lock.lock().await;
        self.store.list_events(&self.context)
    }

    /// See [`EventStore::get_event`].
    pub async fn get_event(&self, id: &EventId) -> Result<Option<ScheduledEvent>> {
        let _guard = self.lock.lock().await;
        self.store.get_event(id, &self.context)
    }

    /// See [`EventStore::add_event`].
    pub async fn add_event(&self, round: impl IntoRound, text: &str) -> Result<Vec<ScheduledEvent>> {
        self.add_event_with_refs(round, text, Vec::new(), Vec::new())
            .await
    }

    /// See [`EventStore::add_event_with_refs`].
    pub async fn add_event_with_refs(
        &self,
        round: impl IntoRound,
        text: &str,
        combatants: Vec<String>,
        effects: Vec<String>,
    ) -> Result<Vec<ScheduledEvent>> {
        let round = round.into_round()?;
        let _guard = self.lock.lock().await;
        self.store
            .add_event_with_refs(round, text, Some(&self.context), combatants, effects)
            .await
    }

    /// See [`EventStore::update_event`].
    pub async fn update_event(
        &self,
        id: &EventId,
        round: impl IntoRound,
        text: &str,
        combatants: Vec<String>,
        effects: Vec<String>,
    ) -> Result<Option<ScheduledEvent>> {
        let round = round.into_round()?;
        let _guard = self.lock.lock().await;
        self.store
            .update_event(id, round, text, &self.context, combatants, effects)
            .await
    }

    /// See [`EventStore::query`].
    pub async fn query(&self, filter: &EventFilter) -> Result<Vec<ScheduledEvent>> {
        let _guard = self.lock.lock().await;
        self.store.query(filter, &self.context)
    }

    /// See [`EventStore::find_events`].
    pub async fn find_events(&self, round: Round, fired: bool) -> Result<Vec<ScheduledEvent>> {
        let _guard = self.lock.lock().await;
        self.store.find_events(round, fired, &self.context)
    }

    /// See [`EventStore::pending_through`].
    pub async fn pending_through(&self, round: Round) -> Result<Vec<ScheduledEvent>> {
        let _guard = self.lock.lock().await;
        self.store.pending_through(round, &self.context)
    }

    /// See [`EventStore::fire_events`].
    pub async fn fire_events(&self, round: impl IntoRound) -> Result<Vec<ScheduledEvent>> {
        let round = round.into_round()?;
        let _guard = self.lock.lock().await;
        self.store.fire_events(round, Some(&self.context)).await
    }

    /// See [`EventStore::fire_event`].
    pub async fn fire_event(&self, id: &EventId) -> Result<bool> {
        let _guard = self.lock.lock().await;
        self.store.fire_event(id, &self.context).await
    }

    /// See [`EventStore::remove_event`].
    pub async fn remove_event(&self, id: &EventId) -> Result<bool> {
        let _guard = self.lock.lock().await;
        self.store.remove_event(id, &self.context).await
    }
}
