//! EventStore - CRUD and trigger matching over a context's event list.
//!
//! Every operation reads the list from the context, works on a local copy
//! and writes the whole list back in a single `set`. Nothing is cached
//! between calls, so the store itself holds no state besides its config.
//!
//! # Lost updates
//!
//! Two overlapping operations against the same context can both read the
//! same list before either writes; the second write then drops the first
//! one's change. Await each call before issuing the next, or go through
//! [`SerializedContext`](crate::SerializedContext).

use round_tracker_models::{EventBuilder, EventId, Round, ScheduledEvent};
use round_tracker_persistence::EventContext;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError, DOCUMENT_EMPTY, EVENTS_MISSING, TEXT_EMPTY};
use crate::filter::EventFilter;
use crate::round::IntoRound;

/// Round-scheduled event store.
///
/// # Example
///
/// ```no_run
/// use round_tracker_events::EventStore;
/// use round_tracker_persistence::MemoryContext;
///
/// # async fn demo() -> round_tracker_events::Result<()> {
/// let store = EventStore::new();
/// let ctx = MemoryContext::new();
///
/// store.add_event(3, "Reinforcements arrive", Some(&ctx)).await?;
///
/// // Later, when the host advances to round 3
/// for event in store.fire_events(3, Some(&ctx)).await? {
///     println!("{}", event.text);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    config: StoreConfig,
}

impl EventStore {
    /// Creates a store using the default scope and key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with a custom configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Reads and decodes the event list. Absent or null means empty.
    fn load<C: EventContext + ?Sized>(&self, ctx: &C) -> Result<Vec<ScheduledEvent>> {
        match ctx.get(&self.config.scope, &self.config.key)? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value).map_err(|e| {
                warn!(
                    scope = %self.config.scope,
                    key = %self.config.key,
                    error = %e,
                    "stored value is not an event list"
                );
                StoreError::State(EVENTS_MISSING.to_string())
            }),
        }
    }

    async fn save<C: EventContext + ?Sized>(
        &self,
        ctx: &C,
        events: Vec<ScheduledEvent>,
    ) -> Result<()> {
        ctx.set(&self.config.scope, &self.config.key, events).await?;
        Ok(())
    }

    /// Replaces the context's event list with an empty one.
    ///
    /// Used when a new session starts. Idempotent.
    pub async fn reset_context<C: EventContext + ?Sized>(&self, ctx: &C) -> Result<()> {
        self.save(ctx, Vec::new()).await?;
        debug!("context reset");
        Ok(())
    }

    /// Returns copies of all events in storage order.
    pub fn list_events<C: EventContext + ?Sized>(&self, ctx: &C) -> Result<Vec<ScheduledEvent>> {
        self.load(ctx)
    }

    /// Returns a copy of a single event.
    pub fn get_event<C: EventContext + ?Sized>(
        &self,
        id: &EventId,
        ctx: &C,
    ) -> Result<Option<ScheduledEvent>> {
        Ok(self.load(ctx)?.into_iter().find(|e| &e.id == id))
    }

    /// Schedules a new event and returns the updated list.
    ///
    /// Shorthand for [`add_event_with_refs`](Self::add_event_with_refs) with
    /// no combatants or effects.
    pub async fn add_event<C: EventContext + ?Sized>(
        &self,
        round: impl IntoRound,
        text: &str,
        ctx: Option<&C>,
    ) -> Result<Vec<ScheduledEvent>> {
        self.add_event_with_refs(round, text, ctx, Vec::new(), Vec::new())
            .await
    }

    /// Schedules a new event tied to combatants and status effects.
    ///
    /// The text is stored trimmed. All arguments are validated before the
    /// context is touched; on success exactly one write is performed.
    ///
    /// # Errors
    /// - `Validation` if the round is not a whole number, the text is blank
    ///   or the context is missing
    /// - `State` if the context holds something other than an event list
    pub async fn add_event_with_refs<C: EventContext + ?Sized>(
        &self,
        round: impl IntoRound,
        text: &str,
        ctx: Option<&C>,
        combatants: Vec<String>,
        effects: Vec<String>,
    ) -> Result<Vec<ScheduledEvent>> {
        let round = round.into_round()?;
        let text = validate_text(text)?;
        let ctx = require_context(ctx)?;

        let event = EventBuilder::new(round, text)
            .combatants(combatants)
            .effects(effects)
            .build();
        let event_id = event.id.clone();

        let mut events = self.load(ctx)?;
        events.push(event);
        self.save(ctx, events).await?;

        debug!(event_id = %event_id, round, "event scheduled");

        self.list_events(ctx)
    }

    /// Edits an event in place.
    ///
    /// Keeps the id, fired state, timestamps and list position. Returns the
    /// updated event, or `None` (without writing) if the id is unknown.
    pub async fn update_event<C: EventContext + ?Sized>(
        &self,
        id: &EventId,
        round: impl IntoRound,
        text: &str,
        ctx: &C,
        combatants: Vec<String>,
        effects: Vec<String>,
    ) -> Result<Option<ScheduledEvent>> {
        let round = round.into_round()?;
        let text = validate_text(text)?;

        let mut events = self.load(ctx)?;
        let updated = match events.iter_mut().find(|e| &e.id == id) {
            Some(event) => {
                event.round = round;
                event.text = text.to_string();
                event.combatants = combatants;
                event.effects = effects;
                event.clone()
            }
            None => return Ok(None),
        };
        self.save(ctx, events).await?;

        debug!(event_id = %id, round, "event updated");

        Ok(Some(updated))
    }

    /// Returns the events matching a filter, in storage order.
    pub fn query<C: EventContext + ?Sized>(
        &self,
        filter: &EventFilter,
        ctx: &C,
    ) -> Result<Vec<ScheduledEvent>> {
        Ok(self
            .load(ctx)?
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect())
    }

    /// Returns the events on `round` whose fired flag equals `fired`.
    pub fn find_events<C: EventContext + ?Sized>(
        &self,
        round: Round,
        fired: bool,
        ctx: &C,
    ) -> Result<Vec<ScheduledEvent>> {
        self.query(&EventFilter::new().with_round(round).with_fired(fired), ctx)
    }

    /// Returns pending events on or before `round`.
    ///
    /// Catches events whose round was skipped over when the host jumped
    /// ahead several rounds at once.
    pub fn pending_through<C: EventContext + ?Sized>(
        &self,
        round: Round,
        ctx: &C,
    ) -> Result<Vec<ScheduledEvent>> {
        self.query(
            &EventFilter::new().with_through_round(round).with_fired(false),
            ctx,
        )
    }

    /// Fires every pending event on `round`.
    ///
    /// Returns only the events this call transitioned. When something fired,
    /// the entire list is written back once; when nothing is due, nothing is
    /// written.
    ///
    /// # Errors
    /// - `Validation` if the round is not a whole number or the context is
    ///   missing
    /// - `State` if the context holds something other than an event list
    pub async fn fire_events<C: EventContext + ?Sized>(
        &self,
        round: impl IntoRound,
        ctx: Option<&C>,
    ) -> Result<Vec<ScheduledEvent>> {
        let round = round.into_round()?;
        let ctx = require_context(ctx)?;

        let mut events = self.load(ctx)?;
        let fired: Vec<ScheduledEvent> = events
            .iter_mut()
            .filter(|e| e.is_due(round))
            .filter_map(|e| e.mark_fired().then(|| e.clone()))
            .collect();

        if fired.is_empty() {
            debug!(round, "no events due");
            return Ok(fired);
        }

        self.save(ctx, events).await?;

        info!(round, count = fired.len(), "events fired");

        Ok(fired)
    }

    /// Fires a single event by id.
    ///
    /// An already fired event stays fired; the list is still written back.
    /// Returns false, without writing, if the id is unknown.
    pub async fn fire_event<C: EventContext + ?Sized>(&self, id: &EventId, ctx: &C) -> Result<bool> {
        let mut events = self.load(ctx)?;
        let Some(event) = events.iter_mut().find(|e| &e.id == id) else {
            debug!(event_id = %id, "fire requested for unknown event");
            return Ok(false);
        };
        let transitioned = event.mark_fired();
        self.save(ctx, events).await?;

        info!(event_id = %id, transitioned, "event fired");

        Ok(true)
    }

    /// Removes a single event by id, keeping the order of the rest.
    ///
    /// Returns false, without writing, if the id is unknown.
    pub async fn remove_event<C: EventContext + ?Sized>(
        &self,
        id: &EventId,
        ctx: &C,
    ) -> Result<bool> {
        let mut events = self.load(ctx)?;
        let Some(index) = events.iter().position(|e| &e.id == id) else {
            debug!(event_id = %id, "remove requested for unknown event");
            return Ok(false);
        };
        events.remove(index);
        self.save(ctx, events).await?;

        debug!(event_id = %id, "event removed");

        Ok(true)
    }
}

fn validate_text(text: &str) -> Result<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Err(StoreError::validation(TEXT_EMPTY));
    }
    Ok(text)
}

fn require_context<C: ?Sized>(ctx: Option<&C>) -> Result<&C> {
    ctx.ok_or_else(|| StoreError::validation(DOCUMENT_EMPTY))
}
