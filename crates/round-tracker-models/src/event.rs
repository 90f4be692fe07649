//! Scheduled event types.
//!
//! A scheduled event is a note anchored to a combat round. It starts out
//! pending and fires exactly once; nothing moves it back to pending.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::EventId;

/// A combat round number.
pub type Round = u32;

/// A note scheduled to fire on a given round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    /// Unique identifier, fixed at creation.
    pub id: EventId,

    /// Round on which the event fires.
    pub round: Round,

    /// Message surfaced when the event fires.
    pub text: String,

    /// Whether the event has already fired.
    #[serde(default)]
    pub fired: bool,

    /// Combatant references. Opaque to the store.
    #[serde(default)]
    pub combatants: Vec<String>,

    /// Status-effect references. Opaque to the store.
    #[serde(default)]
    pub effects: Vec<String>,

    /// When the event was scheduled.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// When the event first fired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fired_at: Option<DateTime<Utc>>,
}

impl ScheduledEvent {
    /// Creates a pending event with a fresh id and no references.
    pub fn new(round: Round, text: impl Into<String>) -> Self {
        Self {
            id: EventId::new(),
            round,
            text: text.into(),
            fired: false,
            combatants: Vec::new(),
            effects: Vec::new(),
            created_at: Utc::now(),
            fired_at: None,
        }
    }

    /// Returns true if the event is still waiting to fire.
    pub fn is_pending(&self) -> bool {
        !self.fired
    }

    /// Marks the event fired.
    ///
    /// Returns true if this call performed the Pending -> Fired transition.
    /// Firing an already fired event changes nothing.
    pub fn mark_fired(&mut self) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        self.fired_at = Some(Utc::now());
        true
    }

    /// Returns true if the event is due on `round` and has not fired yet.
    pub fn is_due(&self, round: Round) -> bool {
        self.round == round && self.is_pending()
    }

    /// Returns true if the event references the given combatant.
    pub fn involves_combatant(&self, combatant: &str) -> bool {
        self.combatants.iter().any(|c| c == combatant)
    }

    /// Returns true if the event references the given status effect.
    pub fn has_effect(&self, effect: &str) -> bool {
        self.effects.iter().any(|e| e == effect)
    }
}
