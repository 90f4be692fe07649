//! Builder for scheduled events.

use chrono::Utc;

use crate::event::{Round, ScheduledEvent};
use crate::ids::EventId;

/// Builder for creating ScheduledEvent instances with a fluent API.
#[derive(Debug, Clone)]
pub struct EventBuilder {
    round: Round,
    text: String,
    combatants: Vec<String>,
    effects: Vec<String>,
}

impl EventBuilder {
    /// Creates a new EventBuilder with required fields.
    pub fn new(round: Round, text: impl Into<String>) -> Self {
        Self {
            round,
            text: text.into(),
            combatants: Vec::new(),
            effects: Vec::new(),
        }
    }

    /// Sets the combatant references.
    pub fn combatants(mut self, combatants: Vec<String>) -> Self {
        self.combatants = combatants;
        self
    }

    /// Adds a single combatant reference.
    pub fn add_combatant(mut self, combatant: impl Into<String>) -> Self {
        self.combatants.push(combatant.into());
        self
    }

    /// Sets the status-effect references.
    pub fn effects(mut self, effects: Vec<String>) -> Self {
        self.effects = effects;
        self
    }

    /// Adds a single status-effect reference.
    pub fn add_effect(mut self, effect: impl Into<String>) -> Self {
        self.effects.push(effect.into());
        self
    }

    /// Builds the pending event.
    pub fn build(self) -> ScheduledEvent {
        ScheduledEvent {
            id: EventId::new(),
            round: self.round,
            text: self.text,
            fired: false,
            combatants: self.combatants,
            effects: self.effects,
            created_at: Utc::now(),
            fired_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let event = EventBuilder::new(2, "Wall of fire fades").build();

        assert_eq!(event.round, 2);
        assert_eq!(event.text, "Wall of fire fades");
        assert!(!event.fired);
    }

    #[test]
    fn test_builder_with_references() {
        let event = EventBuilder::new(6, "Ogre wakes up")
            .add_combatant("ogre")
            .add_combatant("fighter")
            .add_effect("sleep")
            .build();

        assert_eq!(event.combatants, vec!["ogre", "fighter"]);
        assert_eq!(event.effects, vec!["sleep"]);
    }
}
