//! Event filtering for queries.

use round_tracker_models::{Round, ScheduledEvent};

/// Filter criteria for querying scheduled events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Filter by exact round.
    pub round: Option<Round>,
    /// Filter by rounds up to and including this one.
    pub through_round: Option<Round>,
    /// Filter by fired flag.
    pub fired: Option<bool>,
    /// Filter by referenced combatant.
    pub combatant: Option<String>,
    /// Filter by referenced status effect.
    pub effect: Option<String>,
}

impl EventFilter {
    /// Creates a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the exact round filter.
    pub fn with_round(mut self, round: Round) -> Self {
        self.round = Some(round);
        self
    }

    /// Sets the upper round bound (inclusive).
    pub fn with_through_round(mut self, round: Round) -> Self {
        self.through_round = Some(round);
        self
    }

    /// Sets the fired filter.
    pub fn with_fired(mut self, fired: bool) -> Self {
        self.fired = Some(fired);
        self
    }

    /// Sets the combatant filter.
    pub fn with_combatant(mut self, combatant: impl Into<String>) -> Self {
        self.combatant = Some(combatant.into());
        self
    }

    /// Sets the status-effect filter.
    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }

    /// Returns true if the event matches this filter.
    pub fn matches(&self, event: &ScheduledEvent) -> bool {
        if let Some(round) = self.round {
            if event.round != round {
                return false;
            }
        }

        if let Some(through) = self.through_round {
            if event.round > through {
                return false;
            }
        }

        if let Some(fired) = self.fired {
            if event.fired != fired {
                return false;
            }
        }

        if let Some(ref combatant) = self.combatant {
            if !event.involves_combatant(combatant) {
                return false;
            }
        }

        if let Some(ref effect) = self.effect {
            if !event.has_effect(effect) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use round_tracker_models::EventBuilder;

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = EventFilter::new();
        assert!(filter.matches(&ScheduledEvent::new(1, "x")));
    }

    #[test]
    fn test_filter_by_round_and_fired() {
        let filter = EventFilter::new().with_round(2).with_fired(false);

        let pending = ScheduledEvent::new(2, "pending");
        let mut fired = ScheduledEvent::new(2, "fired");
        fired.mark_fired();
        let other_round = ScheduledEvent::new(3, "later");

        assert!(filter.matches(&pending));
        assert!(!filter.matches(&fired));
        assert!(!filter.matches(&other_round));
    }

    #[test]
    fn test_filter_through_round() {
        let filter = EventFilter::new().with_through_round(3);

        assert!(filter.matches(&ScheduledEvent::new(1, "a")));
        assert!(filter.matches(&ScheduledEvent::new(3, "b")));
        assert!(!filter.matches(&ScheduledEvent::new(4, "c")));
    }

    #[test]
    fn test_filter_by_references() {
        let event = EventBuilder::new(1, "Hold person ends")
            .add_combatant("cleric")
            .add_effect("paralysis")
            .build();

        assert!(EventFilter::new().with_combatant("cleric").matches(&event));
        assert!(!EventFilter::new().with_combatant("rogue").matches(&event));
        assert!(EventFilter::new().with_effect("paralysis").matches(&event));
        assert!(!EventFilter::new()
            .with_combatant("cleric")
            .with_effect("blind")
            .matches(&event));
    }
}
