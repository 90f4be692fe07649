//! Round-scheduled event store for Round Tracker.
//!
//! A caller schedules a note to fire on a future combat round; when the
//! round arrives, [`EventStore::fire_events`] hands back exactly the events
//! that just became due. The store works against a caller-supplied
//! [`EventContext`](round_tracker_persistence::EventContext) and keeps no
//! state of its own:
//!
//! - [`EventStore`]: add, list, find, fire, remove and edit events
//! - [`EventFilter`]: query criteria (round, fired, combatant, effect)
//! - [`parse_round_input`]: `"+N"` / `"N"` round input from users
//! - [`SerializedContext`]: one-at-a-time access to a shared context
//!
//! # Example
//!
//! ```no_run
//! use round_tracker_events::{parse_round_input, EventStore};
//! use round_tracker_persistence::MemoryContext;
//!
//! # async fn demo() -> round_tracker_events::Result<()> {
//! let store = EventStore::new();
//! let ctx = MemoryContext::new();
//! let current_round: u32 = 2;
//!
//! let round = parse_round_input("+3", &current_round)?;
//! store.add_event(round, "Spell wears off", Some(&ctx)).await?;
//!
//! assert!(store.fire_events(4, Some(&ctx)).await?.is_empty());
//! assert_eq!(store.fire_events(5, Some(&ctx)).await?.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod round;
pub mod serialized;
pub mod store;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use filter::EventFilter;
pub use round::{parse_round_input, CurrentRound, IntoRound};
pub use serialized::SerializedContext;
pub use store::EventStore;
