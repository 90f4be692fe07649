//! Persistence layer for Round Tracker.
//!
//! Scheduled events live inside a caller-owned *context*: a key/value
//! document addressed by a `(scope, key)` pair. This crate defines that
//! capability ([`EventContext`]) and ships two implementations:
//!
//! - [`MemoryContext`]: a map in memory, counting writes
//! - [`FileContext`]: a JSON document on disk, written atomically
//!   (write to temp file, then rename)
//!
//! # Example
//!
//! ```no_run
//! use round_tracker_persistence::{EventContext, FileContext};
//! use round_tracker_models::ScheduledEvent;
//!
//! # async fn demo() -> round_tracker_persistence::Result<()> {
//! let ctx = FileContext::new("/tmp/round-tracker/combat-1.json");
//!
//! ctx.set("round-tracker", "events", vec![ScheduledEvent::new(3, "Dragon lands")])
//!     .await?;
//! let raw = ctx.get("round-tracker", "events")?;
//! assert!(raw.is_some());
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod config;
pub mod context;
pub mod error;
pub mod file;
pub mod memory;

pub use context::EventContext;
pub use error::{PersistenceError, Result};
pub use file::FileContext;
pub use memory::MemoryContext;
