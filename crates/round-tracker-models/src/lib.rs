//! Core data models for Round Tracker.
//!
//! This crate provides the plain data types shared by the persistence and
//! store crates: scheduled events, their identifiers, and round numbers.

pub mod builders;
pub mod event;
pub mod ids;

// Re-export main types
pub use builders::EventBuilder;
pub use event::{Round, ScheduledEvent};
pub use ids::EventId;
