//! Retrosheet notation tables
//!
//! The closed code sets of the event-code grammar: event types, fielder
//! positions, bases and play modifiers. Every code is an enum variant with an
//! exhaustive mapping, so adding a code means adding a table entry.

pub mod event_codes;
pub mod modifiers;
pub mod positions;

// Re-export key types for convenience
pub use event_codes::{match_event_code, EventType};
pub use modifiers::{match_modifier, Modifier};
pub use positions::{Base, Position};
