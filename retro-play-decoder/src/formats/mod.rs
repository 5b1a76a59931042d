//! Play-by-play file formats
//!
//! Readers turn a source file into [`Game`] values whose play records carry
//! raw event codes for the decoder.

pub mod event_file;

pub use event_file::{
    Appearance, EventFileParser, ExtraRecord, Game, GameInfo, HalfInning, PlayRecord,
};
