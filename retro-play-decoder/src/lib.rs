//! Retrosheet Play Decoder Library
//!
//! A stateless library for turning Retrosheet event codes (`S8/G4M.3-H;1-2`)
//! into structured records and plain-English play descriptions.
//!
//! # Architecture
//!
//! - `parser`: decomposes a raw code into a [`ParsedEvent`]. Total: codes
//!   outside the grammar come back as `EventType::Unknown`.
//! - `translator`: composes an English sentence fragment from a `ParsedEvent`.
//! - `decoder`: the façade. [`translate_event`] for one-off codes,
//!   [`PlayDecoder`] for configured translation, player names and games.
//! - `formats`: reads Retrosheet event files into [`Game`] values.
//!
//! Parsing and translation do no I/O and keep no state, so any number of
//! codes may be described in parallel.
//!
//! # Example Usage
//!
//! ```
//! use retro_play_decoder::{translate_event, FielderNotation, PlayDecoder, TranslatorConfig};
//!
//! assert_eq!(translate_event("K"), "struck out");
//!
//! let decoder = PlayDecoder::with_config(
//!     TranslatorConfig::new().with_fielder_notation(FielderNotation::Names),
//! );
//! let translation = decoder.describe("64(1)3/GDP");
//! assert_eq!(
//!     translation.description,
//!     "grounded into a double play (shortstop to second baseman to first baseman)"
//! );
//! assert_eq!(translation.event.map(|e| e.out_count), Some(2));
//! ```

// Public modules
pub mod config;
pub mod decoder;
pub mod formats;
pub mod notation;
pub mod parser;
pub mod players;
pub mod translator;
pub mod types;

// Re-export main types for convenience
pub use config::{FielderNotation, TranslatorConfig};
pub use decoder::{translate_event, DescribedPlay, GamePlays, PlayDecoder};
pub use formats::{EventFileParser, Game, GameInfo, HalfInning, PlayRecord};
pub use notation::{Base, EventType, Modifier, Position};
pub use parser::parse;
pub use players::PlayerDirectory;
pub use translator::{translate, Translator};
pub use types::{
    Advance, DecoderError, Depth, Direction, Fielder, FielderRole, Location, ParsedEvent,
    Result, RunnerEvent, SecondaryEvent, Trajectory, Translation, Zone,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: parse, translate and describe agree
        let event = parse("S8");
        assert_eq!(translate(&event), translate_event("S8"));
        assert!(!VERSION.is_empty());
    }
}
