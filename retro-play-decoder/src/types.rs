//! Core types for the play decoder library
//!
//! This module defines the structured record the parser produces for a single
//! event code, plus the error type used by the I/O layer. A `ParsedEvent` is
//! built fresh for each code and never shared or mutated after parsing.

use crate::notation::{Base, EventType, Modifier, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Errors that can occur while reading event files or configuration.
///
/// Parsing and translating event codes never fail; an unrecognized code is
/// `EventType::Unknown`, not an error.
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Failed to parse event file: {0}")]
    EventFileError(String),

    #[error("Invalid record on line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// How a fielder took part in the play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FielderRole {
    Putout,
    Assist,
    Error,
    /// Handled the ball without recording an out (hits, fielder's choice)
    Fielded,
    Unknown,
}

/// One fielder touch, in the order the ball was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fielder {
    pub position: Position,
    pub role: FielderRole,
}

impl Fielder {
    pub fn new(position: Position, role: FielderRole) -> Self {
        Self { position, role }
    }
}

/// Infield or outfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Infield,
    Outfield,
    Unknown,
}

/// Direction of a batted ball, from the left-field line around to the
/// right-field line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    LeftLine,
    Left,
    LeftCenter,
    Center,
    RightCenter,
    Right,
    RightLine,
    Middle,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    Shallow,
    Medium,
    Deep,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trajectory {
    Ground,
    Line,
    Fly,
    Pop,
    Unknown,
}

/// Where and how the ball was hit. Every field has its own `Unknown`
/// sentinel; a location with all fields unknown means none was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub zone: Zone,
    pub direction: Direction,
    pub depth: Depth,
    pub trajectory: Trajectory,
    pub bunt: bool,
    pub foul: bool,
    /// Single-position area the location was recorded as (`G6`, `F8D`)
    pub fielder: Option<Position>,
}

impl Location {
    pub const UNKNOWN: Location = Location {
        zone: Zone::Unknown,
        direction: Direction::Unknown,
        depth: Depth::Unknown,
        trajectory: Trajectory::Unknown,
        bunt: false,
        foul: false,
        fielder: None,
    };

    /// True if any part of the location was recorded
    pub fn is_known(&self) -> bool {
        self.zone != Zone::Unknown
            || self.direction != Direction::Unknown
            || self.depth != Depth::Unknown
            || self.trajectory != Trajectory::Unknown
            || self.bunt
            || self.foul
    }

    /// True if the ball's area (not just its trajectory) was recorded
    pub fn has_area(&self) -> bool {
        self.direction != Direction::Unknown
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

/// One runner's movement on the play, in the order written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advance {
    pub from_base: Base,
    pub to_base: Base,
    pub is_out: bool,
    pub is_error: bool,
    pub rbi_credited: bool,
    pub unearned: bool,
    /// Putout chain recorded for the runner (`2X3(25)`)
    pub fielders: Vec<Fielder>,
    pub error_fielder: Option<Position>,
}

impl Advance {
    /// True when the runner crossed the plate safely
    pub fn scores(&self) -> bool {
        self.to_base == Base::Home && !self.is_out
    }
}

/// A stolen-base, caught-stealing or pickoff attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerEvent {
    pub kind: EventType,
    /// Base the runner started on
    pub runner: Base,
    /// Base being stolen, or the base picked off from
    pub target: Base,
    pub is_out: bool,
    pub fielders: Vec<Fielder>,
    pub error_fielder: Option<Position>,
}

/// The event after `+` on a strikeout or walk (`K+WP`, `W+SB2`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryEvent {
    pub event_type: EventType,
    pub fielders: Vec<Fielder>,
}

/// Structured form of one event code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEvent {
    pub primary_event_type: EventType,
    /// Fielders in the order they handled the ball
    pub fielders: Vec<Fielder>,
    pub location: Location,
    pub modifiers: Vec<Modifier>,
    /// Advance clauses in source order
    pub base_running: Vec<Advance>,
    pub runner_events: Vec<RunnerEvent>,
    pub secondary: Option<SecondaryEvent>,
    /// Runners retired inside the fielder chain (`64(1)3`)
    pub forced_outs: Vec<Base>,
    pub batter_out: bool,
    pub is_out: bool,
    pub out_count: u8,
    pub is_double_play: bool,
    pub is_triple_play: bool,
    pub is_fielders_choice: bool,
    pub is_error: bool,
    pub rbi_count: u8,
    pub raw_event: String,
}

impl ParsedEvent {
    /// An unclassifiable code; only the raw text is kept
    pub fn unknown(raw: &str) -> Self {
        Self::empty(EventType::Unknown, raw)
    }

    pub(crate) fn empty(primary_event_type: EventType, raw: &str) -> Self {
        Self {
            primary_event_type,
            fielders: Vec::new(),
            location: Location::UNKNOWN,
            modifiers: Vec::new(),
            base_running: Vec::new(),
            runner_events: Vec::new(),
            secondary: None,
            forced_outs: Vec::new(),
            batter_out: false,
            is_out: false,
            out_count: 0,
            is_double_play: false,
            is_triple_play: false,
            is_fielders_choice: false,
            is_error: false,
            rbi_count: 0,
            raw_event: raw.to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.primary_event_type == EventType::Unknown
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// The fielder charged with an error on the primary play, if any. An
    /// error in the fielder chain wins over an `E<n>` modifier.
    pub fn error_fielder(&self) -> Option<Position> {
        self.fielders
            .iter()
            .find(|f| f.role == FielderRole::Error)
            .map(|f| f.position)
            .or_else(|| self.modifier_error())
    }

    /// Fielder charged by an `E<n>` modifier (`C/E2`, `FC6/E6`)
    pub fn modifier_error(&self) -> Option<Position> {
        self.modifiers.iter().find_map(|m| match m {
            Modifier::ErrorBy(position) => Some(*position),
            _ => None,
        })
    }

    /// Advance clause for the batter-runner, if written
    pub fn batter_advance(&self) -> Option<&Advance> {
        self.base_running.iter().find(|a| a.from_base == Base::Batter)
    }
}

/// Result of running a code through the façade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// The code as given by the caller
    pub code: String,
    pub description: String,
    /// Structured record; absent when the code was not recognized
    pub event: Option<ParsedEvent>,
    pub recognized: bool,
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_location() {
        let loc = Location::default();
        assert!(!loc.is_known());
        assert!(!loc.has_area());

        let loc = Location {
            trajectory: Trajectory::Fly,
            ..Location::UNKNOWN
        };
        assert!(loc.is_known());
        assert!(!loc.has_area());
    }

    #[test]
    fn test_unknown_event_keeps_raw() {
        let event = ParsedEvent::unknown("ZZZ999");
        assert!(event.is_unknown());
        assert_eq!(event.raw_event, "ZZZ999");
        assert!(event.fielders.is_empty());
        assert_eq!(event.out_count, 0);
    }

    #[test]
    fn test_advance_scores() {
        let advance = Advance {
            from_base: Base::Second,
            to_base: Base::Home,
            is_out: false,
            is_error: false,
            rbi_credited: true,
            unearned: false,
            fielders: Vec::new(),
            error_fielder: None,
        };
        assert!(advance.scores());
        assert!(!Advance { is_out: true, ..advance }.scores());
    }
}
