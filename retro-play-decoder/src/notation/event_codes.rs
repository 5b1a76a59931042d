//! Primary event codes
//!
//! Maps the leading letters of an event code to an [`EventType`]. Matching is
//! longest-prefix over [`EVENT_CODES`], so `POCS` wins over `PO` and `DGR`
//! wins over `D`.

use crate::types::Trajectory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary event type of a play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Single,
    Double,
    Triple,
    HomeRun,
    GroundRuleDouble,
    Strikeout,
    Groundout,
    Flyout,
    Lineout,
    Popup,
    Walk,
    IntentionalWalk,
    HitByPitch,
    Error,
    FoulFlyError,
    CatcherInterference,
    FieldersChoice,
    StolenBase,
    CaughtStealing,
    Pickoff,
    PickoffCaughtStealing,
    WildPitch,
    PassedBall,
    Balk,
    DefensiveIndifference,
    OtherAdvance,
    NoPlay,
    Unknown,
}

/// Known event-code tokens. Order is irrelevant; the longest match wins.
pub const EVENT_CODES: &[(&str, EventType)] = &[
    ("POCS", EventType::PickoffCaughtStealing),
    ("DGR", EventType::GroundRuleDouble),
    ("FLE", EventType::FoulFlyError),
    ("HR", EventType::HomeRun),
    ("HP", EventType::HitByPitch),
    ("IW", EventType::IntentionalWalk),
    ("SB", EventType::StolenBase),
    ("CS", EventType::CaughtStealing),
    ("PO", EventType::Pickoff),
    ("FC", EventType::FieldersChoice),
    ("WP", EventType::WildPitch),
    ("PB", EventType::PassedBall),
    ("BK", EventType::Balk),
    ("NP", EventType::NoPlay),
    ("DI", EventType::DefensiveIndifference),
    ("OA", EventType::OtherAdvance),
    ("S", EventType::Single),
    ("D", EventType::Double),
    ("T", EventType::Triple),
    ("H", EventType::HomeRun),
    ("K", EventType::Strikeout),
    ("W", EventType::Walk),
    ("I", EventType::IntentionalWalk),
    ("E", EventType::Error),
    ("C", EventType::CatcherInterference),
    ("G", EventType::Groundout),
    ("F", EventType::Flyout),
    ("L", EventType::Lineout),
    ("P", EventType::Popup),
];

/// Find the longest known event code at the start of `code`.
///
/// Returns the event type and the byte length of the matched token.
pub fn match_event_code(code: &str) -> Option<(EventType, usize)> {
    EVENT_CODES
        .iter()
        .filter(|(token, _)| code.starts_with(token))
        .max_by_key(|(token, _)| token.len())
        .map(|(token, event_type)| (*event_type, token.len()))
}

impl EventType {
    /// Canonical Retrosheet code for this event type
    pub fn code(self) -> &'static str {
        match self {
            EventType::Single => "S",
            EventType::Double => "D",
            EventType::Triple => "T",
            EventType::HomeRun => "HR",
            EventType::GroundRuleDouble => "DGR",
            EventType::Strikeout => "K",
            EventType::Groundout => "G",
            EventType::Flyout => "F",
            EventType::Lineout => "L",
            EventType::Popup => "P",
            EventType::Walk => "W",
            EventType::IntentionalWalk => "IW",
            EventType::HitByPitch => "HP",
            EventType::Error => "E",
            EventType::FoulFlyError => "FLE",
            EventType::CatcherInterference => "C",
            EventType::FieldersChoice => "FC",
            EventType::StolenBase => "SB",
            EventType::CaughtStealing => "CS",
            EventType::Pickoff => "PO",
            EventType::PickoffCaughtStealing => "POCS",
            EventType::WildPitch => "WP",
            EventType::PassedBall => "PB",
            EventType::Balk => "BK",
            EventType::DefensiveIndifference => "DI",
            EventType::OtherAdvance => "OA",
            EventType::NoPlay => "NP",
            EventType::Unknown => "?",
        }
    }

    /// Base hits, including home runs and ground-rule doubles
    pub fn is_hit(self) -> bool {
        matches!(
            self,
            EventType::Single
                | EventType::Double
                | EventType::Triple
                | EventType::HomeRun
                | EventType::GroundRuleDouble
        )
    }

    /// Types that retire the batter unless an advance clause says otherwise
    pub fn is_batter_out(self) -> bool {
        matches!(
            self,
            EventType::Strikeout
                | EventType::Groundout
                | EventType::Flyout
                | EventType::Lineout
                | EventType::Popup
        )
    }

    /// Batted-ball outs whose fielder chain decides who is retired
    pub fn is_fielded_out(self) -> bool {
        matches!(
            self,
            EventType::Groundout | EventType::Flyout | EventType::Lineout | EventType::Popup
        )
    }

    /// Runner attempts written with a base suffix (`SB2`, `CS3`, `PO1`)
    pub fn takes_base(self) -> bool {
        matches!(
            self,
            EventType::StolenBase
                | EventType::CaughtStealing
                | EventType::Pickoff
                | EventType::PickoffCaughtStealing
        )
    }

    /// Events that may follow `+` after a strikeout or walk
    pub fn can_be_secondary(self) -> bool {
        self.takes_base()
            || matches!(
                self,
                EventType::WildPitch
                    | EventType::PassedBall
                    | EventType::Error
                    | EventType::DefensiveIndifference
                    | EventType::OtherAdvance
            )
    }

    /// Events that admit a `+` secondary event
    pub fn admits_secondary(self) -> bool {
        matches!(
            self,
            EventType::Strikeout | EventType::Walk | EventType::IntentionalWalk
        )
    }

    /// Whether the batter is the subject of the play. Running plays happen
    /// while the batter is still at the plate.
    pub fn involves_batter(self) -> bool {
        !(self.takes_base()
            || matches!(
                self,
                EventType::WildPitch
                    | EventType::PassedBall
                    | EventType::Balk
                    | EventType::DefensiveIndifference
                    | EventType::OtherAdvance
                    | EventType::NoPlay
                    | EventType::FoulFlyError
            ))
    }

    /// Whether runs scoring on this play are batted in by default
    pub fn credits_rbi(self) -> bool {
        self.is_hit()
            || matches!(
                self,
                EventType::Groundout
                    | EventType::Flyout
                    | EventType::Lineout
                    | EventType::Popup
                    | EventType::Walk
                    | EventType::IntentionalWalk
                    | EventType::HitByPitch
                    | EventType::FieldersChoice
                    | EventType::CatcherInterference
            )
    }

    /// Trajectory the event type already implies, not worth repeating
    pub fn implied_trajectory(self) -> Trajectory {
        match self {
            EventType::Groundout => Trajectory::Ground,
            EventType::Flyout | EventType::HomeRun | EventType::FoulFlyError => Trajectory::Fly,
            EventType::Lineout => Trajectory::Line,
            EventType::Popup => Trajectory::Pop,
            _ => Trajectory::Unknown,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
