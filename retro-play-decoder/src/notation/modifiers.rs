//! Play modifiers (the `/`-separated tokens after the primary event)
//!
//! Location tokens such as `G4M` or `F78D` are handled by the location parser;
//! this table covers the keyword modifiers.

use super::positions::{Base, Position};
use crate::types::Trajectory;
use serde::{Deserialize, Serialize};

/// A keyword modifier attached to a play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    SacrificeFly,
    SacrificeHit,
    ForceOut,
    GroundedDoublePlay,
    LinedDoublePlay,
    FlyDoublePlay,
    BuntGroundedDoublePlay,
    BuntPoppedDoublePlay,
    DoublePlay,
    GroundedTriplePlay,
    LinedTriplePlay,
    TriplePlay,
    /// Throw, optionally to a base (`TH`, `TH2`, `THH`)
    Throw(Option<Base>),
    Foul,
    InsideThePark,
    Interference,
    Bunt,
    /// Error annotation on the play (`E5`)
    ErrorBy(Position),
}

/// Fixed keyword modifiers
const MODIFIER_KEYWORDS: &[(&str, Modifier)] = &[
    ("SF", Modifier::SacrificeFly),
    ("SH", Modifier::SacrificeHit),
    ("FO", Modifier::ForceOut),
    ("GDP", Modifier::GroundedDoublePlay),
    ("LDP", Modifier::LinedDoublePlay),
    ("FDP", Modifier::FlyDoublePlay),
    ("BGDP", Modifier::BuntGroundedDoublePlay),
    ("BPDP", Modifier::BuntPoppedDoublePlay),
    ("DP", Modifier::DoublePlay),
    ("GTP", Modifier::GroundedTriplePlay),
    ("LTP", Modifier::LinedTriplePlay),
    ("TP", Modifier::TriplePlay),
    ("FL", Modifier::Foul),
    ("IPHR", Modifier::InsideThePark),
    ("INT", Modifier::Interference),
    ("B", Modifier::Bunt),
];

/// Match a whole modifier token against the keyword table.
///
/// Tokens that are not keywords (including location tokens) return `None`.
pub fn match_modifier(token: &str) -> Option<Modifier> {
    if let Some((_, modifier)) = MODIFIER_KEYWORDS.iter().find(|(kw, _)| *kw == token) {
        return Some(*modifier);
    }

    if let Some(rest) = token.strip_prefix("TH") {
        let mut chars = rest.chars();
        return match (chars.next(), chars.next()) {
            (None, _) => Some(Modifier::Throw(None)),
            (Some(c), None) => Base::from_char(c)
                .filter(|b| b.is_destination())
                .map(|b| Modifier::Throw(Some(b))),
            _ => None,
        };
    }

    if let Some(rest) = token.strip_prefix('E') {
        let mut chars = rest.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Position::from_digit(c).map(Modifier::ErrorBy);
        }
    }

    None
}

impl Modifier {
    pub fn is_double_play(self) -> bool {
        matches!(
            self,
            Modifier::GroundedDoublePlay
                | Modifier::LinedDoublePlay
                | Modifier::FlyDoublePlay
                | Modifier::BuntGroundedDoublePlay
                | Modifier::BuntPoppedDoublePlay
                | Modifier::DoublePlay
        )
    }

    pub fn is_triple_play(self) -> bool {
        matches!(
            self,
            Modifier::GroundedTriplePlay | Modifier::LinedTriplePlay | Modifier::TriplePlay
        )
    }

    /// Trajectory carried by the double/triple-play keywords
    pub fn implied_trajectory(self) -> Trajectory {
        match self {
            Modifier::GroundedDoublePlay
            | Modifier::BuntGroundedDoublePlay
            | Modifier::GroundedTriplePlay => Trajectory::Ground,
            Modifier::LinedDoublePlay | Modifier::LinedTriplePlay => Trajectory::Line,
            Modifier::FlyDoublePlay | Modifier::SacrificeFly => Trajectory::Fly,
            Modifier::BuntPoppedDoublePlay => Trajectory::Pop,
            _ => Trajectory::Unknown,
        }
    }

    /// Whether the keyword marks a bunt
    pub fn is_bunt(self) -> bool {
        matches!(
            self,
            Modifier::Bunt
                | Modifier::SacrificeHit
                | Modifier::BuntGroundedDoublePlay
                | Modifier::BuntPoppedDoublePlay
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(match_modifier("GDP"), Some(Modifier::GroundedDoublePlay));
        assert_eq!(match_modifier("SF"), Some(Modifier::SacrificeFly));
        assert_eq!(match_modifier("FL"), Some(Modifier::Foul));
        assert_eq!(match_modifier("BGDP"), Some(Modifier::BuntGroundedDoublePlay));
    }

    #[test]
    fn test_throw_and_error_tokens() {
        assert_eq!(match_modifier("TH"), Some(Modifier::Throw(None)));
        assert_eq!(match_modifier("THH"), Some(Modifier::Throw(Some(Base::Home))));
        assert_eq!(match_modifier("TH2"), Some(Modifier::Throw(Some(Base::Second))));
        assert_eq!(match_modifier("THB"), None);
        assert_eq!(match_modifier("E5"), Some(Modifier::ErrorBy(Position::ThirdBase)));
        assert_eq!(match_modifier("E0"), None);
    }

    #[test]
    fn test_location_tokens_are_not_keywords() {
        assert_eq!(match_modifier("G"), None);
        assert_eq!(match_modifier("F78"), None);
        assert_eq!(match_modifier("L9S"), None);
        assert_eq!(match_modifier("XYZ"), None);
    }

    #[test]
    fn test_double_play_trajectory() {
        assert_eq!(Modifier::GroundedDoublePlay.implied_trajectory(), Trajectory::Ground);
        assert_eq!(Modifier::LinedTriplePlay.implied_trajectory(), Trajectory::Line);
        assert!(Modifier::DoublePlay.is_double_play());
        assert!(!Modifier::DoublePlay.is_triple_play());
    }
}
