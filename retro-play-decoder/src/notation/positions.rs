//! Fielder positions and bases

use serde::{Deserialize, Serialize};
use std::fmt;

/// Defensive position, numbered 1-9 in scoring notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Pitcher,
    Catcher,
    FirstBase,
    SecondBase,
    ThirdBase,
    Shortstop,
    LeftField,
    CenterField,
    RightField,
}

impl Position {
    /// All positions in scoring-number order
    pub const ALL: [Position; 9] = [
        Position::Pitcher,
        Position::Catcher,
        Position::FirstBase,
        Position::SecondBase,
        Position::ThirdBase,
        Position::Shortstop,
        Position::LeftField,
        Position::CenterField,
        Position::RightField,
    ];

    /// Map a scoring digit ('1'..='9') to its position
    pub fn from_digit(c: char) -> Option<Self> {
        let n = c.to_digit(10)?;
        Self::from_number(n as u8)
    }

    /// Map a scoring number (1..=9) to its position
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1..=9 => Some(Self::ALL[(n - 1) as usize]),
            _ => None,
        }
    }

    /// Scoring number of this position
    pub fn number(self) -> u8 {
        match self {
            Position::Pitcher => 1,
            Position::Catcher => 2,
            Position::FirstBase => 3,
            Position::SecondBase => 4,
            Position::ThirdBase => 5,
            Position::Shortstop => 6,
            Position::LeftField => 7,
            Position::CenterField => 8,
            Position::RightField => 9,
        }
    }

    /// The player's role name ("shortstop", "center fielder")
    pub fn name(self) -> &'static str {
        match self {
            Position::Pitcher => "pitcher",
            Position::Catcher => "catcher",
            Position::FirstBase => "first baseman",
            Position::SecondBase => "second baseman",
            Position::ThirdBase => "third baseman",
            Position::Shortstop => "shortstop",
            Position::LeftField => "left fielder",
            Position::CenterField => "center fielder",
            Position::RightField => "right fielder",
        }
    }

    /// True for the three outfield positions
    pub fn is_outfield(self) -> bool {
        matches!(
            self,
            Position::LeftField | Position::CenterField | Position::RightField
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A base as written in advance clauses. `Batter` is the batter-runner
/// standing at home before the play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Base {
    Batter,
    First,
    Second,
    Third,
    Home,
}

impl Base {
    /// Parse a base character: `B`, `1`, `2`, `3` or `H`
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'B' => Some(Base::Batter),
            '1' => Some(Base::First),
            '2' => Some(Base::Second),
            '3' => Some(Base::Third),
            'H' => Some(Base::Home),
            _ => None,
        }
    }

    /// Valid as the starting point of an advance
    pub fn is_origin(self) -> bool {
        !matches!(self, Base::Home)
    }

    /// Valid as the destination of an advance
    pub fn is_destination(self) -> bool {
        !matches!(self, Base::Batter)
    }

    /// The base a runner came from when attempting to reach this one
    pub fn previous(self) -> Option<Self> {
        match self {
            Base::Batter => None,
            Base::First => Some(Base::Batter),
            Base::Second => Some(Base::First),
            Base::Third => Some(Base::Second),
            Base::Home => Some(Base::Third),
        }
    }

    /// Ordinal name used in narration ("second", "home")
    pub fn name(self) -> &'static str {
        match self {
            Base::Batter => "the plate",
            Base::First => "first",
            Base::Second => "second",
            Base::Third => "third",
            Base::Home => "home",
        }
    }

    /// Scoring character
    pub fn code(self) -> char {
        match self {
            Base::Batter => 'B',
            Base::First => '1',
            Base::Second => '2',
            Base::Third => '3',
            Base::Home => 'H',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_numbers_round_trip() {
        for n in 1..=9u8 {
            let pos = Position::from_number(n).unwrap();
            assert_eq!(pos.number(), n);
        }
        assert_eq!(Position::from_number(0), None);
        assert_eq!(Position::from_digit('0'), None);
        assert_eq!(Position::from_digit('x'), None);
    }

    #[test]
    fn test_position_names() {
        assert_eq!(Position::from_digit('6').unwrap().name(), "shortstop");
        assert_eq!(Position::from_digit('8').unwrap().name(), "center fielder");
        assert!(Position::RightField.is_outfield());
        assert!(!Position::Catcher.is_outfield());
    }

    #[test]
    fn test_base_parsing() {
        assert_eq!(Base::from_char('B'), Some(Base::Batter));
        assert_eq!(Base::from_char('H'), Some(Base::Home));
        assert_eq!(Base::from_char('4'), None);
        assert!(!Base::Home.is_origin());
        assert!(!Base::Batter.is_destination());
        assert_eq!(Base::Home.previous(), Some(Base::Third));
        assert_eq!(Base::Batter.previous(), None);
    }
}
