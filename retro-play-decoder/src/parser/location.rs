//! Hit-location tokens (`G`, `L9S`, `F78`, `BG25`, `P5F`, `F8XD`)

use crate::notation::Position;
use crate::types::{Depth, Direction, Location, Trajectory, Zone};

/// Recorded areas of the field and the single position they belong to
const AREAS: &[(&str, Zone, Direction, Option<u8>)] = &[
    ("1", Zone::Infield, Direction::Center, Some(1)),
    ("13", Zone::Infield, Direction::RightCenter, None),
    ("15", Zone::Infield, Direction::LeftCenter, None),
    ("2", Zone::Infield, Direction::Center, Some(2)),
    ("23", Zone::Infield, Direction::Right, None),
    ("25", Zone::Infield, Direction::Left, None),
    ("3", Zone::Infield, Direction::Right, Some(3)),
    ("34", Zone::Infield, Direction::RightCenter, None),
    ("4", Zone::Infield, Direction::RightCenter, Some(4)),
    ("5", Zone::Infield, Direction::Left, Some(5)),
    ("56", Zone::Infield, Direction::LeftCenter, None),
    ("6", Zone::Infield, Direction::LeftCenter, Some(6)),
    ("7", Zone::Outfield, Direction::Left, Some(7)),
    ("78", Zone::Outfield, Direction::LeftCenter, None),
    ("8", Zone::Outfield, Direction::Center, Some(8)),
    ("89", Zone::Outfield, Direction::RightCenter, None),
    ("9", Zone::Outfield, Direction::Right, Some(9)),
];

/// Trajectory prefixes, two-letter bunt forms first
const TRAJECTORIES: &[(&str, Trajectory, bool)] = &[
    ("BG", Trajectory::Ground, true),
    ("BP", Trajectory::Pop, true),
    ("BL", Trajectory::Line, true),
    ("G", Trajectory::Ground, false),
    ("L", Trajectory::Line, false),
    ("F", Trajectory::Fly, false),
    ("P", Trajectory::Pop, false),
];

/// Parse one modifier token as a location. Returns `None` if the token is not
/// a location.
pub(crate) fn parse_location(token: &str) -> Option<Location> {
    let mut location = Location::UNKNOWN;

    let mut rest = token;
    if let Some((prefix, trajectory, bunt)) =
        TRAJECTORIES.iter().find(|(prefix, _, _)| token.starts_with(prefix))
    {
        location.trajectory = *trajectory;
        location.bunt = *bunt;
        rest = &token[prefix.len()..];
    }

    let digits = rest
        .char_indices()
        .take_while(|(i, c)| *i < 2 && c.is_ascii_digit())
        .count();
    let (area, suffix) = rest.split_at(digits);

    if area.is_empty() {
        // A bare trajectory letter; anything else is not a location
        return (suffix.is_empty() && location.trajectory != Trajectory::Unknown)
            .then_some(location);
    }

    let (_, zone, direction, fielder) = AREAS.iter().find(|(code, ..)| *code == area)?;
    location.zone = *zone;
    location.direction = *direction;
    location.fielder = fielder.and_then(Position::from_number);
    location.depth = Depth::Medium;

    apply_suffixes(&mut location, suffix)?;
    Some(location)
}

/// The location implied by a single fielder handling a hit (`S8`)
pub(crate) fn area_of(position: Position) -> Location {
    let digit = position.number().to_string();
    AREAS
        .iter()
        .find(|(code, ..)| *code == digit)
        .map(|(_, zone, direction, _)| Location {
            zone: *zone,
            direction: *direction,
            fielder: Some(position),
            ..Location::UNKNOWN
        })
        .unwrap_or(Location::UNKNOWN)
}

/// Fill fields of `target` that are still unknown from `source`
pub(crate) fn merge_location(target: &mut Location, source: &Location) {
    if target.zone == Zone::Unknown {
        target.zone = source.zone;
    }
    if target.direction == Direction::Unknown {
        target.direction = source.direction;
        target.fielder = target.fielder.or(source.fielder);
    }
    if target.depth == Depth::Unknown {
        target.depth = source.depth;
    }
    if target.trajectory == Trajectory::Unknown {
        target.trajectory = source.trajectory;
    }
    target.bunt |= source.bunt;
    target.foul |= source.foul;
}

fn apply_suffixes(location: &mut Location, suffix: &str) -> Option<()> {
    let mut chars = suffix.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            'S' => location.depth = Depth::Shallow,
            'D' => location.depth = Depth::Deep,
            'X' if chars.peek() == Some(&'D') => {
                chars.next();
                location.depth = Depth::Deep;
            }
            'M' => location.direction = Direction::Middle,
            'L' => {
                location.direction = match location.direction {
                    Direction::Left | Direction::LeftCenter => Direction::LeftLine,
                    Direction::Right | Direction::RightCenter => Direction::RightLine,
                    other => other,
                }
            }
            'F' => location.foul = true,
            _ => return None,
        }
    }
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trajectory_only() {
        let loc = parse_location("G").unwrap();
        assert_eq!(loc.trajectory, Trajectory::Ground);
        assert!(!loc.has_area());

        let loc = parse_location("BP").unwrap();
        assert_eq!(loc.trajectory, Trajectory::Pop);
        assert!(loc.bunt);
    }

    #[test]
    fn test_outfield_gap() {
        let loc = parse_location("F78").unwrap();
        assert_eq!(loc.zone, Zone::Outfield);
        assert_eq!(loc.direction, Direction::LeftCenter);
        assert_eq!(loc.trajectory, Trajectory::Fly);
        assert_eq!(loc.depth, Depth::Medium);
        assert_eq!(loc.fielder, None);
    }

    #[test]
    fn test_suffixes() {
        let loc = parse_location("L9S").unwrap();
        assert_eq!(loc.direction, Direction::Right);
        assert_eq!(loc.depth, Depth::Shallow);
        assert_eq!(loc.fielder, Some(Position::RightField));

        let loc = parse_location("L9L").unwrap();
        assert_eq!(loc.direction, Direction::RightLine);

        let loc = parse_location("G4M").unwrap();
        assert_eq!(loc.zone, Zone::Infield);
        assert_eq!(loc.direction, Direction::Middle);

        let loc = parse_location("F8XD").unwrap();
        assert_eq!(loc.depth, Depth::Deep);

        let loc = parse_location("P5F").unwrap();
        assert!(loc.foul);
        assert_eq!(loc.trajectory, Trajectory::Pop);
    }

    #[test]
    fn test_area_without_trajectory() {
        let loc = parse_location("56").unwrap();
        assert_eq!(loc.trajectory, Trajectory::Unknown);
        assert_eq!(loc.direction, Direction::LeftCenter);
    }

    #[test]
    fn test_not_locations() {
        assert!(parse_location("ZZ").is_none());
        assert!(parse_location("G0").is_none());
        assert!(parse_location("G57").is_none());
        assert!(parse_location("F8Q").is_none());
        assert!(parse_location("").is_none());
    }

    #[test]
    fn test_area_of_fielder() {
        let loc = area_of(Position::CenterField);
        assert_eq!(loc.zone, Zone::Outfield);
        assert_eq!(loc.direction, Direction::Center);
        assert_eq!(loc.depth, Depth::Unknown);
    }
}
