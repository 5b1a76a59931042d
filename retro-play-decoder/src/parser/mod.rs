//! Event-code parser
//!
//! Decomposes a raw code such as `S8/G4M.3-H;2-H;1-3` into a [`ParsedEvent`]:
//!
//! 1. Split off the advance section at the first `.`, then the modifiers at
//!    the first `/` outside parentheses.
//! 2. Classify the primary segment (longest-prefix event code, or a bare
//!    fielder chain) and read its fielders left to right.
//! 3. Apply modifiers: keyword modifiers are collected, location tokens refine
//!    the location, anything else is ignored.
//! 4. Parse each `;`-separated advance clause independently, in source order.
//! 5. Derive out counts, double/triple play, error and RBI flags once.
//!
//! Parsing is total: input outside the grammar yields `EventType::Unknown`
//! with the raw text preserved.

mod advances;
mod fielders;
mod location;
mod primary;

use crate::notation::{match_modifier, Base, EventType, Modifier};
use crate::types::{FielderRole, Location, ParsedEvent, Trajectory};
use advances::{parse_advance, RbiMark};
use location::{area_of, merge_location, parse_location};
use primary::parse_primary;

/// Parse a raw event code. Never fails; unrecognized codes come back as
/// `EventType::Unknown`.
pub fn parse(raw: &str) -> ParsedEvent {
    let code = normalize(raw);
    if code.is_empty() {
        return ParsedEvent::unknown(raw);
    }

    let (head, advance_section) = match code.split_once('.') {
        Some((head, advances)) => (head, Some(advances)),
        None => (code.as_str(), None),
    };
    let (primary_segment, modifier_section) = split_outside_parens(head, '/');

    let Some(primary) = parse_primary(primary_segment) else {
        return ParsedEvent::unknown(raw);
    };

    // Modifiers
    let mut modifiers = Vec::new();
    let mut location = Location::UNKNOWN;
    for token in modifier_section.into_iter().flat_map(|m| m.split('/')) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if let Some(modifier) = match_modifier(token) {
            modifiers.push(modifier);
        } else if let Some(found) = parse_location(token) {
            merge_location(&mut location, &found);
        }
    }
    if location.trajectory == Trajectory::Unknown {
        if let Some(trajectory) = modifiers
            .iter()
            .map(|m| m.implied_trajectory())
            .find(|t| *t != Trajectory::Unknown)
        {
            location.trajectory = trajectory;
        }
    }
    location.bunt |= modifiers.iter().any(|m| m.is_bunt());
    location.foul |= modifiers.contains(&Modifier::Foul);

    let event_type = primary
        .event_type
        .unwrap_or_else(|| classify_fielded_out(&primary.chain, location.trajectory));

    // A hit's single fielder tells us where the ball went
    if event_type.is_hit() && !location.has_area() {
        if let [fielder] = primary.chain.fielders.as_slice() {
            merge_location(&mut location, &area_of(fielder.position));
        }
    }

    // Advances
    let mut base_running = Vec::new();
    let mut rbi_marks = Vec::new();
    for clause in advance_section.into_iter().flat_map(|a| a.split(';')) {
        if let Some((advance, mark)) = parse_advance(clause.trim()) {
            base_running.push(advance);
            rbi_marks.push(mark);
        }
    }

    let mut event = ParsedEvent::empty(event_type, raw);
    event.fielders = primary.chain.fielders.clone();
    event.location = location;
    event.modifiers = modifiers;
    event.base_running = base_running;
    event.runner_events = primary.runner_events;
    event.secondary = primary.secondary;
    event.forced_outs = primary
        .chain
        .outs
        .iter()
        .copied()
        .filter(|b| *b != Base::Batter)
        .collect();

    let chain_retires_batter = primary.chain.outs.contains(&Base::Batter)
        || primary.chain.trailing
        || primary.chain.fielders.is_empty();
    derive(&mut event, chain_retires_batter, &rbi_marks);
    event
}

/// Compute the derived flags and counts
fn derive(event: &mut ParsedEvent, chain_retires_batter: bool, rbi_marks: &[RbiMark]) {
    let event_type = event.primary_event_type;
    let batter_clause = event.batter_advance().is_some();

    event.batter_out = !batter_clause
        && match event_type {
            EventType::Strikeout => true,
            t if t.is_fielded_out() => chain_retires_batter,
            _ => false,
        };

    let clause_outs = event
        .base_running
        .iter()
        .filter(|a| a.is_out && !event.forced_outs.contains(&a.from_base))
        .count();
    let runner_outs = event.runner_events.iter().filter(|r| r.is_out).count();
    let outs = usize::from(event.batter_out) + event.forced_outs.len() + runner_outs + clause_outs;
    event.out_count = u8::try_from(outs).unwrap_or(u8::MAX);

    event.is_out = event.out_count > 0;
    event.is_double_play = event.out_count == 2;
    event.is_triple_play = event.out_count == 3;
    event.is_fielders_choice = event_type == EventType::FieldersChoice;
    event.is_error = matches!(event_type, EventType::Error | EventType::FoulFlyError)
        || event.fielders.iter().any(|f| f.role == FielderRole::Error)
        || event.modifiers.iter().any(|m| matches!(m, Modifier::ErrorBy(_)))
        || event.base_running.iter().any(|a| a.is_error)
        || event.runner_events.iter().any(|r| r.error_fielder.is_some())
        || event
            .secondary
            .as_ref()
            .is_some_and(|s| s.event_type == EventType::Error);

    let double_play = event.is_double_play
        || event.is_triple_play
        || event
            .modifiers
            .iter()
            .any(|m| m.is_double_play() || m.is_triple_play());
    let credits = event_type.credits_rbi() && !double_play;
    for (advance, mark) in event.base_running.iter_mut().zip(rbi_marks) {
        advance.rbi_credited = advance.scores()
            && match mark {
                RbiMark::Credited => true,
                RbiMark::NotCredited => false,
                RbiMark::Unmarked => credits && !advance.is_error,
            };
    }

    let batter_homers = event_type == EventType::HomeRun && !batter_clause;
    let rbis = event.base_running.iter().filter(|a| a.rbi_credited).count() + usize::from(batter_homers);
    event.rbi_count = u8::try_from(rbis).unwrap_or(u8::MAX);
}

/// Type a bare fielder chain (`63`, `8`) from its trajectory
fn classify_fielded_out(chain: &fielders::Chain, trajectory: Trajectory) -> EventType {
    match trajectory {
        Trajectory::Ground => EventType::Groundout,
        Trajectory::Line => EventType::Lineout,
        Trajectory::Fly => EventType::Flyout,
        Trajectory::Pop => EventType::Popup,
        Trajectory::Unknown => match chain.fielders.as_slice() {
            [only] if only.position.is_outfield() => EventType::Flyout,
            _ => EventType::Groundout,
        },
    }
}

/// Trim, upper-case and drop the `#`, `!` and `?` scorer marks
fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, '#' | '!' | '?'))
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Split at the first `sep` that is not inside parentheses
fn split_outside_parens(text: &str, sep: char) -> (&str, Option<&str>) {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => return (&text[..i], Some(&text[i + 1..])),
            _ => {}
        }
    }
    (text, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::Position;
    use crate::types::{Depth, Direction, Zone};

    fn positions(event: &ParsedEvent) -> Vec<u8> {
        event.fielders.iter().map(|f| f.position.number()).collect()
    }

    #[test]
    fn test_single_to_center() {
        let event = parse("S8");
        assert_eq!(event.primary_event_type, EventType::Single);
        assert_eq!(event.location.zone, Zone::Outfield);
        assert_eq!(event.location.direction, Direction::Center);
        assert!(!event.is_out);
        assert_eq!(event.raw_event, "S8");
    }

    #[test]
    fn test_home_run_location() {
        let event = parse("HR/F78");
        assert_eq!(event.primary_event_type, EventType::HomeRun);
        assert_eq!(event.location.direction, Direction::LeftCenter);
        assert_eq!(event.location.trajectory, Trajectory::Fly);
        assert_eq!(event.rbi_count, 1);
    }

    #[test]
    fn test_advances_keep_source_order() {
        let event = parse("S9/L9S.2-H;1-3");
        assert_eq!(event.base_running.len(), 2);
        assert_eq!(event.base_running[0].from_base, Base::Second);
        assert_eq!(event.base_running[0].to_base, Base::Home);
        assert_eq!(event.base_running[1].from_base, Base::First);
        assert_eq!(event.base_running[1].to_base, Base::Third);
        assert!(event.base_running[0].rbi_credited);
        assert!(!event.base_running[1].rbi_credited);
        assert_eq!(event.location.depth, Depth::Shallow);
        assert_eq!(event.rbi_count, 1);
    }

    #[test]
    fn test_ground_ball_double_play() {
        let event = parse("64(1)3/GDP");
        assert_eq!(event.primary_event_type, EventType::Groundout);
        assert_eq!(positions(&event), vec![6, 4, 3]);
        assert_eq!(event.forced_outs, vec![Base::First]);
        assert!(event.batter_out);
        assert_eq!(event.out_count, 2);
        assert!(event.is_double_play);
    }

    #[test]
    fn test_lettered_out_codes() {
        let event = parse("G643");
        assert_eq!(event.primary_event_type, EventType::Groundout);
        assert_eq!(positions(&event), vec![6, 4, 3]);
        assert_eq!(event.out_count, 1);

        let event = parse("F8");
        assert_eq!(event.primary_event_type, EventType::Flyout);
        assert_eq!(event.fielders[0].role, FielderRole::Putout);
    }

    #[test]
    fn test_bare_chain_classification() {
        assert_eq!(parse("8").primary_event_type, EventType::Flyout);
        assert_eq!(parse("63").primary_event_type, EventType::Groundout);
        assert_eq!(parse("6/L6").primary_event_type, EventType::Lineout);
        assert_eq!(parse("4/P4").primary_event_type, EventType::Popup);
        assert_eq!(parse("8/F8D").location.depth, Depth::Deep);
    }

    #[test]
    fn test_force_out_leaves_batter_safe() {
        let event = parse("54(1)/FO/G5");
        assert!(!event.batter_out);
        assert_eq!(event.out_count, 1);
        assert!(!event.is_double_play);
    }

    #[test]
    fn test_triple_play() {
        let event = parse("5(2)4(1)3/GTP");
        assert_eq!(event.out_count, 3);
        assert!(event.is_triple_play);
    }

    #[test]
    fn test_strikeout_variants() {
        let event = parse("K");
        assert!(event.batter_out);
        assert_eq!(event.out_count, 1);

        let event = parse("K+WP.B-1");
        assert!(!event.batter_out);
        assert_eq!(event.out_count, 0);

        let event = parse("K+CS2(26)/DP");
        assert_eq!(event.out_count, 2);
        assert!(event.is_double_play);
    }

    #[test]
    fn test_error_and_fielders_choice() {
        let event = parse("E6/G6");
        assert_eq!(event.primary_event_type, EventType::Error);
        assert!(event.is_error);
        assert_eq!(event.error_fielder(), Some(Position::Shortstop));
        assert_eq!(event.location.trajectory, Trajectory::Ground);

        let event = parse("FC5/G5.3XH(52)");
        assert!(event.is_fielders_choice);
        assert_eq!(event.out_count, 1);
        assert!(!event.is_error);

        let event = parse("S7.2-H(E7)");
        assert!(event.is_error);
        assert!(!event.base_running[0].rbi_credited);
    }

    #[test]
    fn test_error_modifier_charges_fielder() {
        let event = parse("C/E2");
        assert_eq!(event.primary_event_type, EventType::CatcherInterference);
        assert!(event.is_error);
        assert_eq!(event.error_fielder(), Some(Position::Catcher));

        let event = parse("FC6/E6.1-2");
        assert!(event.is_fielders_choice);
        assert!(event.is_error);
        assert_eq!(event.error_fielder(), Some(Position::Shortstop));
        assert_eq!(event.base_running.len(), 1);

        let event = parse("FC6.1-2");
        assert!(!event.is_error);
        assert_eq!(event.error_fielder(), None);
    }

    #[test]
    fn test_rbi_rules() {
        assert!(!parse("E5.3-H").base_running[0].rbi_credited);
        assert!(parse("E5.3-H(RBI)").base_running[0].rbi_credited);
        assert!(!parse("S8.3-H(NR)").base_running[0].rbi_credited);
        assert!(!parse("WP.3-H").base_running[0].rbi_credited);
        assert!(!parse("64(1)3/GDP.3-H").base_running[0].rbi_credited);
        assert!(parse("8/SF.3-H").base_running[0].rbi_credited);
        assert_eq!(parse("HR/F7.3-H;1-H").rbi_count, 3);
        assert_eq!(parse("HR.B-H;2-H").rbi_count, 2);
    }

    #[test]
    fn test_ground_rule_double_is_specific() {
        let event = parse("DGR/L9L");
        assert_eq!(event.primary_event_type, EventType::GroundRuleDouble);
        assert_eq!(event.location.direction, Direction::RightLine);
    }

    #[test]
    fn test_stolen_base_and_running_plays() {
        let event = parse("SB2");
        assert_eq!(event.primary_event_type, EventType::StolenBase);
        assert_eq!(event.runner_events.len(), 1);
        assert!(!event.is_out);

        let event = parse("CS3(25)");
        assert_eq!(event.out_count, 1);

        let event = parse("WP.2-3");
        assert_eq!(event.primary_event_type, EventType::WildPitch);
        assert_eq!(event.base_running.len(), 1);
    }

    #[test]
    fn test_normalization() {
        let event = parse("  s8/g4m#.3-h  ");
        assert_eq!(event.primary_event_type, EventType::Single);
        assert_eq!(event.location.direction, Direction::Middle);
        assert_eq!(event.base_running.len(), 1);
        assert_eq!(event.raw_event, "  s8/g4m#.3-h  ");
    }

    #[test]
    fn test_unknown_codes() {
        for code in ["ZZZ999", "", "   ", "S8+WP", "XX/G6", ".2-H"] {
            let event = parse(code);
            assert!(event.is_unknown(), "{code:?} should be unknown");
            assert_eq!(event.raw_event, code);
        }
    }

    #[test]
    fn test_unrecognized_pieces_are_ignored() {
        let event = parse("S8/ZZ/G.2-H;QQ;1-2");
        assert_eq!(event.primary_event_type, EventType::Single);
        assert_eq!(event.location.trajectory, Trajectory::Ground);
        assert_eq!(event.base_running.len(), 2);
    }

    #[test]
    fn test_split_outside_parens() {
        assert_eq!(split_outside_parens("CS2(E2/TH)/DP", '/'), ("CS2(E2/TH)", Some("DP")));
        assert_eq!(split_outside_parens("S8", '/'), ("S8", None));
    }
}
