//! Primary event segment (everything before the first `/` or `.`)

use super::fielders::{parse_fielded, parse_fielder_chain, Chain};
use crate::notation::{match_event_code, Base, EventType, Position};
use crate::types::{Fielder, FielderRole, RunnerEvent, SecondaryEvent};

/// Decomposed primary segment
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PrimaryPlay {
    /// `None` for a bare fielder chain (`63`), typed later from its trajectory
    pub event_type: Option<EventType>,
    pub chain: Chain,
    pub runner_events: Vec<RunnerEvent>,
    pub secondary: Option<SecondaryEvent>,
}

impl PrimaryPlay {
    fn typed(event_type: EventType, chain: Chain) -> Self {
        Self {
            event_type: Some(event_type),
            chain,
            runner_events: Vec::new(),
            secondary: None,
        }
    }
}

/// Parse the primary segment. `None` means the segment is not in the
/// modeled grammar.
pub(crate) fn parse_primary(segment: &str) -> Option<PrimaryPlay> {
    let (main, secondary) = match segment.split_once('+') {
        Some((main, secondary)) => (main, Some(secondary)),
        None => (segment, None),
    };

    let mut play = if main.starts_with(|c: char| c.is_ascii_digit()) {
        let chain = parse_fielder_chain(main)?;
        let event_type = chain.has_error().then_some(EventType::Error);
        PrimaryPlay {
            event_type,
            chain,
            runner_events: Vec::new(),
            secondary: None,
        }
    } else {
        parse_coded(main)?
    };

    if let Some(secondary) = secondary {
        let event_type = play.event_type?;
        if !event_type.admits_secondary() {
            return None;
        }
        let (secondary, runner_events) = parse_secondary(secondary)?;
        play.secondary = Some(secondary);
        play.runner_events.extend(runner_events);
    }

    Some(play)
}

/// Parse a segment that starts with an event code
fn parse_coded(main: &str) -> Option<PrimaryPlay> {
    let (event_type, len) = match_event_code(main)?;

    if event_type.takes_base() {
        let runner_events = parse_runner_attempts(main)?;
        return Some(PrimaryPlay {
            event_type: Some(event_type),
            chain: Chain::default(),
            runner_events,
            secondary: None,
        });
    }

    let body = &main[len..];
    let chain = match event_type {
        EventType::Single
        | EventType::Double
        | EventType::Triple
        | EventType::HomeRun
        | EventType::GroundRuleDouble
        | EventType::FieldersChoice => Chain {
            fielders: parse_fielded(body)?,
            ..Chain::default()
        },
        EventType::Error | EventType::FoulFlyError => Chain {
            fielders: parse_error_fielder(body)?,
            ..Chain::default()
        },
        EventType::Strikeout
        | EventType::Groundout
        | EventType::Flyout
        | EventType::Lineout
        | EventType::Popup => parse_fielder_chain(body)?,
        _ if body.is_empty() => Chain::default(),
        _ => return None,
    };

    Some(PrimaryPlay::typed(event_type, chain))
}

/// `E6` / `FLE5`: at most one fielder, charged with the error
fn parse_error_fielder(body: &str) -> Option<Vec<Fielder>> {
    let mut chars = body.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Some(Vec::new()),
        (Some(c), None) => {
            Position::from_digit(c).map(|p| vec![Fielder::new(p, FielderRole::Error)])
        }
        _ => None,
    }
}

/// `SB2;SB3`, `CS2(24)`, `PO1(E1)`, `POCS2(1361)`
fn parse_runner_attempts(text: &str) -> Option<Vec<RunnerEvent>> {
    text.split(';').map(parse_runner_attempt).collect()
}

fn parse_runner_attempt(item: &str) -> Option<RunnerEvent> {
    let (kind, len) = match_event_code(item)?;
    if !kind.takes_base() {
        return None;
    }

    let mut chars = item[len..].chars();
    let base = chars.next().and_then(Base::from_char)?;
    let (runner, target) = match kind {
        EventType::Pickoff if base.is_origin() && base != Base::Batter => (base, base),
        EventType::Pickoff => return None,
        _ => (base.previous().filter(|b| *b != Base::Batter)?, base),
    };

    let mut event = RunnerEvent {
        kind,
        runner,
        target,
        is_out: false,
        fielders: Vec::new(),
        error_fielder: None,
    };

    let mut rest = chars.as_str();
    while !rest.is_empty() {
        let inner = rest.strip_prefix('(')?;
        let close = inner.find(')')?;
        let group = &inner[..close];
        rest = &inner[close + 1..];

        // "(UR)" and similar annotations do not change the attempt
        if let Some(chain) = parse_fielder_chain(group.split('/').next().unwrap_or_default()) {
            if let Some(position) = chain.error_fielder() {
                event.error_fielder = Some(position);
            }
            event.fielders.extend(chain.fielders);
        }
    }

    event.is_out = kind != EventType::StolenBase && event.error_fielder.is_none();
    Some(event)
}

/// The part after `+`: one secondary event, or several runner attempts
fn parse_secondary(text: &str) -> Option<(SecondaryEvent, Vec<RunnerEvent>)> {
    let (event_type, len) = match_event_code(text)?;
    if !event_type.can_be_secondary() {
        return None;
    }

    if event_type.takes_base() {
        let runner_events = parse_runner_attempts(text)?;
        let secondary = SecondaryEvent {
            event_type,
            fielders: Vec::new(),
        };
        return Some((secondary, runner_events));
    }

    let body = &text[len..];
    let fielders = match event_type {
        EventType::Error => parse_error_fielder(body)?,
        _ if body.is_empty() => Vec::new(),
        _ => return None,
    };

    Some((SecondaryEvent { event_type, fielders }, Vec::new()))
}
