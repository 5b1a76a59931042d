//! Event translator
//!
//! Turns a [`ParsedEvent`] into an English sentence fragment. The sentence is
//! composed from up to four phrases in a fixed order:
//!
//! 1. primary action ("grounded into a double play")
//! 2. location ("on a line drive to shallow right field")
//! 3. fielder involvement ("(6-4-3)", "by the shortstop")
//! 4. advance section: runner attempts, then the secondary event, then the
//!    advance clauses in source order, each entry after "; "
//!
//! Translation is a pure function of the event and the configuration.

use crate::config::{FielderNotation, TranslatorConfig};
use crate::notation::{Base, EventType, Modifier, Position};
use crate::types::{
    Advance, Depth, Direction, Fielder, FielderRole, Location, ParsedEvent, RunnerEvent,
    SecondaryEvent, Trajectory, Zone,
};
use std::borrow::Cow;

/// Translate with the default configuration
pub fn translate(event: &ParsedEvent) -> String {
    Translator::default().translate(event)
}

/// Sentence composer for parsed events
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: TranslatorConfig,
}

/// How the fielder phrase attaches to the sentence
enum Attribution {
    /// Follows the previous phrase with a space: "to the shortstop", "(6-4-3)"
    Inline(String),
    /// Follows after a comma: "caught by the second baseman"
    Clause(String),
}

impl Translator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Compose the description for a parsed event
    pub fn translate(&self, event: &ParsedEvent) -> String {
        let mut sentence = Sentence::new(self.primary_phrase(event));
        if event.is_unknown() {
            return sentence.finish();
        }

        let (attribution, named) = self.fielder_phrase(event);
        if let Some(location) = self.location_phrase(event, named) {
            sentence.word(&location);
        }
        match attribution {
            Some(Attribution::Inline(text)) => sentence.word(&text),
            Some(Attribution::Clause(text)) => sentence.clause(&text),
            None => {}
        }
        if let Some(position) = charged_error(event) {
            sentence.word(&format!("(error by the {})", position.name()));
        }

        // Runner attempts already narrated as the primary action are not repeated
        if self.config.include_advances && !event.primary_event_type.takes_base() {
            for runner_event in &event.runner_events {
                sentence.advance(&self.runner_event_phrase(runner_event));
            }
        }
        if let Some(secondary) = event.secondary.as_ref().and_then(secondary_phrase) {
            sentence.advance(&secondary);
        }
        if self.config.include_advances {
            for advance in &event.base_running {
                sentence.advance(&self.advance_phrase(advance));
            }
        }

        sentence.finish()
    }

    /// Location phrase. `named` is the fielder the fielder phrase will name;
    /// an infield area belonging to that fielder is not repeated. An infield
    /// area owned by someone other than the fielder who handled the ball is
    /// described by side of the field.
    fn location_phrase(&self, event: &ParsedEvent, named: Option<Position>) -> Option<String> {
        let location = &event.location;
        if !self.config.include_location || !location.is_known() {
            return None;
        }

        let mut parts: Vec<Cow<'static, str>> = Vec::new();
        let implied = event.primary_event_type.implied_trajectory();
        if location.trajectory != implied || location.bunt {
            if let Some(trajectory) = trajectory_phrase(location.trajectory, location.bunt) {
                parts.push(trajectory.into());
            }
        }
        let handled_by = event.fielders.first().map(|f| f.position);
        if let Some(area) = area_phrase(location, named, handled_by) {
            parts.push(area);
        }
        if location.foul {
            parts.push("in foul territory".into());
        }

        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// Fielder phrase plus the single fielder it names, if any
    fn fielder_phrase(&self, event: &ParsedEvent) -> (Option<Attribution>, Option<Position>) {
        let event_type = event.primary_event_type;
        let attributable = event_type.is_batter_out()
            || matches!(
                event_type,
                EventType::Error | EventType::FoulFlyError | EventType::FieldersChoice
            );
        if !attributable {
            return (None, None);
        }

        let fielder = match event.fielders.as_slice() {
            [] => return (None, None),
            [fielder] => *fielder,
            chain => return (Some(Attribution::Inline(self.chain_notation(chain))), None),
        };
        let position = fielder.position;

        match fielder.role {
            FielderRole::Error | FielderRole::Fielded => (
                Some(Attribution::Inline(format!("by the {}", position.name()))),
                Some(position),
            ),
            // The catcher's putout on a strikeout goes without saying
            _ if event_type == EventType::Strikeout => (None, None),
            _ => {
                let location = &event.location;
                let shows_area = self.config.include_location && location.has_area();
                if shows_area && location.fielder == Some(position) {
                    if location.zone == Zone::Outfield {
                        // "flied out to deep center field" already names the fielder's area
                        return (None, None);
                    }
                    return (
                        Some(Attribution::Inline(format!("to the {}", position.name()))),
                        Some(position),
                    );
                }
                if shows_area {
                    let verb = if caught_in_air(event) { "caught" } else { "fielded" };
                    return (
                        Some(Attribution::Clause(format!("{} by the {}", verb, position.name()))),
                        None,
                    );
                }
                (
                    Some(Attribution::Inline(format!("to the {}", position.name()))),
                    Some(position),
                )
            }
        }
    }

    /// `(6-4-3)` or `(shortstop to second baseman to first baseman)`
    fn chain_notation(&self, chain: &[Fielder]) -> String {
        let parts: Vec<String> = match self.config.fielder_notation {
            FielderNotation::Numbers => chain
                .iter()
                .map(|f| match f.role {
                    FielderRole::Error => format!("E{}", f.position.number()),
                    _ => f.position.number().to_string(),
                })
                .collect(),
            FielderNotation::Names => chain
                .iter()
                .map(|f| match f.role {
                    FielderRole::Error => format!("{}'s error", f.position.name()),
                    _ => f.position.name().to_string(),
                })
                .collect(),
        };
        let separator = match self.config.fielder_notation {
            FielderNotation::Numbers => "-",
            FielderNotation::Names => " to ",
        };
        format!("({})", parts.join(separator))
    }

    /// Primary phrase, refined by modifiers and derived counts. The more specific
    /// source token always selects the more specific phrase.
    fn primary_phrase(&self, event: &ParsedEvent) -> Cow<'static, str> {
        let event_type = event.primary_event_type;

        if event_type.takes_base() && !event.runner_events.is_empty() {
            let phrases: Vec<String> = event
                .runner_events
                .iter()
                .map(|r| self.runner_event_phrase(r))
                .collect();
            return Cow::Owned(phrases.join(" and "));
        }

        let triple_play =
            event.is_triple_play || event.modifiers.iter().any(|m| m.is_triple_play());
        let double_play = !triple_play
            && (event.is_double_play || event.modifiers.iter().any(|m| m.is_double_play()));

        let phrase = match event_type {
            EventType::Groundout if triple_play => "grounded into a triple play",
            EventType::Groundout if double_play => "grounded into a double play",
            EventType::Groundout if event.has_modifier(Modifier::SacrificeHit) => {
                "laid down a sacrifice bunt"
            }
            EventType::Groundout
                if event.has_modifier(Modifier::ForceOut)
                    || (!event.batter_out && !event.forced_outs.is_empty()) =>
            {
                "grounded into a force out"
            }
            EventType::Flyout if triple_play => "flied into a triple play",
            EventType::Flyout if double_play => "flied into a double play",
            EventType::Flyout if event.has_modifier(Modifier::SacrificeFly) => "hit a sacrifice fly",
            EventType::Lineout if triple_play => "lined into a triple play",
            EventType::Lineout if double_play => "lined into a double play",
            EventType::Popup if double_play => "popped into a double play",
            EventType::Strikeout if event.batter_advance().is_some_and(|a| !a.is_out) => {
                "struck out but reached base"
            }
            EventType::Strikeout if double_play => "struck out in a double play",
            EventType::HomeRun if event.has_modifier(Modifier::InsideThePark) => {
                "hit an inside-the-park home run"
            }
            EventType::Error if event.modifiers.iter().any(|m| matches!(m, Modifier::Throw(_))) => {
                "reached on a throwing error"
            }
            other => base_phrase(other),
        };
        Cow::Borrowed(phrase)
    }

    fn runner_event_phrase(&self, event: &RunnerEvent) -> String {
        let runner = event.runner.name();
        let target = event.target.name();
        let mut text = match (event.kind, event.error_fielder) {
            (EventType::StolenBase, _) => format!("the runner from {runner} stole {target}"),
            (EventType::CaughtStealing, None) => {
                format!("the runner from {runner} was caught stealing {target}")
            }
            (EventType::CaughtStealing, Some(p)) => format!(
                "the runner from {runner} tried to steal {target} and was safe on an error by the {}",
                p.name()
            ),
            (EventType::Pickoff, None) => format!("the runner on {runner} was picked off"),
            (EventType::Pickoff, Some(p)) => format!(
                "the runner on {runner} survived a pickoff attempt on an error by the {}",
                p.name()
            ),
            (EventType::PickoffCaughtStealing, None) => format!(
                "the runner from {runner} was picked off and caught stealing {target}"
            ),
            (EventType::PickoffCaughtStealing, Some(p)) => format!(
                "the runner from {runner} was picked off but reached {target} on an error by the {}",
                p.name()
            ),
            (kind, _) => format!("the runner from {runner}: {}", base_phrase(kind)),
        };
        if event.is_out && event.fielders.len() > 1 {
            text.push(' ');
            text.push_str(&self.chain_notation(&event.fielders));
        }
        text
    }

    fn advance_phrase(&self, advance: &Advance) -> String {
        let runner = match advance.from_base {
            Base::Batter => Cow::Borrowed("the batter"),
            base => Cow::Owned(format!("the runner from {}", base.name())),
        };
        let action = if advance.is_out {
            format!("is out at {}", advance.to_base.name())
        } else if advance.to_base == Base::Home {
            "scores".to_string()
        } else if advance.from_base == advance.to_base {
            format!("holds at {}", advance.to_base.name())
        } else {
            format!("advances to {}", advance.to_base.name())
        };

        let mut text = format!("{runner} {action}");
        if advance.is_error {
            match advance.error_fielder {
                Some(p) => {
                    text.push_str(" on an error by the ");
                    text.push_str(p.name());
                }
                None => text.push_str(" on an error"),
            }
        }
        if advance.is_out && advance.fielders.len() > 1 {
            text.push(' ');
            text.push_str(&self.chain_notation(&advance.fielders));
        }
        if advance.unearned {
            text.push_str(" (unearned)");
        }
        if advance.rbi_credited && self.config.rbi_notes {
            text.push_str(" (RBI)");
        }
        text
    }
}

/// Fixed phrase for each event type
pub fn base_phrase(event_type: EventType) -> &'static str {
    match event_type {
        EventType::Single => "singled",
        EventType::Double => "doubled",
        EventType::Triple => "tripled",
        EventType::HomeRun => "hit a home run",
        EventType::GroundRuleDouble => "hit a ground-rule double",
        EventType::Strikeout => "struck out",
        EventType::Groundout => "grounded out",
        EventType::Flyout => "flied out",
        EventType::Lineout => "lined out",
        EventType::Popup => "popped out",
        EventType::Walk => "walked",
        EventType::IntentionalWalk => "was intentionally walked",
        EventType::HitByPitch => "was hit by a pitch",
        EventType::Error => "reached on an error",
        EventType::FoulFlyError => "error on a foul fly",
        EventType::CatcherInterference => "reached on catcher's interference",
        EventType::FieldersChoice => "reached on a fielder's choice",
        EventType::StolenBase => "stolen base",
        EventType::CaughtStealing => "caught stealing",
        EventType::Pickoff => "pickoff",
        EventType::PickoffCaughtStealing => "pickoff caught stealing",
        EventType::WildPitch => "wild pitch",
        EventType::PassedBall => "passed ball",
        EventType::Balk => "balk",
        EventType::DefensiveIndifference => "defensive indifference",
        EventType::OtherAdvance => "runner advance on the play",
        EventType::NoPlay => "no play",
        EventType::Unknown => "recorded a play",
    }
}

/// Advance-section entry for a non-running secondary event
fn secondary_phrase(secondary: &SecondaryEvent) -> Option<String> {
    match secondary.event_type {
        t if t.takes_base() => None,
        EventType::Error => Some(match secondary.fielders.first() {
            Some(f) => format!("an error by the {} on the play", f.position.name()),
            None => "an error on the play".to_string(),
        }),
        EventType::DefensiveIndifference => Some("defensive indifference on the play".to_string()),
        EventType::OtherAdvance => Some("another advance on the play".to_string()),
        other => Some(format!("a {} on the play", base_phrase(other))),
    }
}

fn trajectory_phrase(trajectory: Trajectory, bunt: bool) -> Option<&'static str> {
    match (trajectory, bunt) {
        (Trajectory::Ground, false) => Some("on a ground ball"),
        (Trajectory::Ground, true) => Some("on a bunt"),
        (Trajectory::Line, false) => Some("on a line drive"),
        (Trajectory::Line, true) => Some("on a bunted line drive"),
        (Trajectory::Fly, false) => Some("on a fly ball"),
        (Trajectory::Fly, true) => Some("on a bunted fly ball"),
        (Trajectory::Pop, false) => Some("on a pop-up"),
        (Trajectory::Pop, true) => Some("on a bunt pop-up"),
        (Trajectory::Unknown, true) => Some("on a bunt"),
        (Trajectory::Unknown, false) => None,
    }
}

fn area_phrase(
    location: &Location,
    named: Option<Position>,
    handled_by: Option<Position>,
) -> Option<Cow<'static, str>> {
    match location.zone {
        Zone::Outfield => {
            let area = match location.direction {
                Direction::LeftLine => return Some("down the left-field line".into()),
                Direction::RightLine => return Some("down the right-field line".into()),
                Direction::Left => "left field",
                Direction::LeftCenter => "left-center field",
                Direction::Center => "center field",
                Direction::RightCenter => "right-center field",
                Direction::Right => "right field",
                Direction::Middle => "straightaway center field",
                Direction::Unknown => return None,
            };
            let depth = match location.depth {
                Depth::Shallow => "shallow ",
                Depth::Deep => "deep ",
                Depth::Medium | Depth::Unknown => "",
            };
            Some(format!("to {depth}{area}").into())
        }
        Zone::Infield => match location.direction {
            Direction::Middle => Some("up the middle".into()),
            Direction::LeftLine => Some("down the third-base line".into()),
            Direction::RightLine => Some("down the first-base line".into()),
            Direction::Unknown => None,
            _ => match location.fielder {
                Some(p) if named == Some(p) => None,
                Some(p) if handled_by.map_or(true, |f| f == p) => {
                    Some(format!("to the {}", p.name()).into())
                }
                Some(Position::Catcher) => Some("in front of the plate".into()),
                _ => Some(infield_side(location.direction).into()),
            },
        },
        Zone::Unknown => None,
    }
}

fn infield_side(direction: Direction) -> &'static str {
    match direction {
        Direction::Left | Direction::LeftCenter => "to the left side",
        Direction::Right | Direction::RightCenter => "to the right side",
        _ => "up the middle",
    }
}

/// Error charged by an `E<n>` modifier on a play that reached base without one
fn charged_error(event: &ParsedEvent) -> Option<Position> {
    match event.primary_event_type {
        EventType::CatcherInterference | EventType::FieldersChoice => event.modifier_error(),
        _ => None,
    }
}

/// Whether a single-fielder out was a catch rather than a fielded grounder
fn caught_in_air(event: &ParsedEvent) -> bool {
    matches!(
        event.primary_event_type,
        EventType::Flyout | EventType::Lineout | EventType::Popup
    ) || matches!(
        event.location.trajectory,
        Trajectory::Fly | Trajectory::Line | Trajectory::Pop
    )
}

/// Deterministic punctuation for the composed description
struct Sentence {
    text: String,
}

impl Sentence {
    fn new(head: impl Into<String>) -> Self {
        Self { text: head.into() }
    }

    fn word(&mut self, phrase: &str) {
        self.text.push(' ');
        self.text.push_str(phrase);
    }

    fn clause(&mut self, phrase: &str) {
        self.text.push_str(", ");
        self.text.push_str(phrase);
    }

    fn advance(&mut self, phrase: &str) {
        self.text.push_str("; ");
        self.text.push_str(phrase);
    }

    fn finish(self) -> String {
        self.text
    }
}
