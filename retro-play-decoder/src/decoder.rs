//! Main decoder API
//!
//! This module provides the façade over the parser and translator. The
//! `PlayDecoder` struct is the entry point for describing single codes,
//! play records with player names, and whole games.

use crate::config::TranslatorConfig;
use crate::formats::{Game, HalfInning, PlayRecord};
use crate::parser;
use crate::players::PlayerDirectory;
use crate::translator::Translator;
use crate::types::{ParsedEvent, Translation};
use serde::{Deserialize, Serialize};

/// Describe a raw event code with the default configuration.
///
/// Never fails and never returns an empty string.
///
/// # Example
/// ```
/// use retro_play_decoder::translate_event;
///
/// assert_eq!(translate_event("S8"), "singled to center field");
/// ```
pub fn translate_event(raw: &str) -> String {
    PlayDecoder::new().describe(raw).description
}

/// Description for a code with no fallback mapping
fn unrecognized_description(raw: &str) -> String {
    match raw.trim() {
        "" => "recorded an unrecognized play".to_string(),
        code => format!("recorded an unrecognized play ({})", code),
    }
}

/// A play record with its description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribedPlay {
    pub inning: u32,
    pub half: HalfInning,
    pub batter_id: String,
    pub code: String,
    /// Full sentence, starting with the batter's name for batter events
    pub description: String,
    pub recognized: bool,
}

/// The configurable façade
#[derive(Debug, Clone, Default)]
pub struct PlayDecoder {
    translator: Translator,
    players: PlayerDirectory,
}

impl PlayDecoder {
    /// Create a decoder with default settings and no player names
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with the given translator configuration
    pub fn with_config(config: TranslatorConfig) -> Self {
        Self {
            translator: Translator::new(config),
            players: PlayerDirectory::new(),
        }
    }

    /// Builder method: player names used by [`describe_play`](Self::describe_play)
    pub fn with_players(mut self, players: PlayerDirectory) -> Self {
        self.players = players;
        self
    }

    pub fn config(&self) -> &TranslatorConfig {
        self.translator.config()
    }

    pub fn players(&self) -> &PlayerDirectory {
        &self.players
    }

    /// Parse a raw code into its structured form
    pub fn parse(&self, raw: &str) -> ParsedEvent {
        parser::parse(raw)
    }

    /// Parse and describe a raw code
    ///
    /// # Example
    /// ```
    /// use retro_play_decoder::PlayDecoder;
    ///
    /// let decoder = PlayDecoder::new();
    /// let translation = decoder.describe("ZZZ999");
    /// assert!(!translation.recognized);
    /// assert_eq!(translation.description, "recorded an unrecognized play (ZZZ999)");
    /// ```
    pub fn describe(&self, raw: &str) -> Translation {
        let event = self.parse(raw);
        if event.is_unknown() {
            log::debug!("Unrecognized event code: {:?}", raw);
            let description = self
                .config()
                .fallback_for(raw)
                .map(str::to_string)
                .unwrap_or_else(|| unrecognized_description(raw));
            return Translation {
                code: raw.to_string(),
                description,
                event: None,
                recognized: false,
            };
        }

        Translation {
            code: raw.to_string(),
            description: self.translator.translate(&event),
            event: Some(event),
            recognized: true,
        }
    }

    /// Describe a play record, naming the batter from this decoder's players
    pub fn describe_play(&self, play: &PlayRecord) -> DescribedPlay {
        self.describe_play_with(play, None)
    }

    /// Lazily describe every play of a game, in order. Names from the game's
    /// lineup take precedence over this decoder's players.
    pub fn describe_game<'a>(&'a self, game: &'a Game) -> GamePlays<'a> {
        GamePlays {
            decoder: self,
            game,
            index: 0,
        }
    }

    fn describe_play_with(
        &self,
        play: &PlayRecord,
        game_players: Option<&PlayerDirectory>,
    ) -> DescribedPlay {
        let translation = self.describe(&play.event);
        let batter = game_players
            .and_then(|p| p.name(&play.batter_id))
            .unwrap_or_else(|| self.players.display_name(&play.batter_id));

        let batter_action = match &translation.event {
            Some(event) => event.primary_event_type.involves_batter(),
            // The generic sentence reads as a batter action; a fallback does not
            None => self.config().fallback_for(&play.event).is_none(),
        };
        let description = if batter_action {
            format!("{} {}", batter, translation.description)
        } else {
            capitalize(&translation.description)
        };

        DescribedPlay {
            inning: play.inning,
            half: play.half,
            batter_id: play.batter_id.clone(),
            code: play.event.clone(),
            description,
            recognized: translation.recognized,
        }
    }
}

/// Iterator over a game's described plays
pub struct GamePlays<'a> {
    decoder: &'a PlayDecoder,
    game: &'a Game,
    index: usize,
}

impl<'a> Iterator for GamePlays<'a> {
    type Item = DescribedPlay;

    fn next(&mut self) -> Option<Self::Item> {
        let play = self.game.plays.get(self.index)?;
        self.index += 1;
        Some(
            self.decoder
                .describe_play_with(play, Some(&self.game.players)),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.game.plays.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GamePlays<'_> {}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::EventFileParser;

    fn play(batter: &str, event: &str) -> PlayRecord {
        PlayRecord {
            inning: 1,
            half: HalfInning::Top,
            batter_id: batter.to_string(),
            count: "??".to_string(),
            pitches: String::new(),
            event: event.to_string(),
            comments: Vec::new(),
        }
    }

    #[test]
    fn test_translate_event() {
        assert_eq!(translate_event("S8"), "singled to center field");
        assert_eq!(translate_event("ZZZ999"), "recorded an unrecognized play (ZZZ999)");
        assert_eq!(translate_event(""), "recorded an unrecognized play");
        assert_eq!(translate_event("   "), "recorded an unrecognized play");
    }

    #[test]
    fn test_describe_recognized() {
        let translation = PlayDecoder::new().describe("K");
        assert!(translation.recognized);
        assert_eq!(translation.description, "struck out");
        assert!(translation.event.is_some());
        assert_eq!(translation.to_string(), "K: struck out");
    }

    #[test]
    fn test_fallback_only_for_unknown() {
        let config = TranslatorConfig::new()
            .add_fallback("ZZZ999", "did something unusual")
            .add_fallback("S8", "never used");
        let decoder = PlayDecoder::with_config(config);

        let translation = decoder.describe("ZZZ999");
        assert!(!translation.recognized);
        assert_eq!(translation.description, "did something unusual");

        assert_eq!(decoder.describe("S8").description, "singled to center field");
    }

    #[test]
    fn test_describe_play_names_batter() {
        let players = PlayerDirectory::new().with_player("troum001", "Mike Trout");
        let decoder = PlayDecoder::new().with_players(players);

        let described = decoder.describe_play(&play("troum001", "HR/F78"));
        assert_eq!(described.description, "Mike Trout hit a home run to left-center field");

        let described = decoder.describe_play(&play("ohtas001", "K"));
        assert_eq!(described.description, "ohtas001 struck out");
    }

    #[test]
    fn test_running_play_is_not_a_batter_action() {
        let decoder = PlayDecoder::new();
        let described = decoder.describe_play(&play("troum001", "SB2"));
        assert_eq!(described.description, "The runner from first stole second");

        let described = decoder.describe_play(&play("troum001", "WP.2-3"));
        assert_eq!(described.description, "Wild pitch; the runner from second advances to third");
    }

    #[test]
    fn test_unrecognized_play_record() {
        let decoder = PlayDecoder::new();
        let described = decoder.describe_play(&play("troum001", "ZZZ999"));
        assert!(!described.recognized);
        assert_eq!(described.description, "troum001 recorded an unrecognized play (ZZZ999)");
    }

    #[test]
    fn test_describe_game_in_order() {
        let text = "id,G1\nstart,troum001,\"Mike Trout\",1,2,8\nplay,1,1,troum001,??,,S8\nplay,1,1,troum001,??,,NP\nplay,3,1,troum001,??,,K\n";
        let games = EventFileParser::parse_str(text).unwrap();
        let decoder = PlayDecoder::new();

        let plays = decoder.describe_game(&games[0]);
        assert_eq!(plays.len(), 3);
        let descriptions: Vec<String> = plays.map(|p| p.description).collect();
        assert_eq!(
            descriptions,
            vec![
                "Mike Trout singled to center field".to_string(),
                "No play".to_string(),
                "Mike Trout struck out".to_string(),
            ]
        );
    }
}
