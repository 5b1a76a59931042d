//! Retrosheet event file reader (`.EVN` / `.EVA`)
//!
//! An event file is comma-separated text, one record per line. Each game
//! starts with an `id` record; everything up to the next `id` belongs to it.
//!
//! ## Supported Record Types
//! - `id`, `version`
//! - `info,<key>,<value>` (`visteam`, `hometeam`, `site` and `date` are typed,
//!   the rest are kept as strings)
//! - `start` / `sub`: lineup entries, also feeding the game's player names
//! - `play,<inning>,<0|1>,<batter>,<count>,<pitches>,<event>`
//! - `com`: attached to the preceding play, or to the game before any play
//! - `data`, `badj`, `padj`, `ladj`: kept verbatim
//!
//! Unknown record types are skipped.

use crate::players::PlayerDirectory;
use crate::types::{DecoderError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Which team is batting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HalfInning {
    /// Visiting team bats (`0`)
    Top,
    /// Home team bats (`1`)
    Bottom,
}

impl HalfInning {
    fn from_field(field: &str) -> Option<Self> {
        match field {
            "0" => Some(HalfInning::Top),
            "1" => Some(HalfInning::Bottom),
            _ => None,
        }
    }
}

/// Typed `info` records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub visiting_team: Option<String>,
    pub home_team: Option<String>,
    pub date: Option<NaiveDate>,
    pub site: Option<String>,
    /// Every other `info` key
    pub extra: BTreeMap<String, String>,
}

/// A `start` or `sub` record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub player_id: String,
    pub name: String,
    pub half: HalfInning,
    pub batting_order: u8,
    pub position: u8,
    pub substitution: bool,
}

/// One `play` record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub inning: u32,
    pub half: HalfInning,
    pub batter_id: String,
    /// Balls and strikes before the play (`32`), `??` when unknown
    pub count: String,
    pub pitches: String,
    /// The raw event code
    pub event: String,
    /// `com` records following this play
    pub comments: Vec<String>,
}

/// `data`, `badj`, `padj` and `ladj` records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraRecord {
    pub kind: String,
    pub values: Vec<String>,
}

/// One game from an event file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub version: Option<String>,
    pub info: GameInfo,
    pub players: PlayerDirectory,
    pub lineup: Vec<Appearance>,
    pub plays: Vec<PlayRecord>,
    /// Comments before the first play
    pub comments: Vec<String>,
    pub extra: Vec<ExtraRecord>,
}

impl Game {
    fn new(id: String) -> Self {
        Self {
            id,
            version: None,
            info: GameInfo::default(),
            players: PlayerDirectory::new(),
            lineup: Vec::new(),
            plays: Vec::new(),
            comments: Vec::new(),
            extra: Vec::new(),
        }
    }
}

/// Event file reader
pub struct EventFileParser;

impl EventFileParser {
    /// Read every game in an event file
    pub fn parse(path: &Path) -> Result<Vec<Game>> {
        log::info!("Parsing event file: {:?}", path);

        if !path.exists() {
            return Err(DecoderError::EventFileError(format!(
                "Event file not found: {:?}",
                path
            )));
        }

        let file = File::open(path)?;
        let games = Self::from_reader(BufReader::new(file))?;

        log::info!("Read {} game(s) from {:?}", games.len(), path);
        Ok(games)
    }

    /// Read games from event-file text
    pub fn parse_str(text: &str) -> Result<Vec<Game>> {
        Self::from_reader(text.as_bytes())
    }

    /// Read games from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Game>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut games = Vec::new();
        let mut current: Option<Game> = None;

        for result in reader.records() {
            let record = result?;
            let line = record
                .position()
                .map(|p| usize::try_from(p.line()).unwrap_or(usize::MAX))
                .unwrap_or_default();
            let fields: Vec<&str> = record.iter().map(str::trim).collect();
            let Some((&kind, values)) = fields.split_first() else {
                continue;
            };

            if kind == "id" {
                let id = values.first().copied().unwrap_or_default();
                if id.is_empty() {
                    return Err(invalid(line, "id record without a game ID"));
                }
                log::debug!("Game {}", id);
                games.extend(current.replace(Game::new(id.to_string())));
                continue;
            }

            let Some(game) = current.as_mut() else {
                if kind.is_empty() {
                    continue;
                }
                return Err(invalid(line, format!("'{}' record before the first id record", kind)));
            };

            match kind {
                "version" => game.version = values.first().map(|v| v.to_string()),
                "info" => read_info(game, values, line)?,
                "start" | "sub" => read_appearance(game, values, kind == "sub", line)?,
                "play" => game.plays.push(read_play(values, line)?),
                "com" => {
                    let text = values.join(",");
                    match game.plays.last_mut() {
                        Some(play) => play.comments.push(text),
                        None => game.comments.push(text),
                    }
                }
                "data" | "badj" | "padj" | "ladj" => game.extra.push(ExtraRecord {
                    kind: kind.to_string(),
                    values: values.iter().map(|v| v.to_string()).collect(),
                }),
                other => log::debug!("Skipping unknown record type '{}' on line {}", other, line),
            }
        }

        games.extend(current);
        Ok(games)
    }
}

fn invalid(line: usize, reason: impl Into<String>) -> DecoderError {
    DecoderError::InvalidRecord {
        line,
        reason: reason.into(),
    }
}

fn read_info(game: &mut Game, values: &[&str], line: usize) -> Result<()> {
    let [key, rest @ ..] = values else {
        return Err(invalid(line, "info record without a key"));
    };
    let value = rest.join(",");
    match *key {
        "visteam" => game.info.visiting_team = Some(value),
        "hometeam" => game.info.home_team = Some(value),
        "site" => game.info.site = Some(value),
        "date" => {
            let date = NaiveDate::parse_from_str(&value, "%Y/%m/%d")
                .map_err(|e| invalid(line, format!("bad date '{}': {}", value, e)))?;
            game.info.date = Some(date);
        }
        key => {
            game.info.extra.insert(key.to_string(), value);
        }
    }
    Ok(())
}

fn read_appearance(game: &mut Game, values: &[&str], substitution: bool, line: usize) -> Result<()> {
    let [player_id, name, team, order, position, ..] = values else {
        return Err(invalid(line, "lineup record needs 5 fields"));
    };
    let half = HalfInning::from_field(team)
        .ok_or_else(|| invalid(line, format!("bad team '{}'", team)))?;
    let batting_order = order
        .parse()
        .map_err(|_| invalid(line, format!("bad batting order '{}'", order)))?;
    let position = position
        .parse()
        .map_err(|_| invalid(line, format!("bad position '{}'", position)))?;

    game.players.insert(*player_id, *name);
    game.lineup.push(Appearance {
        player_id: player_id.to_string(),
        name: name.to_string(),
        half,
        batting_order,
        position,
        substitution,
    });
    Ok(())
}

fn read_play(values: &[&str], line: usize) -> Result<PlayRecord> {
    let [inning, team, batter_id, count, pitches, event, ..] = values else {
        return Err(invalid(
            line,
            format!("play record needs 6 fields, found {}", values.len()),
        ));
    };
    let inning = inning
        .parse()
        .map_err(|_| invalid(line, format!("bad inning '{}'", inning)))?;
    let half = HalfInning::from_field(team)
        .ok_or_else(|| invalid(line, format!("bad team '{}'", team)))?;

    Ok(PlayRecord {
        inning,
        half,
        batter_id: batter_id.to_string(),
        count: count.to_string(),
        pitches: pitches.to_string(),
        event: event.to_string(),
        comments: Vec::new(),
    })
}
