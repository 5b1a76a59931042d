//! Report generation
//!
//! Renders translated codes and described games as plain text lines or
//! pretty-printed JSON, followed by a summary of unrecognized codes.

use crate::config::OutputFormat;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use retro_play_decoder::{DescribedPlay, Game, HalfInning, Translation};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// One described game
#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    pub id: String,
    pub visiting_team: Option<String>,
    pub home_team: Option<String>,
    pub date: Option<NaiveDate>,
    pub plays: Vec<DescribedPlay>,
}

impl GameReport {
    pub fn new(game: &Game, plays: Vec<DescribedPlay>) -> Self {
        Self {
            id: game.id.clone(),
            visiting_team: game.info.visiting_team.clone(),
            home_team: game.info.home_team.clone(),
            date: game.info.date,
            plays,
        }
    }

    fn heading(&self) -> String {
        let mut heading = match (&self.visiting_team, &self.home_team) {
            (Some(away), Some(home)) => format!("{} @ {}", away, home),
            _ => self.id.clone(),
        };
        if let Some(date) = self.date {
            heading.push_str(&format!(", {}", date.format("%B %-d, %Y")));
        }
        format!("{} ({})", heading, self.id)
    }
}

/// Everything produced by one run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub translations: Vec<Translation>,
    pub games: Vec<GameReport>,
    /// Unrecognized code → occurrences
    pub unrecognized: BTreeMap<String, usize>,
}

impl Report {
    pub fn new(translations: Vec<Translation>, games: Vec<GameReport>) -> Self {
        let mut unrecognized = BTreeMap::new();
        let codes = translations
            .iter()
            .filter(|t| !t.recognized)
            .map(|t| t.code.trim())
            .chain(
                games
                    .iter()
                    .flat_map(|g| &g.plays)
                    .filter(|p| !p.recognized)
                    .map(|p| p.code.trim()),
            );
        for code in codes {
            *unrecognized.entry(code.to_string()).or_insert(0) += 1;
        }

        Self {
            translations,
            games,
            unrecognized,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Txt => Ok(self.render_txt()),
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).context("Failed to serialize report")
            }
        }
    }

    fn render_txt(&self) -> String {
        let mut out = String::new();

        for translation in &self.translations {
            let _ = writeln!(out, "{}", translation);
        }

        for game in &self.games {
            if !out.is_empty() {
                out.push('\n');
            }
            let _ = writeln!(out, "=== {} ===", game.heading());
            for play in &game.plays {
                let half = match play.half {
                    HalfInning::Top => "Top",
                    HalfInning::Bottom => "Bot",
                };
                let _ = writeln!(out, "{} {:>2}: {}", half, play.inning, play.description);
            }
        }

        if !self.unrecognized.is_empty() {
            let total: usize = self.unrecognized.values().sum();
            let _ = writeln!(out, "\nUnrecognized codes: {}", total);
            for (code, count) in &self.unrecognized {
                let _ = writeln!(out, "  {} (x{})", code, count);
            }
        }

        out
    }
}
