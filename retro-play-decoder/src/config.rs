//! Translator configuration types
//!
//! This module defines the knobs the translator and façade accept. Every field
//! has a default, so an empty TOML table or `TranslatorConfig::new()` gives
//! the standard narration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How fielder chains are written in descriptions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FielderNotation {
    /// Scorebook style: `(6-4-3)`
    #[default]
    Numbers,
    /// Spelled out: `(shortstop to second baseman to first baseman)`
    Names,
}

/// Configuration for translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default)]
    pub fielder_notation: FielderNotation,

    /// Whether to describe where the ball was hit
    #[serde(default = "default_true")]
    pub include_location: bool,

    /// Whether to describe runner movement
    #[serde(default = "default_true")]
    pub include_advances: bool,

    /// Whether to mark runs batted in on scoring runners
    #[serde(default = "default_true")]
    pub rbi_notes: bool,

    /// Fixed descriptions for codes the parser does not recognize
    #[serde(default)]
    pub fallbacks: BTreeMap<String, String>,
}

fn default_true() -> bool {
    true
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            fielder_notation: FielderNotation::Numbers,
            include_location: true,
            include_advances: true,
            rbi_notes: true,
            fallbacks: BTreeMap::new(),
        }
    }
}

impl TranslatorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: choose the fielder notation
    pub fn with_fielder_notation(mut self, notation: FielderNotation) -> Self {
        self.fielder_notation = notation;
        self
    }

    /// Builder method: enable or disable location phrases
    pub fn with_location(mut self, enabled: bool) -> Self {
        self.include_location = enabled;
        self
    }

    /// Builder method: enable or disable runner phrases
    pub fn with_advances(mut self, enabled: bool) -> Self {
        self.include_advances = enabled;
        self
    }

    /// Builder method: enable or disable RBI notes
    pub fn with_rbi_notes(mut self, enabled: bool) -> Self {
        self.rbi_notes = enabled;
        self
    }

    /// Builder method: add a fixed description for an unrecognized code
    pub fn add_fallback(mut self, code: impl Into<String>, description: impl Into<String>) -> Self {
        self.fallbacks.insert(code.into(), description.into());
        self
    }

    /// Look up the fallback description for a raw code
    pub fn fallback_for(&self, code: &str) -> Option<&str> {
        self.fallbacks.get(code.trim()).map(String::as_str)
    }
}
