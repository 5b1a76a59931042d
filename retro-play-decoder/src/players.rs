//! Player-ID to display-name lookup

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps Retrosheet player IDs (`troum001`) to display names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerDirectory {
    names: BTreeMap<String, String>,
}

impl PlayerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a player's name
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    /// Builder method: add a player
    pub fn with_player(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.insert(id, name);
        self
    }

    pub fn name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// The player's name, or the ID itself when unknown
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.name(id).unwrap_or(id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(String, String)> for PlayerDirectory {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        let players = PlayerDirectory::new().with_player("troum001", "Mike Trout");
        assert_eq!(players.name("troum001"), Some("Mike Trout"));
        assert_eq!(players.display_name("troum001"), "Mike Trout");
        assert_eq!(players.display_name("ohtas001"), "ohtas001");
        assert_eq!(players.len(), 1);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let players = PlayerDirectory::new().with_player("troum001", "Mike Trout");
        let json = serde_json::to_string(&players).unwrap();
        assert_eq!(json, r#"{"troum001":"Mike Trout"}"#);
    }
}
