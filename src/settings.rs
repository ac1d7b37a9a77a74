//! Player preferences
//!
//! Persisted as separate string keys so each one falls back on its own.

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::persistence::{KeyValueStore, keys, read_lossy, write_lossy};

/// Game settings/preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Play sound effects
    pub sound_enabled: bool,
    /// Active difficulty preset
    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            difficulty: Difficulty::Normal,
        }
    }
}

/// Parse a persisted boolean ("true"/"1", "false"/"0"), else `default`
fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value.map(|v| v.trim().to_lowercase()) {
        Some(v) if v == "false" || v == "0" => false,
        Some(v) if v == "true" || v == "1" => true,
        _ => default,
    }
}

impl Settings {
    /// Load settings, using defaults for anything missing or malformed
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let defaults = Self::default();
        let sound = read_lossy(store, keys::SOUND_ENABLED);
        let difficulty = read_lossy(store, keys::DIFFICULTY);
        let settings = Self {
            sound_enabled: parse_flag(sound.as_deref(), defaults.sound_enabled),
            difficulty: Difficulty::from_str_or_default(difficulty.as_deref()),
        };
        log::info!(
            "Settings loaded: sound {}, difficulty {}",
            if settings.sound_enabled { "on" } else { "off" },
            settings.difficulty.as_str()
        );
        settings
    }

    pub fn save_sound<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        let value = if self.sound_enabled { "true" } else { "false" };
        write_lossy(store, keys::SOUND_ENABLED, value);
    }

    pub fn save_difficulty<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        write_lossy(store, keys::DIFFICULTY, self.difficulty.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, UnavailableStore};

    #[test]
    fn test_defaults_when_empty() {
        let settings = Settings::load(&MemoryStore::new());
        assert_eq!(settings, Settings::default());
        assert!(settings.sound_enabled);
        assert_eq!(settings.difficulty, Difficulty::Normal);
    }

    #[test]
    fn test_defaults_when_unavailable() {
        assert_eq!(Settings::load(&UnavailableStore), Settings::default());
    }

    #[test]
    fn test_reads_persisted_values() {
        let store = MemoryStore::with_values([
            (keys::SOUND_ENABLED, "false"),
            (keys::DIFFICULTY, "hard"),
        ]);
        let settings = Settings::load(&store);
        assert!(!settings.sound_enabled);
        assert_eq!(settings.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let store = MemoryStore::with_values([
            (keys::SOUND_ENABLED, "maybe"),
            (keys::DIFFICULTY, "impossible"),
        ]);
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_save_round_trip() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            sound_enabled: false,
            difficulty: Difficulty::Easy,
        };
        settings.save_sound(&mut store);
        settings.save_difficulty(&mut store);
        assert_eq!(store.get(keys::SOUND_ENABLED).unwrap().as_deref(), Some("false"));
        assert_eq!(Settings::load(&store), settings);
    }
}
