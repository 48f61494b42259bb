use log::{debug, error, warn};
use serde::{Deserialize, Deserializer, Serialize};

use crate::game::stats::{null_as_default, GameModes, WORD_LENGTHS};
use crate::storage::{SharedStore, SETTINGS_NAMESPACE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_word_length", deserialize_with = "word_length_or_default")]
    pub word_length: usize,

    #[serde(default, deserialize_with = "null_as_default")]
    pub hard_mode: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub count_mode: bool,
}

fn default_word_length() -> usize {
    5
}

fn word_length_or_default<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<usize>::deserialize(deserializer)?.unwrap_or_else(default_word_length))
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            word_length: default_word_length(),
            hard_mode: false,
            count_mode: false,
        }
    }
}

impl Settings {
    pub fn is_valid_word_length(len: usize) -> bool {
        WORD_LENGTHS.contains(&len)
    }

    pub fn modes(&self) -> GameModes {
        GameModes::new(self.hard_mode, self.count_mode)
    }
}

/// Owns the user's game configuration and writes it back on every change.
pub struct SettingsStore {
    store: SharedStore,
    settings: Settings,
}

impl SettingsStore {
    pub fn new(store: SharedStore) -> Self {
        let settings = Self::load(&store);
        Self { store, settings }
    }

    fn load(store: &SharedStore) -> Settings {
        let value = match store.load(SETTINGS_NAMESPACE) {
            Ok(Some(value)) => value,
            Ok(None) => return Settings::default(),
            Err(e) => {
                warn!("settings: failed to load {}: {} (using defaults)", SETTINGS_NAMESPACE, e);
                return Settings::default();
            }
        };
        match serde_json::from_value::<Settings>(value) {
            Ok(mut settings) => {
                if !Settings::is_valid_word_length(settings.word_length) {
                    warn!(
                        "settings: stored word length {} not playable, using {}",
                        settings.word_length,
                        default_word_length()
                    );
                    settings.word_length = default_word_length();
                }
                settings
            }
            Err(e) => {
                warn!("settings: malformed record in {}: {} (using defaults)", SETTINGS_NAMESPACE, e);
                Settings::default()
            }
        }
    }

    fn save(&self) {
        let value = match serde_json::to_value(self.settings) {
            Ok(v) => v,
            Err(e) => {
                error!("settings: serialize error: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.save(SETTINGS_NAMESPACE, &value) {
            error!("settings: failed to persist {}: {}", SETTINGS_NAMESPACE, e);
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn word_length(&self) -> usize {
        self.settings.word_length
    }

    pub fn hard_mode(&self) -> bool {
        self.settings.hard_mode
    }

    pub fn count_mode(&self) -> bool {
        self.settings.count_mode
    }

    /// Modes to hand to `StatsManager::record_win` for the current round.
    pub fn modes(&self) -> GameModes {
        self.settings.modes()
    }

    /// Lengths other than 4, 5 and 6 are ignored without an error.
    pub fn set_word_length(&mut self, len: usize) {
        if !Settings::is_valid_word_length(len) {
            debug!("settings: ignoring word length {}", len);
            return;
        }
        self.settings.word_length = len;
        self.save();
    }

    pub fn set_hard_mode(&mut self, enabled: bool) {
        self.settings.hard_mode = enabled;
        self.save();
    }

    pub fn set_count_mode(&mut self, enabled: bool) {
        self.settings.count_mode = enabled;
        self.save();
    }
}
