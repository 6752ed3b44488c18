//! User preferences
//!
//! Persisted separately from the history in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAX_NUMBER, MAX_NUMBER_RANGE, SETTINGS_STORAGE_KEY};
use crate::persistence::{load_json, save_json};
use crate::platform::KeyValueStore;

/// Calculator settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Upper bound for generated operands (slider value)
    pub max_number: u32,
    /// Dark color scheme
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_number: DEFAULT_MAX_NUMBER,
            dark_mode: false,
        }
    }
}

impl Settings {
    /// Set the operand bound, clamped to the slider range
    pub fn set_max_number(&mut self, value: u32) {
        self.max_number = value.clamp(*MAX_NUMBER_RANGE.start(), *MAX_NUMBER_RANGE.end());
    }

    /// Flip dark mode, returning the new state
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    /// Load settings from storage, falling back to defaults
    pub fn load<S: KeyValueStore + ?Sized>(storage: &S) -> Self {
        match load_json::<Settings, S>(storage, SETTINGS_STORAGE_KEY) {
            Ok(Some(mut settings)) => {
                // Stored values may predate the current range
                let max = settings.max_number;
                settings.set_max_number(max);
                log::info!("Loaded settings from storage");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to storage; failures are logged and ignored
    pub fn save<S: KeyValueStore + ?Sized>(&self, storage: &mut S) {
        match save_json(storage, SETTINGS_STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::error!("Failed to save settings: {}", e),
        }
    }
}
