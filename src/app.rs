//! Calculator session state
//!
//! Owns the settings, history, RNG and storage. Shells (DOM or terminal)
//! call into this and render what it exposes.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::calc::{self, Expression, GenerateError, OPERATIONS};
use crate::export::history_to_csv;
use crate::history::{History, HistoryEntry};
use crate::platform::KeyValueStore;
use crate::settings::Settings;

/// Calculator instance holding all state
pub struct App<S: KeyValueStore> {
    storage: S,
    settings: Settings,
    history: History,
    rng: Pcg32,
    /// Expression currently on screen
    current: Expression,
}

impl<S: KeyValueStore> App<S> {
    /// Load persisted state and draw the startup values
    pub fn new(storage: S, seed: u64) -> Result<Self, GenerateError> {
        let settings = Settings::load(&storage);
        let history = History::load(&storage);
        let mut rng = Pcg32::seed_from_u64(seed);

        let init = calc::initial_values(settings.max_number, || rng.random::<f64>())?;
        let current = calc::evaluate(
            &OPERATIONS,
            init.random_value,
            init.operand_a,
            init.operand_b,
        )?;

        log::info!(
            "Calculator ready (max {}, {} history entries)",
            settings.max_number,
            history.len()
        );

        Ok(Self {
            storage,
            settings,
            history,
            rng,
            current,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current(&self) -> &Expression {
        &self.current
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Generate a new expression and record it in the history
    pub fn generate_new(
        &mut self,
        now_ms: u64,
        timestamp: String,
    ) -> Result<&HistoryEntry, GenerateError> {
        let rng = &mut self.rng;
        let expression =
            calc::generate(self.settings.max_number, &OPERATIONS, || rng.random::<f64>())?;
        self.current = expression;
        Ok(self
            .history
            .record(&expression, now_ms, timestamp, &mut self.storage))
    }

    /// Update the operand bound (clamped) and persist it
    pub fn set_max_number(&mut self, value: u32) {
        self.settings.set_max_number(value);
        self.settings.save(&mut self.storage);
    }

    /// Flip dark mode and persist it
    pub fn toggle_dark_mode(&mut self) -> bool {
        let dark = self.settings.toggle_dark_mode();
        self.settings.save(&mut self.storage);
        dark
    }

    pub fn clear_history(&mut self) {
        self.history.clear(&mut self.storage);
    }

    /// The history as CSV text
    pub fn export_csv(&self) -> String {
        history_to_csv(self.history.entries())
    }
}
