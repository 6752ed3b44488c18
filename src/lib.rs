//! Expressie Calculator - random arithmetic practice
//!
//! Core modules:
//! - `calc`: Operations, results and the random expression generator
//! - `history`: Bounded, persisted history of past calculations
//! - `export`: CSV export of the history
//! - `settings`: Persisted user preferences
//! - `platform`: Browser/native storage and clock abstraction
//! - `persistence`: JSON load/save over a key-value store
//! - `app`: Session state tying the pieces together

pub mod app;
pub mod calc;
pub mod export;
pub mod history;
pub mod persistence;
pub mod platform;
pub mod settings;

pub use app::App;
pub use calc::{Expression, GenerateError, OPERATIONS, Operation, Outcome, generate};
pub use history::{History, HistoryEntry};
pub use settings::Settings;

/// Application configuration constants
pub mod consts {
    use std::ops::RangeInclusive;

    /// Number of calculations kept in the history
    pub const MAX_HISTORY: usize = 10;

    /// LocalStorage key for the history
    pub const HISTORY_STORAGE_KEY: &str = "calculationHistory";
    /// LocalStorage key for the settings
    pub const SETTINGS_STORAGE_KEY: &str = "calculatorSettings";

    /// Operand bound on first start
    pub const DEFAULT_MAX_NUMBER: u32 = 10;
    /// Slider range for the operand bound
    pub const MAX_NUMBER_RANGE: RangeInclusive<u32> = 5..=100;

    /// Export file name
    pub const EXPORT_FILENAME: &str = "berekeningen.csv";
    /// Export MIME type
    pub const EXPORT_MIME_TYPE: &str = "text/csv;charset=utf-8;";
}
