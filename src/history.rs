//! Calculation history
//!
//! Persisted to LocalStorage, keeps the last 10 calculations, newest first.

use serde::{Deserialize, Serialize};

use crate::calc::{Expression, Outcome};
use crate::consts::{HISTORY_STORAGE_KEY, MAX_HISTORY};
use crate::persistence::{load_json, save_json};
use crate::platform::KeyValueStore;

/// One recorded calculation
///
/// Field names on disk match the layout older saves were written with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation time in ms, strictly increasing within a history
    pub id: u64,
    #[serde(rename = "getal1")]
    pub operand_a: u32,
    #[serde(rename = "getal2")]
    pub operand_b: u32,
    #[serde(rename = "operation")]
    pub operation_name: String,
    #[serde(rename = "symbol")]
    pub operation_symbol: String,
    pub result: Outcome,
    /// Local wall-clock time, e.g. `14:30:25`
    pub timestamp: String,
}

impl HistoryEntry {
    pub fn from_expression(expression: &Expression, id: u64, timestamp: String) -> Self {
        Self {
            id,
            operand_a: expression.operand_a,
            operand_b: expression.operand_b,
            operation_name: expression.operation.name.to_string(),
            operation_symbol: expression.operation.symbol.to_string(),
            result: expression.result,
            timestamp,
        }
    }

    /// `a sym b = result`
    pub fn expression_text(&self) -> String {
        format!(
            "{} {} {} = {}",
            self.operand_a, self.operation_symbol, self.operand_b, self.result
        )
    }
}

/// Bounded calculation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Entries, newest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    /// Put an entry in front, dropping whatever falls past the limit
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY);
    }

    /// Id for a new entry created at `now_ms`
    pub fn next_id(&self, now_ms: u64) -> u64 {
        match self.latest() {
            Some(latest) => now_ms.max(latest.id.saturating_add(1)),
            None => now_ms,
        }
    }

    /// Record an expression, then flush to storage
    pub fn record<S: KeyValueStore + ?Sized>(
        &mut self,
        expression: &Expression,
        now_ms: u64,
        timestamp: String,
        storage: &mut S,
    ) -> &HistoryEntry {
        let id = self.next_id(now_ms);
        self.push(HistoryEntry::from_expression(expression, id, timestamp));
        self.save(storage);
        &self.entries[0]
    }

    /// Drop every entry, then flush to storage
    pub fn clear<S: KeyValueStore + ?Sized>(&mut self, storage: &mut S) {
        self.entries.clear();
        self.save(storage);
    }

    /// Load history from storage; empty if missing or unreadable
    pub fn load<S: KeyValueStore + ?Sized>(storage: &S) -> Self {
        match load_json::<History, S>(storage, HISTORY_STORAGE_KEY) {
            Ok(Some(mut history)) => {
                history.entries.truncate(MAX_HISTORY);
                log::info!("Loaded {} history entries", history.len());
                history
            }
            Ok(None) => {
                log::info!("No history found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::error!("Failed to load history, resetting: {}", e);
                Self::new()
            }
        }
    }

    /// Write history to storage; failures are logged and ignored
    pub fn save<S: KeyValueStore + ?Sized>(&self, storage: &mut S) {
        match save_json(storage, HISTORY_STORAGE_KEY, self) {
            Ok(()) => log::info!("History saved ({} entries)", self.len()),
            Err(e) => log::error!("Failed to save history: {}", e),
        }
    }
}
