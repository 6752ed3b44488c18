//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, JSON files natively)
//! - Time (entry ids and display timestamps)

pub mod storage;
pub mod time;

pub use storage::{KeyValueStore, MemoryStore, StorageError};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
