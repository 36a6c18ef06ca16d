pub mod json_backend;

use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::{Result, TrackerError};

pub use json_backend::JsonFileStorage;

/// Slot holding the serialized transaction list.
pub const TRANSACTIONS_SLOT: &str = "transactions";
/// Slot holding the preferred currency code.
pub const CURRENCY_SLOT: &str = "currency";
/// Slot holding the presentation theme.
pub const THEME_SLOT: &str = "theme";

/// Abstraction over persistence backends storing named string slots.
///
/// Readers treat a missing slot as "never written"; writers replace the
/// whole slot content.
pub trait StorageBackend: Send + Sync {
    fn read(&self, slot: &str) -> Result<Option<String>>;
    fn write(&self, slot: &str, data: &str) -> Result<()>;
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| TrackerError::Persistence("storage mutex poisoned".to_string()))?;
        Ok(slots.get(slot).cloned())
    }

    fn write(&self, slot: &str, data: &str) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| TrackerError::Persistence("storage mutex poisoned".to_string()))?;
        slots.insert(slot.to_string(), data.to_string());
        Ok(())
    }
}
