//! User preferences persisted in their own storage slots.
//!
//! Loads never fail: a missing, unreadable, or unrecognized slot falls
//! back to the default so a bad preference cannot take the tracker down.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::currency::Currency;
use crate::errors::Result;
use crate::storage::{StorageBackend, CURRENCY_SLOT, THEME_SLOT};

/// Light or dark presentation theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Theme> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preferred currency: the default for new transactions and the fallback
/// for imports that omit one.
pub fn load_currency(storage: &dyn StorageBackend) -> Currency {
    load_slot(storage, CURRENCY_SLOT)
}

pub fn save_currency(storage: &dyn StorageBackend, currency: Currency) -> Result<()> {
    save_slot(storage, CURRENCY_SLOT, &currency)
}

pub fn load_theme(storage: &dyn StorageBackend) -> Theme {
    load_slot(storage, THEME_SLOT)
}

pub fn save_theme(storage: &dyn StorageBackend, theme: Theme) -> Result<()> {
    save_slot(storage, THEME_SLOT, &theme)
}

fn load_slot<T: DeserializeOwned + Default>(storage: &dyn StorageBackend, slot: &str) -> T {
    let raw = match storage.read(slot) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(err) => {
            warn!(slot, %err, "settings slot unreadable, using default");
            return T::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(slot, %err, "settings slot unrecognized, using default");
            T::default()
        }
    }
}

fn save_slot<T: Serialize>(storage: &dyn StorageBackend, slot: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    storage.write(slot, &json)
}

#[cfg(test)]
mod tests {
    use crate::storage::MemoryStorage;

    use super::*;

    #[test]
    fn missing_slots_fall_back_to_defaults() {
        let storage = MemoryStorage::new();
        assert_eq!(load_currency(&storage), Currency::Inr);
        assert_eq!(load_theme(&storage), Theme::Light);
    }

    #[test]
    fn saved_preferences_round_trip() {
        let storage = MemoryStorage::new();
        save_currency(&storage, Currency::Usd).expect("save currency");
        save_theme(&storage, Theme::Dark).expect("save theme");
        assert_eq!(load_currency(&storage), Currency::Usd);
        assert_eq!(load_theme(&storage), Theme::Dark);
    }

    #[test]
    fn slots_store_plain_json_strings() {
        let storage = MemoryStorage::new();
        save_currency(&storage, Currency::Eur).expect("save currency");
        assert_eq!(
            storage.read(CURRENCY_SLOT).expect("read"),
            Some("\"EUR\"".to_string())
        );
    }

    #[test]
    fn unrecognized_slot_content_falls_back_to_defaults() {
        let storage = MemoryStorage::new();
        storage.write(CURRENCY_SLOT, "\"JPY\"").expect("seed");
        storage.write(THEME_SLOT, "midnight").expect("seed");
        assert_eq!(load_currency(&storage), Currency::Inr);
        assert_eq!(load_theme(&storage), Theme::Light);
    }

    #[test]
    fn theme_labels_parse_back() {
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse(" LIGHT "), Some(Theme::Light));
        assert_eq!(Theme::parse("midnight"), None);
        assert_eq!(Theme::Dark.to_string(), "dark");
    }
}
