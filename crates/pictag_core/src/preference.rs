//! Persisted display preferences.
//!
//! Only one preference exists: whether dark mode is on. It is stored as the
//! literal string `"true"` or `"false"` so the value stays readable by hand in
//! browser devtools.

use std::collections::HashMap;

use crate::constants::DARK_MODE_KEY;
use crate::error::ClientError;

/// Minimal string key-value storage (localStorage in the browser).
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, ClientError>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError>;
}

/// In-memory store used by the native front-end and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Holds the current dark mode flag and mirrors it into storage.
pub struct PreferenceStore {
    store: Box<dyn KeyValueStore>,
    dark_mode: bool,
}

impl PreferenceStore {
    /// Wrap a store. The flag starts in light mode until `restore` is called.
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            dark_mode: false,
        }
    }

    /// Current dark mode flag.
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Read the persisted flag. Dark mode is on only if the stored value is
    /// exactly `"true"`; a missing value or a storage failure means light mode.
    pub fn restore(&mut self) -> bool {
        self.dark_mode = match self.store.get(DARK_MODE_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                log::warn!("Ignoring unreadable dark mode preference: {}", e);
                false
            }
        };
        log::debug!("Restored dark mode = {}", self.dark_mode);
        self.dark_mode
    }

    /// Flip the flag, persist it and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        let value = if self.dark_mode { "true" } else { "false" };
        if let Err(e) = self.store.set(DARK_MODE_KEY, value) {
            log::warn!("Failed to persist dark mode preference: {}", e);
        }
        self.dark_mode
    }

    /// Read the raw persisted value (mainly for diagnostics).
    pub fn persisted(&self) -> Option<String> {
        self.store.get(DARK_MODE_KEY).ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, ClientError> {
            Err(ClientError::storage("quota exceeded"))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), ClientError> {
            Err(ClientError::storage("quota exceeded"))
        }
    }

    fn store_with(value: Option<&str>) -> PreferenceStore {
        let mut store = MemoryStore::new();
        if let Some(value) = value {
            store.set(DARK_MODE_KEY, value).unwrap();
        }
        PreferenceStore::new(Box::new(store))
    }

    #[test]
    fn test_restore_defaults_to_light() {
        let mut prefs = store_with(None);
        assert!(!prefs.restore());
        assert!(!prefs.dark_mode());
    }

    #[test]
    fn test_restore_requires_exact_true() {
        assert!(store_with(Some("true")).restore());
        assert!(!store_with(Some("false")).restore());
        assert!(!store_with(Some("TRUE")).restore());
        assert!(!store_with(Some("1")).restore());
    }

    #[test]
    fn test_toggle_twice_round_trips() {
        for initial in [None, Some("true"), Some("false")] {
            let mut prefs = store_with(initial);
            let original = prefs.restore();

            let first = prefs.toggle();
            assert_eq!(first, !original);
            assert_eq!(prefs.persisted().as_deref(), Some(if first { "true" } else { "false" }));

            let second = prefs.toggle();
            assert_eq!(second, original);
            assert_eq!(prefs.dark_mode(), original);
            assert_eq!(
                prefs.persisted().as_deref(),
                Some(if second { "true" } else { "false" })
            );
        }
    }

    #[test]
    fn test_storage_failures_are_ignored() {
        let mut prefs = PreferenceStore::new(Box::new(BrokenStore));
        assert!(!prefs.restore());
        assert!(prefs.toggle());
        assert!(prefs.dark_mode());
        assert_eq!(prefs.persisted(), None);
    }
}
