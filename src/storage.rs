//! localStorage-backed key-value store.

use pictag_core::{ClientError, KeyValueStore};
use web_sys::Storage;

/// Browser localStorage. Missing or blocked storage behaves like an
/// always-failing store, which callers treat as "nothing saved".
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    /// Open the window's localStorage, if the browser allows it.
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|window| match window.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::warn!("localStorage access error: {:?}", e);
                None
            }
        });
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, ClientError> {
        self.storage
            .as_ref()
            .ok_or_else(|| ClientError::storage("localStorage not available"))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| ClientError::storage(format!("Failed to read '{}': {:?}", key, e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| ClientError::storage(format!("Failed to write '{}': {:?}", key, e)))
    }
}
