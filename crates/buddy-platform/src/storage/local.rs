//! `window.localStorage` backend.
//! Persistent across page reloads, scoped to the page origin.

use wasm_bindgen::JsValue;
use web_sys::Storage;

use buddy_core::ports::KeyValueStore;
use buddy_types::{BuddyError, Result};

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Fails outside a browser window, or when storage access is blocked
    /// (e.g. some private-browsing modes).
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| BuddyError::Storage("No window object".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| BuddyError::Storage("localStorage not available".to_string()))?;

        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        // Throws QuotaExceededError when the origin's budget is used up
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(js_error)
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}

fn js_error(e: JsValue) -> BuddyError {
    BuddyError::Storage(format!("{:?}", e))
}
