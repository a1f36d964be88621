use web_sys::Storage;

use convo_session::{SessionHandle, SessionStore, StoreError};
use convo_types::SESSION_STORAGE_KEY;

/// Conversation handle kept in the tab's `sessionStorage`, so it survives
/// reloads but not closing the tab.
pub struct BrowserSessionStore {
    key: String,
}

impl BrowserSessionStore {
    pub fn new() -> Self {
        Self::with_key(SESSION_STORAGE_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Result<Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError("No window object".to_string()))?
            .session_storage()
            .map_err(|e| StoreError(format!("{:?}", e)))?
            .ok_or_else(|| StoreError("no sessionStorage in this window".to_string()))
    }
}

impl Default for BrowserSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for BrowserSessionStore {
    fn load(&self) -> Option<SessionHandle> {
        let storage = match self.storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::warn!("{}", e);
                return None;
            }
        };

        storage
            .get_item(&self.key)
            .ok()
            .flatten()
            .and_then(SessionHandle::new)
    }

    fn save(&self, handle: &SessionHandle) -> Result<(), StoreError> {
        self.storage()?
            .set_item(&self.key, handle.as_str())
            .map_err(|e| StoreError(format!("Failed to save {}: {:?}", self.key, e)))
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(&self.key)
            .map_err(|e| StoreError(format!("Failed to remove {}: {:?}", self.key, e)))
    }
}
