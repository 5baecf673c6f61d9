//! Browser localStorage
//!
//! Storage can be missing (privacy modes, sandboxed frames) or refuse
//! writes when full; both are treated as "nothing stored".

use taskflow_core::KeyValueStore;
use web_sys::Storage;

#[derive(Clone, Debug, Default)]
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = crate::dom::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            tracing::debug!("localStorage unavailable, drafts and theme will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if storage.set_item(key, value).is_err() {
                tracing::debug!(key, "localStorage write refused");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.remove_item(key);
        }
    }
}
