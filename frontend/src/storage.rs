//! Browser-local storage port.
//!
//! Implements the shared [`StoragePort`] over `window.localStorage`. Every
//! failure path (no window, storage disabled, quota exceeded) degrades to
//! a no-op; persistence is a convenience, never a requirement.

use leptos::logging::warn;
use nuzlog_types::{CollapseStore, StoragePort};

pub struct BrowserStorage;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl StoragePort for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        let Some(s) = local_storage() else {
            return;
        };
        if s.set_item(key, value).is_err() {
            warn!("localStorage write failed for {key} (quota?)");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(s) = local_storage() {
            let _ = s.remove_item(key);
        }
    }
}

/// The collapse-state store every toggle goes through, so persisted state
/// and rendered state cannot drift apart.
pub fn collapse_store() -> CollapseStore<BrowserStorage> {
    CollapseStore::new(BrowserStorage)
}
