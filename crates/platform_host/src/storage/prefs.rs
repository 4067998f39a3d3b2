//! Lightweight preference storage contracts and adapters.
//!
//! Preference access is synchronous: every backing store in this workspace (browser
//! `localStorage`, in-memory maps) answers immediately, and the single consumer — the theme
//! slot — requires read-then-apply without yielding to an executor.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Store for lightweight preference values (raw strings stored per key).
pub trait PrefsStore {
    /// Loads the raw value for a preference key. Backend read failures fold into `None`.
    fn load_pref(&self, key: &str) -> Option<String>;

    /// Saves a raw value for a preference key, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store rejects the write.
    fn save_pref(&self, key: &str, value: &str) -> Result<(), String>;

    /// Deletes a preference key.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store rejects the delete.
    fn delete_pref(&self, key: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op preference store for unsupported targets and baseline tests.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref(&self, _key: &str) -> Option<String> {
        None
    }

    fn save_pref(&self, _key: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn delete_pref(&self, _key: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store keyed by string. Clones share the same backing map.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    fn save_pref(&self, key: &str, value: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete_pref(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_overwrites() {
        let store = MemoryPrefsStore::default();
        assert_eq!(store.load_pref("preferred-theme"), None);

        store.save_pref("preferred-theme", "light").expect("save");
        assert_eq!(
            store.load_pref("preferred-theme"),
            Some("light".to_string())
        );

        store.save_pref("preferred-theme", "dark").expect("overwrite");
        assert_eq!(store.load_pref("preferred-theme"), Some("dark".to_string()));

        store.delete_pref("preferred-theme").expect("delete");
        assert_eq!(store.load_pref("preferred-theme"), None);
    }

    #[test]
    fn memory_store_clones_share_one_backing_map() {
        let store = MemoryPrefsStore::default();
        let alias = store.clone();
        store.save_pref("preferred-theme", "light").expect("save");
        assert_eq!(alias.load_pref("preferred-theme"), Some("light".to_string()));
    }

    #[test]
    fn noop_store_accepts_every_operation() {
        let store = NoopPrefsStore;
        assert_eq!(store.load_pref("key"), None);
        store.save_pref("key", "value").expect("save");
        store.delete_pref("key").expect("delete");
    }
}
