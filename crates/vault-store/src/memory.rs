//! In-process store shared between handles.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{PersistenceStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
    disabled: bool,
}

impl Inner {
    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    fn check_enabled(&self) -> Result<(), StoreError> {
        if self.disabled {
            return Err(StoreError::Unavailable("memory store is disabled".to_string()));
        }
        Ok(())
    }
}

/// In-memory store.
///
/// Clones share the same underlying map, so two engines built over clones
/// of one `MemoryStore` behave like two page loads against the same browser
/// profile. The quota and disabled switches reproduce the failure modes of
/// browser local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Create an empty store with no quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects writes once keys plus values
    /// would exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        let store = Self::new();
        if let Ok(mut inner) = store.inner.lock() {
            inner.quota_bytes = Some(bytes);
        }
        store
    }

    /// Create a store on which every operation fails with `Unavailable`.
    pub fn disabled() -> Self {
        let store = Self::new();
        store.set_disabled(true);
        store
    }

    /// Switch the outage simulation on or off.
    pub fn set_disabled(&self, disabled: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.disabled = disabled;
        }
    }

    /// Insert a value bypassing quota and outage checks.
    ///
    /// Used to seed legacy or corrupt data.
    pub fn raw_insert(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.entries.insert(key.into(), value.into());
        }
    }

    /// Copy of all entries.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.inner
            .lock()
            .map(|inner| inner.entries.clone())
            .unwrap_or_default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|inner| inner.entries.len()).unwrap_or(0)
    }

    /// Check if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|e| StoreError::Backend(format!("memory store lock poisoned: {e}")))
    }
}

impl PersistenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let inner = self.lock()?;
        inner.check_enabled()?;
        Ok(inner.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.check_enabled()?;

        if let Some(limit) = inner.quota_bytes {
            let needed = inner.used_bytes_without(key) + key.len() + value.len();
            if needed > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.check_enabled()?;
        inner.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.get("cart").unwrap(), None);

        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));

        store.delete("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);

        // Deleting again is fine
        store.delete("cart").unwrap();
    }

    #[test]
    fn test_clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("k", "v").unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn test_quota_rejects_and_keeps_previous_value() {
        let store = MemoryStore::with_quota(10);
        store.set("k", "12345").unwrap();

        let err = store.set("k", "1234567890").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { needed: 11, limit: 10, .. }));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("12345"));
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let store = MemoryStore::with_quota(6);
        store.set("k", "abcde").unwrap();
        // Replacing the value must not count the old one
        store.set("k", "fghij").unwrap();
    }

    #[test]
    fn test_disabled_store_fails_every_operation() {
        let store = MemoryStore::disabled();
        assert!(matches!(store.get("k"), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.set("k", "v"), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.delete("k"), Err(StoreError::Unavailable(_))));

        store.set_disabled(false);
        store.set("k", "v").unwrap();
    }

    #[test]
    fn test_raw_insert_bypasses_checks() {
        let store = MemoryStore::with_quota(1);
        store.raw_insert("cart", "{not json");
        assert_eq!(store.snapshot().get("cart").map(String::as_str), Some("{not json"));
    }
}
