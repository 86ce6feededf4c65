//! The persistence store contract.

use std::sync::Arc;

use crate::StoreError;

/// A synchronous string key-value slot.
///
/// Mirrors the browser's local storage: `get`/`set`/`delete` on string keys
/// and string values. Callers that treat persistence as best-effort are
/// expected to log and swallow the errors; backends must not panic.
pub trait PersistenceStore {
    /// Get the value stored under `key`.
    ///
    /// Returns `None` if the key doesn't exist.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: PersistenceStore + ?Sized> PersistenceStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        (**self).exists(key)
    }
}

impl<S: PersistenceStore + ?Sized> PersistenceStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        (**self).exists(key)
    }
}

impl<S: PersistenceStore + ?Sized> PersistenceStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        (**self).exists(key)
    }
}

/// Check that a key only uses `[A-Za-z0-9._:-]` and is non-empty.
///
/// Every backend accepts these keys; `FileStore` escapes `_` and `:` in
/// file names.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | ':'));

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("accvaultng_cart").is_ok());
        assert!(validate_key("accvaultng:cart:v1.0").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("..").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("cart key").is_err());
    }

    #[test]
    fn test_shared_handles_see_same_data() {
        let store = Arc::new(MemoryStore::new());
        let by_ref: &MemoryStore = &store;
        let boxed: Box<dyn PersistenceStore> = Box::new(store.clone());

        by_ref.set("k", "v").unwrap();
        assert_eq!(boxed.get("k").unwrap().as_deref(), Some("v"));
        assert!(store.exists("k").unwrap());

        boxed.delete("k").unwrap();
        assert!(!by_ref.exists("k").unwrap());
    }
}
