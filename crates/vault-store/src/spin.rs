//! Spin Key-Value Store backend.

use spin_sdk::key_value::Store;

use crate::{PersistenceStore, StoreError};

/// Store backed by Spin's Key-Value Store.
///
/// Values are kept as UTF-8 bytes.
pub struct SpinStore {
    store: Store,
}

impl SpinStore {
    /// Open the default Key-Value store.
    pub fn open_default() -> Result<Self, StoreError> {
        let store = Store::open_default().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self { store })
    }

    /// Open a named Key-Value store.
    pub fn open(name: &str) -> Result<Self, StoreError> {
        let store = Store::open(name).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self { store })
    }
}

impl PersistenceStore for SpinStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.store.get(key) {
            Ok(Some(bytes)) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| StoreError::Backend(format!("value for {key} is not UTF-8: {e}"))),
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.store
            .set(key, value.as_bytes())
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.store
            .delete(key)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.store
            .exists(key)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}
