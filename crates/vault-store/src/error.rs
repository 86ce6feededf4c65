//! Store error types.

use thiserror::Error;

/// Errors that can occur when talking to a persistence store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Storage is switched off or not reachable (private browsing, disabled backend).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the store's capacity.
    #[error("Quota exceeded writing {key}: needs {needed} bytes, limit is {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    /// Filesystem failure in a durable backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key contains characters the backend cannot address.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Any other backend failure.
    #[error("Store operation failed: {0}")]
    Backend(String),
}
