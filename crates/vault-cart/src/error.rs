//! Cart error types.
//!
//! The engine itself never surfaces these to its callers; they flow out of
//! the lower-level codec and inspection functions only.

use thiserror::Error;
use vault_store::StoreError;

/// Errors produced while decoding, encoding or inspecting persisted carts.
#[derive(Error, Debug)]
pub enum CartError {
    /// Stored value is not valid JSON, or an envelope failed to serialize.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The persistence store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Stored JSON is neither an envelope object nor a bare array.
    #[error("Unsupported cart shape: {0}")]
    UnsupportedShape(String),
}
