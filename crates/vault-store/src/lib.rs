//! Key-value persistence for AccVault client state.
//!
//! The storefront keeps small pieces of client state (the shopping cart
//! above all) in a string key-value slot that survives reloads. This crate
//! defines that slot as the [`PersistenceStore`] trait and ships the
//! backends used across the workspace:
//!
//! - [`MemoryStore`]: shared in-process map, with quota and outage knobs for tests
//! - [`FileStore`]: one file per key under a directory, atomic writes
//! - `SpinStore`: Spin's Key-Value Store (`wasm32` only)
//!
//! # Example
//!
//! ```rust
//! use vault_store::{MemoryStore, PersistenceStore};
//!
//! let store = MemoryStore::new();
//! store.set("accvaultng_cart", "[]").unwrap();
//! assert_eq!(store.get("accvaultng_cart").unwrap().as_deref(), Some("[]"));
//!
//! store.delete("accvaultng_cart").unwrap();
//! assert!(!store.exists("accvaultng_cart").unwrap());
//! ```

mod error;
mod file;
mod memory;
#[cfg(target_arch = "wasm32")]
mod spin;
mod store;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(target_arch = "wasm32")]
pub use spin::SpinStore;
pub use store::{validate_key, PersistenceStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, MemoryStore, PersistenceStore, StoreError};
}
