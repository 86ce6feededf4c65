//! Read-only inspection of the stored cart, for support and debugging.

use chrono::{DateTime, Utc};
use serde::Serialize;
use vault_store::PersistenceStore;

use crate::cart::Cart;
use crate::envelope::{self, CartShape};
use crate::error::CartError;
use crate::money::Money;

/// What a store holds under the cart key.
#[derive(Debug, Clone, Serialize)]
pub struct CartInspection {
    /// Key that was read.
    pub key: String,
    /// Raw stored value.
    pub raw: Option<String>,
    /// Decoded view, when the value parsed.
    pub parsed: Option<ParsedCart>,
    /// Decode failure, when it did not.
    pub parse_error: Option<String>,
}

/// Decoded summary of a stored cart.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedCart {
    /// Stored layout.
    pub shape: CartShape,
    /// Cart as the engine would hydrate it.
    pub cart: Cart,
    /// Distinct line items.
    pub line_items: usize,
    /// Sum of quantities.
    pub items_count: i64,
    /// Sum of price times quantity.
    pub total: Money,
    /// Stored schema tag.
    pub version: Option<String>,
    /// Stored write time.
    pub last_updated: Option<DateTime<Utc>>,
    /// Rows that could not be read.
    pub skipped: usize,
}

impl CartInspection {
    /// Check if nothing is stored under the key.
    pub fn is_missing(&self) -> bool {
        self.raw.is_none()
    }
}

/// Inspect the value stored under `key`.
///
/// Unlike hydration this reports store failures to the caller; a value
/// that does not parse is reported in `parse_error`.
pub fn inspect<S: PersistenceStore + ?Sized>(store: &S, key: &str) -> Result<CartInspection, CartError> {
    let raw = store.get(key)?;

    let (parsed, parse_error) = match raw.as_deref().map(envelope::decode) {
        None => (None, None),
        Some(Ok(decoded)) => {
            let cart = Cart::from_items(decoded.items);
            let parsed = ParsedCart {
                shape: decoded.shape,
                line_items: cart.unique_item_count(),
                items_count: cart.items_count(),
                total: cart.total(),
                cart,
                version: decoded.version,
                last_updated: decoded.last_updated,
                skipped: decoded.skipped,
            };
            (Some(parsed), None)
        }
        Some(Err(e)) => (None, Some(e.to_string())),
    };

    Ok(CartInspection {
        key: key.to_string(),
        raw,
        parsed,
        parse_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::CART_STORAGE_KEY;
    use vault_store::{MemoryStore, StoreError};

    #[test]
    fn test_inspect_missing() {
        let store = MemoryStore::new();
        let report = inspect(&store, CART_STORAGE_KEY).unwrap();
        assert!(report.is_missing());
        assert!(report.parsed.is_none());
        assert!(report.parse_error.is_none());
    }

    #[test]
    fn test_inspect_envelope() {
        let store = MemoryStore::new();
        store.raw_insert(
            CART_STORAGE_KEY,
            r#"{"items":[{"id":"a","price":100,"quantity":2},{"id":"b","price":50,"quantity":3}],
                "version":"1.0","lastUpdated":"2026-10-19T08:00:00Z"}"#,
        );

        let parsed = inspect(&store, CART_STORAGE_KEY).unwrap().parsed.unwrap();
        assert_eq!(parsed.shape, CartShape::Envelope);
        assert_eq!(parsed.line_items, 2);
        assert_eq!(parsed.items_count, 5);
        assert_eq!(parsed.total, Money::from_major_units(350));
        assert!(parsed.last_updated.is_some());
    }

    #[test]
    fn test_inspect_corrupt() {
        let store = MemoryStore::new();
        store.raw_insert(CART_STORAGE_KEY, "{not json");

        let report = inspect(&store, CART_STORAGE_KEY).unwrap();
        assert_eq!(report.raw.as_deref(), Some("{not json"));
        assert!(report.parsed.is_none());
        assert!(report.parse_error.unwrap().starts_with("JSON error"));
    }

    #[test]
    fn test_inspect_reports_store_failure() {
        let store = MemoryStore::disabled();
        let err = inspect(&store, CART_STORAGE_KEY).unwrap_err();
        assert!(matches!(err, CartError::Store(StoreError::Unavailable(_))));
    }
}
