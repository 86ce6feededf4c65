//! Catalog stock figures.
//!
//! The backend owns inventory: each product listing has a pool of account
//! credentials and reports how many are still unsold. The cart only ever
//! receives that number; it never reserves or decrements anything.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// Stock figures for one product, as reported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StockLevel {
    /// Unsold credentials.
    #[serde(rename = "availableCredentialsCount", default)]
    pub available: i64,
    /// All credentials ever loaded for the product.
    #[serde(rename = "totalCredentialsCount", default)]
    pub total: i64,
}

impl StockLevel {
    /// Create a stock level.
    pub fn new(available: i64, total: i64) -> Self {
        Self { available, total }
    }
}

/// Read-only source of stock figures.
pub trait Catalog {
    /// Stock for a product, `None` if the catalog does not list it.
    fn stock_level(&self, product_id: &ProductId) -> Option<StockLevel>;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn stock_level(&self, product_id: &ProductId) -> Option<StockLevel> {
        (**self).stock_level(product_id)
    }
}

/// Catalog held in memory, filled from a listing response or by tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    levels: HashMap<ProductId, StockLevel>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stock for a product.
    pub fn insert(&mut self, product_id: impl Into<ProductId>, level: StockLevel) {
        self.levels.insert(product_id.into(), level);
    }

    /// Builder form of [`InMemoryCatalog::insert`].
    pub fn with(mut self, product_id: impl Into<ProductId>, level: StockLevel) -> Self {
        self.insert(product_id, level);
        self
    }
}

impl Catalog for InMemoryCatalog {
    fn stock_level(&self, product_id: &ProductId) -> Option<StockLevel> {
        self.levels.get(product_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_level_from_listing_json() {
        let level: StockLevel =
            serde_json::from_str(r#"{"availableCredentialsCount":3,"totalCredentialsCount":5}"#)
                .unwrap();
        assert_eq!(level, StockLevel::new(3, 5));

        let missing: StockLevel = serde_json::from_str("{}").unwrap();
        assert_eq!(missing, StockLevel::default());
    }

    #[test]
    fn test_in_memory_catalog() {
        let mut catalog = InMemoryCatalog::new().with("p1", StockLevel::new(2, 2));
        let id = ProductId::new("p1");
        assert_eq!(catalog.stock_level(&id), Some(StockLevel::new(2, 2)));

        // A refreshed listing replaces the previous figures
        catalog.insert("p1", StockLevel::new(0, 2));
        assert_eq!(catalog.stock_level(&id).unwrap().available, 0);

        let by_ref: &dyn Catalog = &catalog;
        assert_eq!(by_ref.stock_level(&"ghost".into()), None);
    }
}
