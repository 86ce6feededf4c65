//! The cart aggregate.

use serde::Serialize;
use tracing::debug;

use crate::cart::{CartLineItem, ProductSnapshot};
use crate::ids::ProductId;
use crate::money::Money;

/// A shopping cart.
///
/// Line items are unique by product id and keep insertion order. No line
/// item ever has a quantity below 1: anything that would take it there
/// removes the line item instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored line items, restoring the invariants.
    ///
    /// Rows with a quantity below 1 are dropped. Repeated ids are merged by
    /// summing quantities, keeping the first row's snapshot and position.
    pub fn from_items(items: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity <= 0 {
                debug!(product_id = %item.id(), quantity = item.quantity, "dropping non-positive line item");
                continue;
            }
            cart.add(item.product, item.quantity);
        }
        cart
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Get a line item by product id.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.id() == product_id)
    }

    /// Add `quantity` of a product.
    ///
    /// An existing line item accumulates the quantity and keeps its original
    /// snapshot; otherwise a new line item is appended. Stock limits are the
    /// caller's business (see [`Cart::can_add`]). A quantity below 1 is
    /// ignored. Returns whether the cart changed.
    pub fn add(&mut self, product: ProductSnapshot, quantity: i64) -> bool {
        if quantity <= 0 {
            debug!(product_id = %product.id, quantity, "ignoring add with non-positive quantity");
            return false;
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return true;
        }

        self.items.push(CartLineItem::new(product, quantity));
        true
    }

    /// Set a line item's quantity.
    ///
    /// A quantity of 0 or less removes the line item. Unknown ids are a
    /// no-op. Returns whether the cart changed.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        match self.items.iter_mut().find(|i| i.id() == product_id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove a line item. Returns whether it was present.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.id() != product_id);
        self.items.len() < len_before
    }

    /// Remove every listed product. Returns how many line items went away.
    pub fn remove_many<'a>(&mut self, product_ids: impl IntoIterator<Item = &'a ProductId>) -> usize {
        let ids: Vec<&ProductId> = product_ids.into_iter().collect();
        let len_before = self.items.len();
        self.items.retain(|i| !ids.contains(&i.id()));
        len_before - self.items.len()
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Quantity held for a product, 0 if absent.
    pub fn quantity_of(&self, product_id: &ProductId) -> i64 {
        self.get(product_id).map(|i| i.quantity).unwrap_or(0)
    }

    /// Sum of snapshot price times quantity.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartLineItem::subtotal).sum()
    }

    /// Total item count (sum of quantities).
    pub fn items_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Get number of distinct line items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Stock still purchasable once this cart's quantity is set aside.
    ///
    /// `actual_stock` is the catalog's figure; the result is never negative.
    pub fn effective_available_stock(&self, product_id: &ProductId, actual_stock: i64) -> i64 {
        actual_stock
            .saturating_sub(self.quantity_of(product_id))
            .max(0)
    }

    /// Check whether `requested` more units fit under `actual_stock`.
    pub fn can_add(&self, product_id: &ProductId, actual_stock: i64, requested: i64) -> bool {
        self.quantity_of(product_id).saturating_add(requested) <= actual_stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> ProductSnapshot {
        ProductSnapshot::new(id, format!("Account {id}"), Money::from_major_units(price))
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.items_count(), 0);
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        cart.add(product("p1", 500), 1);
        cart.add(product("p1", 500), 2);

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.quantity_of(&"p1".into()), 3);
        assert_eq!(cart.total(), Money::from_major_units(1500));
    }

    #[test]
    fn test_first_snapshot_wins() {
        let mut cart = Cart::new();
        cart.add(product("p1", 500), 1);
        cart.add(ProductSnapshot::new("p1", "Renamed", Money::from_major_units(900)), 1);

        let item = cart.get(&"p1".into()).unwrap();
        assert_eq!(item.product.title, "Account p1");
        assert_eq!(item.product.price, Money::from_major_units(500));
        assert_eq!(cart.total(), Money::from_major_units(1000));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(product("b", 1), 1);
        cart.add(product("a", 1), 1);
        cart.add(product("b", 1), 1);

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_add_ignores_non_positive_quantity() {
        let mut cart = Cart::new();
        assert!(!cart.add(product("p1", 10), 0));
        assert!(!cart.add(product("p1", 10), -3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_absolute_value() {
        let mut cart = Cart::new();
        cart.add(product("p1", 10), 2);

        assert!(cart.update_quantity(&"p1".into(), 5));
        assert_eq!(cart.quantity_of(&"p1".into()), 5);
        assert!(!cart.update_quantity(&"p1".into(), 5));
    }

    #[test]
    fn test_update_quantity_to_zero_removes() {
        let mut cart = Cart::new();
        cart.add(product("p1", 10), 1);

        assert!(cart.update_quantity(&"p1".into(), 0));
        assert!(cart.get(&"p1".into()).is_none());
        assert_eq!(cart.quantity_of(&"p1".into()), 0);

        cart.add(product("p2", 10), 1);
        assert!(cart.update_quantity(&"p2".into(), -1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_missing_ids_are_no_ops() {
        let mut cart = Cart::new();
        cart.add(product("p1", 10), 1);

        assert!(!cart.update_quantity(&"ghost".into(), 4));
        assert!(!cart.remove(&"ghost".into()));
        assert_eq!(cart.items_count(), 1);
    }

    #[test]
    fn test_remove_many() {
        let mut cart = Cart::new();
        for id in ["a", "b", "c"] {
            cart.add(product(id, 1), 1);
        }

        let gone = [ProductId::new("a"), ProductId::new("c"), ProductId::new("zzz")];
        assert_eq!(cart.remove_many(gone.iter()), 2);
        assert_eq!(cart.unique_item_count(), 1);
        assert!(cart.get(&"b".into()).is_some());
    }

    #[test]
    fn test_total_and_count() {
        let mut cart = Cart::new();
        cart.add(product("a", 100), 2);
        cart.add(product("b", 50), 3);

        assert_eq!(cart.total(), Money::from_major_units(350));
        assert_eq!(cart.items_count(), 5);
        assert_eq!(cart.unique_item_count(), 2);
    }

    #[test]
    fn test_effective_stock() {
        let mut cart = Cart::new();
        cart.add(product("p1", 10), 2);
        let id = ProductId::new("p1");

        assert_eq!(cart.effective_available_stock(&id, 5), 3);
        assert_eq!(cart.effective_available_stock(&id, 2), 0);
        assert_eq!(cart.effective_available_stock(&id, 1), 0);
        assert_eq!(cart.effective_available_stock(&"other".into(), 4), 4);

        assert!(!cart.can_add(&id, 2, 1));
        assert!(cart.can_add(&id, 3, 1));
        assert!(!cart.can_add(&id, 3, 2));
    }

    #[test]
    fn test_from_items_normalizes() {
        let items = vec![
            CartLineItem::new(product("a", 10), 2),
            CartLineItem::new(product("b", 10), 0),
            CartLineItem::new(product("a", 99), 1),
            CartLineItem::new(product("c", 10), -4),
        ];

        let cart = Cart::from_items(items);
        assert_eq!(cart.unique_item_count(), 1);
        let a = cart.get(&"a".into()).unwrap();
        assert_eq!(a.quantity, 3);
        assert_eq!(a.product.price, Money::from_major_units(10));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(product("a", 10), 2);
        cart.clear();
        assert!(cart.is_empty());
    }
}
