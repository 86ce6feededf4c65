//! Cart engine: the cart plus its persistence lifecycle.
//!
//! The engine starts in [`CartPhase::Hydrating`] and moves to
//! [`CartPhase::Ready`] after [`CartEngine::hydrate`] reads the store once.
//! Mutations issued before that are queued and replayed on top of the
//! stored cart, so an early click can neither be lost nor overwrite the
//! stored envelope with an empty cart.
//!
//! Persistence is best-effort. Store failures are logged and swallowed;
//! the in-memory cart stays authoritative for the rest of the session.

use chrono::Utc;
use tracing::{debug, info, warn};
use vault_store::PersistenceStore;

use crate::cart::{Cart, CartLineItem, ProductSnapshot};
use crate::envelope::{self, PersistedCartEnvelope, CART_STORAGE_KEY};
use crate::ids::ProductId;
use crate::money::Money;

/// Lifecycle phase of a [`CartEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartPhase {
    /// Waiting for the initial store read.
    Hydrating,
    /// Hydrated; every mutation is persisted. Terminal.
    Ready,
}

/// A mutation received while hydrating.
#[derive(Debug, Clone)]
enum PendingMutation {
    Add(ProductSnapshot, i64),
    UpdateQuantity(ProductId, i64),
    Remove(ProductId),
    RemoveMany(Vec<ProductId>),
    Clear,
}

/// Client-side cart with best-effort persistence.
///
/// # Example
///
/// ```rust
/// use vault_cart::prelude::*;
/// use vault_store::MemoryStore;
///
/// let store = MemoryStore::new();
/// let mut engine = CartEngine::new(store.clone());
/// engine.hydrate();
///
/// let product = ProductSnapshot::new("p1", "Aged Instagram", Money::from_major_units(500));
/// if engine.can_add_to_cart(&product.id, 3, 1) {
///     engine.add_to_cart(product, 1);
/// }
///
/// // A reload sees the same cart
/// let mut reloaded = CartEngine::new(store);
/// assert_eq!(reloaded.hydrate().items_count(), 1);
/// ```
#[derive(Debug)]
pub struct CartEngine<S> {
    store: S,
    key: String,
    cart: Cart,
    phase: CartPhase,
    pending: Vec<PendingMutation>,
    last_persist_error: Option<String>,
}

impl<S: PersistenceStore> CartEngine<S> {
    /// Create an engine over `store` using the default storage key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, CART_STORAGE_KEY)
    }

    /// Create an engine over `store` using a custom storage key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            cart: Cart::new(),
            phase: CartPhase::Hydrating,
            pending: Vec::new(),
            last_persist_error: None,
        }
    }

    /// Read the stored cart once and become ready.
    ///
    /// Missing, corrupt or unreadable data yields an empty cart. Mutations
    /// queued while hydrating are replayed in order and persisted. Once
    /// ready, further calls return the current cart without touching the
    /// store.
    pub fn hydrate(&mut self) -> &Cart {
        if self.phase == CartPhase::Ready {
            return &self.cart;
        }

        self.cart = load_cart(&self.store, &self.key);
        self.phase = CartPhase::Ready;
        info!(
            key = %self.key,
            line_items = self.cart.unique_item_count(),
            items = self.cart.items_count(),
            "cart hydrated"
        );

        let pending = std::mem::take(&mut self.pending);
        if !pending.is_empty() {
            self.replay(pending);
        }

        &self.cart
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> CartPhase {
        self.phase
    }

    /// Check if the initial read is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.phase == CartPhase::Hydrating
    }

    /// Number of mutations waiting for hydration.
    pub fn pending_mutations(&self) -> usize {
        self.pending.len()
    }

    /// The in-memory cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    /// Storage key this engine writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Message of the most recent swallowed store failure, if the last
    /// write did not succeed.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    /// Add `quantity` of a product; repeated adds accumulate.
    ///
    /// Stock is not checked here: gate with [`CartEngine::can_add_to_cart`]
    /// first.
    pub fn add_to_cart(&mut self, product: ProductSnapshot, quantity: i64) {
        if self.queue_if_hydrating(|| PendingMutation::Add(product.clone(), quantity)) {
            return;
        }
        debug!(product_id = %product.id, quantity, "add to cart");
        self.cart.add(product, quantity);
        self.persist();
    }

    /// Set a line item's quantity; 0 or less removes it.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if self.queue_if_hydrating(|| PendingMutation::UpdateQuantity(product_id.clone(), quantity)) {
            return;
        }
        debug!(%product_id, quantity, "update cart quantity");
        self.cart.update_quantity(product_id, quantity);
        self.persist();
    }

    /// Remove a line item if present.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        if self.queue_if_hydrating(|| PendingMutation::Remove(product_id.clone())) {
            return;
        }
        debug!(%product_id, "remove from cart");
        self.cart.remove(product_id);
        self.persist();
    }

    /// Remove several line items with a single write.
    ///
    /// Used when checkout validation reports products that are no longer
    /// available. Returns how many line items were removed; a call queued
    /// during hydration reports 0.
    pub fn remove_many(&mut self, product_ids: &[ProductId]) -> usize {
        if self.queue_if_hydrating(|| PendingMutation::RemoveMany(product_ids.to_vec())) {
            return 0;
        }
        let removed = self.cart.remove_many(product_ids);
        debug!(requested = product_ids.len(), removed, "remove many from cart");
        self.persist();
        removed
    }

    /// Empty the cart and delete the stored value immediately.
    pub fn clear_cart(&mut self) {
        if self.queue_if_hydrating(|| PendingMutation::Clear) {
            return;
        }
        debug!("clear cart");
        self.cart.clear();
        self.delete_stored();
    }

    /// Quantity of a product in the cart, 0 if absent.
    pub fn cart_item_quantity(&self, product_id: &ProductId) -> i64 {
        self.cart.quantity_of(product_id)
    }

    /// Sum of snapshot price times quantity.
    pub fn cart_total(&self) -> Money {
        self.cart.total()
    }

    /// Sum of quantities.
    pub fn cart_items_count(&self) -> i64 {
        self.cart.items_count()
    }

    /// `max(0, actual_stock - quantity in cart)`.
    pub fn effective_available_stock(&self, product_id: &ProductId, actual_stock: i64) -> i64 {
        self.cart.effective_available_stock(product_id, actual_stock)
    }

    /// Whether `requested` more units fit under `actual_stock`.
    pub fn can_add_to_cart(&self, product_id: &ProductId, actual_stock: i64, requested: i64) -> bool {
        self.cart.can_add(product_id, actual_stock, requested)
    }

    fn queue_if_hydrating(&mut self, mutation: impl FnOnce() -> PendingMutation) -> bool {
        if self.phase == CartPhase::Ready {
            return false;
        }
        let mutation = mutation();
        debug!(?mutation, "queueing cart mutation until hydrated");
        self.pending.push(mutation);
        true
    }

    fn replay(&mut self, pending: Vec<PendingMutation>) {
        let count = pending.len();
        let mut cleared = false;
        let mut dirty = false;

        for mutation in pending {
            match mutation {
                PendingMutation::Add(product, quantity) => {
                    self.cart.add(product, quantity);
                    dirty = true;
                }
                PendingMutation::UpdateQuantity(id, quantity) => {
                    self.cart.update_quantity(&id, quantity);
                    dirty = true;
                }
                PendingMutation::Remove(id) => {
                    self.cart.remove(&id);
                    dirty = true;
                }
                PendingMutation::RemoveMany(ids) => {
                    self.cart.remove_many(&ids);
                    dirty = true;
                }
                PendingMutation::Clear => {
                    self.cart.clear();
                    cleared = true;
                    dirty = false;
                }
            }
        }

        debug!(count, cleared, "replayed queued cart mutations");
        if cleared {
            self.delete_stored();
        }
        if dirty {
            self.persist();
        }
    }

    fn persist(&mut self) {
        let envelope = PersistedCartEnvelope::new(self.cart.items().to_vec(), Utc::now());
        let result = envelope
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| self.store.set(&self.key, &json).map_err(|e| e.to_string()));

        match result {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to persist cart; keeping in-memory state");
                self.last_persist_error = Some(e);
            }
        }
    }

    fn delete_stored(&mut self) {
        match self.store.delete(&self.key) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to delete stored cart; writing empty envelope");
                self.last_persist_error = Some(e.to_string());
                // An empty envelope still stops a reload from resurrecting the old cart
                self.persist();
            }
        }
    }
}

/// Read the cart stored under `key`.
///
/// Never fails: a missing key, a store error or an unreadable value all
/// give an empty cart. This is the read a page reload performs.
pub fn load_cart<S: PersistenceStore + ?Sized>(store: &S, key: &str) -> Cart {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(e) => {
            warn!(key, error = %e, "cart store unreadable; starting empty");
            return Cart::new();
        }
    };

    match envelope::decode(&raw) {
        Ok(decoded) => {
            if decoded.skipped > 0 {
                warn!(key, skipped = decoded.skipped, "dropped unreadable cart rows");
            }
            Cart::from_items(decoded.items)
        }
        Err(e) => {
            warn!(key, error = %e, "stored cart is corrupt; starting empty");
            Cart::new()
        }
    }
}
