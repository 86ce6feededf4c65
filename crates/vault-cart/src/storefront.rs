//! Caller-side stock gate.
//!
//! [`CartEngine::add_to_cart`] does not look at stock. The marketplace
//! checks the effective stock before every add; this module is that check.

use serde::Serialize;
use tracing::debug;
use vault_store::PersistenceStore;

use crate::cart::ProductSnapshot;
use crate::catalog::Catalog;
use crate::engine::CartEngine;

/// Outcome of a gated add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AddOutcome {
    /// The product was added.
    Added {
        /// Quantity now held in the cart.
        quantity_in_cart: i64,
    },
    /// Not enough stock left once the cart's own quantity is set aside.
    OutOfStock {
        /// Units still purchasable.
        effective_available: i64,
    },
    /// The catalog does not list the product.
    UnknownProduct,
}

impl AddOutcome {
    /// Check if the product went into the cart.
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added { .. })
    }
}

/// Add `quantity` of `product` if the catalog's stock allows it.
pub fn add_with_stock_check<S, C>(
    engine: &mut CartEngine<S>,
    catalog: &C,
    product: ProductSnapshot,
    quantity: i64,
) -> AddOutcome
where
    S: PersistenceStore,
    C: Catalog + ?Sized,
{
    let Some(level) = catalog.stock_level(&product.id) else {
        debug!(product_id = %product.id, "product not in catalog");
        return AddOutcome::UnknownProduct;
    };

    if quantity <= 0 || !engine.can_add_to_cart(&product.id, level.available, quantity) {
        let effective_available = engine.effective_available_stock(&product.id, level.available);
        debug!(product_id = %product.id, quantity, effective_available, "add refused by stock gate");
        return AddOutcome::OutOfStock {
            effective_available,
        };
    }

    let id = product.id.clone();
    engine.add_to_cart(product, quantity);
    AddOutcome::Added {
        quantity_in_cart: engine.cart_item_quantity(&id),
    }
}
