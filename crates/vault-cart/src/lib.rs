//! Client-side shopping cart for the AccVault social-accounts marketplace.
//!
//! - **Cart**: line items unique by product, with totals and stock math
//! - **Engine**: hydrate-once lifecycle with best-effort persistence
//! - **Envelope**: the stored JSON layout, including the legacy bare array
//! - **Catalog**: stock figures handed in by the caller, and the add gate
//!
//! # Example
//!
//! ```rust
//! use vault_cart::prelude::*;
//! use vault_store::MemoryStore;
//!
//! let mut engine = CartEngine::new(MemoryStore::new());
//! engine.hydrate();
//!
//! engine.add_to_cart(ProductSnapshot::new("p1", "Aged Instagram", Money::from_major_units(500)), 1);
//! engine.add_to_cart(ProductSnapshot::new("p1", "Aged Instagram", Money::from_major_units(500)), 2);
//!
//! assert_eq!(engine.cart_items_count(), 3);
//! assert_eq!(engine.cart_total().display(Currency::NGN), "\u{20a6}1,500.00");
//! assert_eq!(engine.effective_available_stock(&"p1".into(), 5), 2);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod engine;
pub mod envelope;
pub mod inspect;
pub mod storefront;

pub use error::CartError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{Cart, CartLineItem, ProductSnapshot};

    // Engine
    pub use crate::engine::{load_cart, CartEngine, CartPhase};
    pub use crate::envelope::{
        CartShape, DecodedCart, PersistedCartEnvelope, CART_STORAGE_KEY, CART_VERSION,
    };

    // Catalog
    pub use crate::catalog::{Catalog, InMemoryCatalog, StockLevel};
    pub use crate::inspect::{inspect, CartInspection, ParsedCart};
    pub use crate::storefront::{add_with_stock_check, AddOutcome};
}
