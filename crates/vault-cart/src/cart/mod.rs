//! Shopping cart module.
//!
//! Contains the product snapshot and line item types and the pure cart
//! aggregate. Persistence lives in [`crate::engine`].

mod cart;
mod line_item;

pub use cart::Cart;
pub use line_item::{CartLineItem, ProductSnapshot};
