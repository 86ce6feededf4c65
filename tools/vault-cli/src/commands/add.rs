//! Add a product to the cart.

use anyhow::{bail, Result};
use serde_json::json;
use vault_cart::cart::ProductSnapshot;
use vault_cart::catalog::{InMemoryCatalog, StockLevel};
use vault_cart::storefront::{add_with_stock_check, AddOutcome};
use vault_cart::{Money, ProductId};

use super::AddArgs;
use crate::context::Context;

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let price = match Money::from_major(args.price) {
        Some(price) if args.price >= 0.0 => price,
        _ => bail!("Price must be a non-negative number, got {}", args.price),
    };
    if args.quantity <= 0 {
        bail!("Quantity must be at least 1, got {}", args.quantity);
    }

    let mut product = ProductSnapshot::new(args.id.as_str(), args.title, price);
    if let Some(platform) = args.platform {
        product = product.with_platform(platform);
    }
    if let Some(product_type) = args.product_type {
        product = product.with_product_type(product_type);
    }
    product = args.images.into_iter().fold(product, ProductSnapshot::with_image);

    let id = ProductId::new(args.id);
    let mut engine = ctx.engine()?;

    let outcome = match args.stock {
        Some(available) => {
            let catalog = InMemoryCatalog::new().with(id.clone(), StockLevel::new(available, available));
            add_with_stock_check(&mut engine, &catalog, product, args.quantity)
        }
        None => {
            ctx.output.debug("No --stock given; adding without a stock check");
            engine.add_to_cart(product, args.quantity);
            AddOutcome::Added {
                quantity_in_cart: engine.cart_item_quantity(&id),
            }
        }
    };

    if let Some(error) = engine.last_persist_error() {
        ctx.output.warn(&format!("Cart kept in memory only: {}", error));
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "id": id, "result": outcome }));
        return Ok(());
    }

    match outcome {
        AddOutcome::Added { quantity_in_cart } => ctx.output.success(&format!(
            "Added {} x {} ({} in cart)",
            args.quantity, id, quantity_in_cart
        )),
        AddOutcome::OutOfStock { effective_available } => bail!(
            "Sorry, {} is out of stock or the cart already holds the maximum available ({} left)",
            id,
            effective_available
        ),
        AddOutcome::UnknownProduct => bail!("Product {} is not in the catalog", id),
    }

    Ok(())
}
