//! Effective stock for a product.

use anyhow::Result;
use serde_json::json;
use vault_cart::ProductId;

use super::StockArgs;
use crate::context::Context;
use crate::output::stock_badge;

/// Run the stock command.
pub async fn run(args: StockArgs, ctx: &Context) -> Result<()> {
    let id = ProductId::new(args.id);
    let engine = ctx.engine()?;

    let in_cart = engine.cart_item_quantity(&id);
    let effective = engine.effective_available_stock(&id, args.available);
    let can_add = engine.can_add_to_cart(&id, args.available, args.requested);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "id": id,
            "available": args.available,
            "inCart": in_cart,
            "effectiveAvailable": effective,
            "requested": args.requested,
            "canAdd": can_add,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Stock for {}", id));
    ctx.output.kv("Catalog", &args.available.to_string());
    ctx.output.kv("In cart", &in_cart.to_string());
    ctx.output.kv("Effective", &stock_badge(effective));
    ctx.output.kv(
        &format!("Can add {}", args.requested),
        if can_add { "yes" } else { "no" },
    );

    Ok(())
}
