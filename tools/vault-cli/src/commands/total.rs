//! Item count and total.

use anyhow::Result;
use serde_json::json;

use crate::context::Context;

/// Run the total command.
pub async fn run(ctx: &Context) -> Result<()> {
    let engine = ctx.engine()?;
    let currency = ctx.config.display.currency;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "lineItems": engine.items().len(),
            "itemsCount": engine.cart_items_count(),
            "total": engine.cart_total(),
            "currency": currency,
        }));
        return Ok(());
    }

    ctx.output.kv("Items", &engine.cart_items_count().to_string());
    ctx.output.kv("Total", &engine.cart_total().display(currency));
    Ok(())
}
