//! Set a line item's quantity.

use anyhow::Result;
use serde_json::json;
use vault_cart::ProductId;

use super::UpdateArgs;
use crate::context::Context;

/// Run the update command.
pub async fn run(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let id = ProductId::new(args.id);
    let mut engine = ctx.engine()?;

    let before = engine.cart_item_quantity(&id);
    engine.update_quantity(&id, args.quantity);
    let after = engine.cart_item_quantity(&id);

    if let Some(error) = engine.last_persist_error() {
        ctx.output.warn(&format!("Cart kept in memory only: {}", error));
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "id": id, "before": before, "after": after }));
        return Ok(());
    }

    if before == 0 {
        ctx.output.warn(&format!("{} is not in the cart; nothing to update", id));
    } else if after == 0 {
        ctx.output.success(&format!("Removed {} from the cart", id));
    } else {
        ctx.output
            .success(&format!("{} quantity {} -> {}", id, before, after));
    }

    Ok(())
}
