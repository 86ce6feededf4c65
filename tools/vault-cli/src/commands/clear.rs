//! Clear the cart.

use anyhow::Result;
use dialoguer::Confirm;
use serde_json::json;

use super::ClearArgs;
use crate::context::Context;

/// Run the clear command.
pub async fn run(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut engine = ctx.engine()?;
    let count = engine.cart_items_count();

    if !args.yes && !ctx.output.is_json() {
        ctx.output.warn(&format!(
            "This deletes {} ({} items) from {}",
            ctx.cart_key(),
            count,
            ctx.store_dir().display()
        ));

        let confirmed = Confirm::new()
            .with_prompt("Clear the cart?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    engine.clear_cart();

    if let Some(error) = engine.last_persist_error() {
        ctx.output.warn(&format!("Stored cart may remain: {}", error));
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "cleared": count }));
        return Ok(());
    }

    ctx.output.success("Cart cleared from store");
    Ok(())
}
