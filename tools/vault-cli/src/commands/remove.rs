//! Remove line items.

use anyhow::Result;
use serde_json::json;
use vault_cart::ProductId;

use super::RemoveArgs;
use crate::context::Context;

/// Run the remove command.
pub async fn run(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let ids: Vec<ProductId> = args.ids.into_iter().map(ProductId::new).collect();
    let mut engine = ctx.engine()?;

    let removed = match ids.as_slice() {
        [single] => {
            let present = engine.cart_item_quantity(single) > 0;
            engine.remove_from_cart(single);
            usize::from(present)
        }
        many => engine.remove_many(many),
    };

    if let Some(error) = engine.last_persist_error() {
        ctx.output.warn(&format!("Cart kept in memory only: {}", error));
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "requested": ids, "removed": removed }));
        return Ok(());
    }

    ctx.output
        .success(&format!("Removed {} of {} line items", removed, ids.len()));
    ctx.output
        .line_items(engine.items(), ctx.config.display.currency);

    Ok(())
}
