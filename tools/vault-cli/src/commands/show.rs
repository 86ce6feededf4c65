//! Inspect the stored cart.

use anyhow::{Context as _, Result};
use chrono::Utc;
use vault_cart::inspect::inspect;

use crate::context::Context;
use crate::output::format_age;

/// Run the show command.
pub async fn run(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let report = inspect(&store, ctx.cart_key())
        .with_context(|| format!("Failed to read {}", ctx.cart_key()))?;

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output.header("Cart debug info");
    ctx.output.kv("Store", &ctx.store_dir().display().to_string());
    ctx.output.kv("Key", &report.key);

    if report.is_missing() {
        ctx.output.warn("No cart data found in store");
        return Ok(());
    }
    ctx.output.kv("Raw", report.raw.as_deref().unwrap_or_default());

    if let Some(ref error) = report.parse_error {
        ctx.output.warn(&format!("Error parsing cart data: {}", error));
        return Ok(());
    }

    if let Some(ref parsed) = report.parsed {
        let currency = ctx.config.display.currency;
        ctx.output.kv("Shape", &format!("{:?}", parsed.shape).to_lowercase());
        ctx.output.kv("Line items", &parsed.line_items.to_string());
        ctx.output.kv("Items count", &parsed.items_count.to_string());
        ctx.output.kv("Total", &parsed.total.display(currency));
        ctx.output.kv("Version", parsed.version.as_deref().unwrap_or("N/A"));
        ctx.output.kv(
            "Last updated",
            &parsed
                .last_updated
                .map(|at| {
                    let age = (Utc::now() - at).num_seconds();
                    format!("{} ({})", at.to_rfc3339(), format_age(age))
                })
                .unwrap_or_else(|| "N/A".to_string()),
        );
        if parsed.skipped > 0 {
            ctx.output
                .warn(&format!("{} stored rows could not be read", parsed.skipped));
        }

        ctx.output.line_items(parsed.cart.items(), currency);
    }

    Ok(())
}
