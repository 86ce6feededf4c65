//! Output formatting for the CLI.

use console::style;
use vault_cart::cart::CartLineItem;
use vault_cart::Currency;

const ITEM_COLUMNS: [(&str, usize); 4] = [("ID", 24), ("TITLE", 32), ("QTY", 6), ("SUBTOTAL", 14)];

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print line items as a table with subtotals in `currency`.
    pub fn line_items(&self, items: &[CartLineItem], currency: Currency) {
        if self.json || items.is_empty() {
            return;
        }
        let header: Vec<String> = ITEM_COLUMNS
            .iter()
            .map(|(name, width)| format!("{:width$}", name, width = *width))
            .collect();
        println!("\n  {}", style(header.join("  ")).dim());

        for item in items {
            let cells = [
                item.id().to_string(),
                item.product.title.clone(),
                item.quantity.to_string(),
                item.subtotal().display(currency),
            ];
            let row: Vec<String> = cells
                .iter()
                .zip(ITEM_COLUMNS.iter())
                .map(|(cell, (_, width))| format!("{:width$}", truncate(cell, *width), width = *width))
                .collect();
            println!("  {}", row.join("  "));
        }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Badge for a stock figure.
pub fn stock_badge(effective: i64) -> String {
    if effective > 0 {
        style(format!("{} in stock", effective)).green().to_string()
    } else {
        style("Out of Stock").red().to_string()
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('\u{2026}');
    cut
}

/// Format an age in seconds as a human-readable string.
pub fn format_age(secs: i64) -> String {
    let secs = secs.max(0);
    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m {}s ago", secs / 60, secs % 60)
    } else if secs < 86_400 {
        format!("{}h {}m ago", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h ago", secs / 86_400, (secs % 86_400) / 3600)
    }
}
