//! CLI command implementations.

pub mod add;
pub mod clear;
pub mod config;
pub mod remove;
pub mod show;
pub mod stock;
pub mod total;
pub mod update;

use clap::{Args, Subcommand};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product id.
    #[arg(long)]
    pub id: String,

    /// Listing title.
    #[arg(long)]
    pub title: String,

    /// Unit price in major units (e.g. 1500 or 12.50).
    #[arg(long)]
    pub price: f64,

    /// Quantity to add.
    #[arg(short, long, default_value = "1")]
    pub quantity: i64,

    /// Social platform.
    #[arg(long)]
    pub platform: Option<String>,

    /// Product type.
    #[arg(long)]
    pub product_type: Option<String>,

    /// Image URLs.
    #[arg(long = "image")]
    pub images: Vec<String>,

    /// Catalog's available credential count; refuses adds beyond it.
    #[arg(long)]
    pub stock: Option<i64>,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Product id.
    pub id: String,

    /// New quantity.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product ids.
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the stock command.
#[derive(Args)]
pub struct StockArgs {
    /// Product id.
    pub id: String,

    /// Available count reported by the catalog.
    #[arg(allow_negative_numbers = true)]
    pub available: i64,

    /// Quantity the shopper wants to add.
    #[arg(short, long, default_value = "1")]
    pub requested: i64,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Validate the configuration for the selected environment.
    Validate,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
