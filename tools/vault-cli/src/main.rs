//! Vault CLI - Operator tool for AccVault shopping carts.
//!
//! Commands:
//! - `vault show` - Inspect the stored cart
//! - `vault add` - Add a product, optionally gated on stock
//! - `vault update` - Set a line item's quantity
//! - `vault remove` - Remove line items
//! - `vault clear` - Clear the cart and delete the stored value
//! - `vault stock` - Effective stock for a product
//! - `vault total` - Item count and cart total
//! - `vault config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AddArgs, ClearArgs, ConfigArgs, RemoveArgs, StockArgs, UpdateArgs};

/// Vault CLI - Inspect and edit AccVault shopping carts
#[derive(Parser)]
#[command(name = "vault")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Environment (local, development, staging, production); defaults to $VAULT_ENV
    #[arg(short, long, global = true)]
    env: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what is stored under the cart key
    Show,

    /// Add a product to the cart
    Add(AddArgs),

    /// Set the quantity of a line item (0 or less removes it)
    Update(UpdateArgs),

    /// Remove line items
    Remove(RemoveArgs),

    /// Clear the cart
    Clear(ClearArgs),

    /// Effective stock for a product given the catalog figure
    Stock(StockArgs),

    /// Item count and total
    Total,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), cli.env.as_deref(), output) {
        Ok(ctx) => ctx,
        Err(e) => {
            output::Output::new(cli.verbose, cli.json).error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    logging::init(cli.verbose || ctx.config.debug, ctx.config.log_format);
    ctx.output.debug(&format!(
        "environment {} using {}",
        ctx.env,
        ctx.store_dir().display()
    ));

    // Execute command
    let result = match cli.command {
        Commands::Show => commands::show::run(&ctx).await,
        Commands::Add(args) => commands::add::run(args, &ctx).await,
        Commands::Update(args) => commands::update::run(args, &ctx).await,
        Commands::Remove(args) => commands::remove::run(args, &ctx).await,
        Commands::Clear(args) => commands::clear::run(args, &ctx).await,
        Commands::Stock(args) => commands::stock::run(args, &ctx).await,
        Commands::Total => commands::total::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
