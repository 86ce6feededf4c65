//! Configuration management.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Validate => validate(ctx),
        ConfigCommand::Init { force } => init(force, ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header(&format!("Configuration ({})", ctx.env));
    ctx.output.kv("storage.dir", &ctx.store_dir().display().to_string());
    ctx.output.kv("storage.key", ctx.cart_key());
    ctx.output.kv("display.currency", ctx.config.display.currency.code());
    ctx.output.kv("log_format", &format!("{:?}", ctx.config.log_format).to_lowercase());
    ctx.output.kv("debug", &ctx.config.debug.to_string());
    Ok(())
}

fn validate(ctx: &Context) -> Result<()> {
    let report = ctx.base_config.validate(&ctx.env);

    if ctx.output.is_json() {
        ctx.output.json(&report);
    } else {
        for warning in &report.warnings {
            ctx.output.warn(warning);
        }
        for error in &report.errors {
            ctx.output.error(error);
        }
    }

    if !report.is_valid() {
        bail!("Configuration has {} error(s)", report.errors.len());
    }

    ctx.output.success("Configuration is valid");
    Ok(())
}

fn init(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join("vault.toml");

    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    fs::write(&path, generate_default_config())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    ctx.output.success(&format!("Created {}", path.display()));
    Ok(())
}
