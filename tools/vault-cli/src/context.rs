//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use vault_cart::engine::CartEngine;
use vault_store::FileStore;

use crate::config::{CliConfig, DEFAULT_ENVIRONMENT};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Configuration with the environment's overrides applied.
    pub config: CliConfig,
    /// Configuration as loaded, before overrides.
    pub base_config: CliConfig,
    /// Selected environment.
    pub env: String,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, env: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let base_config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        let env = env
            .map(str::to_string)
            .or_else(|| std::env::var("VAULT_ENV").ok())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
        let config = base_config.for_environment(&env);

        Ok(Self {
            config,
            base_config,
            env,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let config_names = ["vault.toml", ".vault.toml", "vault.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory of the file store.
    pub fn store_dir(&self) -> PathBuf {
        match self.config.storage.dir {
            Some(ref dir) => self.resolve_path(dir),
            None => dirs_path().join("accvault").join(&self.env),
        }
    }

    /// Storage key of the cart.
    pub fn cart_key(&self) -> &str {
        &self.config.storage.key
    }

    /// Open the file store.
    pub fn open_store(&self) -> Result<FileStore> {
        let dir = self.store_dir();
        FileStore::open(&dir)
            .with_context(|| format!("Failed to open store at {}", dir.display()))
    }

    /// Open the store and hydrate a cart engine over it.
    pub fn engine(&self) -> Result<CartEngine<FileStore>> {
        let mut engine = CartEngine::with_key(self.open_store()?, self.cart_key());
        engine.hydrate();
        Ok(engine)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    }
}
