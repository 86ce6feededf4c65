//! CLI configuration.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use vault_cart::envelope::CART_STORAGE_KEY;
use vault_cart::Currency;

/// Environments the storefront is deployed to.
pub const VALID_ENVIRONMENTS: [&str; 4] = ["development", "production", "staging", "local"];

/// Environment used when neither `--env` nor `VAULT_ENV` is set.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where carts are stored.
    #[serde(default)]
    pub storage: StorageConfig,

    /// How amounts are shown.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,

    /// Debug mode: verbose logging by default.
    #[serde(default)]
    pub debug: bool,

    /// Environment-specific overrides.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentConfig>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Get environment-specific config.
    pub fn for_environment(&self, env: &str) -> CliConfig {
        let mut config = self.clone();

        if let Some(env_config) = self.environments.get(env) {
            if let Some(ref storage) = env_config.storage {
                config.storage = storage.clone();
            }
            if let Some(debug) = env_config.debug {
                config.debug = debug;
            }
            if let Some(log_format) = env_config.log_format {
                config.log_format = log_format;
            }
        }

        config
    }

    /// Check the config for the selected environment.
    pub fn validate(&self, env: &str) -> ValidationReport {
        let mut report = ValidationReport::default();

        if !VALID_ENVIRONMENTS.contains(&env) {
            report.errors.push(format!(
                "environment must be one of: {}",
                VALID_ENVIRONMENTS.join(", ")
            ));
        }

        for name in self.environments.keys() {
            if !VALID_ENVIRONMENTS.contains(&name.as_str()) {
                report
                    .errors
                    .push(format!("unknown environment section: [environments.{}]", name));
            }
        }

        let effective = self.for_environment(env);
        if let Err(e) = vault_store::validate_key(&effective.storage.key) {
            report.errors.push(format!("storage.key: {}", e));
        }

        if effective.storage.dir.is_none() {
            report
                .warnings
                .push("storage.dir not set; using the per-user data directory".to_string());
        }

        if env == "production" && effective.debug {
            report.warnings.push("debug mode is enabled in production".to_string());
        }

        report
    }
}

/// Result of [`CliConfig::validate`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the file store (default: per-user data dir).
    #[serde(default)]
    pub dir: Option<String>,

    /// Key the cart is stored under.
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: default_key(),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Currency symbol used when printing amounts.
    #[serde(default)]
    pub currency: Currency,
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format (for development).
    #[default]
    Human,
    /// JSON format (for log aggregation).
    Json,
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Storage override.
    #[serde(default)]
    pub storage: Option<StorageConfig>,

    /// Debug override.
    #[serde(default)]
    pub debug: Option<bool>,

    /// Log format override.
    #[serde(default)]
    pub log_format: Option<LogFormat>,
}

/// Generate a default vault.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# AccVault cart tooling configuration

debug = false
log_format = "human"

[storage]
# dir = ".vault/store"
key = "{key}"

[display]
currency = "NGN"

[environments.local]
debug = true
[environments.local.storage]
dir = ".vault/local"
key = "{key}"

[environments.staging]
[environments.staging.storage]
dir = ".vault/staging"
key = "{key}"

[environments.production]
debug = false
log_format = "json"
"#,
        key = CART_STORAGE_KEY
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.storage.key, CART_STORAGE_KEY);
        assert_eq!(config.display.currency, Currency::NGN);
        assert_eq!(config.environments.len(), 3);
        assert!(config.validate("development").is_valid());
    }

    #[test]
    fn test_environment_overrides() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();

        let local = config.for_environment("local");
        assert!(local.debug);
        assert_eq!(local.storage.dir.as_deref(), Some(".vault/local"));

        let prod = config.for_environment("production");
        assert_eq!(prod.log_format, LogFormat::Json);
        assert_eq!(prod.storage.dir, None);

        let dev = config.for_environment("development");
        assert!(!dev.debug);
    }

    #[test]
    fn test_validation_errors_and_warnings() {
        let mut config = CliConfig::default();
        config.storage.key = "bad key/..".to_string();
        config
            .environments
            .insert("qa".to_string(), EnvironmentConfig::default());

        let report = config.validate("qa");
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 3);

        let mut config = CliConfig::default();
        config.debug = true;
        let report = config.validate("production");
        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.contains("production")));
    }

    #[test]
    fn test_currency_code_is_case_insensitive() {
        let config: CliConfig = toml::from_str("[display]\ncurrency = \"usd\"").unwrap();
        assert_eq!(config.display.currency, Currency::USD);
        assert!(toml::from_str::<CliConfig>("[display]\ncurrency = \"JPY\"").is_err());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.storage.key, CART_STORAGE_KEY);
        assert_eq!(config.log_format, LogFormat::Human);
    }
}
