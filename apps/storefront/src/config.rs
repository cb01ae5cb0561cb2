//! # Storefront Configuration
//!
//! Configuration loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --database ./bazaar.db                                             │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     BAZAAR_DB_PATH, BAZAAR_STORE_NAME, BAZAAR_TAX_RATE,                │
//! │     BAZAAR_ENFORCE_STOCK, BAZAAR_PAYMENT_PUBLISHABLE_KEY               │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/bazaar-storefront/config.toml (Linux)                    │
//! │     ~/Library/Application Support/com.bazaar.storefront/ (macOS)       │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     INR (₹), 18% tax, stock not enforced                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Bazaar"
//! currency_code = "INR"
//! currency_symbol = "₹"
//! currency_decimals = 2
//! tax_rate_bps = 1800
//! placeholder_image = "/placeholder-product.jpg"
//!
//! [cart]
//! enforce_stock = false
//! storage_key = "cart-storage"
//!
//! [database]
//! path = "/var/lib/bazaar/bazaar.db"
//!
//! [payment]
//! publishable_key = "pk_test_..."
//! ```

use std::path::{Path, PathBuf};

use bazaar_core::money::MINOR_DIGITS;
use bazaar_core::{
    CartPolicy, Money, TaxRate, CART_STORAGE_KEY, DEFAULT_PLACEHOLDER_IMAGE, DEFAULT_TAX_RATE_BPS,
};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine a data directory for the database")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Store Settings
// =============================================================================

/// Store identity and money display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    /// ISO 4217 code handed to the payment gateway.
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Minor-unit digits shown after the decimal point. Must match
    /// `bazaar_core::money::MINOR_DIGITS`.
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,

    /// Tax applied in the order summary, in basis points (1800 = 18%).
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Shown for products without images.
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

fn default_store_name() -> String {
    "Bazaar".to_string()
}

fn default_currency_code() -> String {
    "INR".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_currency_decimals() -> u8 {
    MINOR_DIGITS as u8
}

fn default_tax_rate_bps() -> u32 {
    DEFAULT_TAX_RATE_BPS
}

fn default_placeholder_image() -> String {
    DEFAULT_PLACEHOLDER_IMAGE.to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
            tax_rate_bps: default_tax_rate_bps(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

impl StoreSettings {
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Formats an amount with Indian digit grouping.
    ///
    /// The last three integer digits form one group and every two digits
    /// before that form another.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let store = StoreSettings::default();
    /// assert_eq!(store.format_price(Money::from_major(123456)), "₹1,23,456.00");
    /// ```
    pub fn format_price(&self, amount: Money) -> String {
        let minor = amount.minor();
        let divisor = 10_u64.pow(u32::from(self.currency_decimals));
        let abs = minor.unsigned_abs();
        let whole = group_indian(abs / divisor);
        let sign = if minor < 0 { "-" } else { "" };

        if self.currency_decimals > 0 {
            format!(
                "{}{}{}.{:0width$}",
                sign,
                self.currency_symbol,
                whole,
                abs % divisor,
                width = usize::from(self.currency_decimals)
            )
        } else {
            format!("{}{}{}", sign, self.currency_symbol, whole)
        }
    }
}

fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

// =============================================================================
// Cart, Database, Payment Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSettings {
    /// Reject adds/updates beyond a product's stock.
    #[serde(default)]
    pub enforce_stock: bool,

    /// Key the cart snapshot is persisted under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_storage_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            enforce_stock: false,
            storage_key: default_storage_key(),
        }
    }
}

impl CartSettings {
    pub fn policy(&self) -> CartPolicy {
        CartPolicy {
            enforce_stock: self.enforce_stock,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file. Defaults to the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentSettings {
    /// Client-side key for the payment gateway (`pk_...`).
    #[serde(default)]
    pub publishable_key: Option<String>,
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub cart: CartSettings,

    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub payment: PaymentSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`--config`, else the platform config directory)
    /// 3. Environment variables
    ///
    /// An explicit `--config` path must exist; the default path is optional.
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name must not be empty".into()));
        }

        if self.store.currency_code.len() != 3
            || !self.store.currency_code.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(ConfigError::Invalid(format!(
                "store.currency_code must be a 3-letter ISO code, got '{}'",
                self.store.currency_code
            )));
        }

        // Amounts are stored in hundredths; any other precision misprices them.
        if u32::from(self.store.currency_decimals) != MINOR_DIGITS {
            return Err(ConfigError::Invalid(format!(
                "store.currency_decimals must be {}, got {}",
                MINOR_DIGITS, self.store.currency_decimals
            )));
        }

        if self.store.tax_rate_bps > 10_000 {
            return Err(ConfigError::Invalid(format!(
                "store.tax_rate_bps must be at most 10000, got {}",
                self.store.tax_rate_bps
            )));
        }

        if self.cart.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("cart.storage_key must not be empty".into()));
        }

        if let Some(ref key) = self.payment.publishable_key {
            if !key.starts_with("pk_") {
                return Err(ConfigError::Invalid(
                    "payment.publishable_key must start with pk_".into(),
                ));
            }
        }

        Ok(())
    }

    /// Applies `BAZAAR_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("BAZAAR_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(name) = lookup("BAZAAR_STORE_NAME") {
            self.store.name = name;
        }

        // Percentage, e.g. "18" or "12.5"
        if let Some(rate) = lookup("BAZAAR_TAX_RATE") {
            match rate.trim().parse::<f64>().ok().and_then(TaxRate::from_percentage) {
                Some(tax_rate) => self.store.tax_rate_bps = tax_rate.bps(),
                None => warn!(rate = %rate, "Ignoring invalid BAZAAR_TAX_RATE"),
            }
        }

        if let Some(flag) = lookup("BAZAAR_ENFORCE_STOCK") {
            match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.cart.enforce_stock = true,
                "0" | "false" | "no" | "off" => self.cart.enforce_stock = false,
                _ => warn!(value = %flag, "Ignoring invalid BAZAAR_ENFORCE_STOCK"),
            }
        }

        if let Some(key) = lookup("BAZAAR_PAYMENT_PUBLISHABLE_KEY") {
            self.payment.publishable_key = Some(key);
        }
    }

    /// Resolves the database file, creating the data directory if needed.
    ///
    /// `override_path` (from `--database`) wins over configuration.
    pub fn database_path(&self, override_path: Option<&Path>) -> ConfigResult<PathBuf> {
        if let Some(path) = override_path.or(self.database.path.as_deref()) {
            return Ok(path.to_path_buf());
        }

        let dirs = project_dirs().ok_or(ConfigError::NoDataDir)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir).map_err(|source| ConfigError::Read {
            path: data_dir.to_path_buf(),
            source,
        })?;

        Ok(data_dir.join("bazaar.db"))
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "bazaar", "storefront")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_price_indian_grouping() {
        let store = StoreSettings::default();
        assert_eq!(store.format_price(Money::from_major(123456)), "₹1,23,456.00");
        assert_eq!(store.format_price(Money::from_major(12345678)), "₹1,23,45,678.00");
        assert_eq!(store.format_price(Money::from_major(1000)), "₹1,000.00");
        assert_eq!(store.format_price(Money::from_minor(99999)), "₹999.99");
        assert_eq!(store.format_price(Money::zero()), "₹0.00");
        assert_eq!(store.format_price(Money::from_minor(-550)), "-₹5.50");
    }

    #[test]
    fn test_currency_decimals_must_match_money_precision() {
        for decimals in [0, 1, 3, 4] {
            let mut config = AppConfig::default();
            config.store.currency_decimals = decimals;
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "decimals {} accepted",
                decimals
            );
        }

        let config: AppConfig = toml::from_str(
            r#"
            [store]
            currency_decimals = 0
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.store.currency_decimals = 2;
        assert!(config.validate().is_ok());
        assert_eq!(
            config.store.format_price(Money::from_major(2499)),
            "₹2,499.00"
        );
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.store.currency_code, "INR");
        assert_eq!(config.store.tax_rate().bps(), 1800);
        assert_eq!(config.cart.storage_key, "cart-storage");
        assert!(!config.cart.policy().enforce_stock);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [store]
            name = "Corner Shop"

            [cart]
            enforce_stock = true
            "#,
        )
        .unwrap();

        assert_eq!(config.store.name, "Corner Shop");
        assert_eq!(config.store.currency_symbol, "₹");
        assert!(config.cart.enforce_stock);
        assert_eq!(config.cart.storage_key, "cart-storage");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[
            ("BAZAAR_DB_PATH", "/tmp/shop.db"),
            ("BAZAAR_STORE_NAME", "Env Store"),
            ("BAZAAR_TAX_RATE", "12.5"),
            ("BAZAAR_ENFORCE_STOCK", "true"),
            ("BAZAAR_PAYMENT_PUBLISHABLE_KEY", "pk_test_123"),
        ]));

        assert_eq!(config.database.path, Some(PathBuf::from("/tmp/shop.db")));
        assert_eq!(config.store.name, "Env Store");
        assert_eq!(config.store.tax_rate_bps, 1250);
        assert!(config.cart.enforce_stock);
        assert_eq!(config.payment.publishable_key.as_deref(), Some("pk_test_123"));
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[
            ("BAZAAR_TAX_RATE", "lots"),
            ("BAZAAR_ENFORCE_STOCK", "maybe"),
        ]));

        assert_eq!(config.store.tax_rate_bps, 1800);
        assert!(!config.cart.enforce_stock);

        for bad in ["-5", "NaN", "inf", "150"] {
            let mut config = AppConfig::default();
            config.apply_env_overrides(env(&[("BAZAAR_TAX_RATE", bad)]));
            assert_eq!(config.store.tax_rate_bps, 1800, "{} accepted", bad);
        }
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.store.currency_code = "rupees".into();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.store.tax_rate_bps = 10_001;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.payment.publishable_key = Some("sk_live_secret".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_database_path_override_wins() {
        let mut config = AppConfig::default();
        config.database.path = Some(PathBuf::from("/from/config.db"));

        let path = config
            .database_path(Some(Path::new("/from/flag.db")))
            .unwrap();
        assert_eq!(path, PathBuf::from("/from/flag.db"));

        let path = config.database_path(None).unwrap();
        assert_eq!(path, PathBuf::from("/from/config.db"));
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
