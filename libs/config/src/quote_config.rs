//! Quote engine configuration
//!
//! Loads from an optional TOML file with `HUBSWAP_`-prefixed environment
//! overrides on top. Nested keys use a double underscore, e.g.
//! `HUBSWAP_LOGGING__LEVEL=debug`.

use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File, FileFormat, Map};
use hubswap_types::{AssetSymbol, Decimal};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "HUBSWAP";

/// Hub asset every pool is paired against
pub const DEFAULT_HUB_SYMBOL: &str = "RUNE";

/// Share of the quoted output a swap may lose before it is refunded
pub const DEFAULT_PROTECTION_TOLERANCE: Decimal = dec!(0.03);

/// Settings injected into the calculators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    pub hub_symbol: String,
    /// Fraction in [0, 1)
    pub protection_tolerance: Decimal,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            hub_symbol: DEFAULT_HUB_SYMBOL.to_string(),
            protection_tolerance: DEFAULT_PROTECTION_TOLERANCE,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl QuoteConfig {
    /// Load configuration from a file with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Same as [`load`](Self::load) with an explicit environment map
    ///
    /// `None` reads the process environment.
    pub fn load_with_env(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("hub_symbol", defaults.hub_symbol.clone())?
            .set_default("protection_tolerance", defaults.protection_tolerance.to_string())?
            .set_default("logging.level", defaults.logging.level.clone())?
            .set_default("logging.json", defaults.logging.json)?;

        if let Some(path) = path {
            info!("Loading quote config: {:?}", path);
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder
            .build()
            .context("Failed to build quote configuration")?
            .try_deserialize()
            .context("Failed to deserialize quote configuration")?;

        config.validate()?;
        debug!(
            hub = %config.hub_symbol,
            tolerance = %config.protection_tolerance,
            "Loaded quote configuration"
        );
        Ok(config)
    }

    /// Reject settings the calculators cannot work with
    pub fn validate(&self) -> Result<()> {
        if AssetSymbol::parse(&self.hub_symbol).is_err() {
            bail!("hub_symbol must not be empty");
        }
        if self.protection_tolerance < Decimal::ZERO || self.protection_tolerance >= Decimal::ONE {
            bail!(
                "protection_tolerance {} must be at least 0 and below 1",
                self.protection_tolerance
            );
        }
        Ok(())
    }
}
