//! # Hubswap Configuration
//!
//! Settings injected into the quote calculators and the tracing setup for
//! processes embedding them.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hubswap_config::{init_tracing, QuoteConfig};
//! use std::path::Path;
//!
//! let config = QuoteConfig::load(Some(Path::new("config/quote.toml"))).unwrap();
//! init_tracing(&config.logging).unwrap();
//! ```

pub mod logging;
pub mod quote_config;

pub use logging::init_tracing;
pub use quote_config::{
    LoggingConfig, QuoteConfig, DEFAULT_HUB_SYMBOL, DEFAULT_PROTECTION_TOLERANCE, ENV_PREFIX,
};
