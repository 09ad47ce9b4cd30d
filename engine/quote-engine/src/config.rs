//! Configuration for the quote engine

use crate::error::{QuoteError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Quote engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// Fractional digits shown for ether amounts
    pub display_decimals: usize,

    /// Rental window bounds used when a listing does not specify its own (seconds)
    pub default_min_duration: u64,
    pub default_max_duration: u64,

    /// Smallest minimum duration an owner may list with (seconds)
    pub min_listing_duration: u64,

    /// Largest maximum duration an owner may list with (seconds, 30 days)
    pub max_listing_duration: u64,

    /// Number of listings shown as featured
    pub featured_limit: usize,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            display_decimals: 4,
            default_min_duration: 3_600,  // 1 hour
            default_max_duration: 86_400, // 24 hours
            min_listing_duration: 60,
            max_listing_duration: 2_592_000,
            featured_limit: 4,
        }
    }
}

impl QuoteConfig {
    /// Load configuration from environment variables over the defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(decimals) = std::env::var("QUOTE_DISPLAY_DECIMALS") {
            config.display_decimals = parse_var("QUOTE_DISPLAY_DECIMALS", &decimals)?;
        }

        if let Ok(min) = std::env::var("QUOTE_MIN_LISTING_DURATION") {
            config.min_listing_duration = parse_var("QUOTE_MIN_LISTING_DURATION", &min)?;
        }

        if let Ok(max) = std::env::var("QUOTE_MAX_LISTING_DURATION") {
            config.max_listing_duration = parse_var("QUOTE_MAX_LISTING_DURATION", &max)?;
        }

        if let Ok(limit) = std::env::var("QUOTE_FEATURED_LIMIT") {
            config.featured_limit = parse_var("QUOTE_FEATURED_LIMIT", &limit)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file; missing keys take defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            QuoteError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: QuoteConfig = toml::from_str(&content)
            .map_err(|e| QuoteError::Configuration(format!("cannot parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.display_decimals > 18 {
            return Err(QuoteError::Configuration(format!(
                "display_decimals {} exceeds 18",
                self.display_decimals
            )));
        }
        if self.min_listing_duration == 0 || self.min_listing_duration > self.max_listing_duration {
            return Err(QuoteError::Configuration(format!(
                "listing duration bounds {}..={} are inconsistent",
                self.min_listing_duration, self.max_listing_duration
            )));
        }
        if self.default_min_duration > self.default_max_duration {
            return Err(QuoteError::Configuration(format!(
                "default rental window {}..={} is inconsistent",
                self.default_min_duration, self.default_max_duration
            )));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| QuoteError::Configuration(format!("{name} has invalid value {value:?}")))
}
