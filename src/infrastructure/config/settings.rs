//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. The
//! configuration is loaded from a TOML file; every section is optional.
//! The sportsbook state can be overridden with `EDGEFINDER_STATE`.
//!
//! # Example
//!
//! ```no_run
//! use edgefinder::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("edgefinder.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

use super::display::DisplayConfig;
use super::logging::{LoggingConfig, LOG_FORMATS};
use super::sportsbooks::SportsbooksConfig;
use super::staking::{ComparisonConfig, KellyConfig};
use crate::error::{ConfigError, Result};

/// Environment variable overriding `[sportsbooks] default_state`.
pub const STATE_ENV_VAR: &str = "EDGEFINDER_STATE";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Comparison baseline and promotional boost.
    #[serde(default)]
    pub comparison: ComparisonConfig,

    /// Kelly stake sizing.
    #[serde(default)]
    pub kelly: KellyConfig,

    /// Timezone, logos, preview limits and market labels.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Extra sportsbooks and deep-link state.
    #[serde(default)]
    pub sportsbooks: SportsbooksConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides on top of file or default values.
    fn apply_env(&mut self) {
        if let Ok(state) = std::env::var(STATE_ENV_VAR) {
            if !state.trim().is_empty() {
                self.sportsbooks.default_state = Some(state);
            }
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file fails to load.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            let mut config = Self::default();
            config.apply_env();
            Ok(config)
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("must be one of {}", LOG_FORMATS.join(", ")),
            }
            .into());
        }

        if let Some(boost) = self.comparison.boost_percent {
            if !boost.is_finite() || boost < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "boost_percent",
                    reason: "must be 0 or greater".to_string(),
                }
                .into());
            }
        }

        if self.kelly.bankroll < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "bankroll",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }
        if !self.kelly.percent.is_finite() || self.kelly.percent <= 0.0 || self.kelly.percent > 100.0
        {
            return Err(ConfigError::InvalidValue {
                field: "percent",
                reason: "must be greater than 0 and at most 100".to_string(),
            }
            .into());
        }

        if self.display.timezone.parse::<Tz>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "timezone",
                reason: format!("unknown timezone '{}'", self.display.timezone),
            }
            .into());
        }
        if self.display.preview_per_sport == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "preview_per_sport",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if let Err(e) = Url::parse(&self.display.logo_base_url) {
            return Err(ConfigError::InvalidValue {
                field: "logo_base_url",
                reason: e.to_string(),
            }
            .into());
        }

        for book in &self.sportsbooks.books {
            if book.id.as_str().is_empty() {
                return Err(ConfigError::MissingField { field: "books.id" }.into());
            }
            if book.name.trim().is_empty() {
                return Err(ConfigError::MissingField { field: "books.name" }.into());
            }
        }

        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookId, ComparisonMode};
    use crate::error::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.comparison.mode, ComparisonMode::Average);
        assert_eq!(config.kelly.percent, 25.0);
        assert_eq!(config.kelly.bankroll, Decimal::ZERO);
        assert_eq!(config.display.tz(), chrono_tz::US::Eastern);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn full_config_parses() {
        let toml = r#"
[logging]
level = "debug"
format = "json"

[comparison]
mode = "book:Pinnacle"
boost_percent = 30

[kelly]
bankroll = 2500
percent = 50

[display]
timezone = "US/Pacific"
preview_per_sport = 3

[display.market_labels]
player_points = "Points"

[[sportsbooks.books]]
id = "Circa"
name = "Circa Sports"
link_template = "https://{state}.circasports.com/"
"#;
        let config = Config::parse_toml(toml).unwrap();
        assert_eq!(
            config.comparison.mode,
            ComparisonMode::Book(BookId::new("pinnacle"))
        );
        assert_eq!(config.comparison.boost_percent, Some(30.0));
        assert_eq!(config.kelly.bankroll, dec!(2500));
        assert_eq!(config.display.preview_per_sport, Some(3));
        assert_eq!(config.display.tz(), chrono_tz::US::Pacific);
        assert_eq!(config.display.labels().humanize("player_points"), "Points");

        let registry = config.sportsbooks.registry();
        assert_eq!(registry.display_name(&BookId::new("circa")), "Circa Sports");
    }

    #[test]
    fn unknown_mode_falls_back_to_average() {
        let config = Config::parse_toml("[comparison]\nmode = \"sharpest\"\n").unwrap();
        assert_eq!(config.comparison.mode, ComparisonMode::Average);
    }

    #[test]
    fn rejects_bad_timezone() {
        let result = Config::parse_toml("[display]\ntimezone = \"Mars/Olympus\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "timezone", .. }))
        ));
    }

    #[test]
    fn rejects_out_of_range_kelly_percent() {
        for pct in ["0", "-5", "150"] {
            let result = Config::parse_toml(&format!("[kelly]\npercent = {pct}\n"));
            assert!(
                matches!(
                    result,
                    Err(Error::Config(ConfigError::InvalidValue { field: "percent", .. }))
                ),
                "percent {pct} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_negative_bankroll_and_boost() {
        assert!(Config::parse_toml("[kelly]\nbankroll = -1\n").is_err());
        assert!(Config::parse_toml("[comparison]\nboost_percent = -10\n").is_err());
    }

    #[test]
    fn rejects_unknown_log_format() {
        let result = Config::parse_toml("[logging]\nformat = \"xml\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "format", .. }))
        ));
    }

    #[test]
    fn rejects_zero_preview_limit() {
        assert!(Config::parse_toml("[display]\npreview_per_sport = 0\n").is_err());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        assert!(matches!(
            Config::parse_toml("[kelly\n"),
            Err(Error::Config(ConfigError::Parse(_)))
        ));
    }
}
