//! Display configuration: timezone, logos, preview limits and market labels.

use std::collections::HashMap;

use chrono_tz::Tz;
use serde::Deserialize;

use crate::domain::market::MarketLabels;

/// How values are presented in tables and cards.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// IANA timezone used for game times (e.g. `US/Eastern`).
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Per-sport row cap for limited preview. Unset shows every row.
    #[serde(default)]
    pub preview_per_sport: Option<usize>,

    /// Base URL for team logos; `{base}/{sport}/{abbr}.svg`.
    #[serde(default = "default_logo_base_url")]
    pub logo_base_url: String,

    /// Extra or replacement market labels keyed by market code.
    #[serde(default)]
    pub market_labels: HashMap<String, String>,
}

fn default_timezone() -> String {
    "US/Eastern".to_string()
}

fn default_logo_base_url() -> String {
    "https://static.edgefinder.app/team-logos".to_string()
}

impl DisplayConfig {
    /// Parsed timezone, falling back to US/Eastern when unparseable.
    ///
    /// `Config::validate` rejects bad names, so the fallback only applies to
    /// configs built by hand.
    #[must_use]
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or(chrono_tz::US::Eastern)
    }

    /// Built-in market labels merged with configured overrides.
    #[must_use]
    pub fn labels(&self) -> MarketLabels {
        MarketLabels::new().with_overrides(self.market_labels.clone())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            preview_per_sport: None,
            logo_base_url: default_logo_base_url(),
            market_labels: HashMap::new(),
        }
    }
}
