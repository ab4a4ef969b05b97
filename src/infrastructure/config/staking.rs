//! Comparison and stake-sizing configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::ComparisonMode;

/// Which baseline edges are measured against, and any active promotion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComparisonConfig {
    /// `average`, `next_best` or `book:<id>`. Unrecognized values mean
    /// `average`.
    #[serde(default)]
    pub mode: ComparisonMode,

    /// Promotional profit boost in percent, applied to displayed edges and
    /// to the sized stake fraction.
    #[serde(default)]
    pub boost_percent: Option<f64>,
}

/// Kelly stake-sizing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct KellyConfig {
    /// Bankroll in dollars. Zero disables stake recommendations.
    #[serde(default)]
    pub bankroll: Decimal,

    /// Share of full Kelly to bet, in percent (25 = quarter Kelly).
    #[serde(default = "default_kelly_percent")]
    pub percent: f64,
}

const fn default_kelly_percent() -> f64 {
    25.0
}

impl Default for KellyConfig {
    fn default() -> Self {
        Self {
            bankroll: Decimal::ZERO,
            percent: default_kelly_percent(),
        }
    }
}
