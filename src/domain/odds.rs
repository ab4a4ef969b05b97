//! Odds conversion between American and decimal formats.
//!
//! American odds are signed: `+150` pays 150 on a 100 stake, `-200` needs a
//! 200 stake to win 100. Decimal odds are the total return per unit staked
//! and are always greater than 1 for a valid price.
//!
//! American odds of `0` do not exist in practice and have no decimal
//! equivalent, so every conversion here treats `0` as invalid input and
//! returns `None` instead of producing an infinite value.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Placeholder shown wherever a price or derived value is missing.
pub const MISSING: &str = "—";

/// Validated American odds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct AmericanOdds(i32);

impl AmericanOdds {
    /// Create American odds, rejecting zero.
    pub fn try_new(value: i32) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::ZeroAmericanOdds);
        }
        Ok(Self(value))
    }

    /// Build American odds from decimal odds, rounding to the nearest integer.
    pub fn try_from_decimal(decimal: f64) -> Result<Self, DomainError> {
        let american = decimal_to_american(decimal)
            .ok_or(DomainError::DecimalOddsOutOfRange { decimal })?;
        Self::try_new(american.round() as i32)
    }

    /// Raw signed value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Decimal odds equivalent. Always greater than 1.
    #[must_use]
    pub fn to_decimal(self) -> f64 {
        let american = f64::from(self.0);
        if american > 0.0 {
            1.0 + american / 100.0
        } else {
            1.0 + 100.0 / american.abs()
        }
    }

    /// Break-even probability implied by this price (vig included).
    #[must_use]
    pub fn implied_probability(self) -> f64 {
        1.0 / self.to_decimal()
    }
}

impl TryFrom<i32> for AmericanOdds {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<AmericanOdds> for i32 {
    fn from(odds: AmericanOdds) -> Self {
        odds.0
    }
}

impl fmt::Display for AmericanOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Convert American odds to decimal odds.
///
/// Positive odds map to `1 + american/100`, negative odds to
/// `1 + 100/|american|`. Returns `None` for `0` and non-finite input.
#[must_use]
pub fn american_to_decimal(american: f64) -> Option<f64> {
    if !american.is_finite() || american == 0.0 {
        return None;
    }
    if american > 0.0 {
        Some(1.0 + american / 100.0)
    } else {
        Some(1.0 + 100.0 / american.abs())
    }
}

/// Convert decimal odds to (unrounded) American odds.
///
/// Returns `None` when `decimal <= 1` or is not finite.
#[must_use]
pub fn decimal_to_american(decimal: f64) -> Option<f64> {
    if !decimal.is_finite() || decimal <= 1.0 {
        return None;
    }
    let profit = decimal - 1.0;
    if decimal >= 2.0 {
        Some(profit * 100.0)
    } else {
        Some(-100.0 / profit)
    }
}

/// Break-even probability implied by American odds.
#[must_use]
pub fn implied_probability(american: f64) -> Option<f64> {
    american_to_decimal(american).map(|decimal| 1.0 / decimal)
}

/// Format an American price with an explicit sign, or a dash when missing.
///
/// Fractional prices (e.g. averages) are rounded to the nearest integer.
#[must_use]
pub fn format_american(price: Option<f64>) -> String {
    match price {
        Some(p) if p.is_finite() && p.round() != 0.0 => {
            let rounded = p.round() as i64;
            if rounded > 0 {
                format!("+{rounded}")
            } else {
                format!("{rounded}")
            }
        }
        _ => MISSING.to_string(),
    }
}

/// Format decimal odds to two places, or a dash when missing.
#[must_use]
pub fn format_decimal(decimal: Option<f64>) -> String {
    match decimal {
        Some(d) if d.is_finite() => format!("{d:.2}"),
        _ => MISSING.to_string(),
    }
}
