//! Kelly-criterion stake sizing.
//!
//! Full Kelly: `f = (b·p − q) / b` where `b` is the net decimal payout of
//! the best price, `p` is the win probability implied by the fair (no-vig)
//! price and `q = 1 − p`. The recommended fraction scales full Kelly by the
//! user's Kelly percentage and any promotional boost, capped at the whole
//! bankroll.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use super::odds::{american_to_decimal, implied_probability};

/// Inputs for a stake recommendation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KellyInput {
    pub bankroll: Decimal,
    /// Best available price, American odds.
    pub best_american: f64,
    /// Fair (no-vig) price, American odds.
    pub fair_american: Option<f64>,
    /// Share of full Kelly to bet, e.g. `25.0` for quarter Kelly.
    pub kelly_percent: f64,
    /// Promotional profit boost in percent.
    pub boost_percent: Option<f64>,
}

/// Stake recommendation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KellyStake {
    /// Unscaled Kelly fraction of bankroll.
    pub full_fraction: f64,
    /// Fraction after Kelly percentage and boost scaling.
    pub fraction: f64,
    /// Stake in bankroll currency, rounded to cents.
    pub stake: Decimal,
}

/// Full-Kelly fraction for a price and a win probability.
///
/// Returns `None` for degenerate inputs. A non-positive result is returned
/// as-is so callers can tell "no edge" from "bad input".
#[must_use]
pub fn full_kelly_fraction(best_american: f64, win_probability: f64) -> Option<f64> {
    if !(0.0..=1.0).contains(&win_probability) {
        return None;
    }
    let b = american_to_decimal(best_american)? - 1.0;
    if b <= 0.0 {
        return None;
    }
    let q = 1.0 - win_probability;
    let f = (b * win_probability - q) / b;
    f.is_finite().then_some(f)
}

/// Recommended stake, or `None` when no stake should be shown.
///
/// No stake is shown for a non-positive bankroll, unusable odds, a missing
/// fair price, or when the best price carries no edge over the fair price.
#[must_use]
pub fn kelly_stake(input: &KellyInput) -> Option<KellyStake> {
    if input.bankroll <= Decimal::ZERO {
        return None;
    }
    if !input.kelly_percent.is_finite() || input.kelly_percent <= 0.0 {
        return None;
    }
    let p = implied_probability(input.fair_american?)?;
    let full_fraction = full_kelly_fraction(input.best_american, p)?;
    if full_fraction <= 0.0 {
        return None;
    }

    let boost = match input.boost_percent {
        Some(b) if b.is_finite() && b > 0.0 => 1.0 + b / 100.0,
        _ => 1.0,
    };
    let fraction = (full_fraction * input.kelly_percent / 100.0 * boost).min(1.0);
    let stake = (input.bankroll * Decimal::from_f64(fraction)?).round_dp(2);
    if stake <= Decimal::ZERO {
        return None;
    }

    Some(KellyStake {
        full_fraction,
        fraction,
        stake,
    })
}
