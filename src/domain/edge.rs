//! Edge (price improvement) calculation.
//!
//! The edge is the percentage by which the best price beats the baseline,
//! measured in decimal-odds space. In `Average` mode the upstream
//! `price_improvement` is used verbatim so that displayed values agree with
//! server-side thresholds computed from the same field.

use super::comparison::ComparisonMode;
use super::deal::Deal;
use super::odds::american_to_decimal;

/// Edge of `deal` against the baseline selected by `mode`, in percent.
///
/// Returns `None` when the baseline is missing or either price cannot be
/// converted to decimal odds.
#[must_use]
pub fn edge_percent(deal: &Deal, mode: &ComparisonMode) -> Option<f64> {
    match mode {
        ComparisonMode::Average => deal.price_improvement().filter(|v| v.is_finite()),
        ComparisonMode::Book(_) | ComparisonMode::NextBest => {
            let baseline = mode.baseline(deal)?;
            improvement_between(f64::from(deal.best_price().value()), baseline)
        }
    }
}

/// Percentage improvement of `best` over `baseline`, both in American odds.
#[must_use]
pub fn improvement_between(best: f64, baseline: f64) -> Option<f64> {
    let best_dec = american_to_decimal(best)?;
    let base_dec = american_to_decimal(baseline)?;
    let edge = (best_dec - base_dec) / base_dec * 100.0;
    edge.is_finite().then_some(edge)
}

/// Edge scaled by a promotional profit boost.
///
/// Used for display and sorting only; stake sizing works from the
/// unboosted figures.
#[must_use]
pub fn boosted_edge(edge: Option<f64>, boost_percent: Option<f64>) -> Option<f64> {
    let edge = edge?;
    match boost_percent {
        Some(boost) if boost.is_finite() && boost > 0.0 => Some(edge * (1.0 + boost / 100.0)),
        _ => Some(edge),
    }
}
