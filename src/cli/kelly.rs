//! `edgefinder kelly`: stake recommendation for a single bet.

use serde_json::json;

use crate::cli::{output, KellyArgs};
use crate::domain::edge::improvement_between;
use crate::domain::error::DomainError;
use crate::domain::format::format_edge;
use crate::domain::{kelly_stake, AmericanOdds, KellyInput};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Size a stake from the best and fair prices.
///
/// Unset bankroll, Kelly percentage and boost fall back to the config file.
///
/// # Errors
///
/// Returns an error for zero odds, invalid percentages, or a config file
/// that exists but fails to load.
pub fn execute(args: &KellyArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    config.init_logging();

    let best = AmericanOdds::try_new(args.best)?;
    let fair = AmericanOdds::try_new(args.fair)?;

    let kelly_percent = args.kelly_percent.unwrap_or(config.kelly.percent);
    if !kelly_percent.is_finite() || kelly_percent <= 0.0 || kelly_percent > 100.0 {
        return Err(DomainError::InvalidPercent {
            field: "kelly_percent",
            value: kelly_percent,
        }
        .into());
    }
    let boost_percent = args.boost.or(config.comparison.boost_percent);
    if let Some(boost) = boost_percent.filter(|b| !b.is_finite() || *b < 0.0) {
        return Err(DomainError::InvalidPercent {
            field: "boost",
            value: boost,
        }
        .into());
    }

    let input = KellyInput {
        bankroll: args.bankroll.unwrap_or(config.kelly.bankroll),
        best_american: f64::from(best.value()),
        fair_american: Some(f64::from(fair.value())),
        kelly_percent,
        boost_percent,
    };
    let edge = improvement_between(input.best_american, f64::from(fair.value()));
    let stake = kelly_stake(&input);

    if output::is_json() {
        output::json_line(
            "kelly",
            json!({
                "bankroll": input.bankroll,
                "best": best.value(),
                "fair": fair.value(),
                "edge_percent": edge,
                "kelly_percent": kelly_percent,
                "boost_percent": boost_percent,
                "full_fraction": stake.map(|s| s.full_fraction),
                "fraction": stake.map(|s| s.fraction),
                "stake": stake.map(|s| s.stake),
            }),
        );
        return Ok(());
    }

    output::section(&format!("Kelly {best} vs fair {fair}"));
    output::field("Bankroll", format!("${}", input.bankroll));
    output::field("Edge", format_edge(edge));
    match stake {
        Some(stake) => {
            output::field("Full Kelly", format!("{:.2}%", stake.full_fraction * 100.0));
            output::field("Fraction", format!("{:.2}%", stake.fraction * 100.0));
            output::field("Stake", output::highlight(format!("${}", stake.stake)));
        }
        None => output::warning("No positive edge at this bankroll; no stake recommended"),
    }
    Ok(())
}
