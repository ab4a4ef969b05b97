//! `edgefinder convert`: American odds to decimal and implied probability.

use serde_json::json;

use crate::cli::{output, ConvertArgs};
use crate::domain::format::format_probability;
use crate::domain::odds::format_decimal;
use crate::domain::AmericanOdds;
use crate::error::Result;

/// Print the decimal odds and break-even probability for a price.
///
/// # Errors
///
/// Returns an error for American odds of zero.
pub fn execute(args: &ConvertArgs) -> Result<()> {
    let odds = AmericanOdds::try_new(args.american)?;
    let decimal = odds.to_decimal();
    let probability = odds.implied_probability();

    if output::is_json() {
        output::json_line(
            "conversion",
            json!({
                "american": odds.value(),
                "decimal": decimal,
                "implied_probability": probability,
            }),
        );
        return Ok(());
    }

    output::section(&format!("Odds {}", output::highlight(odds)));
    output::field("Decimal", format_decimal(Some(decimal)));
    output::field("Implied", format_probability(Some(probability)));
    Ok(())
}
