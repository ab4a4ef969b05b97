//! Comparison baseline selection.
//!
//! The edge of a deal is always measured against some baseline price. The
//! user picks which one: the market average, a specific reference book, or
//! the next-best quote after the best one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::deal::Deal;
use super::ids::BookId;

/// Baseline the best price is compared against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComparisonMode {
    /// Upstream market-average price.
    #[default]
    Average,
    /// A named reference sportsbook, falling back to the average.
    Book(BookId),
    /// The highest quote strictly below the best price.
    NextBest,
}

impl ComparisonMode {
    /// Resolve the baseline price (American odds) for a deal.
    ///
    /// - `Average` returns the upstream average without recomputing it.
    /// - `Book` returns that book's quote, or the average when the book has
    ///   no quote on this deal.
    /// - `NextBest` returns `None` when there are no quotes, the best price
    ///   itself when every quote ties it, and otherwise the first quote
    ///   strictly below it.
    #[must_use]
    pub fn baseline(&self, deal: &Deal) -> Option<f64> {
        match self {
            Self::Average => deal.average_price(),
            Self::Book(book) => deal
                .offer_for(book)
                .map(|offer| f64::from(offer.price.value()))
                .or_else(|| deal.average_price()),
            Self::NextBest => next_best_price(deal),
        }
    }
}

fn next_best_price(deal: &Deal) -> Option<f64> {
    let mut prices: Vec<i32> = deal.all_books().iter().map(|o| o.price.value()).collect();
    if prices.is_empty() {
        return None;
    }
    prices.sort_unstable_by(|a, b| b.cmp(a));

    let best = deal.best_price().value();
    let next = prices.into_iter().find(|&p| p < best).unwrap_or(best);
    Some(f64::from(next))
}

impl FromStr for ComparisonMode {
    type Err = std::convert::Infallible;

    /// Parse a mode label. Unrecognized labels resolve to `Average`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        Ok(match lower.as_str() {
            "next_best" | "next-best" | "nextbest" => Self::NextBest,
            "average" | "avg" | "market" => Self::Average,
            _ => match lower.strip_prefix("book:") {
                Some(book) if !book.trim().is_empty() => Self::Book(BookId::new(book)),
                _ => {
                    tracing::debug!(mode = trimmed, "Unrecognized comparison mode, using average");
                    Self::Average
                }
            },
        })
    }
}

impl From<String> for ComparisonMode {
    fn from(s: String) -> Self {
        match s.parse::<ComparisonMode>() {
            Ok(mode) => mode,
            Err(never) => match never {},
        }
    }
}

impl From<ComparisonMode> for String {
    fn from(mode: ComparisonMode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Average => write!(f, "average"),
            Self::Book(book) => write!(f, "book:{book}"),
            Self::NextBest => write!(f, "next_best"),
        }
    }
}
