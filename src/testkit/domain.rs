//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`AmericanOdds`], [`BookOffer`]
//! and [`Deal`] so tests focus on assertions rather than construction
//! boilerplate.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{AmericanOdds, BookOffer, Deal, DealBuilder, Side, Sport};

/// Create [`AmericanOdds`], panicking on zero.
pub fn odds(value: i32) -> AmericanOdds {
    AmericanOdds::try_new(value).expect("non-zero american odds")
}

/// Create a [`BookOffer`] for `book` at `price`.
pub fn offer(book: &str, price: i32) -> BookOffer {
    BookOffer::new(book, odds(price))
}

/// A UTC timestamp on 2026-10-19 at `hour:00`.
pub fn kickoff(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Builder for an over bet on `player_points` with one quote per `(book, price)`.
///
/// The best price and best book are taken from the highest quote, so the
/// result is consistent by construction. Callers add whatever else they need.
pub fn deal_builder(id: &str, sport: Sport, quotes: &[(&str, i32)]) -> DealBuilder {
    let mut builder = Deal::builder()
        .id(id)
        .sport(sport)
        .event_id(format!("evt-{id}"))
        .market("player_points")
        .side(Side::Over)
        .selection_id(format!("sel-{id}"))
        .offers(quotes.iter().map(|(book, price)| offer(book, *price)).collect());

    if let Some((book, price)) = quotes.iter().max_by_key(|(_, price)| *price) {
        builder = builder.best_price(odds(*price)).best_book(*book);
    }
    builder
}

/// A complete NBA deal with the given quotes.
pub fn deal(id: &str, quotes: &[(&str, i32)]) -> Deal {
    deal_builder(id, Sport::Nba, quotes)
        .build()
        .expect("complete deal")
}

/// A deal whose upstream feed reported `improvement` percent over the average.
pub fn deal_with_edge(id: &str, sport: Sport, improvement: Option<f64>) -> Deal {
    let mut builder = deal_builder(id, sport, &[("draftkings", 120), ("fanduel", 110)]);
    if let Some(improvement) = improvement {
        builder = builder.price_improvement(improvement).average_price(110.0);
    }
    builder.build().expect("complete deal")
}

/// A deal starting at `kickoff(hour)`, or with no start time.
pub fn deal_at(id: &str, hour: Option<u32>) -> Deal {
    let mut builder = deal_builder(id, Sport::Nfl, &[("draftkings", -105)]);
    if let Some(hour) = hour {
        builder = builder.start_time(kickoff(hour));
    }
    builder.build().expect("complete deal")
}
