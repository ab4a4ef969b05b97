//! Deal ingestion.
//!
//! Upstream feeds deliver deals with inconsistent field naming
//! (`playerName` vs `player_name`, `avgPrice` vs `average_price`), sometimes
//! several spellings in one record. Keys are folded onto one canonical
//! spelling, then normalized into typed [`Deal`]s exactly once, so nothing
//! downstream has to guess.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{AmericanOdds, BookLimits, BookOffer, Deal, DealBuildError, Side, Sport};
use crate::error::Result;

/// Errors produced while normalizing a single raw deal.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid price for {field}: {value}")]
    InvalidPrice { field: &'static str, value: f64 },

    #[error("unknown side '{0}'")]
    UnknownSide(String),

    #[error("malformed deal: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("unexpected deal payload: {0}")]
    UnexpectedPayload(&'static str),
}

impl From<DealBuildError> for IngestError {
    fn from(err: DealBuildError) -> Self {
        let field = match err {
            DealBuildError::MissingId => "id",
            DealBuildError::MissingSport => "sport",
            DealBuildError::MissingEventId => "event_id",
            DealBuildError::MissingMarket => "market",
            DealBuildError::MissingSide => "side",
            DealBuildError::MissingBestPrice => "best_price",
        };
        Self::MissingField { field }
    }
}

/// Stake limits as delivered upstream.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLimits {
    #[serde(default)]
    pub max_stake: Option<Decimal>,
}

/// Per-book quote as delivered upstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBookOffer {
    pub book: String,
    pub price: f64,
    #[serde(default)]
    pub decimal: Option<f64>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub mobile_link: Option<String>,
    #[serde(default)]
    pub limits: Option<RawLimits>,
}

/// Deal as delivered upstream.
///
/// Field names are the canonical camelCase keys; other spellings are folded
/// onto them by [`canonicalize_deal`] before deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeal {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sport: Option<String>,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub line: Option<f64>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub best_price: Option<f64>,
    #[serde(default)]
    pub best_book: Option<String>,
    #[serde(default)]
    pub average_price: Option<f64>,
    #[serde(default)]
    pub num_books: Option<u32>,
    #[serde(default)]
    pub price_improvement: Option<f64>,
    #[serde(default)]
    pub fair_american: Option<f64>,
    #[serde(default)]
    pub sharp_price: Option<f64>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub selection_id: Option<String>,
    #[serde(default)]
    pub home_team: Option<String>,
    #[serde(default)]
    pub away_team: Option<String>,
    #[serde(default)]
    pub all_books: Vec<RawBookOffer>,
}

type KeySpellings = &'static [(&'static str, &'static [&'static str])];

const DEAL_KEYS: KeySpellings = &[
    ("id", &["deal_id", "dealId", "key"]),
    ("eventId", &["event_id", "gameId", "game_id"]),
    ("playerName", &["player_name", "player"]),
    ("market", &["marketKey", "market_key", "mkt"]),
    ("bestPrice", &["best_price", "bestOdds", "best_odds"]),
    ("bestBook", &["best_book"]),
    ("averagePrice", &["average_price", "avgPrice", "avg_price"]),
    ("numBooks", &["num_books", "bookCount", "book_count"]),
    ("priceImprovement", &["price_improvement"]),
    ("fairAmerican", &["fair_american"]),
    ("sharpPrice", &["sharp_price"]),
    (
        "startTime",
        &["start_time", "commenceTime", "commence_time", "game_time"],
    ),
    ("selectionId", &["selection_id", "oddsId", "odds_id"]),
    ("homeTeam", &["home_team", "home"]),
    ("awayTeam", &["away_team", "away"]),
    ("allBooks", &["all_books", "books"]),
];

const OFFER_KEYS: KeySpellings = &[
    ("book", &["bookId", "book_id", "sportsbook"]),
    ("price", &["odds", "american"]),
    ("link", &["url"]),
    ("mobileLink", &["mobile_link", "mobileUrl"]),
];

const LIMIT_KEYS: KeySpellings = &[("maxStake", &["max", "max_stake"])];

/// Null and blank strings count as absent, so a later spelling can fill in.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Fold every known spelling of a key onto its canonical name.
///
/// The canonical key wins when present, then the spellings in table order.
/// Losing spellings are removed so they cannot collide during
/// deserialization.
fn fold_keys(map: &mut Map<String, Value>, keys: KeySpellings) {
    for (canonical, spellings) in keys {
        let mut chosen = map.remove(*canonical).filter(is_present);
        for spelling in *spellings {
            if let Some(value) = map.remove(*spelling) {
                if chosen.is_none() && is_present(&value) {
                    chosen = Some(value);
                }
            }
        }
        if let Some(value) = chosen {
            map.insert((*canonical).to_string(), value);
        }
    }
}

/// Normalize the key spellings of one raw deal object, including its quotes.
pub fn canonicalize_deal(value: &mut Value) {
    let Value::Object(map) = value else {
        return;
    };
    fold_keys(map, DEAL_KEYS);
    if let Some(Value::Array(offers)) = map.get_mut("allBooks") {
        for offer in offers.iter_mut() {
            if let Value::Object(offer) = offer {
                fold_keys(offer, OFFER_KEYS);
                if let Some(Value::Object(limits)) = offer.get_mut("limits") {
                    fold_keys(limits, LIMIT_KEYS);
                }
            }
        }
    }
}

fn american(field: &'static str, value: f64) -> std::result::Result<AmericanOdds, IngestError> {
    if !value.is_finite() {
        return Err(IngestError::InvalidPrice { field, value });
    }
    let rounded = value.round();
    if rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
        return Err(IngestError::InvalidPrice { field, value });
    }
    AmericanOdds::try_new(rounded as i32).map_err(|_| IngestError::InvalidPrice { field, value })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn normalize_offer(raw: RawBookOffer) -> std::result::Result<BookOffer, IngestError> {
    let price = american("all_books.price", raw.price)?;
    let mut offer = BookOffer::new(raw.book.as_str(), price)
        .with_links(non_blank(raw.link), non_blank(raw.mobile_link));
    if let Some(decimal) = raw.decimal.filter(|d| d.is_finite() && *d > 1.0) {
        offer.decimal = decimal;
    }
    if let Some(limits) = raw.limits {
        offer = offer.with_limits(BookLimits {
            max_stake: limits.max_stake,
        });
    }
    Ok(offer)
}

/// Normalize one raw deal into a typed [`Deal`].
///
/// Individual quotes with unusable prices are dropped; the deal itself is
/// rejected only when a required field is missing or invalid.
pub fn normalize(raw: RawDeal) -> std::result::Result<Deal, IngestError> {
    let event_id = non_blank(raw.event_id).ok_or(IngestError::MissingField { field: "event_id" })?;
    let market = non_blank(raw.market).ok_or(IngestError::MissingField { field: "market" })?;
    let side_label = non_blank(raw.side).ok_or(IngestError::MissingField { field: "side" })?;
    let side: Side = side_label
        .parse()
        .map_err(|_| IngestError::UnknownSide(side_label.clone()))?;
    let best_price = american(
        "best_price",
        raw.best_price.ok_or(IngestError::MissingField { field: "best_price" })?,
    )?;
    let sport: Sport = non_blank(raw.sport)
        .ok_or(IngestError::MissingField { field: "sport" })?
        .into();
    let player = non_blank(raw.player_name);

    let id = non_blank(raw.id).unwrap_or_else(|| {
        let line = raw.line.map(|l| l.to_string()).unwrap_or_default();
        format!(
            "{event_id}:{market}:{}:{side_label}:{line}",
            player.as_deref().unwrap_or("")
        )
        .to_ascii_lowercase()
    });

    let mut offers = Vec::with_capacity(raw.all_books.len());
    for offer in raw.all_books {
        let book = offer.book.clone();
        match normalize_offer(offer) {
            Ok(offer) => offers.push(offer),
            Err(e) => warn!(deal = %id, book = %book, error = %e, "Dropping unusable quote"),
        }
    }

    let mut builder = Deal::builder()
        .id(id)
        .sport(sport)
        .event_id(event_id)
        .market(market)
        .side(side)
        .best_price(best_price)
        .offers(offers);

    if let Some(player) = player {
        builder = builder.player(player);
    }
    if let Some(line) = raw.line.filter(|l| l.is_finite()) {
        builder = builder.line(line);
    }
    if let Some(book) = non_blank(raw.best_book) {
        builder = builder.best_book(book);
    }
    if let Some(avg) = raw.average_price.filter(|p| p.is_finite() && *p != 0.0) {
        builder = builder.average_price(avg);
    }
    if let Some(count) = raw.num_books {
        builder = builder.book_count(count);
    }
    if let Some(v) = raw.price_improvement.filter(|v| v.is_finite()) {
        builder = builder.price_improvement(v);
    }
    if let Some(v) = raw.fair_american.filter(|v| v.is_finite() && *v != 0.0) {
        builder = builder.fair_american(v);
    }
    if let Some(v) = raw.sharp_price.filter(|v| v.is_finite() && *v != 0.0) {
        builder = builder.sharp_price(v);
    }
    if let Some(start) = raw.start_time {
        builder = builder.start_time(start);
    }
    if let Some(selection) = non_blank(raw.selection_id) {
        builder = builder.selection_id(selection);
    }
    if let (Some(home), Some(away)) = (non_blank(raw.home_team), non_blank(raw.away_team)) {
        builder = builder.teams(home, away);
    }

    let deal = builder.build()?;
    if !deal.is_consistent() {
        debug!(
            deal = %deal.id(),
            best_price = deal.best_price().value(),
            "Best price does not match highest quote"
        );
    }
    Ok(deal)
}

fn deal_values(payload: Value) -> std::result::Result<Vec<Value>, IngestError> {
    match payload {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            for key in ["deals", "opportunities", "data"] {
                if let Some(Value::Array(items)) = map.remove(key) {
                    return Ok(items);
                }
            }
            Err(IngestError::UnexpectedPayload("object without a deals array"))
        }
        _ => Err(IngestError::UnexpectedPayload("expected an array of deals")),
    }
}

/// Parse a JSON payload of deals.
///
/// Accepts a bare array or an object wrapping one under `deals`,
/// `opportunities` or `data`. Deals that fail to normalize are skipped.
///
/// # Errors
///
/// Returns an error if the payload is not valid JSON or has no deals array.
pub fn parse_deals(json: &str) -> Result<Vec<Deal>> {
    let payload: Value = serde_json::from_str(json)?;
    let values = deal_values(payload)?;
    let total = values.len();

    let deals: Vec<Deal> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, mut value)| {
            canonicalize_deal(&mut value);
            let result = serde_json::from_value::<RawDeal>(value)
                .map_err(IngestError::Malformed)
                .and_then(normalize);
            match result {
                Ok(deal) => Some(deal),
                Err(e) => {
                    warn!(index, error = %e, "Skipping deal");
                    None
                }
            }
        })
        .collect();

    info!(total, loaded = deals.len(), "Deals loaded");
    Ok(deals)
}

/// Read and parse a deals file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_deals<P: AsRef<Path>>(path: P) -> Result<Vec<Deal>> {
    let content = fs::read_to_string(path)?;
    parse_deals(&content)
}

/// Parse a live-odds snapshot into the set of selection ids it covers.
///
/// Accepts an object keyed by selection id (values are ignored) or an array
/// of selection id strings.
///
/// # Errors
///
/// Returns an error if the payload is not valid JSON or has another shape.
pub fn parse_live_selections(json: &str) -> Result<Vec<String>> {
    match serde_json::from_str::<Value>(json)? {
        Value::Object(map) => Ok(map.into_iter().map(|(key, _)| key).collect()),
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(id) => Some(id),
                _ => None,
            })
            .collect()),
        _ => Err(IngestError::UnexpectedPayload("expected an odds map or id array").into()),
    }
}

/// Read a live-odds snapshot file. See [`parse_live_selections`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_live_selections<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    parse_live_selections(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookId;

    #[test]
    fn camel_case_deal_normalizes() {
        let json = r#"[{
            "id": "d1",
            "sport": "nba",
            "eventId": "evt-1",
            "playerName": "LeBron James",
            "market": "player_points",
            "line": 24.5,
            "side": "over",
            "bestPrice": 120,
            "bestBook": "FanDuel",
            "avgPrice": -102.5,
            "numBooks": 6,
            "priceImprovement": 7.3,
            "allBooks": [
                {"book": "FanDuel", "price": 120, "mobileLink": "fanduelsportsbook://x"},
                {"book": "DraftKings", "price": 110}
            ]
        }]"#;
        let deals = parse_deals(json).unwrap();
        assert_eq!(deals.len(), 1);
        let d = &deals[0];
        assert_eq!(d.player(), Some("LeBron James"));
        assert_eq!(d.average_price(), Some(-102.5));
        assert_eq!(d.book_count(), 6);
        assert_eq!(d.price_improvement(), Some(7.3));
        assert_eq!(d.best_book(), Some(&BookId::new("fanduel")));
        assert_eq!(d.all_books().len(), 2);
        assert_eq!(
            d.all_books()[0].mobile_link.as_deref(),
            Some("fanduelsportsbook://x")
        );
    }

    #[test]
    fn snake_case_deal_normalizes_identically() {
        let json = r#"{"deals": [{
            "deal_id": "d1",
            "sport": "NBA",
            "event_id": "evt-1",
            "player_name": "LeBron James",
            "market_key": "player_points",
            "side": "Over",
            "best_price": 120,
            "average_price": -102.5,
            "price_improvement": 7.3,
            "all_books": [{"book_id": "fanduel", "price": 120, "mobile_link": "fanduelsportsbook://x"}]
        }]}"#;
        let deals = parse_deals(json).unwrap();
        let d = &deals[0];
        assert_eq!(d.id().as_str(), "d1");
        assert_eq!(d.sport(), &Sport::Nba);
        assert_eq!(d.player(), Some("LeBron James"));
        assert_eq!(d.market(), "player_points");
        assert_eq!(d.price_improvement(), Some(7.3));
        assert_eq!(d.book_count(), 1);
    }

    #[test]
    fn missing_id_is_derived_from_market_identity() {
        let raw = RawDeal {
            sport: Some("nfl".into()),
            event_id: Some("EVT".into()),
            market: Some("player_pass_yds".into()),
            side: Some("under".into()),
            line: Some(249.5),
            best_price: Some(-105.0),
            player_name: Some("Josh Allen".into()),
            ..RawDeal::default()
        };
        let deal = normalize(raw).unwrap();
        assert_eq!(deal.id().as_str(), "evt:player_pass_yds:josh allen:under:249.5");
    }

    #[test]
    fn zero_best_price_is_rejected() {
        let raw = RawDeal {
            sport: Some("nba".into()),
            event_id: Some("e".into()),
            market: Some("h2h".into()),
            side: Some("home".into()),
            best_price: Some(0.0),
            ..RawDeal::default()
        };
        assert!(matches!(
            normalize(raw),
            Err(IngestError::InvalidPrice { field: "best_price", .. })
        ));
    }

    #[test]
    fn unknown_side_is_rejected() {
        let raw = RawDeal {
            sport: Some("nba".into()),
            event_id: Some("e".into()),
            market: Some("h2h".into()),
            side: Some("draw-ish".into()),
            best_price: Some(120.0),
            ..RawDeal::default()
        };
        assert!(matches!(normalize(raw), Err(IngestError::UnknownSide(_))));
    }

    #[test]
    fn bad_deals_and_quotes_are_skipped() {
        let json = r#"[
            {"sport": "nba", "eventId": "e1", "market": "h2h", "side": "home", "bestPrice": 110,
             "allBooks": [{"book": "a", "price": 110}, {"book": "b", "price": 0}]},
            {"sport": "nba", "eventId": "e2", "market": "h2h", "side": "home"},
            {"sport": "nba", "eventId": "e3", "market": "h2h", "side": "home", "bestPrice": "oops"}
        ]"#;
        let deals = parse_deals(json).unwrap();
        assert_eq!(deals.len(), 1);
        assert_eq!(deals[0].all_books().len(), 1);
    }

    #[test]
    fn non_array_payload_is_an_error() {
        assert!(parse_deals(r#"{"foo": 1}"#).is_err());
        assert!(parse_deals("42").is_err());
        assert!(parse_deals("not json").is_err());
    }

    #[test]
    fn start_time_accepts_commence_time_alias() {
        let json = r#"[{"sport": "mlb", "event_id": "e", "market": "h2h", "side": "away",
            "best_price": 140, "commence_time": "2026-10-19T23:05:00Z"}]"#;
        let deals = parse_deals(json).unwrap();
        assert!(deals[0].start_time().is_some());
    }

    #[test]
    fn duplicate_spellings_in_one_record_are_merged() {
        let json = r#"[{
            "id": "d1",
            "sport": "nba",
            "eventId": "evt-1",
            "event_id": "evt-1",
            "market": "player_points",
            "side": "over",
            "bestPrice": 120,
            "best_price": 120,
            "playerName": "LeBron James",
            "player_name": "LeBron James",
            "avgPrice": -102.5,
            "average_price": -101,
            "allBooks": [{"book": "FanDuel", "book_id": "fanduel", "price": 120, "odds": 120,
                          "limits": {"max": 250, "max_stake": 500}}],
            "books": []
        }]"#;
        let deals = parse_deals(json).unwrap();
        assert_eq!(deals.len(), 1);
        let d = &deals[0];
        assert_eq!(d.player(), Some("LeBron James"));
        assert_eq!(d.event_id().as_str(), "evt-1");
        // canonical spelling wins, then the first listed fallback
        assert_eq!(d.average_price(), Some(-102.5));
        assert_eq!(d.all_books().len(), 1);
        assert_eq!(
            d.all_books()[0].limits.as_ref().and_then(|l| l.max_stake),
            Some(Decimal::from(250))
        );
    }

    #[test]
    fn blank_spelling_falls_through_to_the_next() {
        let mut value = serde_json::json!({
            "playerName": "",
            "player_name": null,
            "player": "Josh Allen"
        });
        canonicalize_deal(&mut value);
        assert_eq!(value, serde_json::json!({"playerName": "Josh Allen"}));
    }

    #[test]
    fn live_selections_accept_map_or_array() {
        let mut from_map =
            parse_live_selections(r#"{"sel-1": {"price": -110}, "sel-2": null}"#).unwrap();
        from_map.sort();
        assert_eq!(from_map, vec!["sel-1", "sel-2"]);

        let from_array = parse_live_selections(r#"["sel-3", 7, "sel-4"]"#).unwrap();
        assert_eq!(from_array, vec!["sel-3", "sel-4"]);

        assert!(parse_live_selections("42").is_err());
    }
}
