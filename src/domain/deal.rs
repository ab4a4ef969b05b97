//! Deal type with builder pattern.
//!
//! A `Deal` is one betting market instance (an event, an optional player,
//! a market, a line and a side) together with the best available price and
//! every per-book quote that contributed to it. Deals are produced upstream
//! and are read-only here; use `Deal::builder()` to construct them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::{BookId, DealId, EventId};
use super::odds::AmericanOdds;

/// Sport a deal belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sport {
    Nba,
    Wnba,
    Nfl,
    Ncaaf,
    Ncaab,
    Mlb,
    Nhl,
    Soccer,
    /// Any sport without a dedicated variant, stored lower-cased.
    Other(String),
}

impl Sport {
    /// Short lower-case key used in URLs and config.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Nba => "nba",
            Self::Wnba => "wnba",
            Self::Nfl => "nfl",
            Self::Ncaaf => "ncaaf",
            Self::Ncaab => "ncaab",
            Self::Mlb => "mlb",
            Self::Nhl => "nhl",
            Self::Soccer => "soccer",
            Self::Other(name) => name,
        }
    }
}

impl FromStr for Sport {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Ok(match key.as_str() {
            "nba" | "basketball_nba" => Self::Nba,
            "wnba" | "basketball_wnba" => Self::Wnba,
            "nfl" | "football_nfl" => Self::Nfl,
            "ncaaf" | "cfb" | "football_ncaaf" => Self::Ncaaf,
            "ncaab" | "cbb" | "basketball_ncaab" => Self::Ncaab,
            "mlb" | "baseball_mlb" => Self::Mlb,
            "nhl" | "icehockey_nhl" => Self::Nhl,
            "soccer" => Self::Soccer,
            _ => Self::Other(key),
        })
    }
}

impl From<String> for Sport {
    fn from(s: String) -> Self {
        match s.parse::<Sport>() {
            Ok(sport) => sport,
            Err(never) => match never {},
        }
    }
}

impl From<Sport> for String {
    fn from(sport: Sport) -> Self {
        sport.key().to_string()
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key().to_ascii_uppercase())
    }
}

/// Side of a market being priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Over,
    Under,
    Yes,
    No,
    Home,
    Away,
}

/// Error returned when a side label is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSide(pub String);

impl fmt::Display for UnknownSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown side '{}'", self.0)
    }
}

impl std::error::Error for UnknownSide {}

impl FromStr for Side {
    type Err = UnknownSide;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "over" | "o" => Ok(Self::Over),
            "under" | "u" => Ok(Self::Under),
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "home" => Ok(Self::Home),
            "away" => Ok(Self::Away),
            _ => Err(UnknownSide(s.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Over => "Over",
            Self::Under => "Under",
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Home => "Home",
            Self::Away => "Away",
        };
        write!(f, "{label}")
    }
}

/// Stake limits a book advertises for a quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookLimits {
    pub max_stake: Option<Decimal>,
}

/// A single sportsbook quote for a deal's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookOffer {
    pub book: BookId,
    pub price: AmericanOdds,
    pub decimal: f64,
    pub link: Option<String>,
    pub mobile_link: Option<String>,
    pub limits: Option<BookLimits>,
}

impl BookOffer {
    /// Create an offer with no links or limits; decimal odds are derived.
    pub fn new(book: impl Into<BookId>, price: AmericanOdds) -> Self {
        Self {
            book: book.into(),
            price,
            decimal: price.to_decimal(),
            link: None,
            mobile_link: None,
            limits: None,
        }
    }

    /// Attach desktop and mobile deep links.
    #[must_use]
    pub fn with_links(mut self, link: Option<String>, mobile_link: Option<String>) -> Self {
        self.link = link;
        self.mobile_link = mobile_link;
        self
    }

    /// Attach stake limits.
    #[must_use]
    pub fn with_limits(mut self, limits: BookLimits) -> Self {
        self.limits = Some(limits);
        self
    }
}

/// Error returned when building a Deal fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealBuildError {
    /// Deal id is required but was not provided.
    MissingId,
    /// Sport is required but was not provided.
    MissingSport,
    /// Event id is required but was not provided.
    MissingEventId,
    /// Market code is required but was not provided.
    MissingMarket,
    /// Side is required but was not provided.
    MissingSide,
    /// Best price is required but was not provided.
    MissingBestPrice,
}

impl fmt::Display for DealBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingId => write!(f, "id is required"),
            Self::MissingSport => write!(f, "sport is required"),
            Self::MissingEventId => write!(f, "event_id is required"),
            Self::MissingMarket => write!(f, "market is required"),
            Self::MissingSide => write!(f, "side is required"),
            Self::MissingBestPrice => write!(f, "best_price is required"),
        }
    }
}

impl std::error::Error for DealBuildError {}

/// A betting market instance with its best price and per-book quotes.
///
/// `best_price` is expected to equal the highest price in `all_books`. That
/// is not enforced; see [`Deal::is_consistent`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deal {
    id: DealId,
    sport: Sport,
    event_id: EventId,
    player: Option<String>,
    market: String,
    line: Option<f64>,
    side: Side,
    best_price: AmericanOdds,
    best_book: Option<BookId>,
    average_price: Option<f64>,
    book_count: u32,
    price_improvement: Option<f64>,
    fair_american: Option<f64>,
    sharp_price: Option<f64>,
    start_time: Option<DateTime<Utc>>,
    selection_id: Option<String>,
    home_team: Option<String>,
    away_team: Option<String>,
    all_books: Vec<BookOffer>,
}

impl Deal {
    /// Create a new builder for constructing a Deal.
    pub fn builder() -> DealBuilder {
        DealBuilder::new()
    }

    pub fn id(&self) -> &DealId {
        &self.id
    }

    pub fn sport(&self) -> &Sport {
        &self.sport
    }

    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    /// Raw market code, e.g. `player_points`.
    pub fn market(&self) -> &str {
        &self.market
    }

    pub fn line(&self) -> Option<f64> {
        self.line
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn best_price(&self) -> AmericanOdds {
        self.best_price
    }

    pub fn best_book(&self) -> Option<&BookId> {
        self.best_book.as_ref()
    }

    /// Upstream market-average price in American odds.
    pub fn average_price(&self) -> Option<f64> {
        self.average_price
    }

    /// Number of books that contributed to the average.
    pub fn book_count(&self) -> u32 {
        self.book_count
    }

    /// Upstream improvement over the market average, in percent.
    pub fn price_improvement(&self) -> Option<f64> {
        self.price_improvement
    }

    /// Upstream no-vig fair price in American odds.
    pub fn fair_american(&self) -> Option<f64> {
        self.fair_american
    }

    pub fn sharp_price(&self) -> Option<f64> {
        self.sharp_price
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// Key used to look the deal up in a live-odds map.
    pub fn selection_id(&self) -> Option<&str> {
        self.selection_id.as_deref()
    }

    pub fn home_team(&self) -> Option<&str> {
        self.home_team.as_deref()
    }

    pub fn away_team(&self) -> Option<&str> {
        self.away_team.as_deref()
    }

    pub fn all_books(&self) -> &[BookOffer] {
        &self.all_books
    }

    /// Quote for a specific book, matched case-insensitively.
    pub fn offer_for(&self, book: &BookId) -> Option<&BookOffer> {
        self.all_books.iter().find(|o| o.book.matches(book.as_str()))
    }

    /// Quote carrying the best price. Prefers the recorded best book on ties.
    pub fn best_offer(&self) -> Option<&BookOffer> {
        if let Some(book) = &self.best_book {
            if let Some(offer) = self
                .offer_for(book)
                .filter(|o| o.price == self.best_price)
            {
                return Some(offer);
            }
        }
        self.all_books.iter().find(|o| o.price == self.best_price)
    }

    /// True when `best_price` equals the highest quote in `all_books`.
    ///
    /// A deal with no quotes is considered consistent.
    pub fn is_consistent(&self) -> bool {
        match self.all_books.iter().map(|o| o.price).max() {
            Some(max) => max == self.best_price,
            None => true,
        }
    }
}

/// Builder for constructing `Deal` instances.
///
/// # Example
///
/// ```
/// use edgefinder::domain::{AmericanOdds, BookOffer, Deal, Side, Sport};
///
/// let deal = Deal::builder()
///     .id("d1")
///     .sport(Sport::Nba)
///     .event_id("evt-1")
///     .market("player_points")
///     .side(Side::Over)
///     .best_price(AmericanOdds::try_new(120).unwrap())
///     .offer(BookOffer::new("draftkings", AmericanOdds::try_new(120).unwrap()))
///     .build()
///     .unwrap();
/// assert_eq!(deal.book_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DealBuilder {
    id: Option<DealId>,
    sport: Option<Sport>,
    event_id: Option<EventId>,
    player: Option<String>,
    market: Option<String>,
    line: Option<f64>,
    side: Option<Side>,
    best_price: Option<AmericanOdds>,
    best_book: Option<BookId>,
    average_price: Option<f64>,
    book_count: Option<u32>,
    price_improvement: Option<f64>,
    fair_american: Option<f64>,
    sharp_price: Option<f64>,
    start_time: Option<DateTime<Utc>>,
    selection_id: Option<String>,
    home_team: Option<String>,
    away_team: Option<String>,
    all_books: Vec<BookOffer>,
}

impl DealBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<DealId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn sport(mut self, sport: Sport) -> Self {
        self.sport = Some(sport);
        self
    }

    pub fn event_id(mut self, event_id: impl Into<EventId>) -> Self {
        self.event_id = Some(event_id.into());
        self
    }

    pub fn player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }

    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    pub fn line(mut self, line: f64) -> Self {
        self.line = Some(line);
        self
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub fn best_price(mut self, price: AmericanOdds) -> Self {
        self.best_price = Some(price);
        self
    }

    pub fn best_book(mut self, book: impl Into<BookId>) -> Self {
        self.best_book = Some(book.into());
        self
    }

    pub fn average_price(mut self, price: f64) -> Self {
        self.average_price = Some(price);
        self
    }

    /// Override the contributing book count. Defaults to the number of offers.
    pub fn book_count(mut self, count: u32) -> Self {
        self.book_count = Some(count);
        self
    }

    pub fn price_improvement(mut self, percent: f64) -> Self {
        self.price_improvement = Some(percent);
        self
    }

    pub fn fair_american(mut self, price: f64) -> Self {
        self.fair_american = Some(price);
        self
    }

    pub fn sharp_price(mut self, price: f64) -> Self {
        self.sharp_price = Some(price);
        self
    }

    pub fn start_time(mut self, start: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self
    }

    pub fn selection_id(mut self, selection_id: impl Into<String>) -> Self {
        self.selection_id = Some(selection_id.into());
        self
    }

    pub fn teams(mut self, home: impl Into<String>, away: impl Into<String>) -> Self {
        self.home_team = Some(home.into());
        self.away_team = Some(away.into());
        self
    }

    /// Add one per-book quote.
    pub fn offer(mut self, offer: BookOffer) -> Self {
        self.all_books.push(offer);
        self
    }

    /// Replace all per-book quotes.
    pub fn offers(mut self, offers: Vec<BookOffer>) -> Self {
        self.all_books = offers;
        self
    }

    /// Build the Deal.
    ///
    /// # Errors
    ///
    /// Returns `DealBuildError` if any required field is missing.
    pub fn build(self) -> Result<Deal, DealBuildError> {
        let id = self.id.ok_or(DealBuildError::MissingId)?;
        let sport = self.sport.ok_or(DealBuildError::MissingSport)?;
        let event_id = self.event_id.ok_or(DealBuildError::MissingEventId)?;
        let market = self.market.ok_or(DealBuildError::MissingMarket)?;
        let side = self.side.ok_or(DealBuildError::MissingSide)?;
        let best_price = self.best_price.ok_or(DealBuildError::MissingBestPrice)?;

        let book_count = self
            .book_count
            .unwrap_or_else(|| u32::try_from(self.all_books.len()).unwrap_or(u32::MAX));

        Ok(Deal {
            id,
            sport,
            event_id,
            player: self.player,
            market,
            line: self.line,
            side,
            best_price,
            best_book: self.best_book,
            average_price: self.average_price,
            book_count,
            price_improvement: self.price_improvement,
            fair_american: self.fair_american,
            sharp_price: self.sharp_price,
            start_time: self.start_time,
            selection_id: self.selection_id,
            home_team: self.home_team,
            away_team: self.away_team,
            all_books: self.all_books,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn odds(v: i32) -> AmericanOdds {
        AmericanOdds::try_new(v).unwrap()
    }

    fn base() -> DealBuilder {
        Deal::builder()
            .id("d1")
            .sport(Sport::Nba)
            .event_id("evt-1")
            .market("player_points")
            .side(Side::Over)
            .best_price(odds(120))
    }

    #[test]
    fn builder_requires_best_price() {
        let result = Deal::builder()
            .id("d1")
            .sport(Sport::Nba)
            .event_id("evt-1")
            .market("player_points")
            .side(Side::Over)
            .build();
        assert_eq!(result, Err(DealBuildError::MissingBestPrice));
    }

    #[test]
    fn book_count_defaults_to_offer_count() {
        let deal = base()
            .offer(BookOffer::new("fanduel", odds(120)))
            .offer(BookOffer::new("draftkings", odds(110)))
            .build()
            .unwrap();
        assert_eq!(deal.book_count(), 2);
    }

    #[test]
    fn offer_lookup_ignores_case() {
        let deal = base()
            .offer(BookOffer::new("FanDuel", odds(120)))
            .build()
            .unwrap();
        assert!(deal.offer_for(&BookId::new("FANDUEL")).is_some());
        assert!(deal.offer_for(&BookId::new("caesars")).is_none());
    }

    #[test]
    fn best_offer_prefers_recorded_best_book_on_tie() {
        let deal = base()
            .best_book("draftkings")
            .offer(BookOffer::new("fanduel", odds(120)))
            .offer(BookOffer::new("draftkings", odds(120)))
            .build()
            .unwrap();
        assert_eq!(deal.best_offer().unwrap().book.as_str(), "draftkings");
    }

    #[test]
    fn consistency_check_detects_stale_best_price() {
        let consistent = base()
            .offer(BookOffer::new("fanduel", odds(120)))
            .offer(BookOffer::new("draftkings", odds(105)))
            .build()
            .unwrap();
        assert!(consistent.is_consistent());

        let stale = base()
            .offer(BookOffer::new("fanduel", odds(130)))
            .build()
            .unwrap();
        assert!(!stale.is_consistent());
    }

    #[test]
    fn sport_parses_feed_aliases() {
        assert_eq!("basketball_nba".parse::<Sport>().unwrap(), Sport::Nba);
        assert_eq!("CFB".parse::<Sport>().unwrap(), Sport::Ncaaf);
        assert_eq!(
            "Tennis".parse::<Sport>().unwrap(),
            Sport::Other("tennis".into())
        );
        assert_eq!(Sport::Nhl.to_string(), "NHL");
    }

    #[test]
    fn side_parsing_rejects_unknown() {
        assert_eq!("Over".parse::<Side>().unwrap(), Side::Over);
        assert_eq!("u".parse::<Side>().unwrap(), Side::Under);
        assert!("sideways".parse::<Side>().is_err());
    }
}
