//! Edgefinder - sportsbook odds comparison and edge calculation.
//!
//! Compares each sportsbook's price on a betting selection against a
//! configurable baseline, reports the percentage edge, and sizes stakes with
//! a fractional Kelly criterion.
//!
//! # Modules
//!
//! - [`domain`] - Odds conversion, baselines, edges, Kelly sizing and the
//!   table pipeline (filter, preview grouping, sort)
//! - [`sportsbook`] - Sportsbook registry and deep-link resolution
//! - [`port`] - Persistence seams for per-user view state
//! - [`adapter`] - Deal feed ingestion
//! - [`infrastructure`] - Configuration and logging
//! - [`cli`] - Command-line interface
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use edgefinder::domain::{AmericanOdds, BookOffer, ComparisonMode, Deal, Side, Sport};
//! use edgefinder::domain::edge_percent;
//!
//! let best = AmericanOdds::try_new(120).unwrap();
//! let deal = Deal::builder()
//!     .id("deal-1")
//!     .sport(Sport::Nba)
//!     .event_id("evt-1")
//!     .market("player_points")
//!     .side(Side::Over)
//!     .best_price(best)
//!     .offer(BookOffer::new("fanduel", best))
//!     .offer(BookOffer::new("draftkings", AmericanOdds::try_new(110).unwrap()))
//!     .build()
//!     .unwrap();
//!
//! let edge = edge_percent(&deal, &ComparisonMode::NextBest).unwrap();
//! assert!((edge - 4.76).abs() < 0.01);
//! ```

pub mod adapter;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
pub mod sportsbook;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
