//! Odds comparison and edge calculation.

mod comparison;
mod deal;
mod ids;

pub mod edge;
pub mod error;
pub mod format;
pub mod kelly;
pub mod market;
pub mod odds;
pub mod pipeline;
pub mod view;

// Core domain types
pub use comparison::ComparisonMode;
pub use deal::{BookLimits, BookOffer, Deal, DealBuildError, DealBuilder, Side, Sport, UnknownSide};
pub use ids::{BookId, DealId, EventId};
pub use odds::AmericanOdds;

// Calculators
pub use edge::{boosted_edge, edge_percent};
pub use kelly::{kelly_stake, KellyInput, KellyStake};

// Table pipeline
pub use pipeline::{
    run_pipeline, HideFilter, PipelineContext, ScoredDeal, SortDirection, SortField, SortState,
};
pub use view::{Column, ColumnOrder, TableView};
