//! Per-table interaction state.
//!
//! Holds what a user changes while looking at a table: sort column,
//! expanded rows, hidden deals, favorites and column order. Side effects
//! such as persisting favorites are delegated to the caller, which reads
//! the returned flags.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ids::DealId;
use super::pipeline::{HideFilter, SortField, SortState};

/// Table column identifiers, in default display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Edge,
    Sport,
    Event,
    Player,
    Market,
    Line,
    BestPrice,
    BestBook,
    Baseline,
    Stake,
    GameTime,
}

impl Column {
    pub const ALL: [Column; 11] = [
        Column::Edge,
        Column::Sport,
        Column::Event,
        Column::Player,
        Column::Market,
        Column::Line,
        Column::BestPrice,
        Column::BestBook,
        Column::Baseline,
        Column::Stake,
        Column::GameTime,
    ];

    /// Header text.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Edge => "Edge",
            Self::Sport => "Sport",
            Self::Event => "Event",
            Self::Player => "Player",
            Self::Market => "Market",
            Self::Line => "Line",
            Self::BestPrice => "Best",
            Self::BestBook => "Book",
            Self::Baseline => "Baseline",
            Self::Stake => "Stake",
            Self::GameTime => "Time",
        }
    }
}

/// Ordered list of visible columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOrder(Vec<Column>);

impl ColumnOrder {
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        Self(columns)
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.0
    }

    /// Move the column at `from` to index `to` (drag and drop).
    ///
    /// Out-of-range indices leave the order unchanged. Returns whether the
    /// order changed.
    pub fn move_column(&mut self, from: usize, to: usize) -> bool {
        if from >= self.0.len() || to >= self.0.len() || from == to {
            return false;
        }
        let column = self.0.remove(from);
        self.0.insert(to, column);
        true
    }
}

impl Default for ColumnOrder {
    fn default() -> Self {
        Self(Column::ALL.to_vec())
    }
}

/// Interaction state of one deals table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    pub sort: SortState,
    pub columns: ColumnOrder,
    expanded: BTreeSet<DealId>,
    hidden: BTreeSet<DealId>,
    favorites: BTreeSet<DealId>,
}

impl TableView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Column header click.
    pub fn click_header(&mut self, field: SortField) {
        self.sort.toggle(field);
    }

    /// Expand or collapse a row. Returns the new expanded state.
    pub fn toggle_expanded(&mut self, id: &DealId) -> bool {
        toggle(&mut self.expanded, id)
    }

    #[must_use]
    pub fn is_expanded(&self, id: &DealId) -> bool {
        self.expanded.contains(id)
    }

    pub fn hide(&mut self, id: DealId) {
        self.expanded.remove(&id);
        self.hidden.insert(id);
    }

    /// Returns whether the deal was hidden.
    pub fn unhide(&mut self, id: &DealId) -> bool {
        self.hidden.remove(id)
    }

    #[must_use]
    pub fn is_hidden(&self, id: &DealId) -> bool {
        self.hidden.contains(id)
    }

    pub fn hidden(&self) -> impl Iterator<Item = &DealId> {
        self.hidden.iter()
    }

    /// Add or remove a favorite (bet-slip entry). Returns the new state.
    pub fn toggle_favorite(&mut self, id: &DealId) -> bool {
        toggle(&mut self.favorites, id)
    }

    #[must_use]
    pub fn is_favorite(&self, id: &DealId) -> bool {
        self.favorites.contains(id)
    }

    /// Filter that removes the deals hidden in this view.
    #[must_use]
    pub fn hide_filter(&self) -> HideFilter {
        HideFilter::new().with_hidden(self.hidden.iter().cloned())
    }
}

fn toggle(set: &mut BTreeSet<DealId>, id: &DealId) -> bool {
    if set.remove(id) {
        false
    } else {
        set.insert(id.clone());
        true
    }
}
