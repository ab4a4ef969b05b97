//! Hide, group and sort pipeline for deal tables and cards.
//!
//! The pipeline is stateless and re-run whenever its inputs change:
//!
//! 1. [`HideFilter`] drops deals without live odds and deals the user hid.
//! 2. Optional limited preview: bucket by sport, sort and truncate each
//!    bucket, then flatten in first-seen sport order.
//! 3. Stable sort by edge or game time. Missing values always sort last.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::comparison::ComparisonMode;
use super::deal::{Deal, Sport};
use super::edge::{boosted_edge, edge_percent};
use super::ids::DealId;

/// Column a table is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Edge,
    GameTime,
}

impl SortField {
    /// Direction used when a column is first selected.
    #[must_use]
    pub const fn default_direction(self) -> SortDirection {
        match self {
            Self::Edge => SortDirection::Descending,
            Self::GameTime => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Current sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    /// Sort by `field` in its default direction.
    #[must_use]
    pub const fn new(field: SortField) -> Self {
        Self {
            field,
            direction: field.default_direction(),
        }
    }

    /// Handle a click on a column header.
    ///
    /// Clicking the active column flips the direction; clicking another
    /// column selects it in its default direction.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            *self = Self::new(field);
        }
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self::new(SortField::Edge)
    }
}

/// A deal paired with its edge under the active comparison settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredDeal<'a> {
    pub deal: &'a Deal,
    /// Edge in percent, boosted when a promotion is configured.
    pub edge: Option<f64>,
}

impl<'a> ScoredDeal<'a> {
    /// Score a deal against `mode`, applying `boost_percent` when set.
    #[must_use]
    pub fn score(deal: &'a Deal, mode: &ComparisonMode, boost_percent: Option<f64>) -> Self {
        Self {
            deal,
            edge: boosted_edge(edge_percent(deal, mode), boost_percent),
        }
    }
}

/// Removes stale and user-hidden deals.
#[derive(Debug, Clone, Default)]
pub struct HideFilter {
    /// Selection ids that currently have live odds. `None` disables the
    /// live-odds check.
    live_selections: Option<HashSet<String>>,
    hidden: HashSet<DealId>,
}

impl HideFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only deals whose selection id appears in `live`.
    #[must_use]
    pub fn with_live_selections<I, S>(mut self, live: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.live_selections = Some(live.into_iter().map(Into::into).collect());
        self
    }

    /// Drop deals the user hid.
    #[must_use]
    pub fn with_hidden<I>(mut self, hidden: I) -> Self
    where
        I: IntoIterator<Item = DealId>,
    {
        self.hidden = hidden.into_iter().collect();
        self
    }

    /// True when `deal` should stay visible.
    #[must_use]
    pub fn keeps(&self, deal: &Deal) -> bool {
        if self.hidden.contains(deal.id()) {
            return false;
        }
        match &self.live_selections {
            Some(live) => deal.selection_id().is_some_and(|id| live.contains(id)),
            None => true,
        }
    }

    /// Apply the filter, preserving order.
    #[must_use]
    pub fn apply<'a, I>(&self, deals: I) -> Vec<&'a Deal>
    where
        I: IntoIterator<Item = &'a Deal>,
    {
        deals.into_iter().filter(|d| self.keeps(d)).collect()
    }
}

fn compare_missing_last<T: PartialOrd>(
    a: Option<T>,
    b: Option<T>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable in-place sort of scored deals.
pub fn sort_deals(rows: &mut [ScoredDeal<'_>], sort: SortState) {
    match sort.field {
        SortField::Edge => {
            rows.sort_by(|a, b| {
                compare_missing_last(
                    a.edge.filter(|e| e.is_finite()),
                    b.edge.filter(|e| e.is_finite()),
                    sort.direction,
                )
            });
        }
        SortField::GameTime => {
            rows.sort_by(|a, b| {
                compare_missing_last::<DateTime<Utc>>(
                    a.deal.start_time(),
                    b.deal.start_time(),
                    sort.direction,
                )
            });
        }
    }
}

/// Bucket by sport, sort each bucket, keep at most `per_sport` rows per
/// bucket, and flatten in the order sports were first seen.
#[must_use]
pub fn group_limited_preview<'a>(
    rows: Vec<ScoredDeal<'a>>,
    per_sport: usize,
    sort: SortState,
) -> Vec<ScoredDeal<'a>> {
    let mut buckets: Vec<(Sport, Vec<ScoredDeal<'a>>)> = Vec::new();
    for row in rows {
        match buckets.iter_mut().find(|(sport, _)| sport == row.deal.sport()) {
            Some((_, bucket)) => bucket.push(row),
            None => buckets.push((row.deal.sport().clone(), vec![row])),
        }
    }

    buckets
        .into_iter()
        .flat_map(|(_, mut bucket)| {
            sort_deals(&mut bucket, sort);
            bucket.truncate(per_sport);
            bucket
        })
        .collect()
}

/// Everything the pipeline needs to derive a view from raw deals.
#[derive(Debug, Clone, Default)]
pub struct PipelineContext {
    pub mode: ComparisonMode,
    pub boost_percent: Option<f64>,
    pub filter: HideFilter,
    pub sort: SortState,
    /// Per-sport cap for limited preview; `None` shows everything.
    pub preview_per_sport: Option<usize>,
}

/// Run filter, optional preview grouping and sort.
#[must_use]
pub fn run_pipeline<'a>(deals: &'a [Deal], ctx: &PipelineContext) -> Vec<ScoredDeal<'a>> {
    let visible = ctx.filter.apply(deals);
    let hidden = deals.len() - visible.len();

    let mut rows: Vec<ScoredDeal<'a>> = visible
        .into_iter()
        .map(|deal| ScoredDeal::score(deal, &ctx.mode, ctx.boost_percent))
        .collect();

    let rows = match ctx.preview_per_sport {
        Some(limit) => group_limited_preview(rows, limit, ctx.sort),
        None => {
            sort_deals(&mut rows, ctx.sort);
            rows
        }
    };

    tracing::debug!(
        total = deals.len(),
        hidden,
        shown = rows.len(),
        mode = %ctx.mode,
        "Deal pipeline evaluated"
    );
    rows
}
