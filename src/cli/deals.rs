//! `edgefinder deals`: score, filter and sort a deals file.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::builder::Builder;

use crate::adapter::ingest::{load_deals, load_live_selections};
use crate::cli::{output, DealsArgs};
use crate::domain::format::{
    format_edge, format_game_time, format_line, shorten_player_name, team_logo_url,
};
use crate::domain::market::MarketLabels;
use crate::domain::odds::{format_american, MISSING};
use crate::domain::{
    kelly_stake, run_pipeline, Column, ComparisonMode, Deal, DealId, KellyInput, KellyStake,
    PipelineContext, ScoredDeal, SortField, TableView,
};
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::sportsbook::SportsbookRegistry;

/// Everything needed to render one scored deal.
struct Presenter<'a> {
    config: &'a Config,
    labels: MarketLabels,
    registry: SportsbookRegistry,
    mode: &'a ComparisonMode,
    boost_percent: Option<f64>,
    bankroll: Decimal,
    mobile: bool,
}

impl Presenter<'_> {
    fn stake(&self, deal: &Deal) -> Option<KellyStake> {
        let mut stake = kelly_stake(&KellyInput {
            bankroll: self.bankroll,
            best_american: f64::from(deal.best_price().value()),
            fair_american: deal.fair_american(),
            kelly_percent: self.config.kelly.percent,
            boost_percent: self.boost_percent,
        })?;

        // Never recommend more than the best book accepts.
        let max_stake = deal
            .best_offer()
            .and_then(|offer| offer.limits.as_ref())
            .and_then(|limits| limits.max_stake);
        if let Some(max) = max_stake {
            stake.stake = stake.stake.min(max);
        }
        Some(stake)
    }

    fn book_name(&self, deal: &Deal) -> String {
        deal.best_book()
            .or_else(|| deal.best_offer().map(|offer| &offer.book))
            .map_or_else(|| MISSING.to_string(), |book| self.registry.display_name(book))
    }

    fn game(deal: &Deal) -> String {
        match (deal.away_team(), deal.home_team()) {
            (Some(away), Some(home)) => format!("{away} @ {home}"),
            _ => MISSING.to_string(),
        }
    }

    fn cell(&self, scored: &ScoredDeal<'_>, column: Column) -> String {
        let deal = scored.deal;
        match column {
            Column::Edge => format_edge(scored.edge),
            Column::Sport => deal.sport().to_string(),
            Column::Event => Self::game(deal),
            Column::Player => deal
                .player()
                .map_or_else(|| MISSING.to_string(), shorten_player_name),
            Column::Market => format!("{} {}", self.labels.humanize(deal.market()), deal.side()),
            Column::Line => format_line(deal.line()),
            Column::BestPrice => deal.best_price().to_string(),
            Column::BestBook => self.book_name(deal),
            Column::Baseline => format_american(self.mode.baseline(deal)),
            Column::Stake => self
                .stake(deal)
                .map_or_else(|| MISSING.to_string(), |s| format!("${}", s.stake)),
            Column::GameTime => format_game_time(deal.start_time(), self.config.display.tz()),
        }
    }

    fn payload(&self, scored: &ScoredDeal<'_>) -> serde_json::Value {
        let deal = scored.deal;
        let logo = |team: Option<&str>| {
            team.and_then(|abbr| {
                team_logo_url(&self.config.display.logo_base_url, deal.sport(), abbr)
            })
        };
        let link = deal
            .best_offer()
            .and_then(|offer| self.registry.resolve_link(offer, self.mobile, None));

        json!({
            "id": deal.id(),
            "sport": deal.sport().key(),
            "player": deal.player(),
            "market": deal.market(),
            "market_label": self.labels.humanize(deal.market()),
            "line": deal.line(),
            "side": deal.side().to_string(),
            "best_price": deal.best_price().value(),
            "best_book": self.book_name(deal),
            "baseline": self.mode.baseline(deal),
            "edge_percent": scored.edge,
            "stake": self.stake(deal).map(|s| s.stake),
            "start_time": deal.start_time(),
            "home_logo": logo(deal.home_team()),
            "away_logo": logo(deal.away_team()),
            "link": link,
        })
    }
}

fn table_view(args: &DealsArgs) -> TableView {
    let field = SortField::from(args.sort);
    let mut view = TableView::new();
    if view.sort.field != field {
        view.click_header(field);
    }
    if args.reverse {
        view.click_header(field);
    }
    for id in &args.hidden {
        view.hide(DealId::new(id.as_str()));
    }
    view
}

/// Load, score and print deals.
///
/// # Errors
///
/// Returns an error if the config, deals file or live-odds snapshot cannot be
/// loaded, or if the boost is negative.
pub fn execute(args: &DealsArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    config.init_logging();

    let boost_percent = args.boost.or(config.comparison.boost_percent);
    if boost_percent.is_some_and(|b| !b.is_finite() || b < 0.0) {
        return Err(Error::InvalidArgument("--boost must be 0 or greater".to_string()));
    }
    if args.per_sport == Some(0) {
        return Err(Error::InvalidArgument("--per-sport must be greater than 0".to_string()));
    }

    let deals = load_deals(&args.file)?;

    let view = table_view(args);
    let mut filter = view.hide_filter();
    if let Some(path) = &args.hide_stale {
        filter = filter.with_live_selections(load_live_selections(path)?);
    }

    let mode = match &args.mode {
        Some(label) => ComparisonMode::from(label.clone()),
        None => config.comparison.mode.clone(),
    };
    let ctx = PipelineContext {
        mode,
        boost_percent,
        filter,
        sort: view.sort,
        preview_per_sport: args.per_sport.or(config.display.preview_per_sport),
    };
    let rows = run_pipeline(&deals, &ctx);

    let presenter = Presenter {
        config: &config,
        labels: config.display.labels(),
        registry: config.sportsbooks.registry(),
        mode: &ctx.mode,
        boost_percent,
        bankroll: args.bankroll.unwrap_or(config.kelly.bankroll),
        mobile: args.mobile,
    };

    if output::is_json() {
        for scored in &rows {
            output::json_line("deal", presenter.payload(scored));
        }
        return Ok(());
    }

    if rows.is_empty() {
        output::warning(&format!("No deals to show ({} loaded)", deals.len()));
        return Ok(());
    }

    output::section(&format!("Deals vs {}", output::highlight(&ctx.mode)));
    println!();
    let columns = view.columns.columns();
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.title()));
    for scored in &rows {
        builder.push_record(columns.iter().map(|&c| presenter.cell(scored, c)));
    }
    let table = builder.build().to_string();
    for line in table.lines() {
        println!("  {line}");
    }
    println!();
    output::note(&format!("Showing {} of {} deals", rows.len(), deals.len()));

    Ok(())
}
