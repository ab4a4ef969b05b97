//! Command-line interface definitions.

pub mod check;
pub mod convert;
pub mod deals;
pub mod kelly;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::domain::SortField;
use crate::error::Result;

/// Edgefinder - compare sportsbook prices and size bets.
#[derive(Parser, Debug)]
#[command(name = "edgefinder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Emit JSON lines instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score, filter and sort a deals file
    Deals(DealsArgs),

    /// Convert American odds to decimal odds and implied probability
    Convert(ConvertArgs),

    /// Recommend a Kelly stake for one bet
    Kelly(KellyArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `edgefinder check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Column a deals table is sorted by.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortArg {
    /// Edge percentage, largest first
    Edge,
    /// Game start time, soonest first
    Time,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Edge => Self::Edge,
            SortArg::Time => Self::GameTime,
        }
    }
}

/// Arguments for the `deals` subcommand.
#[derive(Parser, Debug)]
pub struct DealsArgs {
    /// JSON file with an array of deals
    pub file: PathBuf,

    /// Path to configuration file (optional; defaults apply when missing)
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Baseline to compare against: average, next_best or book:<id>
    #[arg(long)]
    pub mode: Option<String>,

    /// Sort column
    #[arg(long, value_enum, default_value = "edge")]
    pub sort: SortArg,

    /// Reverse the sort column's default direction
    #[arg(long)]
    pub reverse: bool,

    /// Live odds snapshot; deals whose selection is missing from it are hidden
    #[arg(long, value_name = "ODDS_JSON")]
    pub hide_stale: Option<PathBuf>,

    /// Deal ids to hide (repeatable)
    #[arg(long = "hide", value_name = "DEAL_ID")]
    pub hidden: Vec<String>,

    /// Show at most N deals per sport
    #[arg(long, value_name = "N")]
    pub per_sport: Option<usize>,

    /// Promotional profit boost in percent
    #[arg(long)]
    pub boost: Option<f64>,

    /// Override the configured bankroll for stake sizing
    #[arg(long)]
    pub bankroll: Option<Decimal>,

    /// Use mobile deep links instead of desktop links
    #[arg(long)]
    pub mobile: bool,
}

/// Arguments for the `convert` subcommand.
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// American odds, e.g. -110 or +150
    #[arg(allow_hyphen_values = true)]
    pub american: i32,
}

/// Arguments for the `kelly` subcommand.
#[derive(Parser, Debug)]
pub struct KellyArgs {
    /// Path to configuration file (optional; defaults apply when missing)
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Bankroll in dollars (defaults to the configured bankroll)
    #[arg(long)]
    pub bankroll: Option<Decimal>,

    /// Best available price, American odds
    #[arg(long, allow_hyphen_values = true)]
    pub best: i32,

    /// Fair (no-vig) price, American odds
    #[arg(long, allow_hyphen_values = true)]
    pub fair: i32,

    /// Share of full Kelly in percent (defaults to the configured value)
    #[arg(long)]
    pub kelly_percent: Option<f64>,

    /// Promotional profit boost in percent
    #[arg(long)]
    pub boost: Option<f64>,
}

/// Dispatch a parsed command line.
///
/// # Errors
///
/// Returns the first error a command hits; the caller reports it and exits
/// non-zero.
pub fn execute(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json));

    match cli.command {
        Commands::Deals(args) => deals::execute(&args),
        Commands::Convert(args) => convert::execute(&args),
        Commands::Kelly(args) => kelly::execute(&args),
        Commands::Check(CheckCommand::Config(args)) => check::execute_config(&args.config),
    }
}
