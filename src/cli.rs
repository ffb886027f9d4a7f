//! Command-line interface parsing for folioview
//!
//! This module handles parsing of CLI arguments using clap and converts
//! them into the typed `DashboardOptions` the dashboard loader consumes.

use clap::Parser;
use thiserror::Error;

use crate::dashboard::DashboardOptions;
use crate::data::{PnlFidelity, PnlInterval, PositionFilters, PositionSort, SortDirection};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified PnL interval is not recognized
    #[error("Invalid interval: '{0}'. Valid intervals: max, 1m, 1w, 1d, 12h, 6h")]
    InvalidInterval(String),

    /// The specified PnL fidelity is not recognized
    #[error("Invalid fidelity: '{0}'. Valid fidelities: 12h, 3h, 1h")]
    InvalidFidelity(String),

    /// The specified sort field is not recognized
    #[error("Invalid sort field: '{0}'. Valid fields: current_value, size, unrealized_pnl, symbol")]
    InvalidSort(String),
}

/// Folioview - view a portfolio dashboard from the terminal
#[derive(Parser, Debug)]
#[command(name = "folioview")]
#[command(about = "Portfolio dashboard: account value, PnL history, and open positions")]
#[command(version)]
pub struct Cli {
    /// Account identifier (wallet address or account id)
    pub account: String,

    /// PnL chart interval: max, 1m, 1w, 1d, 12h, 6h
    #[arg(long, default_value = "1d")]
    pub interval: String,

    /// PnL chart fidelity: 12h, 3h, 1h (defaults per interval)
    #[arg(long)]
    pub fidelity: Option<String>,

    /// Hide positions smaller than this size
    #[arg(long, default_value_t = 0.1)]
    pub min_size: f64,

    /// Maximum number of positions to fetch
    #[arg(long, default_value_t = 50)]
    pub limit: u32,

    /// Number of positions to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Position sort field: current_value, size, unrealized_pnl, symbol
    #[arg(long, default_value = "current_value")]
    pub sort: String,

    /// Sort positions ascending instead of descending
    #[arg(long)]
    pub ascending: bool,

    /// Clear the response cache before fetching (each run already starts
    /// with an empty cache, so this only matters when folioview is kept
    /// alive and reused in-process)
    #[arg(long)]
    pub refresh: bool,

    /// Base URL of the portfolio API
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Seconds a cached response stays fresh
    #[arg(long, default_value_t = 60)]
    pub ttl_secs: u64,
}

/// Parses an interval string argument into a PnlInterval.
///
/// # Arguments
/// * `s` - The interval string from CLI
///
/// # Returns
/// * `Ok(PnlInterval)` if the string matches a valid interval
/// * `Err(CliError::InvalidInterval)` if the string doesn't match
pub fn parse_interval_arg(s: &str) -> Result<PnlInterval, CliError> {
    PnlInterval::from_str(s).ok_or_else(|| CliError::InvalidInterval(s.to_string()))
}

/// Parses a fidelity string argument into a PnlFidelity.
pub fn parse_fidelity_arg(s: &str) -> Result<PnlFidelity, CliError> {
    PnlFidelity::from_str(s).ok_or_else(|| CliError::InvalidFidelity(s.to_string()))
}

/// Parses a sort field string argument into a PositionSort.
pub fn parse_sort_arg(s: &str) -> Result<PositionSort, CliError> {
    PositionSort::from_str(s).ok_or_else(|| CliError::InvalidSort(s.to_string()))
}

impl DashboardOptions {
    /// Builds dashboard options from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(DashboardOptions)` with the typed settings
    /// * `Err(CliError)` if an interval, fidelity, or sort field is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let interval = parse_interval_arg(&cli.interval)?;
        let fidelity = cli
            .fidelity
            .as_deref()
            .map(parse_fidelity_arg)
            .transpose()?;
        let sort = parse_sort_arg(&cli.sort)?;

        Ok(DashboardOptions {
            interval,
            fidelity,
            positions: PositionFilters {
                min_size: cli.min_size,
                limit: cli.limit,
                offset: cli.offset,
                sort,
                direction: if cli.ascending {
                    SortDirection::Ascending
                } else {
                    SortDirection::Descending
                },
            },
        })
    }
}
