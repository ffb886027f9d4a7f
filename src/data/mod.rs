//! Core data models for the portfolio dashboard
//!
//! This module contains the domain types shared across the endpoint
//! clients — PnL chart parameters, position filters, the composite
//! `UserData` snapshot — along with the common error type every client
//! reports through.

pub mod pnl;
pub mod portfolio;
pub mod positions;

pub use pnl::PnlClient;
pub use portfolio::PortfolioClient;
pub use positions::PositionsClient;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base URL of the portfolio API
pub const DEFAULT_API_URL: &str = "https://api.folioview.dev/v1";

/// Errors reported by the endpoint clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (transport error or non-success status)
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Response payload does not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response decoded but a required field is missing or unusable
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// Request parameters cannot form a valid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Performs a raw GET and returns the response body
///
/// Non-success status codes surface as [`ApiError::Network`]; the caller
/// never inspects status codes beyond that.
pub(crate) async fn fetch_bytes(client: &Client, url: &str) -> Result<Bytes, ApiError> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?)
}

/// Time window of the PnL chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PnlInterval {
    /// Entire account history
    Max,
    /// Trailing month
    OneMonth,
    /// Trailing week
    OneWeek,
    /// Trailing day
    OneDay,
    /// Trailing 12 hours
    TwelveHours,
    /// Trailing 6 hours
    SixHours,
}

impl Default for PnlInterval {
    fn default() -> Self {
        PnlInterval::OneDay
    }
}

impl PnlInterval {
    /// Parses an interval from its short CLI/query form.
    ///
    /// Returns `None` if the input doesn't match any interval.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<PnlInterval> {
        match s.to_lowercase().trim() {
            "max" => Some(PnlInterval::Max),
            "1m" => Some(PnlInterval::OneMonth),
            "1w" => Some(PnlInterval::OneWeek),
            "1d" => Some(PnlInterval::OneDay),
            "12h" => Some(PnlInterval::TwelveHours),
            "6h" => Some(PnlInterval::SixHours),
            _ => None,
        }
    }

    /// Short form used in query strings and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            PnlInterval::Max => "max",
            PnlInterval::OneMonth => "1m",
            PnlInterval::OneWeek => "1w",
            PnlInterval::OneDay => "1d",
            PnlInterval::TwelveHours => "12h",
            PnlInterval::SixHours => "6h",
        }
    }

    /// Chart resolution used when the caller does not pick one explicitly
    ///
    /// Wider windows get coarser resolution so point counts stay bounded:
    /// max → 12h, 1m/1w → 3h, 1d/12h/6h → 1h.
    pub fn default_fidelity(&self) -> PnlFidelity {
        match self {
            PnlInterval::Max => PnlFidelity::TwelveHours,
            PnlInterval::OneMonth | PnlInterval::OneWeek => PnlFidelity::ThreeHours,
            PnlInterval::OneDay | PnlInterval::TwelveHours | PnlInterval::SixHours => {
                PnlFidelity::OneHour
            }
        }
    }
}

/// Spacing between points on the PnL chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PnlFidelity {
    /// One point every 12 hours
    TwelveHours,
    /// One point every 3 hours
    ThreeHours,
    /// One point every hour
    OneHour,
}

impl PnlFidelity {
    /// Parses a fidelity from its short CLI/query form.
    ///
    /// Returns `None` if the input doesn't match any fidelity.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<PnlFidelity> {
        match s.to_lowercase().trim() {
            "12h" => Some(PnlFidelity::TwelveHours),
            "3h" => Some(PnlFidelity::ThreeHours),
            "1h" => Some(PnlFidelity::OneHour),
            _ => None,
        }
    }

    /// Short form used in query strings and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            PnlFidelity::TwelveHours => "12h",
            PnlFidelity::ThreeHours => "3h",
            PnlFidelity::OneHour => "1h",
        }
    }
}

/// One point on the PnL chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlPoint {
    /// Point timestamp
    pub time: DateTime<Utc>,
    /// Account value at that time
    pub value: f64,
}

/// A single open position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Instrument symbol (e.g. "BTC", "ETH")
    pub symbol: String,
    /// Position size in base units
    pub size: f64,
    /// Average entry price
    pub entry_price: f64,
    /// Current mark price
    pub mark_price: f64,
    /// Current position value
    pub current_value: f64,
    /// Unrealized profit or loss
    pub unrealized_pnl: f64,
}

/// Field the positions list is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSort {
    CurrentValue,
    Size,
    UnrealizedPnl,
    Symbol,
}

impl PositionSort {
    /// Parses a sort field from its query-string form.
    ///
    /// Returns `None` if the input doesn't match any field.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<PositionSort> {
        match s.to_lowercase().trim() {
            "current_value" | "value" => Some(PositionSort::CurrentValue),
            "size" => Some(PositionSort::Size),
            "unrealized_pnl" | "pnl" => Some(PositionSort::UnrealizedPnl),
            "symbol" => Some(PositionSort::Symbol),
            _ => None,
        }
    }

    /// Query-string form
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionSort::CurrentValue => "current_value",
            PositionSort::Size => "size",
            PositionSort::UnrealizedPnl => "unrealized_pnl",
            PositionSort::Symbol => "symbol",
        }
    }
}

/// Direction the positions list is sorted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Query-string form
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Filtering and paging parameters for the positions list
#[derive(Debug, Clone, PartialEq)]
pub struct PositionFilters {
    /// Positions smaller than this size are excluded
    pub min_size: f64,
    /// Maximum number of positions returned
    pub limit: u32,
    /// Number of positions skipped from the start of the list
    pub offset: u32,
    /// Sort field
    pub sort: PositionSort,
    /// Sort direction
    pub direction: SortDirection,
}

impl Default for PositionFilters {
    fn default() -> Self {
        Self {
            min_size: 0.1,
            limit: 50,
            offset: 0,
            sort: PositionSort::CurrentValue,
            direction: SortDirection::Descending,
        }
    }
}

/// Combined dashboard snapshot for one account
///
/// Each field is `None` exactly when its fetch failed; the aggregator
/// always waits for all three branches before building this, so absence
/// never means "still loading". Consumers should render absent fields as
/// unavailable, not as zero.
#[derive(Debug, Clone, Serialize)]
pub struct UserData {
    /// Total account value, if the portfolio fetch succeeded
    pub account_value: Option<f64>,
    /// PnL history points, if the PnL fetch succeeded
    pub pnl_history: Option<Vec<PnlPoint>>,
    /// Open positions, if the positions fetch succeeded
    pub positions: Option<Vec<Position>>,
    /// When this snapshot was assembled
    pub fetched_at: DateTime<Utc>,
}
