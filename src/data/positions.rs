//! Positions endpoint client
//!
//! Fetches the account's open positions with filtering, paging, and
//! sorting applied server-side through query parameters.

use reqwest::Client;
use serde::Deserialize;

use super::{fetch_bytes, ApiError, Position, PositionFilters, DEFAULT_API_URL};
use crate::cache::CachedFetcher;

/// Client for fetching an account's open positions
#[derive(Debug, Clone)]
pub struct PositionsClient {
    client: Client,
    base_url: String,
    fetcher: CachedFetcher,
}

impl PositionsClient {
    /// Creates a new client over the given cached fetcher
    pub fn new(fetcher: CachedFetcher) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_API_URL.to_string(),
            fetcher,
        }
    }

    /// Replaces the HTTP client
    #[allow(dead_code)]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Replaces the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches the open positions matching `filters`
    ///
    /// # Arguments
    /// * `account` - Account identifier
    /// * `filters` - Size threshold, paging, and sort parameters
    ///
    /// # Returns
    /// * `Ok(Vec<Position>)` - Positions in the order the API returned them
    /// * `Err(ApiError)` - If the request cannot be built, the fetch fails,
    ///   or the response cannot be decoded
    pub async fn fetch_positions(
        &self,
        account: &str,
        filters: &PositionFilters,
    ) -> Result<Vec<Position>, ApiError> {
        let url = request_url(&self.base_url, account, filters)?;
        let payload = self
            .fetcher
            .fetch(&url, || fetch_bytes(&self.client, &url))
            .await?;
        parse_positions(&payload)
    }
}

/// Builds the positions request URL, which doubles as the cache key
///
/// Every filter parameter is part of the URL, so two calls with different
/// filters never share a cache entry.
fn request_url(
    base_url: &str,
    account: &str,
    filters: &PositionFilters,
) -> Result<String, ApiError> {
    let account = account.trim();
    if account.is_empty() {
        return Err(ApiError::InvalidRequest("account id is empty".to_string()));
    }
    if !filters.min_size.is_finite() || filters.min_size < 0.0 {
        return Err(ApiError::InvalidRequest(format!(
            "min_size must be non-negative, got {}",
            filters.min_size
        )));
    }
    Ok(format!(
        "{}/accounts/{}/positions?min_size={}&limit={}&offset={}&sort={}&direction={}",
        base_url,
        account,
        filters.min_size,
        filters.limit,
        filters.offset,
        filters.sort.as_str(),
        filters.direction.as_str()
    ))
}

/// Parses the positions response payload
fn parse_positions(payload: &[u8]) -> Result<Vec<Position>, ApiError> {
    let response: PositionsResponse = serde_json::from_slice(payload)?;
    Ok(response
        .positions
        .into_iter()
        .map(|raw| Position {
            symbol: raw.symbol,
            size: raw.size,
            entry_price: raw.entry_price,
            mark_price: raw.mark_price,
            current_value: raw.current_value,
            unrealized_pnl: raw.unrealized_pnl,
        })
        .collect())
}

/// Positions response from the portfolio API
#[derive(Debug, Deserialize)]
struct PositionsResponse {
    positions: Vec<RawPosition>,
}

/// One position as it arrives on the wire
#[derive(Debug, Deserialize)]
struct RawPosition {
    symbol: String,
    size: f64,
    entry_price: f64,
    mark_price: f64,
    current_value: f64,
    unrealized_pnl: f64,
}
