//! PnL history endpoint client
//!
//! Fetches the account value history used for the PnL chart. The endpoint
//! delivers points as unix-second timestamps with a price that may arrive
//! either as a JSON number or as a numeric string; both decode to the same
//! value. Individual malformed points are dropped from the series rather
//! than failing the whole fetch — only a decode failure of the outer
//! structure is an error.

use chrono::DateTime;
use log::warn;
use reqwest::Client;
use serde::Deserialize;

use super::{fetch_bytes, ApiError, PnlFidelity, PnlInterval, PnlPoint, DEFAULT_API_URL};
use crate::cache::CachedFetcher;

/// Client for fetching an account's PnL history
#[derive(Debug, Clone)]
pub struct PnlClient {
    client: Client,
    base_url: String,
    fetcher: CachedFetcher,
}

impl PnlClient {
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

    /// Fetches the PnL history for the given interval
    ///
    /// # Arguments
    /// * `account` - Account identifier
    /// * `interval` - Time window of the chart
    /// * `fidelity` - Point spacing; when `None`, the interval's default
    ///   applies (see [`PnlInterval::default_fidelity`])
    ///
    /// # Returns
    /// * `Ok(Vec<PnlPoint>)` - Points in wire order, malformed ones dropped
    /// * `Err(ApiError)` - If the request cannot be built, the fetch fails,
    ///   or the outer response structure cannot be decoded
    pub async fn fetch_pnl(
        &self,
        account: &str,
        interval: PnlInterval,
        fidelity: Option<PnlFidelity>,
    ) -> Result<Vec<PnlPoint>, ApiError> {
        let url = request_url(&self.base_url, account, interval, fidelity)?;
        let payload = self
            .fetcher
            .fetch(&url, || fetch_bytes(&self.client, &url))
            .await?;
        parse_pnl_history(&payload)
    }
}

/// Builds the PnL request URL, resolving the effective fidelity
fn request_url(
    base_url: &str,
    account: &str,
    interval: PnlInterval,
    fidelity: Option<PnlFidelity>,
) -> Result<String, ApiError> {
    let account = account.trim();
    if account.is_empty() {
        return Err(ApiError::InvalidRequest("account id is empty".to_string()));
    }
    let fidelity = fidelity.unwrap_or_else(|| interval.default_fidelity());
    Ok(format!(
        "{}/accounts/{}/pnl?interval={}&fidelity={}",
        base_url,
        account,
        interval.as_str(),
        fidelity.as_str()
    ))
}

/// Parses the PnL history payload, dropping malformed points
///
/// Points are kept as raw JSON values until `decode_point` inspects them,
/// so no single point of any shape can fail the whole series. Only the
/// outer structure is decoded strictly.
fn parse_pnl_history(payload: &[u8]) -> Result<Vec<PnlPoint>, ApiError> {
    let response: PnlHistoryResponse = serde_json::from_slice(payload)?;

    let mut points = Vec::with_capacity(response.history.len());
    for raw in response.history {
        match decode_point(&raw) {
            Some(point) => points.push(point),
            None => warn!("dropping malformed PnL point: {}", raw),
        }
    }
    Ok(points)
}

/// Decodes one raw point, returning `None` when it is unusable
///
/// A usable point is an object with an integer unix-seconds `t` and a
/// price `p` that is a number or a numeric string. Anything else is
/// unusable: a fractional or wrongly-typed timestamp, a boolean, object,
/// or array price, or a point that is not an object at all.
fn decode_point(raw: &serde_json::Value) -> Option<PnlPoint> {
    let time = DateTime::from_timestamp(raw.get("t")?.as_i64()?, 0)?;
    let value = price_value(raw.get("p")?)?;
    Some(PnlPoint { time, value })
}

/// Extracts a price from a JSON number or a numeric string
fn price_value(price: &serde_json::Value) -> Option<f64> {
    match price {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// PnL history response from the portfolio API
#[derive(Debug, Deserialize)]
struct PnlHistoryResponse {
    history: Vec<serde_json::Value>,
}
