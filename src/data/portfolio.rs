//! Account value endpoint client
//!
//! Fetches the total value of an account from the portfolio API, going
//! through the response cache so repeated calls within the TTL do not
//! touch the network.

use reqwest::Client;

use super::{fetch_bytes, ApiError, DEFAULT_API_URL};
use crate::cache::CachedFetcher;

/// Client for fetching an account's total portfolio value
#[derive(Debug, Clone)]
pub struct PortfolioClient {
    client: Client,
    base_url: String,
    fetcher: CachedFetcher,
}

impl PortfolioClient {
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

    /// Fetches the current total account value
    ///
    /// # Arguments
    /// * `account` - Account identifier (wallet address or account id)
    ///
    /// # Returns
    /// * `Ok(f64)` - Total account value
    /// * `Err(ApiError)` - If the request cannot be built, the fetch fails,
    ///   or the response cannot be decoded
    pub async fn fetch_account_value(&self, account: &str) -> Result<f64, ApiError> {
        let url = request_url(&self.base_url, account)?;
        let payload = self
            .fetcher
            .fetch(&url, || fetch_bytes(&self.client, &url))
            .await?;
        parse_account_value(&payload)
    }
}

/// Builds the account value request URL, which doubles as the cache key
fn request_url(base_url: &str, account: &str) -> Result<String, ApiError> {
    let account = account.trim();
    if account.is_empty() {
        return Err(ApiError::InvalidRequest("account id is empty".to_string()));
    }
    Ok(format!("{}/accounts/{}/value", base_url, account))
}

/// Parses the account value response payload
fn parse_account_value(payload: &[u8]) -> Result<f64, ApiError> {
    let response: AccountValueResponse = serde_json::from_slice(payload)?;
    if !response.total_value.is_finite() {
        return Err(ApiError::MissingField("total_value".to_string()));
    }
    Ok(response.total_value)
}

/// Account value response from the portfolio API
#[derive(Debug, serde::Deserialize)]
struct AccountValueResponse {
    total_value: f64,
    #[allow(dead_code)]
    currency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sample valid account value response
    const VALID_RESPONSE: &str = r#"{
        "total_value": 10432.57,
        "currency": "USD"
    }"#;

    #[test]
    fn test_parse_valid_response() {
        let value = parse_account_value(VALID_RESPONSE.as_bytes())
            .expect("Failed to parse account value");
        assert!((value - 10432.57).abs() < 0.001);
    }

    #[test]
    fn test_parse_response_without_currency() {
        let value = parse_account_value(br#"{"total_value": 0.0}"#)
            .expect("Failed to parse account value");
        assert!(value.abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_malformed_json() {
        let result = parse_account_value(b"{ invalid json }");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_parse_missing_total_value() {
        let result = parse_account_value(br#"{"currency": "USD"}"#);
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_request_url_format() {
        let url = request_url("https://api.example.com/v1", "0xabc123").unwrap();
        assert_eq!(url, "https://api.example.com/v1/accounts/0xabc123/value");
    }

    #[test]
    fn test_request_url_rejects_empty_account() {
        let result = request_url("https://api.example.com/v1", "   ");
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }
}
