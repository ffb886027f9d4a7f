//! Aggregated dashboard loading
//!
//! Runs the three dashboard fetches — account value, PnL history, and open
//! positions — concurrently, and folds each branch's outcome into one
//! [`UserData`] snapshot. A failing branch degrades to an absent field;
//! it never aborts the other branches and never surfaces to the caller.

use chrono::Utc;
use futures::future;
use log::warn;

use crate::cache::{CachedFetcher, ResponseCache};
use crate::data::{
    ApiError, PnlClient, PnlFidelity, PnlInterval, PnlPoint, PortfolioClient, Position,
    PositionFilters, PositionsClient, UserData,
};

/// Options controlling one dashboard load
#[derive(Debug, Clone, Default)]
pub struct DashboardOptions {
    /// Time window of the PnL chart
    pub interval: PnlInterval,
    /// Point spacing override; the interval's default applies when `None`
    pub fidelity: Option<PnlFidelity>,
    /// Positions filtering, paging, and sorting
    pub positions: PositionFilters,
}

/// Loads the full dashboard for an account
///
/// Owns one client per endpoint; all three share a single response cache
/// through their cached fetchers.
#[derive(Debug, Clone)]
pub struct Dashboard {
    portfolio_client: PortfolioClient,
    pnl_client: PnlClient,
    positions_client: PositionsClient,
}

impl Dashboard {
    /// Creates a dashboard whose clients share the given cache
    pub fn new(cache: ResponseCache) -> Self {
        let fetcher = CachedFetcher::new(cache);
        Self {
            portfolio_client: PortfolioClient::new(fetcher.clone()),
            pnl_client: PnlClient::new(fetcher.clone()),
            positions_client: PositionsClient::new(fetcher),
        }
    }

    /// Creates a dashboard from pre-configured clients
    #[allow(dead_code)]
    pub fn with_clients(
        portfolio_client: PortfolioClient,
        pnl_client: PnlClient,
        positions_client: PositionsClient,
    ) -> Self {
        Self {
            portfolio_client,
            pnl_client,
            positions_client,
        }
    }

    /// Points all three clients at a different API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.portfolio_client = self.portfolio_client.with_base_url(base_url.clone());
        self.pnl_client = self.pnl_client.with_base_url(base_url.clone());
        self.positions_client = self.positions_client.with_base_url(base_url);
        self
    }

    /// Loads all dashboard data for an account concurrently
    ///
    /// The three fetches run at the same time and the call returns only
    /// after every one of them has finished. Any branch failure — network,
    /// decode, or bad parameters — is logged and recorded as an absent
    /// field; this method itself never fails.
    ///
    /// # Arguments
    /// * `account` - Account identifier
    /// * `options` - PnL interval/fidelity and position filters
    pub async fn load_user_data(&self, account: &str, options: &DashboardOptions) -> UserData {
        let (account_value, pnl_history, positions) = future::join3(
            self.portfolio_client.fetch_account_value(account),
            self.pnl_client
                .fetch_pnl(account, options.interval, options.fidelity),
            self.positions_client
                .fetch_positions(account, &options.positions),
        )
        .await;

        assemble(account_value, pnl_history, positions)
    }
}

/// Folds the three branch outcomes into one snapshot
fn assemble(
    account_value: Result<f64, ApiError>,
    pnl_history: Result<Vec<PnlPoint>, ApiError>,
    positions: Result<Vec<Position>, ApiError>,
) -> UserData {
    UserData {
        account_value: branch_or_absent("account value", account_value),
        pnl_history: branch_or_absent("pnl history", pnl_history),
        positions: branch_or_absent("positions", positions),
        fetched_at: Utc::now(),
    }
}

/// Converts a branch failure into absence, logging the cause
fn branch_or_absent<T>(branch: &str, result: Result<T, ApiError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("{} fetch failed: {}", branch, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn sample_points() -> Vec<PnlPoint> {
        vec![PnlPoint {
            time: DateTime::from_timestamp(1745971200, 0).unwrap(),
            value: 317.79596,
        }]
    }

    fn sample_positions() -> Vec<Position> {
        vec![Position {
            symbol: "BTC".to_string(),
            size: 0.5,
            entry_price: 60000.0,
            mark_price: 64000.0,
            current_value: 32000.0,
            unrealized_pnl: 2000.0,
        }]
    }

    fn network_error() -> ApiError {
        ApiError::InvalidRequest("synthetic failure".to_string())
    }

    #[test]
    fn test_assemble_all_branches_succeed() {
        let data = assemble(
            Ok(10432.57),
            Ok(sample_points()),
            Ok(sample_positions()),
        );

        assert!((data.account_value.unwrap() - 10432.57).abs() < 0.001);
        assert_eq!(data.pnl_history.unwrap().len(), 1);
        assert_eq!(data.positions.unwrap().len(), 1);
    }

    #[test]
    fn test_assemble_isolates_single_branch_failure() {
        let data = assemble(
            Err(network_error()),
            Ok(sample_points()),
            Ok(sample_positions()),
        );

        assert!(data.account_value.is_none());
        assert!(data.pnl_history.is_some());
        assert!(data.positions.is_some());
    }

    #[test]
    fn test_assemble_every_failure_combination() {
        // Each branch degrades independently; the snapshot always exists
        for mask in 0u8..8 {
            let account_value = if mask & 1 == 0 {
                Ok(1.0)
            } else {
                Err(network_error())
            };
            let pnl_history = if mask & 2 == 0 {
                Ok(sample_points())
            } else {
                Err(network_error())
            };
            let positions = if mask & 4 == 0 {
                Ok(sample_positions())
            } else {
                Err(network_error())
            };

            let data = assemble(account_value, pnl_history, positions);

            assert_eq!(data.account_value.is_some(), mask & 1 == 0);
            assert_eq!(data.pnl_history.is_some(), mask & 2 == 0);
            assert_eq!(data.positions.is_some(), mask & 4 == 0);
        }
    }

    #[tokio::test]
    async fn test_load_user_data_never_fails_when_api_is_unreachable() {
        // Port 9 (discard) refuses connections immediately; every branch
        // fails with a network error and the call still returns a snapshot
        let dashboard =
            Dashboard::new(ResponseCache::new()).with_base_url("http://127.0.0.1:9");

        let data = dashboard
            .load_user_data("0xabc", &DashboardOptions::default())
            .await;

        assert!(data.account_value.is_none());
        assert!(data.pnl_history.is_none());
        assert!(data.positions.is_none());
    }

    #[tokio::test]
    async fn test_with_clients_uses_injected_clients() {
        // Pre-configured clients with a shared HTTP client and short
        // timeout, all pointed at the discard port
        let fetcher = CachedFetcher::new(ResponseCache::new());
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(500))
            .build()
            .expect("client should build");

        let dashboard = Dashboard::with_clients(
            PortfolioClient::new(fetcher.clone())
                .with_client(http.clone())
                .with_base_url("http://127.0.0.1:9"),
            PnlClient::new(fetcher.clone())
                .with_client(http.clone())
                .with_base_url("http://127.0.0.1:9"),
            PositionsClient::new(fetcher)
                .with_client(http)
                .with_base_url("http://127.0.0.1:9"),
        );

        let data = dashboard
            .load_user_data("0xabc", &DashboardOptions::default())
            .await;

        assert!(data.account_value.is_none());
        assert!(data.pnl_history.is_none());
        assert!(data.positions.is_none());
    }

    #[tokio::test]
    async fn test_load_user_data_empty_account_degrades_to_absence() {
        // Even unbuildable requests degrade to absence instead of erroring
        let dashboard =
            Dashboard::new(ResponseCache::new()).with_base_url("http://127.0.0.1:9");

        let data = dashboard
            .load_user_data("", &DashboardOptions::default())
            .await;

        assert!(data.account_value.is_none());
        assert!(data.pnl_history.is_none());
        assert!(data.positions.is_none());
    }
}
