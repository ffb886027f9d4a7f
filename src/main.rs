//! Folioview - view a portfolio dashboard from the terminal
//!
//! Fetches account value, PnL history, and open positions concurrently
//! from the portfolio API and prints them as plain text. Branches that
//! fail are shown as unavailable rather than aborting the whole view.

mod cache;
mod cli;
mod dashboard;
mod data;

use std::time::Duration;

use clap::Parser;

use cache::ResponseCache;
use cli::Cli;
use dashboard::{Dashboard, DashboardOptions};
use data::UserData;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let options = DashboardOptions::from_cli(&cli)?;

    let cache = ResponseCache::new().with_ttl(Duration::from_secs(cli.ttl_secs));
    let mut dashboard = Dashboard::new(cache.clone());
    if let Some(api_url) = &cli.api_url {
        dashboard = dashboard.with_base_url(api_url);
    }
    if cli.refresh {
        cache.invalidate_all();
    }

    let data = dashboard.load_user_data(&cli.account, &options).await;
    print_user_data(&cli.account, &data);

    Ok(())
}

/// Prints the dashboard snapshot, marking failed branches as unavailable
fn print_user_data(account: &str, data: &UserData) {
    println!("Account {}", account);

    match data.account_value {
        Some(value) => println!("  Total value:  {:.2}", value),
        None => println!("  Total value:  unavailable"),
    }

    match &data.pnl_history {
        Some(points) => {
            if let Some(latest) = points.last() {
                println!(
                    "  PnL history:  {} points, latest {:.2} at {}",
                    points.len(),
                    latest.value,
                    latest.time.format("%Y-%m-%d %H:%M UTC")
                );
            } else {
                println!("  PnL history:  no data points");
            }
        }
        None => println!("  PnL history:  unavailable"),
    }

    match &data.positions {
        Some(positions) => {
            println!("  Positions:    {}", positions.len());
            for position in positions {
                println!(
                    "    {:<8} size {:>12.4}  value {:>12.2}  pnl {:>+12.2}",
                    position.symbol, position.size, position.current_value,
                    position.unrealized_pnl
                );
            }
        }
        None => println!("  Positions:    unavailable"),
    }
}
