use super::check::describe_failure;
use super::ui;
use crate::core::QuoteProvider;
use crate::core::config::{AppConfig, Credentials};
use crate::providers::AlphaVantageProvider;
use anyhow::Result;

/// Fetches and displays the configured ticker's quote without alerting.
pub async fn run(config: &AppConfig, credentials: &Credentials) -> Result<()> {
    let provider =
        AlphaVantageProvider::new(config.alphavantage_url(), credentials.alphavantage_key.clone());

    let pb = ui::new_spinner(&format!("Fetching quote for {}", config.ticker));
    let result = provider.fetch_quote(&config.ticker).await;
    pb.finish_and_clear();

    let what = format!("Quote for {}", config.ticker);
    let quote = result.map_err(|e| describe_failure(&what, e))?;
    let change = quote
        .relative_change()
        .map_err(|e| describe_failure(&what, e))?;
    println!("{}", ui::quote_table(&quote, change));
    Ok(())
}
