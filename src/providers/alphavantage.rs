use async_trait::async_trait;
use reqwest::Url;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, error, instrument};

use crate::core::config::Credentials;
use crate::core::{AlertError, Quote, QuoteProvider};

// AlphaVantageProvider implementation for QuoteProvider
pub struct AlphaVantageProvider {
    base_url: String,
    api_key: Option<String>,
}

impl AlphaVantageProvider {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        AlphaVantageProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

// Throttling and bad keys come back as HTTP 200 with one of the message fields set.
#[derive(Deserialize, Debug)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

/// `Information` carries both throttling notices and key problems (invalid or
/// premium-only); only the former is worth retrying.
fn is_throttle_notice(message: &str) -> bool {
    let message = message.to_lowercase();
    ["frequency", "rate limit", "per minute", "per day"]
        .iter()
        .any(|marker| message.contains(marker))
}

#[derive(Deserialize, Debug)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<Decimal>,
    #[serde(rename = "08. previous close")]
    previous_close: Option<Decimal>,
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    #[instrument(
        name = "AlphaVantageQuoteFetch",
        skip(self),
        fields(symbol = %symbol)
    )]
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, AlertError> {
        let api_key = Credentials::require(&self.api_key, Credentials::ALPHAVANTAGE_KEY)?;
        let endpoint = format!("quote for {symbol}");

        let url = Url::parse_with_params(
            &format!("{}/query", self.base_url),
            &[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol),
                ("apikey", api_key),
            ],
        )
        .map_err(|e| AlertError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        debug!("Requesting global quote from {}/query", self.base_url);

        let client = reqwest::Client::builder()
            .user_agent("stockalert/1.0")
            .build()?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| AlertError::Transport(e.without_url()))?;

        if !response.status().is_success() {
            return Err(AlertError::Status {
                status: response.status(),
                endpoint,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| AlertError::Transport(e.without_url()))?;

        let data: GlobalQuoteResponse = match serde_json::from_str(&text) {
            Ok(data) => data,
            Err(e) => {
                error!(error = ?e, response = %text, "Failed to parse quote response");
                return Err(AlertError::Malformed {
                    endpoint,
                    reason: e.to_string(),
                });
            }
        };

        if let Some(message) = data.error_message {
            return Err(AlertError::Api(message));
        }
        if let Some(message) = data.note {
            return Err(AlertError::RateLimited(message));
        }
        if let Some(message) = data.information {
            if is_throttle_notice(&message) {
                return Err(AlertError::RateLimited(message));
            }
            return Err(AlertError::Api(message));
        }

        let global_quote = data.global_quote.ok_or_else(|| AlertError::Malformed {
            endpoint: endpoint.clone(),
            reason: "missing \"Global Quote\" object".to_string(),
        })?;

        match (global_quote.price, global_quote.previous_close) {
            (Some(current_price), Some(previous_close)) => {
                debug!(%current_price, %previous_close, "Received quote");
                Ok(Quote {
                    symbol: symbol.to_string(),
                    current_price,
                    previous_close,
                })
            }
            (None, None) => Err(AlertError::NoData(symbol.to_string())),
            _ => Err(AlertError::Malformed {
                endpoint,
                reason: "quote is missing price or previous close".to_string(),
            }),
        }
    }
}
