//! The alert pipeline: quote, threshold check, news, notification.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use super::config::AppConfig;
use super::error::AlertError;
use super::news::{NewsProvider, NewsQuery, digest};
use super::notify::{Notification, Notifier};
use super::quote::{Quote, QuoteProvider};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
    /// The move stayed within the threshold; nothing was sent.
    BelowThreshold { quote: Quote, change: Decimal },
    Notified {
        quote: Quote,
        change: Decimal,
        notification: Notification,
    },
}

impl AlertOutcome {
    pub fn change(&self) -> Decimal {
        match self {
            AlertOutcome::BelowThreshold { change, .. } | AlertOutcome::Notified { change, .. } => {
                *change
            }
        }
    }
}

/// True when the magnitude of `change` is strictly above `threshold`.
pub fn exceeds_threshold(change: Decimal, threshold: Decimal) -> bool {
    change.abs() > threshold
}

/// Runs one check. `on_digest` sees the digest before the notifier is called, so it is
/// shown even when sending fails.
#[instrument(name = "AlertRun", skip_all, fields(symbol = %config.ticker))]
pub async fn run_alert(
    config: &AppConfig,
    quotes: &dyn QuoteProvider,
    news: &dyn NewsProvider,
    notifier: &dyn Notifier,
    on_digest: &(dyn Fn(&str) + Sync),
    today: NaiveDate,
) -> Result<AlertOutcome, AlertError> {
    let quote = quotes.fetch_quote(&config.ticker).await?;
    let change = quote.relative_change()?;
    debug!(%change, threshold = %config.threshold, "Computed price change");

    if !exceeds_threshold(change, config.threshold) {
        info!(%change, "Change within threshold, no alert");
        return Ok(AlertOutcome::BelowThreshold { quote, change });
    }

    let query = NewsQuery::since_yesterday(&config.company, today);
    let articles = news.fetch_articles(&query).await?;
    debug!(count = articles.len(), "Fetched news articles");

    let notification = Notification::new(&config.ticker, change, digest(&articles))?;
    on_digest(&notification.body);
    notifier.send(&notification).await?;
    info!(subject = %notification.subject, "Alert sent");

    Ok(AlertOutcome::Notified {
        quote,
        change,
        notification,
    })
}
