//! Notification abstractions

use super::error::AlertError;
use async_trait::async_trait;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn new(symbol: &str, change: Decimal, body: String) -> Result<Self, AlertError> {
        Ok(Notification {
            subject: subject_line(symbol, change)?,
            body,
        })
    }
}

/// Subject such as `TSLA is up: 5%`. The down variant keeps a trailing space.
pub fn subject_line(symbol: &str, change: Decimal) -> Result<String, AlertError> {
    let percent = change
        .abs()
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| AlertError::ChangeOutOfRange(symbol.to_string()))?
        .round();
    if change > Decimal::ZERO {
        Ok(format!("{symbol} is up: {percent}%"))
    } else {
        Ok(format!("{symbol} is down: {percent}% "))
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), AlertError>;
}
