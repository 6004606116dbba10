//! Quote abstractions and core types

use super::error::AlertError;
use async_trait::async_trait;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub symbol: String,
    pub current_price: Decimal,
    pub previous_close: Decimal,
}

impl Quote {
    /// Signed change since the previous close as a fraction, e.g. `0.05` for +5%.
    pub fn relative_change(&self) -> Result<Decimal, AlertError> {
        if self.previous_close.is_zero() {
            return Err(AlertError::ZeroPreviousClose(self.symbol.clone()));
        }
        self.current_price
            .checked_sub(self.previous_close)
            .and_then(|diff| diff.checked_div(self.previous_close))
            .ok_or_else(|| AlertError::ChangeOutOfRange(self.symbol.clone()))
    }
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, AlertError>;
}
