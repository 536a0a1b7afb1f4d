use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::errors::Result;

#[async_trait]
pub trait FxServiceTrait: Send + Sync {
    /// Exchange rate for the pair as of now. Cached.
    async fn get_latest_exchange_rate(&self, from: &str, to: &str) -> Result<Decimal>;

    /// Exchange rate for the pair as of a past instant. Never cached.
    async fn get_exchange_rate_as_of(
        &self,
        from: &str,
        to: &str,
        as_of: DateTime<Utc>,
    ) -> Result<Decimal>;

    /// Convert an amount at the current rate. No rounding is applied;
    /// callers format for display.
    async fn convert_currency(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal>;

    /// Convert an amount at the rate as of a past instant.
    async fn convert_currency_as_of(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
        as_of: DateTime<Utc>,
    ) -> Result<Decimal>;
}
