use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A cached exchange rate for one currency pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedRate {
    pub rate: Decimal,
    pub fetched_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CachedRate {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Cache key for a currency pair, e.g. `"USD_VND"`.
pub fn pair_key(from: &str, to: &str) -> String {
    format!("{}_{}", from, to)
}
