use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::metadata::ResponseStatus;

/// One "currency to VND" exchange-rate sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTick {
    /// Unix timestamp in seconds
    pub timestamp: i64,
    /// Sell/ask rate in VND
    pub sell: Decimal,
    /// Buy/bid rate in VND
    pub buy: Decimal,
}

/// Exchange-rate history response envelope.
///
/// The rate provider only quotes "currency to VND" legs; cross rates are
/// derived by the FX service through the VND pivot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateHistoryResponse {
    /// Currency code (e.g. "USD", "EUR", "JPY")
    pub currency_code: String,
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<RateTick>>,
    /// Error message if status is `Error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RateHistoryResponse {
    pub fn success(currency_code: String, data: Vec<RateTick>) -> Self {
        Self {
            currency_code,
            status: ResponseStatus::Ok,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(currency_code: String, error: String) -> Self {
        Self {
            currency_code,
            status: ResponseStatus::Error,
            data: None,
            error: Some(error),
        }
    }

    /// The sell rate of the most recent sample, or `None` on error/empty
    /// responses.
    pub fn latest_sell(&self) -> Option<Decimal> {
        if self.status != ResponseStatus::Ok {
            return None;
        }
        self.data
            .as_ref()
            .and_then(|ticks| ticks.last())
            .map(|tick| tick.sell)
    }
}
