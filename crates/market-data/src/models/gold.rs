use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::metadata::{HistoryMetadata, ResponseStatus};

/// Gold price data point. Prices are quoted in VND.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldTick {
    /// Unix timestamp in seconds
    pub timestamp: i64,
    /// Sell/ask price
    pub sell: Decimal,
    /// Buy/bid price
    pub buy: Decimal,
    /// Gold type/product name (e.g. "Vàng SJC 1L, 10L, 1KG")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Branch/location name (e.g. "Hồ Chí Minh")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
}

/// Gold price history response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldHistoryResponse {
    /// Gold price type/product ID
    pub gold_price_id: String,
    /// Data source that provided this data
    pub source: String,
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<GoldTick>>,
    /// Error message if status is `Error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HistoryMetadata>,
}

impl GoldHistoryResponse {
    pub fn success(gold_price_id: String, source: String, data: Vec<GoldTick>) -> Self {
        Self {
            gold_price_id,
            source,
            status: ResponseStatus::Ok,
            data: Some(data),
            error: None,
            metadata: None,
        }
    }

    pub fn error(gold_price_id: String, source: String, error: String) -> Self {
        Self {
            gold_price_id,
            source,
            status: ResponseStatus::Error,
            data: None,
            error: Some(error),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: HistoryMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// The most recent sell price scaled by the provider's price
    /// multiplier, or `None` on error/empty responses.
    pub fn latest_sell(&self) -> Option<Decimal> {
        if self.status != ResponseStatus::Ok {
            return None;
        }
        let scale = self
            .metadata
            .as_ref()
            .map(HistoryMetadata::scale)
            .unwrap_or(Decimal::ONE);
        self.data
            .as_ref()
            .and_then(|ticks| ticks.last())
            .map(|tick| tick.sell * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn latest_sell_takes_last_tick() {
        let response = GoldHistoryResponse::success(
            "sjc_1l".to_string(),
            "sjc".to_string(),
            vec![
                GoldTick {
                    timestamp: 1_700_000_000,
                    sell: dec!(74_500_000),
                    buy: dec!(73_800_000),
                    type_name: Some("Vàng SJC 1L, 10L, 1KG".to_string()),
                    branch_name: None,
                },
                GoldTick {
                    timestamp: 1_700_086_400,
                    sell: dec!(74_800_000),
                    buy: dec!(74_000_000),
                    type_name: Some("Vàng SJC 1L, 10L, 1KG".to_string()),
                    branch_name: None,
                },
            ],
        );

        assert_eq!(response.latest_sell(), Some(dec!(74_800_000)));
    }

    #[test]
    fn latest_sell_is_none_on_error() {
        let response = GoldHistoryResponse::error(
            "sjc_1l".to_string(),
            "sjc".to_string(),
            "rate limited".to_string(),
        );
        assert_eq!(response.latest_sell(), None);
    }
}
