use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::metadata::{HistoryMetadata, ResponseStatus};

/// Standard OHLCV candle data point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    /// Unix timestamp in seconds
    pub timestamp: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: i64,
}

/// Stock history response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockHistoryResponse {
    pub symbol: String,
    /// Resolution/timeframe (e.g. "1D")
    pub resolution: String,
    /// Data source that provided this data
    pub source: String,
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Candle>>,
    /// Error message if status is `Error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HistoryMetadata>,
}

impl StockHistoryResponse {
    pub fn success(
        symbol: String,
        resolution: String,
        source: String,
        data: Vec<Candle>,
    ) -> Self {
        Self {
            symbol,
            resolution,
            source,
            status: ResponseStatus::Ok,
            data: Some(data),
            error: None,
            metadata: None,
        }
    }

    pub fn error(symbol: String, resolution: String, source: String, error: String) -> Self {
        Self {
            symbol,
            resolution,
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

    /// The most recent close scaled by the provider's price multiplier.
    ///
    /// Returns `None` when the response is an error or carries no candles.
    pub fn latest_close(&self) -> Option<Decimal> {
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
            .and_then(|candles| candles.last())
            .map(|candle| candle.close * scale)
    }
}
