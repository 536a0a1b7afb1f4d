//! Market data provider trait definitions.
//!
//! Each trait covers one of the external fetch services the valuation
//! engine depends on. They are deliberately narrow so a consumer only
//! depends on the legs it actually uses (the FX service, for instance,
//! never sees stock or gold data).
//!
//! All fetches are asynchronous and may fail; failures carry a
//! human-readable message via [`MarketDataError`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::MarketDataError;
use crate::models::{GoldHistoryResponse, RateHistoryResponse, StockHistoryResponse};

/// Fetches OHLCV history for a stock or index symbol.
#[async_trait]
pub trait StockHistoryProvider: Send + Sync {
    /// Fetch candles for `symbol` between `start` and `end` (inclusive)
    /// at the given resolution from the named source.
    async fn get_stock_history(
        &self,
        symbol: &str,
        resolution: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        source: &str,
    ) -> Result<StockHistoryResponse, MarketDataError>;
}

/// Fetches gold price history for a gold price series.
#[async_trait]
pub trait GoldPriceProvider: Send + Sync {
    /// Fetch gold ticks for `gold_price_id` between `start` and `end`
    /// (inclusive) from the named source. Prices are quoted in VND.
    async fn get_gold_history(
        &self,
        gold_price_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        source: &str,
    ) -> Result<GoldHistoryResponse, MarketDataError>;
}

/// Fetches "currency to VND" exchange-rate history.
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Fetch rate samples for `currency_code` between `start` and `end`
    /// (inclusive).
    async fn get_rate_history(
        &self,
        currency_code: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<RateHistoryResponse, MarketDataError>;
}
