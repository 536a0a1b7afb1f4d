use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use log::warn;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::benchmark_model::{BenchmarkInstrument, PortfolioBenchmarkComparison};
use crate::constants::{BASE_INDEX, DAILY_RESOLUTION, DEFAULT_SERIES_INTERVAL_DAYS};
use crate::errors::Result;
use crate::holdings::PortfolioEntry;
use crate::portfolio::history::{HistoryPoint, HistoryServiceTrait};
use finfolio_market_data::{ResponseStatus, StockHistoryProvider};

#[async_trait]
pub trait BenchmarkServiceTrait: Send + Sync {
    /// Compare the portfolio's normalized series against a benchmark
    /// instrument over the date range.
    ///
    /// Returns `Ok(None)` when either series is empty: insufficient
    /// data, not an error, and never a zero-filled comparison.
    async fn compare(
        &self,
        entries: &[PortfolioEntry],
        benchmark: &BenchmarkInstrument,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        display_currency: &str,
    ) -> Result<Option<PortfolioBenchmarkComparison>>;
}

pub struct BenchmarkService {
    history_service: Arc<dyn HistoryServiceTrait>,
    stock_provider: Arc<dyn StockHistoryProvider>,
}

impl BenchmarkService {
    pub fn new(
        history_service: Arc<dyn HistoryServiceTrait>,
        stock_provider: Arc<dyn StockHistoryProvider>,
    ) -> Self {
        Self {
            history_service,
            stock_provider,
        }
    }

    /// The benchmark's own daily closes normalized so its first sample
    /// is 100. Prices stay in the instrument's native scale; only the
    /// provider's price-scale metadata is applied, no currency
    /// conversion.
    async fn benchmark_series(
        &self,
        benchmark: &BenchmarkInstrument,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<HistoryPoint>> {
        let response = self
            .stock_provider
            .get_stock_history(
                &benchmark.symbol,
                DAILY_RESOLUTION,
                start,
                end,
                &benchmark.source,
            )
            .await?;

        if response.status != ResponseStatus::Ok {
            warn!(
                "Benchmark fetch for {} returned an error: {}",
                benchmark.symbol,
                response.error.as_deref().unwrap_or("unknown")
            );
            return Ok(Vec::new());
        }

        let scale = response
            .metadata
            .as_ref()
            .map(|m| m.scale())
            .unwrap_or(Decimal::ONE);
        let candles = response.data.unwrap_or_default();

        let first_close = match candles.first().map(|c| c.close * scale) {
            Some(close) if !close.is_zero() => close,
            // A zero or missing first close cannot anchor the index
            _ => return Ok(Vec::new()),
        };

        Ok(candles
            .iter()
            .map(|candle| HistoryPoint {
                timestamp: Utc
                    .timestamp_opt(candle.timestamp, 0)
                    .single()
                    .unwrap_or(start),
                value: candle.close * scale / first_close * BASE_INDEX,
            })
            .collect())
    }
}

#[async_trait]
impl BenchmarkServiceTrait for BenchmarkService {
    async fn compare(
        &self,
        entries: &[PortfolioEntry],
        benchmark: &BenchmarkInstrument,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        display_currency: &str,
    ) -> Result<Option<PortfolioBenchmarkComparison>> {
        let portfolio_series = match self
            .history_service
            .build_performance_series(
                entries,
                start,
                end,
                display_currency,
                DEFAULT_SERIES_INTERVAL_DAYS,
            )
            .await?
        {
            // A superseded build means a newer comparison is on its way
            None => return Ok(None),
            Some(series) => series,
        };

        let benchmark_series = self.benchmark_series(benchmark, start, end).await?;

        let (last_portfolio, last_benchmark) =
            match (portfolio_series.last(), benchmark_series.last()) {
                (Some(p), Some(b)) => (p.value, b.value),
                // Either series empty: no comparison is possible
                _ => return Ok(None),
            };

        let portfolio_return = last_portfolio - BASE_INDEX;
        let benchmark_return = last_benchmark - BASE_INDEX;

        Ok(Some(PortfolioBenchmarkComparison {
            portfolio_series,
            benchmark_series,
            portfolio_return,
            benchmark_return,
            outperformance: portfolio_return - benchmark_return,
        }))
    }
}
