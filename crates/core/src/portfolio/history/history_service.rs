use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::history_model::HistoryPoint;
use crate::constants::{BASE_INDEX, SJC_GOLD_SOURCE, VALUATION_FETCH_BATCH_SIZE};
use crate::errors::{Error, Result};
use crate::fx::FxServiceTrait;
use crate::holdings::{quantity_in_base_units, AssetType, PortfolioEntry};
use crate::portfolio::pricing::EntryPricerTrait;

#[async_trait]
pub trait HistoryServiceTrait: Send + Sync {
    /// Build a base-100 normalized value series over the date range.
    ///
    /// Samples are spaced `interval_days` apart; the final sample is
    /// forced to land exactly on `end`. Invoking the builder supersedes
    /// any in-flight build on the same service (last request wins); a
    /// superseded build resolves to `Ok(None)` and must not be treated
    /// as a failure.
    async fn build_performance_series(
        &self,
        entries: &[PortfolioEntry],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        display_currency: &str,
        interval_days: i64,
    ) -> Result<Option<Vec<HistoryPoint>>>;
}

/// Builds historical portfolio value series by repricing every entry at
/// each sampled timestamp.
///
/// The series is best-effort: an entry that cannot be priced at a given
/// timestamp contributes zero to that sample instead of failing the
/// whole series.
pub struct HistoryService {
    pricer: Arc<dyn EntryPricerTrait>,
    fx_service: Arc<dyn FxServiceTrait>,
    generation: AtomicU64,
}

impl HistoryService {
    pub fn new(pricer: Arc<dyn EntryPricerTrait>, fx_service: Arc<dyn FxServiceTrait>) -> Self {
        Self {
            pricer,
            fx_service,
            generation: AtomicU64::new(0),
        }
    }

    /// Whether the entry participates in historical sampling at all.
    ///
    /// Gold entries are sampled from the SJC series only; entries
    /// pointing at other gold sources are skipped. An absent source
    /// means the provider default, which is SJC.
    fn is_sampled(entry: &PortfolioEntry) -> bool {
        match entry.asset_type {
            AssetType::Gold => entry
                .source
                .as_deref()
                .map(|source| source.eq_ignore_ascii_case(SJC_GOLD_SOURCE))
                .unwrap_or(true),
            AssetType::Stock | AssetType::Bond => true,
        }
    }

    async fn entry_value_at(
        &self,
        entry: &PortfolioEntry,
        timestamp: DateTime<Utc>,
        display_currency: &str,
    ) -> Result<Decimal> {
        let quote = self.pricer.price_as_of(entry, timestamp).await?;
        let price = self
            .fx_service
            .convert_currency_as_of(quote.amount, &quote.currency, display_currency, timestamp)
            .await?;
        let quantity = quantity_in_base_units(entry.quantity, entry.asset_type, entry.unit);
        Ok(price * quantity)
    }

    /// Total portfolio value at one timestamp, degrading unpriceable
    /// entries to zero.
    async fn portfolio_value_at(
        &self,
        entries: &[&PortfolioEntry],
        timestamp: DateTime<Utc>,
        display_currency: &str,
    ) -> Decimal {
        let mut total = Decimal::ZERO;
        for chunk in entries.chunks(VALUATION_FETCH_BATCH_SIZE) {
            let futures: Vec<_> = chunk
                .iter()
                .map(|entry| async move {
                    match self.entry_value_at(entry, timestamp, display_currency).await {
                        Ok(value) => value,
                        Err(e) => {
                            warn!(
                                "Skipping entry {} ({}) at {}: {}",
                                entry.id, entry.symbol, timestamp, e
                            );
                            Decimal::ZERO
                        }
                    }
                })
                .collect();
            for value in join_all(futures).await {
                total += value;
            }
        }
        total
    }
}

#[async_trait]
impl HistoryServiceTrait for HistoryService {
    async fn build_performance_series(
        &self,
        entries: &[PortfolioEntry],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        display_currency: &str,
        interval_days: i64,
    ) -> Result<Option<Vec<HistoryPoint>>> {
        if start > end {
            return Err(Error::Validation(
                "Start date must not be after end date".to_string(),
            ));
        }
        if interval_days < 1 {
            return Err(Error::Validation(format!(
                "Sampling interval must be at least one day, got {}",
                interval_days
            )));
        }

        // Entering a new cycle supersedes any build still in flight
        let cycle = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let mut timestamps = Vec::new();
        let mut cursor = start;
        while cursor < end {
            timestamps.push(cursor);
            cursor += Duration::days(interval_days);
        }
        // The last sample always lands exactly on the range end
        timestamps.push(end);

        let mut points = Vec::with_capacity(timestamps.len());
        let mut initial_value: Option<Decimal> = None;

        for timestamp in timestamps {
            if self.generation.load(Ordering::SeqCst) != cycle {
                debug!(
                    "Series build for {} superseded by a newer request",
                    display_currency
                );
                return Ok(None);
            }

            let eligible: Vec<&PortfolioEntry> = entries
                .iter()
                .filter(|entry| entry.purchase_date <= timestamp)
                .filter(|entry| Self::is_sampled(entry))
                .collect();

            let total = self
                .portfolio_value_at(&eligible, timestamp, display_currency)
                .await;

            // The first nonzero total anchors the index at 100
            if initial_value.is_none() && !total.is_zero() {
                initial_value = Some(total);
            }
            let value = match initial_value {
                Some(initial) => total / initial * BASE_INDEX,
                None => BASE_INDEX,
            };

            points.push(HistoryPoint { timestamp, value });
        }

        Ok(Some(points))
    }
}
