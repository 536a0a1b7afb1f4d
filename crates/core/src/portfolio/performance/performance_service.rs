use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use super::performance_model::{EntryPerformance, PortfolioPerformance};
use crate::bonds::CouponPaymentRepositoryTrait;
use crate::constants::VALUATION_FETCH_BATCH_SIZE;
use crate::errors::Result;
use crate::fx::FxServiceTrait;
use crate::holdings::{price_per_base_unit, quantity_in_base_units, AssetType, PortfolioEntry};
use crate::portfolio::pricing::EntryPricerTrait;
use crate::utils::Clock;

#[async_trait]
pub trait PerformanceServiceTrait: Send + Sync {
    /// Value every entry as of now in the display currency.
    ///
    /// Returns `Ok(None)` for an empty entry set so callers can show
    /// "no data" instead of a zero performance. Entries that fail to
    /// value are annotated rather than aborting the aggregate; they are
    /// excluded from the totals.
    async fn calculate_performance(
        &self,
        entries: &[PortfolioEntry],
        display_currency: &str,
    ) -> Result<Option<PortfolioPerformance>>;
}

pub struct PerformanceService {
    pricer: Arc<dyn EntryPricerTrait>,
    fx_service: Arc<dyn FxServiceTrait>,
    coupon_repository: Arc<dyn CouponPaymentRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl PerformanceService {
    pub fn new(
        pricer: Arc<dyn EntryPricerTrait>,
        fx_service: Arc<dyn FxServiceTrait>,
        coupon_repository: Arc<dyn CouponPaymentRepositoryTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            pricer,
            fx_service,
            coupon_repository,
            clock,
        }
    }

    async fn entry_performance(
        &self,
        entry: &PortfolioEntry,
        display_currency: &str,
        as_of: DateTime<Utc>,
    ) -> Result<EntryPerformance> {
        let quote = self.pricer.price_as_of(entry, as_of).await?;

        // Single rate lookup covers both the converted price and the
        // reported exchange rate (1 when no conversion occurred)
        let exchange_rate = self
            .fx_service
            .get_latest_exchange_rate(&quote.currency, display_currency)
            .await?;
        let current_price = quote.amount * exchange_rate;

        let quantity = quantity_in_base_units(entry.quantity, entry.asset_type, entry.unit);
        let purchase_per_base =
            price_per_base_unit(entry.purchase_price, entry.asset_type, entry.unit);
        let purchase_price = self
            .fx_service
            .convert_currency(purchase_per_base, &entry.currency, display_currency)
            .await?;
        let fees = match entry.transaction_fees {
            Some(fees) => {
                self.fx_service
                    .convert_currency(fees, &entry.currency, display_currency)
                    .await?
            }
            None => Decimal::ZERO,
        };

        let current_value = current_price * quantity;
        let total_cost = purchase_price * quantity + fees;

        let coupon_income = if entry.asset_type == AssetType::Bond {
            self.coupon_income(entry, display_currency).await?
        } else {
            Decimal::ZERO
        };

        let gain_loss = current_value - total_cost + coupon_income;
        let gain_loss_percentage = if total_cost > Decimal::ZERO {
            gain_loss / total_cost * dec!(100)
        } else {
            Decimal::ZERO
        };

        Ok(EntryPerformance {
            entry: entry.clone(),
            current_price,
            purchase_price,
            current_value,
            total_cost,
            gain_loss,
            gain_loss_percentage,
            coupon_income,
            price_source: Some(quote.source),
            exchange_rate,
            error: None,
        })
    }

    /// Sum the entry's recorded coupon payments in the display currency.
    /// Payments are not deduplicated by date.
    async fn coupon_income(
        &self,
        entry: &PortfolioEntry,
        display_currency: &str,
    ) -> Result<Decimal> {
        let payments = self.coupon_repository.list_for_entry(&entry.id).await?;
        let mut income = Decimal::ZERO;
        for payment in payments {
            income += self
                .fx_service
                .convert_currency(payment.amount, &payment.currency, display_currency)
                .await?;
        }
        Ok(income)
    }
}

#[async_trait]
impl PerformanceServiceTrait for PerformanceService {
    async fn calculate_performance(
        &self,
        entries: &[PortfolioEntry],
        display_currency: &str,
    ) -> Result<Option<PortfolioPerformance>> {
        if entries.is_empty() {
            return Ok(None);
        }
        debug!(
            "Valuing {} entries in {}",
            entries.len(),
            display_currency
        );

        let as_of = self.clock.now();

        // Batched concurrent valuation; chunks keep provider pressure
        // bounded and preserve the input order in the output
        let mut performances = Vec::with_capacity(entries.len());
        for chunk in entries.chunks(VALUATION_FETCH_BATCH_SIZE) {
            let futures: Vec<_> = chunk
                .iter()
                .map(|entry| async move {
                    match self.entry_performance(entry, display_currency, as_of).await {
                        Ok(performance) => performance,
                        Err(e) => {
                            warn!(
                                "Failed to value entry {} ({}): {}",
                                entry.id, entry.symbol, e
                            );
                            EntryPerformance::failed(entry.clone(), e.to_string())
                        }
                    }
                })
                .collect();
            performances.extend(join_all(futures).await);
        }

        let mut total_value = Decimal::ZERO;
        let mut total_cost = Decimal::ZERO;
        let mut total_gain_loss = Decimal::ZERO;
        for performance in performances.iter().filter(|p| !p.is_failed()) {
            total_value += performance.current_value;
            total_cost += performance.total_cost;
            total_gain_loss += performance.gain_loss;
        }

        let total_gain_loss_percentage = if total_cost > Decimal::ZERO {
            total_gain_loss / total_cost * dec!(100)
        } else {
            Decimal::ZERO
        };

        Ok(Some(PortfolioPerformance {
            total_value,
            total_cost,
            total_gain_loss,
            total_gain_loss_percentage,
            currency: display_currency.to_string(),
            entries_performance: performances,
        }))
    }
}
