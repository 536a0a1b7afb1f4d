//! Shared mock providers and entry builders for service tests.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::bonds::CouponPaymentRepositoryTrait;
use crate::errors::Result;
use crate::holdings::{
    AssetType, BondCouponPayment, CouponFrequency, GoldUnit, PortfolioEntry,
};
use finfolio_market_data::{
    Candle, ExchangeRateProvider, GoldHistoryResponse, GoldPriceProvider, GoldTick,
    HistoryMetadata, MarketDataError, RateHistoryResponse, RateTick, StockHistoryProvider,
    StockHistoryResponse,
};

pub fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

// --- Providers -----------------------------------------------------------

/// Exchange-rate provider backed by static "currency to VND" quotes.
#[derive(Default)]
pub struct StaticRateProvider {
    constant: HashMap<String, Decimal>,
    samples: HashMap<String, Vec<(i64, Decimal, Decimal)>>,
    errors: HashMap<String, String>,
    calls: AtomicUsize,
}

impl StaticRateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A constant sell rate, reported at the end of whatever window is
    /// requested.
    pub fn with_rate(mut self, code: &str, sell: Decimal) -> Self {
        self.constant.insert(code.to_string(), sell);
        self
    }

    /// Explicit `(timestamp, sell, buy)` samples.
    pub fn with_samples(mut self, code: &str, samples: Vec<(i64, Decimal, Decimal)>) -> Self {
        self.samples.insert(code.to_string(), samples);
        self
    }

    pub fn with_error(mut self, code: &str, message: &str) -> Self {
        self.errors.insert(code.to_string(), message.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExchangeRateProvider for StaticRateProvider {
    async fn get_rate_history(
        &self,
        currency_code: &str,
        _start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> std::result::Result<RateHistoryResponse, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.errors.get(currency_code) {
            return Ok(RateHistoryResponse::error(
                currency_code.to_string(),
                message.clone(),
            ));
        }

        if let Some(rate) = self.constant.get(currency_code) {
            return Ok(RateHistoryResponse::success(
                currency_code.to_string(),
                vec![RateTick {
                    timestamp: end.timestamp(),
                    sell: *rate,
                    buy: *rate,
                }],
            ));
        }

        let ticks = self
            .samples
            .get(currency_code)
            .map(|samples| {
                samples
                    .iter()
                    .map(|(timestamp, sell, buy)| RateTick {
                        timestamp: *timestamp,
                        sell: *sell,
                        buy: *buy,
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(RateHistoryResponse::success(
            currency_code.to_string(),
            ticks,
        ))
    }
}

/// Stock provider backed by constant closes or explicit series.
///
/// Yields to the scheduler once per call so concurrent service calls
/// interleave deterministically in tests.
#[derive(Default)]
pub struct StaticStockProvider {
    constant: HashMap<String, Decimal>,
    series: HashMap<String, Vec<(i64, Decimal)>>,
    scale: Option<Decimal>,
    errors: HashMap<String, String>,
    calls: AtomicUsize,
}

impl StaticStockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_close(mut self, symbol: &str, close: Decimal) -> Self {
        self.constant.insert(symbol.to_string(), close);
        self
    }

    pub fn with_series(mut self, symbol: &str, series: Vec<(i64, Decimal)>) -> Self {
        self.series.insert(symbol.to_string(), series);
        self
    }

    pub fn with_scale(mut self, scale: Decimal) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_error(mut self, symbol: &str, message: &str) -> Self {
        self.errors.insert(symbol.to_string(), message.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn metadata(&self) -> Option<HistoryMetadata> {
        self.scale.map(|scale| HistoryMetadata {
            price_scale: Some(scale),
        })
    }
}

#[async_trait]
impl StockHistoryProvider for StaticStockProvider {
    async fn get_stock_history(
        &self,
        symbol: &str,
        resolution: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        source: &str,
    ) -> std::result::Result<StockHistoryResponse, MarketDataError> {
        tokio::task::yield_now().await;
        self.calls.fetch_add(1, Ordering::SeqCst);

        let source = if source.is_empty() { "mock" } else { source };

        if let Some(message) = self.errors.get(symbol) {
            return Ok(StockHistoryResponse::error(
                symbol.to_string(),
                resolution.to_string(),
                source.to_string(),
                message.clone(),
            ));
        }

        let candles: Vec<Candle> = if let Some(close) = self.constant.get(symbol) {
            vec![candle(end.timestamp(), *close)]
        } else {
            self.series
                .get(symbol)
                .map(|series| {
                    series
                        .iter()
                        .filter(|(timestamp, _)| {
                            *timestamp >= start.timestamp() && *timestamp <= end.timestamp()
                        })
                        .map(|(timestamp, close)| candle(*timestamp, *close))
                        .collect()
                })
                .unwrap_or_default()
        };

        let mut response = StockHistoryResponse::success(
            symbol.to_string(),
            resolution.to_string(),
            source.to_string(),
            candles,
        );
        if let Some(metadata) = self.metadata() {
            response = response.with_metadata(metadata);
        }
        Ok(response)
    }
}

fn candle(timestamp: i64, close: Decimal) -> Candle {
    Candle {
        timestamp,
        open: close,
        high: close,
        low: close,
        close,
        volume: 10_000,
    }
}

/// Gold provider backed by constant sells or explicit series.
#[derive(Default)]
pub struct StaticGoldProvider {
    constant: HashMap<String, Decimal>,
    series: HashMap<String, Vec<(i64, Decimal)>>,
    calls: AtomicUsize,
}

impl StaticGoldProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sell(mut self, gold_price_id: &str, sell: Decimal) -> Self {
        self.constant.insert(gold_price_id.to_string(), sell);
        self
    }

    pub fn with_series(mut self, gold_price_id: &str, series: Vec<(i64, Decimal)>) -> Self {
        self.series.insert(gold_price_id.to_string(), series);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GoldPriceProvider for StaticGoldProvider {
    async fn get_gold_history(
        &self,
        gold_price_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        source: &str,
    ) -> std::result::Result<GoldHistoryResponse, MarketDataError> {
        tokio::task::yield_now().await;
        self.calls.fetch_add(1, Ordering::SeqCst);

        let source = if source.is_empty() { "sjc" } else { source };

        let ticks: Vec<GoldTick> = if let Some(sell) = self.constant.get(gold_price_id) {
            vec![gold_tick(end.timestamp(), *sell)]
        } else {
            self.series
                .get(gold_price_id)
                .map(|series| {
                    series
                        .iter()
                        .filter(|(timestamp, _)| {
                            *timestamp >= start.timestamp() && *timestamp <= end.timestamp()
                        })
                        .map(|(timestamp, sell)| gold_tick(*timestamp, *sell))
                        .collect()
                })
                .unwrap_or_default()
        };

        Ok(GoldHistoryResponse::success(
            gold_price_id.to_string(),
            source.to_string(),
            ticks,
        ))
    }
}

fn gold_tick(timestamp: i64, sell: Decimal) -> GoldTick {
    GoldTick {
        timestamp,
        sell,
        buy: sell - dec!(500_000),
        type_name: Some("Vàng SJC 1L, 10L, 1KG".to_string()),
        branch_name: None,
    }
}

/// Coupon payment repository backed by an in-memory map.
#[derive(Default)]
pub struct StaticCouponRepository {
    payments: HashMap<String, Vec<BondCouponPayment>>,
}

impl StaticCouponRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payment(mut self, entry_id: &str, amount: Decimal, currency: &str) -> Self {
        let payments = self.payments.entry(entry_id.to_string()).or_default();
        let payment = BondCouponPayment {
            id: format!("{}-cp{}", entry_id, payments.len() + 1),
            entry_id: entry_id.to_string(),
            payment_date: ts(2024, 1, 15),
            amount,
            currency: currency.to_string(),
            notes: None,
        };
        payments.push(payment);
        self
    }
}

#[async_trait]
impl CouponPaymentRepositoryTrait for StaticCouponRepository {
    async fn list_for_entry(&self, entry_id: &str) -> Result<Vec<BondCouponPayment>> {
        Ok(self.payments.get(entry_id).cloned().unwrap_or_default())
    }
}

// --- Entry builders ------------------------------------------------------

pub fn stock_entry(
    id: &str,
    symbol: &str,
    quantity: Decimal,
    purchase_price: Decimal,
    currency: &str,
) -> PortfolioEntry {
    PortfolioEntry {
        id: id.to_string(),
        portfolio_id: "p1".to_string(),
        asset_type: AssetType::Stock,
        symbol: symbol.to_string(),
        quantity,
        purchase_price,
        currency: currency.to_string(),
        purchase_date: ts(2023, 1, 1),
        transaction_fees: None,
        source: None,
        notes: None,
        tags: Vec::new(),
        unit: None,
        gold_type: None,
        face_value: None,
        coupon_rate: None,
        maturity_date: None,
        coupon_frequency: None,
        ytm: None,
        current_market_price: None,
    }
}

pub fn gold_entry(
    id: &str,
    quantity: Decimal,
    unit: Option<GoldUnit>,
    purchase_price: Decimal,
    source: &str,
) -> PortfolioEntry {
    let mut entry = stock_entry(id, "VN.GOLD", quantity, purchase_price, "VND");
    entry.asset_type = AssetType::Gold;
    entry.unit = unit;
    entry.gold_type = Some("sjc_1l".to_string());
    entry.source = Some(source.to_string());
    entry
}

pub fn bond_entry(
    id: &str,
    face_value: Decimal,
    coupon_rate: Decimal,
    ytm: Option<Decimal>,
    current_market_price: Option<Decimal>,
) -> PortfolioEntry {
    let mut entry = stock_entry(id, "VN000123", dec!(1), dec!(950), "USD");
    entry.asset_type = AssetType::Bond;
    entry.face_value = Some(face_value);
    entry.coupon_rate = Some(coupon_rate);
    entry.maturity_date = Some(ts(2030, 1, 1));
    entry.coupon_frequency = Some(CouponFrequency::Semiannual);
    entry.ytm = ytm;
    entry.current_market_price = current_market_price;
    entry
}
