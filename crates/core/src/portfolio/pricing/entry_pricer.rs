use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use super::pricing_model::{PriceQuote, PriceSource};
use crate::bonds::present_value;
use crate::constants::{DAILY_RESOLUTION, PIVOT_CURRENCY, PRICE_LOOKBACK_WINDOW_SECS};
use crate::errors::Result;
use crate::holdings::{AssetType, PortfolioEntry};
use finfolio_market_data::{GoldPriceProvider, MarketDataError, StockHistoryProvider};

/// Prices a single entry as of a given instant, in its native currency.
#[async_trait]
pub trait EntryPricerTrait: Send + Sync {
    async fn price_as_of(
        &self,
        entry: &PortfolioEntry,
        as_of: DateTime<Utc>,
    ) -> Result<PriceQuote>;
}

/// Pricing strategy dispatching on [`AssetType`].
///
/// Stocks and gold are quoted from a 1-day window ending at the target
/// instant; bonds are valued without any fetch through the pricing-mode
/// fallback chain (present value, manual price, face value, purchase
/// price).
pub struct EntryPricer {
    stock_provider: Arc<dyn StockHistoryProvider>,
    gold_provider: Arc<dyn GoldPriceProvider>,
}

impl EntryPricer {
    pub fn new(
        stock_provider: Arc<dyn StockHistoryProvider>,
        gold_provider: Arc<dyn GoldPriceProvider>,
    ) -> Self {
        Self {
            stock_provider,
            gold_provider,
        }
    }

    async fn price_stock(
        &self,
        entry: &PortfolioEntry,
        as_of: DateTime<Utc>,
    ) -> Result<PriceQuote> {
        let start = as_of - Duration::seconds(PRICE_LOOKBACK_WINDOW_SECS);
        // An empty source string lets the provider pick its default
        let source = entry.source.as_deref().unwrap_or_default();

        let response = self
            .stock_provider
            .get_stock_history(&entry.symbol, DAILY_RESOLUTION, start, as_of, source)
            .await?;

        let amount = response
            .latest_close()
            .ok_or_else(|| MarketDataError::PriceUnavailable {
                symbol: entry.symbol.clone(),
            })?;

        Ok(PriceQuote {
            amount,
            currency: entry.currency.clone(),
            source: PriceSource::Provider(response.source),
        })
    }

    async fn price_gold(
        &self,
        entry: &PortfolioEntry,
        as_of: DateTime<Utc>,
    ) -> Result<PriceQuote> {
        let start = as_of - Duration::seconds(PRICE_LOOKBACK_WINDOW_SECS);
        let gold_price_id = entry.gold_type.as_deref().unwrap_or(&entry.symbol);
        let source = entry.source.as_deref().unwrap_or_default();

        let response = self
            .gold_provider
            .get_gold_history(gold_price_id, start, as_of, source)
            .await?;

        let amount = response
            .latest_sell()
            .ok_or_else(|| MarketDataError::PriceUnavailable {
                symbol: gold_price_id.to_string(),
            })?;

        // Gold is always quoted in VND regardless of the entry currency
        Ok(PriceQuote {
            amount,
            currency: PIVOT_CURRENCY.to_string(),
            source: PriceSource::Provider(response.source),
        })
    }

    fn price_bond(&self, entry: &PortfolioEntry, as_of: DateTime<Utc>) -> Result<PriceQuote> {
        let quote = |amount, source| PriceQuote {
            amount,
            currency: entry.currency.clone(),
            source,
        };

        // Fallback order: full present-value inputs, manual market
        // price, face value, purchase price
        if let (Some(face), Some(coupon), Some(ytm), Some(maturity), Some(frequency)) = (
            entry.face_value,
            entry.coupon_rate,
            entry.ytm,
            entry.maturity_date,
            entry.coupon_frequency,
        ) {
            let amount = present_value(face, coupon, ytm, maturity, frequency, as_of)?;
            return Ok(quote(amount, PriceSource::Calculated));
        }

        if let Some(amount) = entry.current_market_price {
            return Ok(quote(amount, PriceSource::Manual));
        }

        if let Some(amount) = entry.face_value {
            return Ok(quote(amount, PriceSource::FaceValue));
        }

        Ok(quote(entry.purchase_price, PriceSource::PurchasePrice))
    }
}

#[async_trait]
impl EntryPricerTrait for EntryPricer {
    async fn price_as_of(
        &self,
        entry: &PortfolioEntry,
        as_of: DateTime<Utc>,
    ) -> Result<PriceQuote> {
        match entry.asset_type {
            AssetType::Stock => self.price_stock(entry, as_of).await,
            AssetType::Gold => self.price_gold(entry, as_of).await,
            AssetType::Bond => self.price_bond(entry, as_of),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::test_support::{bond_entry, gold_entry, stock_entry, StaticGoldProvider, StaticStockProvider};
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn pricer(
        stock: Arc<StaticStockProvider>,
        gold: Arc<StaticGoldProvider>,
    ) -> EntryPricer {
        EntryPricer::new(stock, gold)
    }

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn stock_price_is_last_close_in_window() {
        let stock = Arc::new(StaticStockProvider::new().with_close("AAPL", dec!(150)));
        let gold = Arc::new(StaticGoldProvider::new());
        let quote = pricer(stock, gold)
            .price_as_of(&stock_entry("e1", "AAPL", dec!(10), dec!(100), "USD"), as_of())
            .await
            .unwrap();

        assert_eq!(quote.amount, dec!(150));
        assert_eq!(quote.currency, "USD");
        assert!(matches!(quote.source, PriceSource::Provider(_)));
    }

    #[tokio::test]
    async fn stock_price_applies_provider_scale() {
        let stock = Arc::new(
            StaticStockProvider::new()
                .with_close("VNM", dec!(66.25))
                .with_scale(dec!(1000)),
        );
        let gold = Arc::new(StaticGoldProvider::new());
        let quote = pricer(stock, gold)
            .price_as_of(&stock_entry("e1", "VNM", dec!(100), dec!(60_000), "VND"), as_of())
            .await
            .unwrap();

        assert_eq!(quote.amount, dec!(66_250));
    }

    #[tokio::test]
    async fn empty_stock_window_is_price_unavailable() {
        let stock = Arc::new(StaticStockProvider::new());
        let gold = Arc::new(StaticGoldProvider::new());
        let err = pricer(stock, gold)
            .price_as_of(&stock_entry("e1", "AAPL", dec!(10), dec!(100), "USD"), as_of())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::MarketData(MarketDataError::PriceUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn gold_price_is_last_sell_in_vnd() {
        let stock = Arc::new(StaticStockProvider::new());
        let gold = Arc::new(StaticGoldProvider::new().with_sell("sjc_1l", dec!(74_800_000)));
        let quote = pricer(stock, gold)
            .price_as_of(
                &gold_entry("e1", dec!(2), None, dec!(70_000_000), "sjc"),
                as_of(),
            )
            .await
            .unwrap();

        assert_eq!(quote.amount, dec!(74_800_000));
        assert_eq!(quote.currency, "VND");
    }

    #[tokio::test]
    async fn bond_with_full_inputs_is_calculated() {
        let stock = Arc::new(StaticStockProvider::new());
        let gold = Arc::new(StaticGoldProvider::new());
        let entry = bond_entry("e1", dec!(1000), dec!(5), Some(dec!(6)), None);

        let quote = pricer(stock, gold).price_as_of(&entry, as_of()).await.unwrap();
        assert_eq!(quote.source, PriceSource::Calculated);
        assert_eq!(quote.currency, "USD");
        assert!(quote.amount > Decimal::ZERO);
    }

    #[tokio::test]
    async fn bond_without_ytm_uses_manual_price() {
        let stock = Arc::new(StaticStockProvider::new());
        let gold = Arc::new(StaticGoldProvider::new());
        let entry = bond_entry("e1", dec!(1000), dec!(5), None, Some(dec!(980)));

        let quote = pricer(stock, gold).price_as_of(&entry, as_of()).await.unwrap();
        assert_eq!(quote.amount, dec!(980));
        assert_eq!(quote.source, PriceSource::Manual);
    }

    #[tokio::test]
    async fn bond_falls_back_to_face_then_purchase_price() {
        let stock = Arc::new(StaticStockProvider::new());
        let gold = Arc::new(StaticGoldProvider::new());

        let entry = bond_entry("e1", dec!(1000), dec!(5), None, None);
        let quote = pricer(stock.clone(), gold.clone())
            .price_as_of(&entry, as_of())
            .await
            .unwrap();
        assert_eq!(quote.amount, dec!(1000));
        assert_eq!(quote.source, PriceSource::FaceValue);

        let mut entry = bond_entry("e1", dec!(1000), dec!(5), None, None);
        entry.face_value = None;
        let quote = pricer(stock, gold).price_as_of(&entry, as_of()).await.unwrap();
        assert_eq!(quote.amount, entry.purchase_price);
        assert_eq!(quote.source, PriceSource::PurchasePrice);
    }
}
