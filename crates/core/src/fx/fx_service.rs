use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::fx_cache::RateCache;
use super::fx_errors::FxError;
use super::fx_traits::FxServiceTrait;
use crate::constants::{PIVOT_CURRENCY, RATE_LOOKBACK_WINDOW_SECS};
use crate::errors::Result;
use crate::utils::Clock;
use finfolio_market_data::ExchangeRateProvider;

/// Currency conversion service.
///
/// The rate provider only quotes "currency to VND" legs, so every pair
/// is resolved through the VND pivot: a direct leg when converting into
/// VND, an inverted leg when converting out of it, and the ratio of both
/// legs otherwise. Current-rate lookups go through the shared
/// [`RateCache`]; as-of lookups always hit the provider.
#[derive(Clone)]
pub struct FxService {
    provider: Arc<dyn ExchangeRateProvider>,
    cache: Arc<RateCache>,
    clock: Arc<dyn Clock>,
}

impl FxService {
    pub fn new(
        provider: Arc<dyn ExchangeRateProvider>,
        cache: Arc<RateCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            provider,
            cache,
            clock,
        }
    }

    fn validate_currency_code(code: &str) -> Result<()> {
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(FxError::InvalidCurrencyCode(code.to_string()).into());
        }
        Ok(())
    }

    /// Fetch the "currency to VND" sell rate from the most recent sample
    /// in a 1-hour window ending at the target instant.
    async fn rate_to_pivot(&self, currency: &str, as_of: DateTime<Utc>) -> Result<Decimal> {
        let start = as_of - Duration::seconds(RATE_LOOKBACK_WINDOW_SECS);
        let response = self.provider.get_rate_history(currency, start, as_of).await?;

        response.latest_sell().ok_or_else(|| {
            FxError::RateUnavailable(format!(
                "No {}/{} samples in the window ending {}",
                currency, PIVOT_CURRENCY, as_of
            ))
            .into()
        })
    }

    /// Resolve a pair through the VND pivot as of the given instant.
    async fn resolve_rate(&self, from: &str, to: &str, as_of: DateTime<Utc>) -> Result<Decimal> {
        if to == PIVOT_CURRENCY {
            return self.rate_to_pivot(from, as_of).await;
        }

        if from == PIVOT_CURRENCY {
            let to_pivot = self.rate_to_pivot(to, as_of).await?;
            if to_pivot.is_zero() {
                return Err(FxError::ConversionError(format!(
                    "Zero {}/{} rate cannot be inverted",
                    to, PIVOT_CURRENCY
                ))
                .into());
            }
            return Ok(Decimal::ONE / to_pivot);
        }

        let from_leg = self.rate_to_pivot(from, as_of).await?;
        let to_leg = self.rate_to_pivot(to, as_of).await?;
        if to_leg.is_zero() {
            return Err(FxError::ConversionError(format!(
                "Zero {}/{} rate cannot be used as a divisor",
                to, PIVOT_CURRENCY
            ))
            .into());
        }
        Ok(from_leg / to_leg)
    }
}

#[async_trait]
impl FxServiceTrait for FxService {
    async fn get_latest_exchange_rate(&self, from: &str, to: &str) -> Result<Decimal> {
        Self::validate_currency_code(from)?;
        Self::validate_currency_code(to)?;

        if from == to {
            return Ok(Decimal::ONE);
        }

        if let Some(rate) = self.cache.get(from, to) {
            return Ok(rate);
        }

        let rate = self.resolve_rate(from, to, self.clock.now()).await?;
        self.cache.insert(from, to, rate);
        Ok(rate)
    }

    async fn get_exchange_rate_as_of(
        &self,
        from: &str,
        to: &str,
        as_of: DateTime<Utc>,
    ) -> Result<Decimal> {
        Self::validate_currency_code(from)?;
        Self::validate_currency_code(to)?;

        if from == to {
            return Ok(Decimal::ONE);
        }

        // Historical lookups bypass the cache entirely
        self.resolve_rate(from, to, as_of).await
    }

    async fn convert_currency(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal> {
        if from == to {
            return Ok(amount);
        }
        let rate = self.get_latest_exchange_rate(from, to).await?;
        Ok(amount * rate)
    }

    async fn convert_currency_as_of(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
        as_of: DateTime<Utc>,
    ) -> Result<Decimal> {
        if from == to {
            return Ok(amount);
        }
        let rate = self.get_exchange_rate_as_of(from, to, as_of).await?;
        Ok(amount * rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::test_support::StaticRateProvider;
    use crate::utils::ManualClock;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn service_with(
        provider: Arc<StaticRateProvider>,
    ) -> (FxService, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        ));
        let cache = Arc::new(RateCache::new(clock.clone()));
        let service = FxService::new(provider, cache, clock.clone());
        (service, clock)
    }

    #[tokio::test]
    async fn identity_pair_never_calls_the_provider() {
        let provider = Arc::new(StaticRateProvider::new());
        let (service, _) = service_with(provider.clone());

        let rate = service.get_latest_exchange_rate("USD", "USD").await.unwrap();
        assert_eq!(rate, Decimal::ONE);
        assert_eq!(
            service.convert_currency(dec!(42.5), "EUR", "EUR").await.unwrap(),
            dec!(42.5)
        );
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn direct_leg_into_vnd() {
        let provider = Arc::new(StaticRateProvider::new().with_rate("USD", dec!(24_400)));
        let (service, _) = service_with(provider);

        let rate = service.get_latest_exchange_rate("USD", "VND").await.unwrap();
        assert_eq!(rate, dec!(24_400));
    }

    #[tokio::test]
    async fn inverted_leg_out_of_vnd() {
        let provider = Arc::new(StaticRateProvider::new().with_rate("USD", dec!(25_000)));
        let (service, _) = service_with(provider);

        let rate = service.get_latest_exchange_rate("VND", "USD").await.unwrap();
        assert_eq!(rate, Decimal::ONE / dec!(25_000));
    }

    #[tokio::test]
    async fn cross_pair_divides_the_two_legs() {
        let provider = Arc::new(
            StaticRateProvider::new()
                .with_rate("USD", dec!(25_000))
                .with_rate("EUR", dec!(27_500)),
        );
        let (service, _) = service_with(provider);

        let usd_eur = service.get_latest_exchange_rate("USD", "EUR").await.unwrap();
        assert_eq!(usd_eur, dec!(25_000) / dec!(27_500));

        // Pivot consistency: A/B == (A/VND) / (B/VND)
        let usd_vnd = service.get_latest_exchange_rate("USD", "VND").await.unwrap();
        let eur_vnd = service.get_latest_exchange_rate("EUR", "VND").await.unwrap();
        let tolerance = dec!(0.0000000001);
        assert!((usd_eur - usd_vnd / eur_vnd).abs() < tolerance);
    }

    #[tokio::test]
    async fn picks_the_sell_rate_of_the_most_recent_sample() {
        let provider = Arc::new(StaticRateProvider::new().with_samples(
            "USD",
            vec![(1_717_225_200, dec!(24_300), dec!(24_100)), (1_717_228_700, dec!(24_450), dec!(24_250))],
        ));
        let (service, _) = service_with(provider);

        let rate = service.get_latest_exchange_rate("USD", "VND").await.unwrap();
        assert_eq!(rate, dec!(24_450));
    }

    #[tokio::test]
    async fn missing_samples_surface_rate_unavailable() {
        let provider = Arc::new(StaticRateProvider::new());
        let (service, _) = service_with(provider);

        let err = service
            .get_latest_exchange_rate("USD", "VND")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Currency(FxError::RateUnavailable(_))));
    }

    #[tokio::test]
    async fn error_status_surfaces_rate_unavailable() {
        let provider = Arc::new(StaticRateProvider::new().with_error("USD", "upstream down"));
        let (service, _) = service_with(provider);

        let err = service
            .get_latest_exchange_rate("USD", "VND")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Currency(FxError::RateUnavailable(_))));
    }

    #[tokio::test]
    async fn latest_lookups_are_cached_until_ttl() {
        let provider = Arc::new(StaticRateProvider::new().with_rate("USD", dec!(24_400)));
        let (service, clock) = service_with(provider.clone());

        service.get_latest_exchange_rate("USD", "VND").await.unwrap();
        service.get_latest_exchange_rate("USD", "VND").await.unwrap();
        assert_eq!(provider.call_count(), 1);

        // Past the 5-minute TTL the entry is evicted and refetched
        clock.advance(Duration::seconds(301));
        service.get_latest_exchange_rate("USD", "VND").await.unwrap();
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn as_of_lookups_bypass_the_cache() {
        let provider = Arc::new(StaticRateProvider::new().with_rate("USD", dec!(24_400)));
        let (service, clock) = service_with(provider.clone());

        let as_of = clock.now() - Duration::days(30);
        service
            .get_exchange_rate_as_of("USD", "VND", as_of)
            .await
            .unwrap();
        service
            .get_exchange_rate_as_of("USD", "VND", as_of)
            .await
            .unwrap();
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn rejects_malformed_currency_codes() {
        let provider = Arc::new(StaticRateProvider::new());
        let (service, _) = service_with(provider);

        let err = service
            .get_latest_exchange_rate("US1", "VND")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Currency(FxError::InvalidCurrencyCode(_))
        ));
    }

    #[tokio::test]
    async fn convert_multiplies_without_rounding() {
        let provider = Arc::new(StaticRateProvider::new().with_rate("USD", dec!(24_400)));
        let (service, _) = service_with(provider);

        let converted = service
            .convert_currency(dec!(2.5), "USD", "VND")
            .await
            .unwrap();
        assert_eq!(converted, dec!(61_000));
    }
}
