use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Pivot currency for cross-rate derivation; the rate provider only
/// quotes "currency to VND" legs.
pub const PIVOT_CURRENCY: &str = "VND";

/// Time-to-live for cached "current" exchange rates
pub const EXCHANGE_RATE_CACHE_TTL_SECS: i64 = 300;

/// Lookback window for an exchange-rate sample ending at the target instant
pub const RATE_LOOKBACK_WINDOW_SECS: i64 = 3_600;

/// Lookback window for a price sample ending at the target instant
pub const PRICE_LOOKBACK_WINDOW_SECS: i64 = 86_400;

/// Resolution tag for daily candles
pub const DAILY_RESOLUTION: &str = "1D";

/// Gold price source used for historical series sampling
pub const SJC_GOLD_SOURCE: &str = "sjc";

/// Number of per-entry fetches run concurrently per batch
pub const VALUATION_FETCH_BATCH_SIZE: usize = 5;

/// Default sampling interval for historical performance series
pub const DEFAULT_SERIES_INTERVAL_DAYS: i64 = 1;

/// Index level a normalized series starts from
pub const BASE_INDEX: Decimal = dec!(100);

/// Days per year used by the bond discounting model
pub const DAYS_PER_YEAR: Decimal = dec!(365);

/// Seconds per year used to express time to maturity in years
pub const SECONDS_PER_YEAR: i64 = 365 * 86_400;
