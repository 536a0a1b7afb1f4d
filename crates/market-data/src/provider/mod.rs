//! Provider trait definitions.

mod traits;

pub use traits::{ExchangeRateProvider, GoldPriceProvider, StockHistoryProvider};
