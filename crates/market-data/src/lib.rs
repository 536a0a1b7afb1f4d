//! Finfolio market data interface layer.
//!
//! This crate defines the wire shapes returned by the external price
//! services (stock candles, gold ticks, currency-to-VND rate ticks) and
//! the provider traits the valuation engine consumes. Concrete providers
//! (HTTP backends, IPC bridges, test fixtures) live in the host
//! application and are injected behind the traits in [`provider`].

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{
    Candle, GoldHistoryResponse, GoldTick, HistoryMetadata, RateHistoryResponse, RateTick,
    ResponseStatus, StockHistoryResponse,
};
pub use provider::{ExchangeRateProvider, GoldPriceProvider, StockHistoryProvider};
