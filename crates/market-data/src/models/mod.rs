//! Data shapes shared with the external market data services.
//!
//! All timestamps are Unix seconds, matching the backend wire format.

mod candle;
mod gold;
mod metadata;
mod rate;

pub use candle::{Candle, StockHistoryResponse};
pub use gold::{GoldHistoryResponse, GoldTick};
pub use metadata::{HistoryMetadata, ResponseStatus};
pub use rate::{RateHistoryResponse, RateTick};
