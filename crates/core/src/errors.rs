//! Core error types for the valuation engine.
//!
//! Module-level error enums (`FxError`, `BondError`, provider-side
//! `MarketDataError`) are converted into the root [`Error`] so service
//! signatures can share one `Result` alias.

use thiserror::Error;

use crate::bonds::BondError;
use crate::fx::FxError;
use finfolio_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the valuation engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Currency operation failed: {0}")]
    Currency(#[from] FxError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Bond valuation failed: {0}")]
    Bond(#[from] BondError),

    #[error("Input validation failed: {0}")]
    Validation(String),

    #[error("Repository error: {0}")]
    Repository(String),
}
