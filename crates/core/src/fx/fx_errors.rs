use thiserror::Error;

#[derive(Error, Debug)]
pub enum FxError {
    /// The rate provider returned no samples or an error status for the
    /// requested pair and window.
    #[error("Exchange rate unavailable: {0}")]
    RateUnavailable(String),

    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    #[error("Currency conversion error: {0}")]
    ConversionError(String),
}
