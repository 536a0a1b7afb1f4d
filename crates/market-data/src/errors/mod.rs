//! Error types for the market data interface layer.

use thiserror::Error;

/// Errors surfaced by market data providers and the accessors built on
/// top of their responses.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider answered, but carried no usable price sample for the
    /// requested window.
    #[error("No price data for {symbol} in the requested window")]
    PriceUnavailable {
        /// The symbol or price-series identifier that came up empty
        symbol: String,
    },

    /// A provider-specific failure (transport error, error status,
    /// malformed payload). The message is human-readable.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// Identifier of the provider that failed
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The asset type cannot be priced by any configured provider.
    #[error("Unsupported asset type: {0}")]
    UnsupportedAssetType(String),
}
