use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;

/// Provenance of a price: the provider that quoted it, or which bond
/// fallback produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceSource {
    /// Fetched from a market data provider, tagged with its identifier
    Provider(String),
    /// Bond present-value calculation
    Calculated,
    /// Manually maintained market price
    Manual,
    /// Face-value fallback
    FaceValue,
    /// Purchase-price fallback
    PurchasePrice,
}

impl PriceSource {
    pub fn as_str(&self) -> &str {
        match self {
            PriceSource::Provider(name) => name,
            PriceSource::Calculated => "calculated",
            PriceSource::Manual => "manual",
            PriceSource::FaceValue => "faceValue",
            PriceSource::PurchasePrice => "purchasePrice",
        }
    }
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PriceSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A priced entry in its native currency, before display conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub amount: Decimal,
    pub currency: String,
    pub source: PriceSource,
}
