use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status code of a provider response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

/// Additional metadata attached to a history response.
///
/// `price_scale` is the multiplier the provider applies to raw prices
/// (e.g. 1000 for exchanges quoting in thousands of VND). Absent means 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_scale: Option<Decimal>,
}

impl HistoryMetadata {
    /// The effective price multiplier, defaulting to 1 when absent.
    pub fn scale(&self) -> Decimal {
        self.price_scale.unwrap_or(Decimal::ONE)
    }
}
