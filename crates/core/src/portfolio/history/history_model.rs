use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// One sample of a base-100 normalized value series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub value: Decimal,
}
