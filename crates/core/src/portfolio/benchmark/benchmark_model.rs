use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::history::HistoryPoint;

/// The instrument a portfolio is compared against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkInstrument {
    pub symbol: String,
    pub source: String,
    pub name: String,
}

/// Side-by-side base-100 series with their realized returns.
///
/// Both series start at 100; each return is the series' last value
/// minus 100, and `outperformance` is the portfolio return minus the
/// benchmark return.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioBenchmarkComparison {
    pub portfolio_series: Vec<HistoryPoint>,
    pub benchmark_series: Vec<HistoryPoint>,
    pub portfolio_return: Decimal,
    pub benchmark_return: Decimal,
    pub outperformance: Decimal,
}
