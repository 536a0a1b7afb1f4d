use rust_decimal::Decimal;
use serde::Serialize;

use crate::holdings::PortfolioEntry;
use crate::portfolio::pricing::PriceSource;

/// One entry's computed valuation in the chosen display currency.
///
/// All monetary figures are per-base-unit and display-currency
/// normalized. A failed entry carries `error: Some(..)` with zeroed
/// figures and is excluded from portfolio totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPerformance {
    pub entry: PortfolioEntry,
    pub current_price: Decimal,
    pub purchase_price: Decimal,
    pub current_value: Decimal,
    pub total_cost: Decimal,
    pub gain_loss: Decimal,
    pub gain_loss_percentage: Decimal,
    /// Realized coupon income, zero for non-bond entries
    pub coupon_income: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_source: Option<PriceSource>,
    /// Display-currency rate applied to the current price, 1 when no
    /// conversion occurred
    pub exchange_rate: Decimal,
    /// Failure marker; the entry could not be valued this round
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EntryPerformance {
    /// A zeroed placeholder recording why the entry could not be valued.
    pub fn failed(entry: PortfolioEntry, message: String) -> Self {
        Self {
            entry,
            current_price: Decimal::ZERO,
            purchase_price: Decimal::ZERO,
            current_value: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            gain_loss: Decimal::ZERO,
            gain_loss_percentage: Decimal::ZERO,
            coupon_income: Decimal::ZERO,
            price_source: None,
            exchange_rate: Decimal::ONE,
            error: Some(message),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// The portfolio-level sum over all entry performances.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPerformance {
    pub total_value: Decimal,
    pub total_cost: Decimal,
    pub total_gain_loss: Decimal,
    pub total_gain_loss_percentage: Decimal,
    pub currency: String,
    /// Ordered to mirror the input entries
    pub entries_performance: Vec<EntryPerformance>,
}

impl PortfolioPerformance {
    /// Number of entries that could not be valued this round.
    pub fn failed_entry_count(&self) -> usize {
        self.entries_performance
            .iter()
            .filter(|p| p.is_failed())
            .count()
    }
}
