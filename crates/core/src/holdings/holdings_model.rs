use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Classification of a holding. Determines which pricing path applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Stock,
    Gold,
    Bond,
}

/// Gold weight units accepted on entries. 1 tael = 10 mace = 37.5 g.
///
/// The tael is the computation base unit; entries without an explicit
/// unit are treated as tael-denominated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoldUnit {
    Gram,
    Mace,
    #[default]
    Tael,
    Ounce,
    Kg,
}

/// Coupon payment cadence for bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponFrequency {
    Annual,
    Semiannual,
    Quarterly,
    Monthly,
}

impl CouponFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CouponFrequency::Annual => 1,
            CouponFrequency::Semiannual => 2,
            CouponFrequency::Quarterly => 4,
            CouponFrequency::Monthly => 12,
        }
    }
}

/// How a bond entry's current value is determined.
///
/// Either the full present-value inputs are present ("calculated"), or a
/// manually maintained market price is used, or the entry falls back to
/// face value and finally purchase price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondPricingMode {
    Calculated,
    Manual,
    FaceValue,
    PurchasePrice,
}

/// A single holding in a portfolio.
///
/// `quantity` and `purchase_price` are denominated per `asset_type` (and
/// `unit` for gold): shares for stocks, weight units for gold, bond count
/// for bonds. `purchase_price` is in `currency` per that same unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEntry {
    /// Server-assigned opaque identifier
    pub id: String,
    pub portfolio_id: String,
    pub asset_type: AssetType,
    /// Ticker, gold-price-series identifier, or bond ISIN
    pub symbol: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    pub currency: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub purchase_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_fees: Option<Decimal>,
    /// Pricing-provider identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    // Gold-specific
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<GoldUnit>,
    /// Identifies the gold price series (e.g. an SJC product id)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gold_type: Option<String>,

    // Bond-specific
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_value: Option<Decimal>,
    /// Annual coupon rate in percent, simple
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_rate: Option<Decimal>,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub maturity_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_frequency: Option<CouponFrequency>,
    /// Yield to maturity in percent; presence selects calculated pricing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ytm: Option<Decimal>,
    /// Manual price override, used only when `ytm` is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_market_price: Option<Decimal>,
}

impl PortfolioEntry {
    /// The gold unit this entry's quantity and price are denominated in.
    pub fn gold_unit(&self) -> GoldUnit {
        self.unit.unwrap_or_default()
    }

    /// The pricing mode for a bond entry, `None` for other asset types.
    pub fn bond_pricing_mode(&self) -> Option<BondPricingMode> {
        if self.asset_type != AssetType::Bond {
            return None;
        }
        let calculable = self.face_value.is_some()
            && self.coupon_rate.is_some()
            && self.ytm.is_some()
            && self.maturity_date.is_some()
            && self.coupon_frequency.is_some();

        let mode = if calculable {
            BondPricingMode::Calculated
        } else if self.current_market_price.is_some() {
            BondPricingMode::Manual
        } else if self.face_value.is_some() {
            BondPricingMode::FaceValue
        } else {
            BondPricingMode::PurchasePrice
        };
        Some(mode)
    }
}

/// A realized cash distribution tied to one bond entry.
///
/// Payments are created and maintained externally; the aggregator only
/// reads them. They are summed without deduplication by date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondCouponPayment {
    pub id: String,
    pub entry_id: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub payment_date: DateTime<Utc>,
    pub amount: Decimal,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
