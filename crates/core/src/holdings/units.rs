//! Unit normalization for valuation math.
//!
//! Gold quantities are normalized to the tael (37.5 g) before any value
//! is computed; the matching purchase price is scaled inversely so
//! price-per-unit and quantity always agree on the unit. Stock and bond
//! quantities are already in shares/bond count and pass through.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::holdings_model::{AssetType, GoldUnit};

pub const GRAMS_PER_TAEL: Decimal = dec!(37.5);
pub const MACE_PER_TAEL: Decimal = dec!(10);
pub const GRAMS_PER_OUNCE: Decimal = dec!(31.1035);
pub const GRAMS_PER_KG: Decimal = dec!(1000);

/// Multiplier converting a quantity denominated in `unit` into taels.
fn tael_factor(unit: GoldUnit) -> Decimal {
    match unit {
        GoldUnit::Tael => Decimal::ONE,
        GoldUnit::Mace => Decimal::ONE / MACE_PER_TAEL,
        GoldUnit::Gram => Decimal::ONE / GRAMS_PER_TAEL,
        GoldUnit::Ounce => GRAMS_PER_OUNCE / GRAMS_PER_TAEL,
        GoldUnit::Kg => GRAMS_PER_KG / GRAMS_PER_TAEL,
    }
}

/// Convert a holding quantity into the canonical base unit.
///
/// Gold is converted to taels; other asset types pass through.
pub fn quantity_in_base_units(
    quantity: Decimal,
    asset_type: AssetType,
    unit: Option<GoldUnit>,
) -> Decimal {
    match asset_type {
        AssetType::Gold => quantity * tael_factor(unit.unwrap_or_default()),
        AssetType::Stock | AssetType::Bond => quantity,
    }
}

/// Convert a per-unit price into a per-base-unit price.
///
/// The inverse of [`quantity_in_base_units`]: a price entered per mace
/// becomes a per-tael price by multiplying by 10, and so on.
pub fn price_per_base_unit(
    price: Decimal,
    asset_type: AssetType,
    unit: Option<GoldUnit>,
) -> Decimal {
    match asset_type {
        AssetType::Gold => price / tael_factor(unit.unwrap_or_default()),
        AssetType::Stock | AssetType::Bond => price,
    }
}
