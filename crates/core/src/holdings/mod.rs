pub mod holdings_model;
pub mod units;

pub use holdings_model::{
    AssetType, BondCouponPayment, BondPricingMode, CouponFrequency, GoldUnit, PortfolioEntry,
};
pub use units::{price_per_base_unit, quantity_in_base_units};
