pub mod bond_errors;
pub mod bond_pricer;
pub mod bond_traits;

pub use bond_errors::BondError;
pub use bond_pricer::{annual_coupon_amount, implied_coupon_rate, present_value};
pub use bond_traits::CouponPaymentRepositoryTrait;
