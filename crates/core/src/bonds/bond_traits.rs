use async_trait::async_trait;

use crate::errors::Result;
use crate::holdings::BondCouponPayment;

/// Read access to the coupon payments recorded against bond entries.
///
/// Payment lifecycle (create/edit/delete) is owned by the host
/// application; the valuation engine only lists them to fold realized
/// coupon income into gain/loss.
#[async_trait]
pub trait CouponPaymentRepositoryTrait: Send + Sync {
    async fn list_for_entry(&self, entry_id: &str) -> Result<Vec<BondCouponPayment>>;
}
