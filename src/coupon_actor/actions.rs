//! Custom actions for the Coupon actor.

/// Redemption bookkeeping on a [`Coupon`](crate::model::Coupon).
#[derive(Debug, Clone, PartialEq)]
pub enum CouponAction {
    /// Counts one use, refusing if the coupon is inactive or its limit is already reached.
    Redeem,
    /// Gives back one use (checkout compensation).
    Release,
}

/// Results from CouponActions. Each carries the usage count after the action.
#[derive(Debug, Clone, PartialEq)]
pub enum CouponActionResult {
    Redeem(u32),
    Release(u32),
}
