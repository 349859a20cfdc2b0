//! # Coupon validation
//!
//! Decides whether a code may be applied to a cart. The first failing check wins:
//!
//! 1. no active coupon has this code ([`CheckoutError::CouponInvalid`])
//! 2. the subtotal is below the minimum spend ([`CheckoutError::CouponMinimumSpend`])
//! 3. the usage limit is used up ([`CheckoutError::CouponLimitReached`])
//! 4. the coupon is past its expiry ([`CheckoutError::CouponExpired`])
//!
//! Applying a coupon only holds it on the cart. Its usage count moves at checkout.

use crate::cart::Cart;
use crate::checkout::CheckoutError;
use crate::clients::CouponClient;
use crate::model::Coupon;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

/// Source of "now". Injected so expiry can be tested.
pub type Clock = fn() -> DateTime<Utc>;

/// Checks 2 to 4 against an already-found active coupon.
pub fn check_coupon(
    coupon: &Coupon,
    subtotal: Decimal,
    now: DateTime<Utc>,
) -> Result<(), CheckoutError> {
    if let Some(min_spend) = coupon.min_spend.filter(|min| subtotal < *min) {
        return Err(CheckoutError::CouponMinimumSpend { min_spend });
    }
    if coupon.is_exhausted() {
        return Err(CheckoutError::CouponLimitReached);
    }
    if coupon.is_expired(now) {
        return Err(CheckoutError::CouponExpired);
    }
    Ok(())
}

pub struct CouponValidator {
    coupons: CouponClient,
    clock: Clock,
}

impl CouponValidator {
    pub fn new(coupons: CouponClient) -> Self {
        Self {
            coupons,
            clock: Utc::now,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Looks `code` up among the active coupons (ignoring case), validates it against the
    /// cart and holds it there. Returns the discount it grants now.
    #[instrument(skip(self, cart), fields(subtotal = %cart.subtotal()))]
    pub async fn apply_coupon(&self, cart: &mut Cart, code: &str) -> Result<Decimal, CheckoutError> {
        let coupons = self.coupons.list_coupons().await.map_err(|e| {
            warn!(error = %e, "Could not list coupons");
            CheckoutError::Backend
        })?;
        let coupon = coupons
            .into_iter()
            .find(|c| c.active && c.matches_code(code))
            .ok_or(CheckoutError::CouponInvalid)?;

        check_coupon(&coupon, cart.subtotal(), (self.clock)())?;

        let discount = coupon.discount_for(cart.subtotal());
        info!(code = %coupon.code, %discount, "Coupon applied");
        cart.set_coupon(coupon);
        Ok(discount)
    }
}
