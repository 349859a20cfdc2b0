//! [`ActorEntity`] implementation for [`Coupon`].

use super::actions::{CouponAction, CouponActionResult};
use super::error::CouponError;
use crate::framework::ActorEntity;
use crate::model::{Coupon, CouponCreate, CouponId, CouponUpdate, DiscountType};
use async_trait::async_trait;
use rust_decimal::Decimal;

#[async_trait]
impl ActorEntity for Coupon {
    type Id = CouponId;
    type Create = CouponCreate;
    type Update = CouponUpdate;
    type Action = CouponAction;
    type ActionResult = CouponActionResult;
    type Context = ();
    type Error = CouponError;

    fn from_create_params(id: CouponId, params: CouponCreate) -> Result<Self, Self::Error> {
        let code = params.code.trim().to_uppercase();
        if code.is_empty() {
            return Err(CouponError::EmptyCode);
        }
        let out_of_range = params.value <= Decimal::ZERO
            || (params.discount_type == DiscountType::Percentage
                && params.value > Decimal::ONE_HUNDRED);
        if out_of_range {
            return Err(CouponError::InvalidValue(params.value));
        }
        Ok(Self {
            id,
            code,
            discount_type: params.discount_type,
            value: params.value,
            min_spend: params.min_spend,
            usage_limit: params.usage_limit,
            usage_count: 0,
            expires_at: params.expires_at,
            active: true,
        })
    }

    async fn on_update(
        &mut self,
        update: CouponUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(active) = update.active {
            self.active = active;
        }
        if let Some(limit) = update.usage_limit {
            self.usage_limit = limit;
        }
        if let Some(expires_at) = update.expires_at {
            self.expires_at = expires_at;
        }
        if let Some(min_spend) = update.min_spend {
            self.min_spend = min_spend;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CouponAction,
        _ctx: &Self::Context,
    ) -> Result<CouponActionResult, Self::Error> {
        match action {
            CouponAction::Redeem => {
                if !self.active {
                    return Err(CouponError::Inactive(self.code.clone()));
                }
                if let Some(limit) = self.usage_limit.filter(|_| self.is_exhausted()) {
                    return Err(CouponError::LimitReached {
                        code: self.code.clone(),
                        limit,
                    });
                }
                self.usage_count += 1;
                Ok(CouponActionResult::Redeem(self.usage_count))
            }
            CouponAction::Release => {
                self.usage_count = self.usage_count.saturating_sub(1);
                Ok(CouponActionResult::Release(self.usage_count))
            }
        }
    }
}
