use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::money::round_money;

/// Type-safe identifier for Coupons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CouponId(pub u32);

impl From<u32> for CouponId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CouponId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "coupon_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// `value` is a percentage of the subtotal.
    Percentage,
    /// `value` is an amount in the store currency.
    Fixed,
}

/// A discount code.
///
/// `usage_count <= usage_limit` whenever a limit is set: the coupon actor refuses a
/// redemption that would break it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: CouponId,
    pub code: String,
    pub discount_type: DiscountType,
    pub value: Decimal,
    pub min_spend: Option<Decimal>,
    pub usage_limit: Option<u32>,
    pub usage_count: u32,
    pub expires_at: Option<DateTime<Utc>>,
    pub active: bool,
}

impl Coupon {
    /// Codes compare case-insensitively, accented letters included.
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.trim().to_uppercase() == code.trim().to_uppercase()
    }

    pub fn is_exhausted(&self) -> bool {
        self.usage_limit
            .is_some_and(|limit| self.usage_count >= limit)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry < now)
    }

    /// Discount granted on `subtotal`, never more than the subtotal itself.
    pub fn discount_for(&self, subtotal: Decimal) -> Decimal {
        let raw = match self.discount_type {
            DiscountType::Percentage => subtotal * self.value / Decimal::ONE_HUNDRED,
            DiscountType::Fixed => self.value,
        };
        round_money(raw.clamp(Decimal::ZERO, subtotal.max(Decimal::ZERO)))
    }
}

/// Payload for creating a coupon. New coupons start active with zero redemptions.
#[derive(Debug, Clone)]
pub struct CouponCreate {
    pub code: String,
    pub discount_type: DiscountType,
    pub value: Decimal,
    pub min_spend: Option<Decimal>,
    pub usage_limit: Option<u32>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl CouponCreate {
    pub fn percentage(code: impl Into<String>, value: Decimal) -> Self {
        Self::new(code, DiscountType::Percentage, value)
    }

    pub fn fixed(code: impl Into<String>, value: Decimal) -> Self {
        Self::new(code, DiscountType::Fixed, value)
    }

    fn new(code: impl Into<String>, discount_type: DiscountType, value: Decimal) -> Self {
        Self {
            code: code.into(),
            discount_type,
            value,
            min_spend: None,
            usage_limit: None,
            expires_at: None,
        }
    }

    pub fn with_min_spend(mut self, amount: Decimal) -> Self {
        self.min_spend = Some(amount);
        self
    }

    pub fn with_usage_limit(mut self, limit: u32) -> Self {
        self.usage_limit = Some(limit);
        self
    }

    pub fn expiring_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }
}

/// Administrative edits. The usage counter moves only through redemptions.
#[derive(Debug, Clone, Default)]
pub struct CouponUpdate {
    pub active: Option<bool>,
    pub usage_limit: Option<Option<u32>>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
    pub min_spend: Option<Option<Decimal>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn coupon(discount_type: DiscountType, value: Decimal) -> Coupon {
        Coupon {
            id: CouponId(1),
            code: "BEMVINDO".into(),
            discount_type,
            value,
            min_spend: None,
            usage_limit: None,
            usage_count: 0,
            expires_at: None,
            active: true,
        }
    }

    #[test]
    fn test_percentage_discount() {
        let c = coupon(DiscountType::Percentage, dec!(10));
        assert_eq!(c.discount_for(dec!(100)), dec!(10));
        assert_eq!(c.discount_for(dec!(33.33)), dec!(3.33));
    }

    #[test]
    fn test_fixed_discount_is_capped_at_subtotal() {
        let c = coupon(DiscountType::Fixed, dec!(50));
        assert_eq!(c.discount_for(dec!(120)), dec!(50));
        assert_eq!(c.discount_for(dec!(30)), dec!(30));
    }

    #[test]
    fn test_code_match_ignores_case_and_padding() {
        let c = coupon(DiscountType::Fixed, dec!(1));
        assert!(c.matches_code("bemvindo"));
        assert!(c.matches_code(" BemVindo "));
        assert!(!c.matches_code("BEMVINDO10"));
    }

    #[test]
    fn test_code_match_folds_accented_letters() {
        let mut c = coupon(DiscountType::Fixed, dec!(1));
        c.code = "NATAÇÃO".into();
        assert!(c.matches_code("natação"));
        assert!(c.matches_code("Natação "));
        assert!(!c.matches_code("natacao"));
    }

    #[test]
    fn test_exhaustion_and_expiry() {
        let mut c = coupon(DiscountType::Fixed, dec!(1));
        assert!(!c.is_exhausted());
        c.usage_limit = Some(2);
        c.usage_count = 2;
        assert!(c.is_exhausted());

        let now = Utc::now();
        assert!(!c.is_expired(now));
        c.expires_at = Some(now - chrono::Duration::minutes(1));
        assert!(c.is_expired(now));
    }
}
