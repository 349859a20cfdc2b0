//! Error types for the Coupon actor.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during coupon operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CouponError {
    #[error("Coupon not found: {0}")]
    NotFound(String),

    /// Another coupon already uses this code (compared case-insensitively).
    #[error("Coupon code already exists: {0}")]
    DuplicateCode(String),

    #[error("Coupon code must not be empty")]
    EmptyCode,

    /// Values must be positive; percentages may not exceed 100.
    #[error("Invalid coupon value: {0}")]
    InvalidValue(Decimal),

    #[error("Coupon is inactive: {0}")]
    Inactive(String),

    #[error("Coupon usage limit reached: {code} ({limit} uses)")]
    LimitReached { code: String, limit: u32 },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CouponError {
    fn from(msg: String) -> Self {
        CouponError::ActorCommunicationError(msg)
    }
}
