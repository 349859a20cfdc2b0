//! # Coupon Actor
//!
//! Owns the coupon set and the shared usage counters.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Coupon`]
//! - [`error`] - [`CouponError`]
//! - [`actions`] - [`CouponAction`] / [`CouponActionResult`]
//! - [`new()`] - Factory returning the actor and its client
//!
//! Validation against a cart (minimum spend, expiry) lives in
//! [`coupons`](crate::coupons); this actor only guards the counter, so `Redeem` can
//! never push `usage_count` past `usage_limit`.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CouponClient;
use crate::framework::ResourceActor;
use crate::model::Coupon;

/// Creates a new Coupon actor and its client.
pub fn new() -> (ResourceActor<Coupon>, CouponClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, CouponClient::new(generic_client))
}
