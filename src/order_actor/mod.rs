//! # Order Actor
//!
//! Persists orders. The actor's ID sequence doubles as the order number customers see.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`OrderAction`] - status transitions
//! - [`new()`] - Factory returning the actor and its client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::{Order, OrderStatus};

/// Custom actions for Order entities.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Moves the order along its lifecycle; see [`OrderStatus::can_transition_to`].
    Transition(OrderStatus),
}

/// Creates a new Order actor and its client.
pub fn new() -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, OrderClient::new(generic_client))
}
