//! # Product Actor
//!
//! Owns the catalog and the authoritative stock counts.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`actions`] - [`ProductAction`] / [`ProductActionResult`] for stock movements
//! - [`new()`] - Factory returning the actor and its client
//!
//! ## Stock guard
//!
//! `ReserveStock(n)` is the storefront's conditional decrement: it succeeds only when at
//! least `n` units are left, and it runs inside the actor task, so two checkouts racing
//! for the last unit cannot both win.
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use storefront_checkout::model::ProductCreate;
//! use storefront_checkout::product_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_actor::new();
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create_product(ProductCreate::new("Caneca", dec!(39.90), 3)).await?;
//!     assert_eq!(client.reserve_stock(id, 2).await?, 1);
//!     assert!(client.reserve_stock(id, 2).await.is_err());
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::framework::ResourceActor;
use crate::model::Product;

/// Creates a new Product actor and its client.
pub fn new() -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, ProductClient::new(generic_client))
}
