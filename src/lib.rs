//! # Storefront Checkout
//!
//! The payment-and-checkout core of a small online store: a local cart, coupon
//! validation, a checkout that commits stock and coupon usage against an authoritative
//! store, and the Pix static payment code ("BR Code") for the order total.
//!
//! ## Architecture Notes
//!
//! ### 1. The store is a set of resource actors
//! Products, coupons and orders each live in a [`ResourceActor`](framework::ResourceActor)
//! running in its own Tokio task. An actor handles one request at a time, so a
//! check-then-write inside an action (`ReserveStock`, `Redeem`) is atomic without locks.
//! That is what keeps two customers from buying the same last unit.
//!
//! ### 2. Failures are values
//! Checkout returns `Result<CheckoutReceipt, CheckoutError>`. The error's `Display` is the
//! short message shown to the customer and [`CheckoutError::kind`](checkout::CheckoutError::kind)
//! is the tag to branch on. Internal detail is logged, never shown.
//!
//! ### 3. Services, not globals
//! [`StoreSystem`](lifecycle::StoreSystem), [`CheckoutService`](checkout::CheckoutService),
//! [`CouponValidator`](coupons::CouponValidator) and [`Cart`](cart::Cart) are built once
//! per session and passed by reference.
//!
//! ## Module Tour
//!
//! - [`framework`]: generic actor, client and [`MockClient`](framework::mock::MockClient).
//! - [`model`]: plain records (`Product`, `Coupon`, `Order`) and money helpers.
//! - [`product_actor`], [`coupon_actor`], [`order_actor`]: the entity implementations.
//! - [`clients`]: typed wrappers over the generic client.
//! - [`cart`], [`coupons`], [`checkout`]: the customer flow.
//! - [`pix`]: payment code generation.
//! - [`config`], [`lifecycle`]: settings, wiring, shutdown, tracing.
//!
//! ## Running the Demo
//!
//! ```bash
//! STOREFRONT__PIX_KEY=loja@example.com RUST_LOG=info cargo run
//! ```

pub mod cart;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod coupon_actor;
pub mod coupons;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod pix;
pub mod product_actor;
