//! # System Lifecycle
//!
//! Starts the resource actors, hands out their clients and shuts everything down.
//!
//! ## Startup
//!
//! [`StoreSystem::new`] creates the product, coupon and order actors and spawns each in
//! its own Tokio task. None of them depends on another (`Context = ()`); cross-resource
//! logic lives in [`CheckoutService`](crate::checkout::CheckoutService), which holds
//! clones of the clients.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of each channel
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - each task logs its final size and exits
//!
//! A [`CheckoutService`](crate::checkout::CheckoutService) built from
//! [`StoreSystem::checkout_service`] holds client clones too, so drop it before calling
//! [`StoreSystem::shutdown`] or the actors keep running.
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the subscriber once per process; see [`tracing`](self::tracing).

pub mod store_system;
pub mod tracing;

pub use self::store_system::*;
pub use self::tracing::*;
