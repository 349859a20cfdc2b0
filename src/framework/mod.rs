//! Generic resource actors backing the storefront's authoritative store.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that stored resources implement
//! - [`ResourceActor`] - Generic actor that owns one collection of entities
//! - [`ResourceClient`] - Typed, cloneable handle used to talk to an actor
//! - [`FrameworkError`] - Transport and lookup failures
//!
//! # Testing
//!
//! See [`mock`] for a scripted client that needs no running actor.

pub mod core;
pub mod mock;

pub use self::core::*;
