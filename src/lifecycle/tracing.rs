//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); actor events carry an
//! `entity_type` field instead.
//!
//! ```bash
//! RUST_LOG=info cargo run     # actor lifecycle, checkout states, orders
//! RUST_LOG=debug cargo run    # plus request payloads and generated Pix payloads
//! ```
//!
//! A checkout with `RUST_LOG=info` reads roughly like:
//!
//! ```text
//! INFO checkout: Checkout state state=Validating store_id="default" customer="Ana"
//! INFO checkout: Checkout state state=Committing
//! INFO checkout: Action ok entity_type="Product" id=product_1
//! INFO checkout:create_order: Created entity_type="Order" id=order_1 size=1
//! INFO checkout: Checkout succeeded order="#1" total=95.00
//! ```
//!
//! Failures are logged at `warn` with the [`CheckoutErrorKind`](crate::checkout::CheckoutErrorKind);
//! backend detail that the customer never sees is logged at `error`.

/// Initializes the global subscriber. Call once, at process start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
