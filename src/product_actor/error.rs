//! Error types for the Product actor.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// Quantities must be positive.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Prices must be positive, and a promotional price must undercut the regular one.
    #[error("Invalid price: {0}")]
    InvalidPrice(Decimal),

    /// Product names must not be blank.
    #[error("Product name must not be empty")]
    EmptyName,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::ActorCommunicationError(msg)
    }
}
