//! Custom actions for the Product actor.
//!
//! Stock never moves through [`ProductUpdate`](crate::model::ProductUpdate); every change
//! is one of these actions, each applied inside the actor so the check and the write are
//! a single step.

/// Stock operations on a [`Product`](crate::model::Product).
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Reads the current stock level.
    CheckStock,
    /// Decrements stock by the given amount if at least that much is left.
    ///
    /// # Errors
    /// Fails with [`ProductError::InsufficientStock`](super::ProductError::InsufficientStock)
    /// and leaves stock untouched otherwise.
    ReserveStock(u32),
    /// Returns previously reserved units (checkout compensation).
    ReleaseStock(u32),
    /// Adds freshly received units.
    Restock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction.
/// Each carries the stock level after the action.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    CheckStock(u32),
    ReserveStock(u32),
    ReleaseStock(u32),
    Restock(u32),
}
