//! Represents a catalog product and its authoritative stock count.
//!
//! # Actor Framework
//! This struct implements [`ActorEntity`](crate::framework::ActorEntity) in
//! [`product_actor::entity`](crate::product_actor::entity), so the product actor owns the
//! one true stock value. Carts hold a denormalized copy taken at add time
//! ([`CartItem`](crate::cart::CartItem)); checkout always re-reads this record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub promotional_price: Option<Decimal>,
    pub stock: u32,
    pub category: String,
}

impl Product {
    /// Creates a new Product with no promotional price.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (assigned by the product actor)
    /// * `name` - Display name
    /// * `price` - Regular unit price
    /// * `stock` - Units available
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            promotional_price: None,
            stock,
            category: String::new(),
        }
    }

    /// The price a customer pays per unit: the promotional price when one is set.
    pub fn unit_price(&self) -> Decimal {
        self.promotional_price.unwrap_or(self.price)
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub price: Decimal,
    pub promotional_price: Option<Decimal>,
    pub stock: u32,
    pub category: String,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            name: name.into(),
            price,
            promotional_price: None,
            stock,
            category: String::new(),
        }
    }

    pub fn with_promotional_price(mut self, price: Decimal) -> Self {
        self.promotional_price = Some(price);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Catalog edits. Stock is changed only through
/// [`ProductAction`](crate::product_actor::ProductAction)s, never overwritten here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    /// `Some(None)` clears the promotion.
    pub promotional_price: Option<Option<Decimal>>,
    pub category: Option<String>,
}
