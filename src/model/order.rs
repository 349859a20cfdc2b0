//! Represents a placed order.
//!
//! # Actor Framework
//! This struct implements [`ActorEntity`](crate::framework::ActorEntity) in
//! [`order_actor::entity`](crate::order_actor::entity). The item snapshot and the money
//! fields are fixed at creation; only [`OrderStatus`] (through
//! [`OrderAction::Transition`](crate::order_actor::OrderAction::Transition)) and the
//! customer contact fields (through [`OrderUpdate`]) change afterwards.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::product::ProductId;

/// Type-safe identifier for Orders. The inner value is the store-assigned sequence
/// number shown to customers as `#N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Paid,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// `pending → paid → delivered`; pending or paid orders may be cancelled.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Paid) | (Paid, Delivered) | (Pending, Cancelled) | (Paid, Cancelled)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Pix,
    CreditCard,
    Cash,
}

impl PaymentMethod {
    /// Customer-facing label.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Pix => "PIX",
            PaymentMethod::CreditCard => "Cartão de crédito",
            PaymentMethod::Cash => "Dinheiro",
        }
    }
}

/// One line of an order, priced at the moment of purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Client-generated reference, available before the store assigns a number.
    pub short_id: String,
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub coupon_code: Option<String>,
    pub coupon_discount: Decimal,
    pub payment_discount: Decimal,
    pub total: Decimal,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub notes: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
}

impl Order {
    /// Builds a pending order from its creation payload.
    pub fn new(id: OrderId, params: OrderCreate) -> Self {
        Self {
            id,
            short_id: params.short_id,
            customer_name: params.customer_name,
            items: params.items,
            subtotal: params.subtotal,
            coupon_code: params.coupon_code,
            coupon_discount: params.coupon_discount,
            payment_discount: params.payment_discount,
            total: params.total,
            status: OrderStatus::Pending,
            payment_method: params.payment_method,
            created_at: params.created_at,
            notes: params.notes,
            customer_phone: None,
            customer_email: None,
        }
    }

    /// The store-assigned sequence number.
    pub fn order_number(&self) -> u32 {
        self.id.0
    }
}

/// Payload for creating an order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub short_id: String,
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub coupon_code: Option<String>,
    pub coupon_discount: Decimal,
    pub payment_discount: Decimal,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub notes: String,
}

/// Contact details that may arrive after the order was placed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
}
