//! [`ActorEntity`] implementation for [`Order`].
//!
//! There is deliberately no update path for items or amounts: [`OrderUpdate`] carries
//! contact fields only.

use super::error::OrderError;
use super::OrderAction;
use crate::framework::ActorEntity;
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, OrderUpdate};
use async_trait::async_trait;
use rust_decimal::Decimal;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = OrderStatus;
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.customer_name.trim().is_empty() {
            return Err(OrderError::ValidationError("customer name is empty".into()));
        }
        if params.items.is_empty() {
            return Err(OrderError::ValidationError("order has no items".into()));
        }
        if let Some(item) = params.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::ValidationError(format!(
                "item {} has zero quantity",
                item.product_id
            )));
        }
        if params.total < Decimal::ZERO {
            return Err(OrderError::ValidationError(format!(
                "negative total {}",
                params.total
            )));
        }
        Ok(Order::new(id, params))
    }

    async fn on_update(
        &mut self,
        update: OrderUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(phone) = update.customer_phone {
            self.customer_phone = Some(phone);
        }
        if let Some(email) = update.customer_email {
            self.customer_email = Some(email);
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &Self::Context,
    ) -> Result<OrderStatus, Self::Error> {
        match action {
            OrderAction::Transition(next) => {
                if !self.status.can_transition_to(next) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: next,
                    });
                }
                self.status = next;
                Ok(next)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderItem, PaymentMethod, ProductId};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn params() -> OrderCreate {
        OrderCreate {
            short_id: "A1B2C3D4".into(),
            customer_name: "Ana".into(),
            items: vec![OrderItem {
                product_id: ProductId(1),
                name: "Caneca".into(),
                unit_price: dec!(50),
                quantity: 2,
            }],
            subtotal: dec!(100),
            coupon_code: None,
            coupon_discount: dec!(0),
            payment_discount: dec!(5),
            total: dec!(95),
            payment_method: PaymentMethod::Pix,
            created_at: Utc::now(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_new_orders_are_pending() {
        let order = Order::from_create_params(OrderId(7), params()).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.order_number(), 7);
        assert_eq!(order.total, dec!(95));
    }

    #[test]
    fn test_rejects_empty_orders() {
        let mut p = params();
        p.items.clear();
        assert!(matches!(
            Order::from_create_params(OrderId(1), p),
            Err(OrderError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_transitions_follow_lifecycle() {
        let mut order = Order::from_create_params(OrderId(1), params()).unwrap();
        assert_eq!(
            order.handle_action(OrderAction::Transition(OrderStatus::Delivered), &()).await,
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered
            })
        );
        order.handle_action(OrderAction::Transition(OrderStatus::Paid), &()).await.unwrap();
        order.handle_action(OrderAction::Transition(OrderStatus::Delivered), &()).await.unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn test_update_touches_contact_fields_only() {
        let mut order = Order::from_create_params(OrderId(1), params()).unwrap();
        let before = order.clone();
        let update = OrderUpdate {
            customer_phone: Some("11987654321".into()),
            customer_email: None,
        };
        order.on_update(update, &()).await.unwrap();
        assert_eq!(order.customer_phone.as_deref(), Some("11987654321"));
        assert_eq!(order.items, before.items);
        assert_eq!(order.total, before.total);
    }
}
