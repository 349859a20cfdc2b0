//! # Checkout
//!
//! Turns a cart into a stored order.
//!
//! ## Flow
//!
//! 1. **Validating**: re-read the catalog from the product actor (the cart's snapshot may
//!    be stale) and reject the whole attempt on the first missing product, short stock
//!    or coupon that no longer holds.
//! 2. Price the cart: coupon discount, then the Pix discount on what is left. Pix orders
//!    get their payment code here, so a key that cannot be encoded fails the attempt
//!    before anything is written.
//! 3. **Committing**: reserve stock line by line with the actor's conditional decrement,
//!    redeem the coupon, store the order. Any failure here undoes what was already
//!    reserved or redeemed before reporting, so a failed attempt leaves stock and coupon
//!    counters as they were.
//! 4. Build the merchant summary and its deep link.
//!
//! Every attempt moves through [`CheckoutState`]s, published on a `watch` channel.

pub mod error;
pub mod summary;

pub use error::*;

use crate::cart::{Cart, CartTotals};
use crate::clients::{ActorClient, CouponClient, OrderClient, ProductClient};
use crate::config::StoreSettings;
use crate::coupon_actor::CouponError;
use crate::coupons::{check_coupon, Clock};
use crate::model::{CouponId, Order, OrderCreate, PaymentMethod, ProductId};
use crate::pix::PixPayloadGenerator;
use crate::product_actor::ProductError;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use summary::{annotate_notes, display_order_id, messaging_link, order_summary};
use tokio::sync::watch;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    Validating,
    Committing,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub notes: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutRequest {
    pub fn new(customer_name: impl Into<String>, payment_method: PaymentMethod) -> Self {
        Self {
            customer_name: customer_name.into(),
            notes: String::new(),
            payment_method,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// What a successful checkout hands back to the customer.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    /// `#<order number>`.
    pub display_id: String,
    pub order: Order,
    pub totals: CartTotals,
    pub summary: String,
    pub deep_link: String,
    /// Copy-and-paste Pix code for the order total, for Pix orders with a positive total.
    pub pix_payload: Option<String>,
}

/// First 8 hex digits of a v4 UUID, upper-cased.
fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

/// Stock and coupon changes made so far by one attempt, undone if it fails.
#[derive(Default)]
struct Reservation {
    stock: Vec<(ProductId, u32)>,
    coupon: Option<CouponId>,
}

pub struct CheckoutService {
    products: ProductClient,
    coupons: CouponClient,
    orders: OrderClient,
    pix: PixPayloadGenerator,
    pix_discount_percent: Decimal,
    whatsapp_phone: String,
    store_id: String,
    clock: Clock,
    state: watch::Sender<CheckoutState>,
}

impl CheckoutService {
    pub fn new(
        products: ProductClient,
        coupons: CouponClient,
        orders: OrderClient,
        settings: &StoreSettings,
    ) -> Self {
        let (state, _) = watch::channel(CheckoutState::Idle);
        Self {
            products,
            coupons,
            orders,
            pix: PixPayloadGenerator::new(
                &settings.pix_key,
                &settings.merchant_name,
                &settings.merchant_city,
            ),
            pix_discount_percent: settings.pix_discount_percent,
            whatsapp_phone: settings.whatsapp_phone.clone(),
            store_id: settings.store_id.clone(),
            clock: Utc::now,
            state,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Follows the state of the most recent attempt.
    pub fn subscribe(&self) -> watch::Receiver<CheckoutState> {
        self.state.subscribe()
    }

    pub fn pix_discount_percent(&self) -> Decimal {
        self.pix_discount_percent
    }

    fn set_state(&self, state: CheckoutState) {
        info!(?state, "Checkout state");
        self.state.send_replace(state);
    }

    /// Places an order for everything in `cart`. The cart is cleared on success and left
    /// untouched on failure.
    #[instrument(skip(self, cart, request), fields(store_id = %self.store_id, customer = %request.customer_name))]
    pub async fn checkout(
        &self,
        cart: &mut Cart,
        request: CheckoutRequest,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        self.set_state(CheckoutState::Validating);
        let result = self.run(cart, &request).await;
        match &result {
            Ok(receipt) => {
                cart.clear();
                info!(order = %receipt.display_id, total = %receipt.order.total, "Checkout succeeded");
                self.set_state(CheckoutState::Succeeded);
            }
            Err(e) => {
                warn!(kind = ?e.kind(), message = %e, "Checkout failed");
                self.set_state(CheckoutState::Failed);
            }
        }
        result
    }

    async fn run(
        &self,
        cart: &Cart,
        request: &CheckoutRequest,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let customer_name = request.customer_name.trim();
        if customer_name.is_empty() {
            return Err(CheckoutError::MissingCustomer);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.validate_stock(cart).await?;
        self.validate_coupon(cart).await?;
        let totals = cart.totals(request.payment_method, self.pix_discount_percent);
        let pix_payload = self.pix_payload(request.payment_method, totals.total)?;

        self.set_state(CheckoutState::Committing);
        let mut reservation = Reservation::default();
        if let Err(e) = self.commit(cart, &mut reservation).await {
            self.compensate(&reservation).await;
            return Err(e);
        }

        let params = OrderCreate {
            short_id: short_id(),
            customer_name: customer_name.to_string(),
            items: cart.order_items(),
            subtotal: totals.subtotal,
            coupon_code: cart.applied_coupon().map(|c| c.code.clone()),
            coupon_discount: totals.coupon_discount,
            payment_discount: totals.payment_discount,
            total: totals.total,
            payment_method: request.payment_method,
            created_at: (self.clock)(),
            notes: annotate_notes(&request.notes, request.payment_method),
        };
        let id = match self.orders.create_order(params.clone()).await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, short_id = %params.short_id, "Order could not be stored");
                self.compensate(&reservation).await;
                return Err(CheckoutError::Backend);
            }
        };
        let order = Order::new(id, params);

        let display_id = display_order_id(Some(order.order_number()), &order.short_id);
        let summary = order_summary(&order, &display_id, &request.notes);
        let deep_link = messaging_link(&self.whatsapp_phone, &summary);

        Ok(CheckoutReceipt {
            display_id,
            order,
            totals,
            summary,
            deep_link,
            pix_payload,
        })
    }

    /// Live stock must cover every line.
    async fn validate_stock(&self, cart: &Cart) -> Result<(), CheckoutError> {
        let catalog: HashMap<ProductId, _> = self
            .products
            .list_products()
            .await
            .map_err(|e| {
                error!(error = %e, "Could not read catalog");
                CheckoutError::Backend
            })?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        for line in cart.items() {
            let Some(product) = catalog.get(&line.product_id) else {
                return Err(CheckoutError::ItemNotFound {
                    name: line.name.clone(),
                });
            };
            if product.stock < line.quantity {
                return Err(CheckoutError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.stock,
                });
            }
        }
        Ok(())
    }

    /// The held coupon must still exist, be active and pass the same checks as when it
    /// was applied.
    async fn validate_coupon(&self, cart: &Cart) -> Result<(), CheckoutError> {
        let Some(held) = cart.applied_coupon() else {
            return Ok(());
        };
        let live = self.coupons.get(held.id).await.map_err(|e| {
            error!(error = %e, "Could not read coupon");
            CheckoutError::Backend
        })?;
        match live {
            Some(coupon) if coupon.active => {
                check_coupon(&coupon, cart.subtotal(), (self.clock)())
            }
            _ => Err(CheckoutError::CouponInvalid),
        }
    }

    /// Reserves stock line by line, then redeems the coupon. Stops at the first failure;
    /// `reservation` records what succeeded.
    async fn commit(&self, cart: &Cart, reservation: &mut Reservation) -> Result<(), CheckoutError> {
        for line in cart.items() {
            match self.products.reserve_stock(line.product_id, line.quantity).await {
                Ok(_) => reservation.stock.push((line.product_id, line.quantity)),
                Err(ProductError::InsufficientStock { available, .. }) => {
                    return Err(CheckoutError::InsufficientStock {
                        name: line.name.clone(),
                        available,
                    });
                }
                Err(ProductError::NotFound(_)) => {
                    return Err(CheckoutError::ItemNotFound {
                        name: line.name.clone(),
                    });
                }
                Err(e) => {
                    error!(error = %e, product = %line.product_id, "Stock reservation failed");
                    return Err(CheckoutError::Backend);
                }
            }
        }

        if let Some(coupon) = cart.applied_coupon() {
            match self.coupons.redeem(coupon.id).await {
                Ok(_) => reservation.coupon = Some(coupon.id),
                Err(CouponError::LimitReached { .. }) => {
                    return Err(CheckoutError::CouponLimitReached);
                }
                Err(CouponError::Inactive(_)) | Err(CouponError::NotFound(_)) => {
                    return Err(CheckoutError::CouponInvalid);
                }
                Err(e) => {
                    error!(error = %e, coupon = %coupon.code, "Coupon redemption failed");
                    return Err(CheckoutError::Backend);
                }
            }
        }
        Ok(())
    }

    /// Best-effort undo. Failures are logged; there is nothing left to report them to.
    async fn compensate(&self, reservation: &Reservation) {
        for &(product_id, quantity) in reservation.stock.iter().rev() {
            if let Err(e) = self.products.release_stock(product_id, quantity).await {
                error!(error = %e, product = %product_id, quantity, "Stock release failed");
            }
        }
        if let Some(coupon_id) = reservation.coupon {
            if let Err(e) = self.coupons.release(coupon_id).await {
                error!(error = %e, coupon = %coupon_id, "Coupon release failed");
            }
        }
        if !reservation.stock.is_empty() || reservation.coupon.is_some() {
            warn!(
                lines = reservation.stock.len(),
                coupon = reservation.coupon.is_some(),
                "Checkout rolled back"
            );
        }
    }

    /// Built before anything is committed: a Pix order nobody can pay must not be stored.
    fn pix_payload(
        &self,
        method: PaymentMethod,
        total: Decimal,
    ) -> Result<Option<String>, CheckoutError> {
        if method != PaymentMethod::Pix || total <= Decimal::ZERO {
            return Ok(None);
        }
        self.pix.payload(total).map(Some).map_err(|e| {
            error!(error = %e, %total, "Pix payload could not be built");
            CheckoutError::Backend
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_shape() {
        let id = short_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        assert_ne!(short_id(), id);
    }
}
