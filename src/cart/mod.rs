//! # Cart
//!
//! The customer's local cart. Mutations are optimistic: adding a product never checks
//! stock, checkout does that against the product actor. Every mutation writes the full
//! line list to a [`CartStorage`]; [`Cart::load`] rebuilds it and treats anything
//! unreadable as an empty cart.
//!
//! The applied coupon is session state only and is not persisted.

pub mod storage;

pub use storage::{CartStorage, FileCartStorage, MemoryCartStorage};

use crate::model::{round_money, Coupon, OrderItem, PaymentMethod, Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// A product snapshot taken when it was added, plus the quantity wanted.
///
/// `quantity >= 1`; a line whose quantity would drop to zero is removed instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub promotional_price: Option<Decimal>,
    pub category: String,
    pub quantity: u32,
}

impl CartItem {
    fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            promotional_price: product.promotional_price,
            category: product.category.clone(),
            quantity,
        }
    }

    pub fn unit_price(&self) -> Decimal {
        self.promotional_price.unwrap_or(self.price)
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }
}

/// Price breakdown for a cart under a given payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub coupon_discount: Decimal,
    pub payment_discount: Decimal,
    /// `subtotal - coupon_discount - payment_discount`, never below zero.
    pub total: Decimal,
}

/// Folds stored lines into one per product, first snapshot wins. Empty lines are dropped.
fn merge_lines(stored: Vec<CartItem>) -> Vec<CartItem> {
    let mut items: Vec<CartItem> = Vec::with_capacity(stored.len());
    for line in stored.into_iter().filter(|i| i.quantity > 0) {
        match items.iter_mut().find(|i| i.product_id == line.product_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity)
            }
            None => items.push(line),
        }
    }
    items
}

pub struct Cart {
    items: Vec<CartItem>,
    applied_coupon: Option<Coupon>,
    storage: Arc<dyn CartStorage>,
}

impl Cart {
    /// An empty cart backed by `storage`. Nothing is read from it.
    pub fn new(storage: Arc<dyn CartStorage>) -> Self {
        Self {
            items: Vec::new(),
            applied_coupon: None,
            storage,
        }
    }

    /// Rehydrates the cart from `storage`. Missing, unreadable or malformed data gives
    /// an empty cart.
    pub fn load(storage: Arc<dyn CartStorage>) -> Self {
        let items = match storage.load() {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartItem>>(&raw) {
                Ok(items) => merge_lines(items),
                Err(e) => {
                    warn!(error = %e, "Stored cart is malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Could not read stored cart, starting empty");
                Vec::new()
            }
        };
        debug!(lines = items.len(), "Cart loaded");
        Self {
            items,
            applied_coupon: None,
            storage,
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Adds `quantity` units, merging with an existing line for the same product.
    /// The stored snapshot keeps the price from the first add.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.items.push(CartItem::from_product(product, quantity)),
        }
        self.persist();
    }

    /// Sets a line's quantity; zero or less removes the line.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            line.quantity = quantity;
            self.persist();
        }
    }

    pub fn remove_item(&mut self, product_id: ProductId) {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        if self.items.len() != before {
            self.persist();
        }
    }

    /// Empties the cart and drops the coupon.
    pub fn clear(&mut self) {
        self.items.clear();
        self.applied_coupon = None;
        self.persist();
    }

    /// Sum of `(promotional price or price) * quantity` over all lines.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn subtotal(&self) -> Decimal {
        self.total()
    }

    pub fn applied_coupon(&self) -> Option<&Coupon> {
        self.applied_coupon.as_ref()
    }

    /// Holds a coupon that passed validation. See
    /// [`CouponValidator::apply_coupon`](crate::coupons::CouponValidator::apply_coupon).
    pub(crate) fn set_coupon(&mut self, coupon: Coupon) {
        self.applied_coupon = Some(coupon);
    }

    pub fn remove_coupon(&mut self) {
        self.applied_coupon = None;
    }

    /// The applied coupon's discount, capped at the subtotal.
    pub fn coupon_discount(&self) -> Decimal {
        self.applied_coupon
            .as_ref()
            .map_or(Decimal::ZERO, |c| c.discount_for(self.subtotal()))
    }

    /// `pix_percent` of what is left after the coupon, for Pix payments only.
    pub fn payment_discount(&self, method: PaymentMethod, pix_percent: Decimal) -> Decimal {
        if method != PaymentMethod::Pix {
            return Decimal::ZERO;
        }
        let base = (self.subtotal() - self.coupon_discount()).max(Decimal::ZERO);
        round_money(base * pix_percent / Decimal::ONE_HUNDRED)
    }

    pub fn totals(&self, method: PaymentMethod, pix_percent: Decimal) -> CartTotals {
        let subtotal = self.subtotal();
        let coupon_discount = self.coupon_discount();
        let payment_discount = self.payment_discount(method, pix_percent);
        let total = round_money(subtotal - coupon_discount - payment_discount).max(Decimal::ZERO);
        CartTotals {
            subtotal,
            coupon_discount,
            payment_discount,
            total,
        }
    }

    /// Line snapshot for an order, at the prices held in the cart.
    pub fn order_items(&self) -> Vec<OrderItem> {
        self.items
            .iter()
            .map(|i| OrderItem {
                product_id: i.product_id,
                name: i.name.clone(),
                unit_price: i.unit_price(),
                quantity: i.quantity,
            })
            .collect()
    }

    fn persist(&self) {
        let saved = serde_json::to_string(&self.items)
            .map_err(std::io::Error::from)
            .and_then(|json| self.storage.save(&json));
        if let Err(e) = saved {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CouponCreate, CouponId};
    use crate::framework::ActorEntity;
    use rust_decimal_macros::dec;

    fn product(id: u32, price: Decimal) -> Product {
        Product::new(ProductId(id), format!("Produto {id}"), price, 10)
    }

    fn memory_cart() -> (Cart, Arc<MemoryCartStorage>) {
        let storage = Arc::new(MemoryCartStorage::new());
        (Cart::new(storage.clone()), storage)
    }

    #[test]
    fn test_add_merges_lines() {
        let (mut cart, _) = memory_cart();
        let p = product(1, dec!(50));
        cart.add_item(&p, 1);
        cart.add_item(&p, 1);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total(), dec!(100));
    }

    #[test]
    fn test_promotional_price_wins() {
        let (mut cart, _) = memory_cart();
        let mut p = product(1, dec!(50));
        p.promotional_price = Some(dec!(40));
        cart.add_item(&p, 3);
        assert_eq!(cart.total(), dec!(120));
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let (mut cart, _) = memory_cart();
        cart.add_item(&product(1, dec!(10)), 2);
        cart.add_item(&product(2, dec!(5)), 1);

        cart.update_quantity(ProductId(1), 4);
        assert_eq!(cart.total(), dec!(45));

        cart.update_quantity(ProductId(1), 0);
        cart.update_quantity(ProductId(2), -1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_item_is_noop() {
        let (mut cart, _) = memory_cart();
        cart.add_item(&product(1, dec!(10)), 1);
        cart.remove_item(ProductId(9));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_pix_discount_is_five_percent() {
        let (mut cart, _) = memory_cart();
        cart.add_item(&product(1, dec!(50)), 2);

        let pix = cart.totals(PaymentMethod::Pix, dec!(5));
        assert_eq!(pix.subtotal, dec!(100));
        assert_eq!(pix.payment_discount, dec!(5));
        assert_eq!(pix.total, dec!(95));

        let card = cart.totals(PaymentMethod::CreditCard, dec!(5));
        assert_eq!(card.payment_discount, dec!(0));
        assert_eq!(card.total, dec!(100));
    }

    #[test]
    fn test_pix_discount_applies_after_coupon() {
        let (mut cart, _) = memory_cart();
        cart.add_item(&product(1, dec!(50)), 2);
        let coupon = Coupon::from_create_params(
            CouponId(1),
            CouponCreate::percentage("DEZ", dec!(10)),
        )
        .unwrap();
        cart.set_coupon(coupon);

        let totals = cart.totals(PaymentMethod::Pix, dec!(5));
        assert_eq!(totals.coupon_discount, dec!(10));
        assert_eq!(totals.payment_discount, dec!(4.50));
        assert_eq!(totals.total, dec!(85.50));
    }

    #[test]
    fn test_large_fixed_coupon_never_goes_negative() {
        let (mut cart, _) = memory_cart();
        cart.add_item(&product(1, dec!(20)), 1);
        let coupon =
            Coupon::from_create_params(CouponId(1), CouponCreate::fixed("MEGA", dec!(50)))
                .unwrap();
        cart.set_coupon(coupon);

        let totals = cart.totals(PaymentMethod::Pix, dec!(5));
        assert_eq!(totals.coupon_discount, dec!(20));
        assert_eq!(totals.payment_discount, dec!(0));
        assert_eq!(totals.total, dec!(0));
    }

    #[test]
    fn test_every_mutation_is_persisted_and_reloaded() {
        let (mut cart, storage) = memory_cart();
        cart.add_item(&product(1, dec!(10)), 2);
        cart.add_item(&product(2, dec!(3)), 1);
        cart.remove_item(ProductId(2));

        let reloaded = Cart::load(storage.clone());
        assert_eq!(reloaded.items(), cart.items());
        assert!(reloaded.applied_coupon().is_none());
    }

    #[test]
    fn test_malformed_storage_loads_empty() {
        let storage = Arc::new(MemoryCartStorage::with_contents("{not json"));
        assert!(Cart::load(storage).is_empty());
    }

    #[test]
    fn test_load_merges_duplicate_lines() {
        let line = |quantity: u32, price: Decimal| CartItem {
            quantity,
            price,
            ..CartItem::from_product(&product(1, price), quantity)
        };
        let stored = vec![
            line(2, dec!(10)),
            line(0, dec!(10)),
            line(3, dec!(12)),
            CartItem::from_product(&product(2, dec!(5)), 1),
        ];
        let raw = serde_json::to_string(&stored).unwrap();
        let mut cart = Cart::load(Arc::new(MemoryCartStorage::with_contents(&raw)));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.items()[0].price, dec!(10));
        assert_eq!(cart.total(), dec!(55));

        cart.remove_item(ProductId(1));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_file_backed_cart_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        {
            let mut cart = Cart::load(Arc::new(FileCartStorage::new(&path)));
            cart.add_item(&product(7, dec!(12.50)), 2);
        }
        let cart = Cart::load(Arc::new(FileCartStorage::new(&path)));
        assert_eq!(cart.total(), dec!(25));
    }

    #[test]
    fn test_clear_empties_storage_too() {
        let (mut cart, storage) = memory_cart();
        cart.add_item(&product(1, dec!(10)), 1);
        cart.clear();
        assert_eq!(storage.contents().as_deref(), Some("[]"));
    }
}
