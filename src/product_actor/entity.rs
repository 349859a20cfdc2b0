//! [`ActorEntity`] implementation for [`Product`].

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::framework::ActorEntity;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use rust_decimal::Decimal;

fn check_prices(price: Decimal, promotional: Option<Decimal>) -> Result<(), ProductError> {
    if price <= Decimal::ZERO {
        return Err(ProductError::InvalidPrice(price));
    }
    match promotional {
        Some(promo) if promo <= Decimal::ZERO || promo >= price => {
            Err(ProductError::InvalidPrice(promo))
        }
        _ => Ok(()),
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(ProductError::EmptyName);
        }
        check_prices(params.price, params.promotional_price)?;
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            promotional_price: params.promotional_price,
            stock: params.stock,
            category: params.category,
        })
    }

    async fn on_update(
        &mut self,
        update: ProductUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        let price = update.price.unwrap_or(self.price);
        let promotional = update.promotional_price.unwrap_or(self.promotional_price);
        check_prices(price, promotional)?;

        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(ProductError::EmptyName);
            }
            self.name = name;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        self.price = price;
        self.promotional_price = promotional;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &Self::Context,
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock)),
            ProductAction::ReserveStock(0)
            | ProductAction::ReleaseStock(0)
            | ProductAction::Restock(0) => Err(ProductError::InvalidQuantity(0)),
            ProductAction::ReserveStock(quantity) => {
                if self.stock < quantity {
                    return Err(ProductError::InsufficientStock {
                        requested: quantity,
                        available: self.stock,
                    });
                }
                self.stock -= quantity;
                Ok(ProductActionResult::ReserveStock(self.stock))
            }
            ProductAction::ReleaseStock(quantity) => {
                self.stock = self.stock.saturating_add(quantity);
                Ok(ProductActionResult::ReleaseStock(self.stock))
            }
            ProductAction::Restock(quantity) => {
                self.stock = self.stock.saturating_add(quantity);
                Ok(ProductActionResult::Restock(self.stock))
            }
        }
    }
}
