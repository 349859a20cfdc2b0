//! Customer-facing checkout failures.
//!
//! Each variant renders as the short pt-BR message shown to the customer; internal
//! detail (actor errors, I/O) is logged where it happens and never reaches `Display`.

use crate::model::format_brl;
use rust_decimal::Decimal;
use thiserror::Error;

fn brl(amount: &Decimal) -> String {
    format_brl(*amount)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutErrorKind {
    EmptyCart,
    MissingCustomer,
    ItemNotFound,
    InsufficientStock,
    CouponInvalid,
    CouponMinimumSpend,
    CouponLimitReached,
    CouponExpired,
    Backend,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Seu carrinho está vazio.")]
    EmptyCart,

    #[error("Informe seu nome para finalizar o pedido.")]
    MissingCustomer,

    #[error("O produto \"{name}\" não está mais disponível.")]
    ItemNotFound { name: String },

    #[error("Estoque insuficiente para \"{name}\". Disponível: {available}.")]
    InsufficientStock { name: String, available: u32 },

    #[error("Cupom inválido ou expirado.")]
    CouponInvalid,

    #[error("Este cupom exige compra mínima de {}.", brl(.min_spend))]
    CouponMinimumSpend { min_spend: Decimal },

    #[error("Este cupom atingiu o limite de usos.")]
    CouponLimitReached,

    #[error("Este cupom expirou.")]
    CouponExpired,

    #[error("Não foi possível finalizar o pedido. Tente novamente.")]
    Backend,
}

impl CheckoutError {
    pub fn kind(&self) -> CheckoutErrorKind {
        match self {
            CheckoutError::EmptyCart => CheckoutErrorKind::EmptyCart,
            CheckoutError::MissingCustomer => CheckoutErrorKind::MissingCustomer,
            CheckoutError::ItemNotFound { .. } => CheckoutErrorKind::ItemNotFound,
            CheckoutError::InsufficientStock { .. } => CheckoutErrorKind::InsufficientStock,
            CheckoutError::CouponInvalid => CheckoutErrorKind::CouponInvalid,
            CheckoutError::CouponMinimumSpend { .. } => CheckoutErrorKind::CouponMinimumSpend,
            CheckoutError::CouponLimitReached => CheckoutErrorKind::CouponLimitReached,
            CheckoutError::CouponExpired => CheckoutErrorKind::CouponExpired,
            CheckoutError::Backend => CheckoutErrorKind::Backend,
        }
    }

    pub fn is_coupon_error(&self) -> bool {
        matches!(
            self.kind(),
            CheckoutErrorKind::CouponInvalid
                | CheckoutErrorKind::CouponMinimumSpend
                | CheckoutErrorKind::CouponLimitReached
                | CheckoutErrorKind::CouponExpired
        )
    }
}
