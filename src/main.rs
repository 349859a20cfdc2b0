//! Demo: seeds a catalog and a coupon, fills a cart and checks it out with Pix.

use rust_decimal_macros::dec;
use std::sync::Arc;
use storefront_checkout::cart::{Cart, FileCartStorage};
use storefront_checkout::checkout::CheckoutRequest;
use storefront_checkout::config::load_settings;
use storefront_checkout::lifecycle::{setup_tracing, StoreSystem};
use storefront_checkout::model::{format_brl, CouponCreate, PaymentMethod, ProductCreate};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let settings = load_settings().map_err(|e| e.to_string())?;
    let system = StoreSystem::new();

    let span = tracing::info_span!("seed");
    let (mug, shirt) = async {
        let mug = system
            .product_client
            .create_product(ProductCreate::new("Caneca Açaí", dec!(39.90), 5).with_category("Cozinha"))
            .await?;
        let shirt = system
            .product_client
            .create_product(
                ProductCreate::new("Camiseta", dec!(79.90), 2)
                    .with_promotional_price(dec!(59.90))
                    .with_category("Vestuário"),
            )
            .await?;
        Ok::<_, storefront_checkout::product_actor::ProductError>((mug, shirt))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    system
        .coupon_client
        .create_coupon(CouponCreate::percentage("BEMVINDO", dec!(10)).with_min_spend(dec!(100)))
        .await
        .map_err(|e| e.to_string())?;

    let catalog = system
        .product_client
        .list_products()
        .await
        .map_err(|e| e.to_string())?;

    let mut cart = Cart::load(Arc::new(FileCartStorage::new(&settings.cart_path)));
    for product in catalog.iter().filter(|p| p.id == mug || p.id == shirt) {
        cart.add_item(product, 2);
    }
    info!(items = cart.item_count(), total = %format_brl(cart.total()), "Cart ready");

    let validator = system.coupon_validator();
    match validator.apply_coupon(&mut cart, "bemvindo").await {
        Ok(discount) => info!(discount = %format_brl(discount), "Coupon applied"),
        Err(e) => info!(reason = %e, "Coupon not applied"),
    }

    let checkout = system.checkout_service(&settings);
    let request = CheckoutRequest::new("Ana Souza", PaymentMethod::Pix).with_notes("Entregar após as 18h");

    let span = tracing::info_span!("checkout");
    match checkout.checkout(&mut cart, request).instrument(span).await {
        Ok(receipt) => {
            info!(order = %receipt.display_id, total = %format_brl(receipt.order.total), "Order placed");
            if let Some(payload) = &receipt.pix_payload {
                info!(%payload, "Pix copy-and-paste code");
            }
            info!(link = %receipt.deep_link, "Send the order summary");
        }
        Err(e) => error!(kind = ?e.kind(), message = %e, "Checkout failed"),
    }

    drop(checkout);
    drop(validator);
    system.shutdown().await?;

    info!("Demo completed");
    Ok(())
}
