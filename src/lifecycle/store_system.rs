use crate::checkout::CheckoutService;
use crate::clients::{CouponClient, OrderClient, ProductClient};
use crate::config::StoreSettings;
use crate::coupons::CouponValidator;
use tracing::{error, info};

/// Owns the running actors of one store.
///
/// # Example
///
/// ```rust
/// use storefront_checkout::lifecycle::StoreSystem;
///
/// #[tokio::main]
/// async fn main() -> Result<(), String> {
///     let system = StoreSystem::new();
///     let products = system.product_client.list_products().await.map_err(|e| e.to_string())?;
///     assert!(products.is_empty());
///     system.shutdown().await
/// }
/// ```
pub struct StoreSystem {
    pub product_client: ProductClient,
    pub coupon_client: CouponClient,
    pub order_client: OrderClient,

    /// Task handles for the running actors, awaited on shutdown.
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    /// Spawns the product, coupon and order actors. Must run inside a Tokio runtime.
    pub fn new() -> Self {
        let (product_actor, product_client) = crate::product_actor::new();
        let (coupon_actor, coupon_client) = crate::coupon_actor::new();
        let (order_actor, order_client) = crate::order_actor::new();

        let product_handle = tokio::spawn(product_actor.run(()));
        let coupon_handle = tokio::spawn(coupon_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(()));

        info!("Store actors started");
        Self {
            product_client,
            coupon_client,
            order_client,
            handles: vec![product_handle, coupon_handle, order_handle],
        }
    }

    /// A checkout bound to this system's actors.
    pub fn checkout_service(&self, settings: &StoreSettings) -> CheckoutService {
        CheckoutService::new(
            self.product_client.clone(),
            self.coupon_client.clone(),
            self.order_client.clone(),
            settings,
        )
    }

    pub fn coupon_validator(&self) -> CouponValidator {
        CouponValidator::new(self.coupon_client.clone())
    }

    /// Drops the clients and waits for every actor task to finish.
    ///
    /// # Errors
    /// Returns a description of the first actor task that panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down store...");

        drop(self.product_client);
        drop(self.coupon_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Store shutdown complete.");
        Ok(())
    }
}

impl Default for StoreSystem {
    fn default() -> Self {
        Self::new()
    }
}
