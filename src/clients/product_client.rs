//! # Product Client
//!
//! Provides a high-level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes catalog and stock methods.
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(err) = e.entity_error::<ProductError>() {
            return err.clone();
        }
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// The whole catalog, ordered by ID.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        self.list().await
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!(?update, "Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock");
        match self.act(id, ProductAction::CheckStock).await? {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Takes `quantity` units if at least that many are left.
    ///
    /// Returns the stock remaining afterwards, or
    /// [`ProductError::InsufficientStock`] with stock untouched.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Reserving stock");
        match self.act(id, ProductAction::ReserveStock(quantity)).await? {
            ProductActionResult::ReserveStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Gives back units taken by [`ProductClient::reserve_stock`].
    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Releasing stock");
        match self.act(id, ProductAction::ReleaseStock(quantity)).await? {
            ProductActionResult::ReleaseStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn restock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        match self.act(id, ProductAction::Restock(quantity)).await? {
            ProductActionResult::Restock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    async fn act(
        &self,
        id: ProductId,
        action: ProductAction,
    ) -> Result<ProductActionResult, ProductError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_check_stock_returns_correct_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let check_task =
            tokio::spawn(async move { product_client.check_stock(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert_eq!(action, ProductAction::CheckStock);

        responder
            .send(Ok(ProductActionResult::CheckStock(42)))
            .unwrap();

        assert_eq!(check_task.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn test_reserve_stock_returns_remaining_units() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let reserve_task =
            tokio::spawn(async move { product_client.reserve_stock(ProductId(1), 5).await });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(action, ProductAction::ReserveStock(5));

        responder
            .send(Ok(ProductActionResult::ReserveStock(3)))
            .unwrap();

        assert_eq!(reserve_task.await.unwrap().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_reserve_stock_surfaces_entity_error() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let reserve_task =
            tokio::spawn(async move { product_client.reserve_stock(ProductId(1), 100).await });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                ProductError::InsufficientStock {
                    requested: 100,
                    available: 4,
                },
            ))))
            .unwrap();

        assert_eq!(
            reserve_task.await.unwrap(),
            Err(ProductError::InsufficientStock {
                requested: 100,
                available: 4
            })
        );
    }

    #[tokio::test]
    async fn test_missing_product_maps_to_not_found() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task = tokio::spawn(async move { product_client.release_stock(ProductId(9), 1).await });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        responder
            .send(Err(FrameworkError::NotFound("product_9".into())))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(ProductError::NotFound("product_9".into()))
        );
    }

    #[tokio::test]
    async fn test_closed_actor_is_a_communication_error() {
        let (client, receiver) = create_mock_client::<Product>(1);
        drop(receiver);
        let product_client = ProductClient::new(client);

        assert!(matches!(
            product_client.list_products().await,
            Err(ProductError::ActorCommunicationError(_))
        ));
    }
}
