use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, OrderUpdate};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Orders are written once by checkout; afterwards only their status and contact
/// details change.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Persists an order and returns the store-assigned ID.
    #[instrument(skip(self, params), fields(short_id = %params.short_id))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?params, "create_order called");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(%id, "Order stored");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.list().await
    }

    /// Moves an order to `status`, if its current status allows it.
    #[instrument(skip(self))]
    pub async fn transition(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<OrderStatus, OrderError> {
        self.inner
            .perform_action(id, OrderAction::Transition(status))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_contact(
        &self,
        id: OrderId,
        update: OrderUpdate,
    ) -> Result<Order, OrderError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(err) = e.entity_error::<OrderError>() {
            return err.clone();
        }
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;

    #[tokio::test]
    async fn test_transition_maps_invalid_transition() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_action(OrderId(1))
            .return_err(FrameworkError::EntityError(Box::new(
                OrderError::InvalidTransition {
                    from: OrderStatus::Delivered,
                    to: OrderStatus::Cancelled,
                },
            )));
        let client = OrderClient::new(mock.client());

        let result = client.transition(OrderId(1), OrderStatus::Cancelled).await;

        assert_eq!(
            result,
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Cancelled
            })
        );
        assert_eq!(
            mock.received(),
            vec!["Action order_1 Transition(Cancelled)".to_string()]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_dropped_actor() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_get(OrderId(3))
            .return_err(FrameworkError::ActorDropped);
        let client = OrderClient::new(mock.client());

        assert!(matches!(
            client.get(OrderId(3)).await,
            Err(OrderError::ActorCommunicationError(_))
        ));
    }
}
