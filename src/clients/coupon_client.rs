//! # Coupon Client
//!
//! Wraps a `ResourceClient<Coupon>`: admin operations plus the redeem/release pair that
//! checkout uses to move a coupon's usage counter.
use crate::clients::actor_client::ActorClient;
use crate::coupon_actor::{CouponAction, CouponActionResult, CouponError};
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Coupon, CouponCreate, CouponId, CouponUpdate};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Client for interacting with the Coupon actor.
#[derive(Clone)]
pub struct CouponClient {
    inner: ResourceClient<Coupon>,
}

impl CouponClient {
    pub fn new(inner: ResourceClient<Coupon>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Coupon> for CouponClient {
    type Error = CouponError;

    fn inner(&self) -> &ResourceClient<Coupon> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(err) = e.entity_error::<CouponError>() {
            return err.clone();
        }
        match e {
            FrameworkError::NotFound(id) => CouponError::NotFound(id),
            other => CouponError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CouponClient {
    /// Creates a coupon, refusing a code that another coupon already uses.
    ///
    /// The uniqueness check is a read followed by a write, so it is meant for the admin
    /// path, which is not concurrent.
    #[instrument(skip(self))]
    pub async fn create_coupon(&self, params: CouponCreate) -> Result<CouponId, CouponError> {
        debug!("Sending request");
        let existing = self.list().await?;
        if existing.iter().any(|c| c.matches_code(&params.code)) {
            warn!(code = %params.code, "Duplicate coupon code");
            return Err(CouponError::DuplicateCode(params.code.trim().to_uppercase()));
        }
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn list_coupons(&self) -> Result<Vec<Coupon>, CouponError> {
        self.list().await
    }

    /// Finds a coupon by code, ignoring case.
    #[instrument(skip(self))]
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, CouponError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|c| c.matches_code(code)))
    }

    #[instrument(skip(self))]
    pub async fn update_coupon(
        &self,
        id: CouponId,
        update: CouponUpdate,
    ) -> Result<Coupon, CouponError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Counts one use. Fails with [`CouponError::LimitReached`] once the limit is hit.
    ///
    /// Returns the new usage count.
    #[instrument(skip(self))]
    pub async fn redeem(&self, id: CouponId) -> Result<u32, CouponError> {
        debug!("Redeeming coupon");
        match self.act(id, CouponAction::Redeem).await? {
            CouponActionResult::Redeem(count) => Ok(count),
            other => Err(unexpected(other)),
        }
    }

    /// Undoes one [`CouponClient::redeem`].
    #[instrument(skip(self))]
    pub async fn release(&self, id: CouponId) -> Result<u32, CouponError> {
        debug!("Releasing coupon");
        match self.act(id, CouponAction::Release).await? {
            CouponActionResult::Release(count) => Ok(count),
            other => Err(unexpected(other)),
        }
    }

    async fn act(
        &self,
        id: CouponId,
        action: CouponAction,
    ) -> Result<CouponActionResult, CouponError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

fn unexpected(result: CouponActionResult) -> CouponError {
    CouponError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;
    use crate::model::DiscountType;
    use rust_decimal_macros::dec;

    fn stored(code: &str) -> Coupon {
        Coupon {
            id: CouponId(1),
            code: code.into(),
            discount_type: DiscountType::Percentage,
            value: dec!(10),
            min_spend: None,
            usage_limit: None,
            usage_count: 0,
            expires_at: None,
            active: true,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_code_ignoring_case() {
        let mut mock = MockClient::<Coupon>::new();
        mock.expect_list().return_ok(vec![stored("PROMO10")]);
        let client = CouponClient::new(mock.client());

        let result = client
            .create_coupon(CouponCreate::percentage("promo10", dec!(15)))
            .await;

        assert_eq!(result, Err(CouponError::DuplicateCode("PROMO10".into())));
        assert_eq!(mock.received(), vec!["List".to_string()]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_create_rejects_accented_duplicate() {
        let mut mock = MockClient::<Coupon>::new();
        mock.expect_list().return_ok(vec![stored("NATAÇÃO")]);
        let client = CouponClient::new(mock.client());

        let result = client
            .create_coupon(CouponCreate::fixed("natação", dec!(5)))
            .await;

        assert_eq!(result, Err(CouponError::DuplicateCode("NATAÇÃO".into())));
        mock.verify();
    }

    #[tokio::test]
    async fn test_create_new_code() {
        let mut mock = MockClient::<Coupon>::new();
        mock.expect_list().return_ok(vec![stored("PROMO10")]);
        mock.expect_create().return_ok(CouponId(2));
        let client = CouponClient::new(mock.client());

        let id = client
            .create_coupon(CouponCreate::fixed("FRETE", dec!(8)))
            .await
            .unwrap();

        assert_eq!(id, CouponId(2));
        mock.verify();
    }

    #[tokio::test]
    async fn test_redeem_surfaces_limit() {
        let mut mock = MockClient::<Coupon>::new();
        mock.expect_action(CouponId(1))
            .return_err(FrameworkError::EntityError(Box::new(
                CouponError::LimitReached {
                    code: "ONCE".into(),
                    limit: 1,
                },
            )));
        let client = CouponClient::new(mock.client());

        assert_eq!(
            client.redeem(CouponId(1)).await,
            Err(CouponError::LimitReached {
                code: "ONCE".into(),
                limit: 1
            })
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_find_by_code() {
        let mut mock = MockClient::<Coupon>::new();
        mock.expect_list().return_ok(vec![stored("PROMO10")]);
        let client = CouponClient::new(mock.client());

        let found = client.find_by_code(" promo10 ").await.unwrap();
        assert_eq!(found.map(|c| c.id), Some(CouponId(1)));
    }
}
