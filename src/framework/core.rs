//! # Core Resource Framework
//!
//! This module defines the generic building blocks the storefront uses as its
//! authoritative store.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait every stored resource (Product, Coupon, Order) implements.
//! - [`ResourceActor`]: The generic actor that owns a collection of entities.
//! - [`ResourceClient`]: The generic client for talking to an actor.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, NotFound).

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any stored resource must implement to be managed by [`ResourceActor`].
///
/// # Architecture Note
/// Products, coupons and orders all satisfy the same contract, so the request loop in
/// [`ResourceActor::run`] is written once. Associated types keep the payloads apart: a
/// `Coupon` actor only accepts `CouponCreate`, never a `ProductCreate`.
///
/// # Atomicity
/// Every hook runs inside the actor task, one request at a time. A check-then-mutate done
/// inside [`ActorEntity::handle_action`] (e.g. "decrement stock if enough is left") can
/// therefore never interleave with another request for the same resource.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier. Must be convertible from `u32` for sequence-based IDs.
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `ReserveStock`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the actor at `run()` time. Use `()` if none.
    type Context: Send + Sync;

    /// One error enum per resource.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the entity from the assigned ID and the creation payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Returns the entity error if this failure came from a hook, downcast to `E`.
    pub fn entity_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            FrameworkError::EntityError(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// One-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to a [`ResourceActor`].
///
/// The variants are the CRUD lifecycle plus `List` (the "list everything for this store"
/// call the checkout needs) and `Action` for resource-specific logic.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE ACTOR
// =============================================================================

/// The generic actor that owns a collection of entities.
///
/// **Concurrency Model**: each actor processes its own requests sequentially in a loop,
/// so the `store` needs no `Mutex`. Several actors (products, coupons, orders) run in
/// parallel, each in its own Tokio task.
///
/// IDs are assigned from a `u32` sequence starting at 1; the order actor surfaces that
/// sequence as the human-facing order number.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates the actor and its client. `buffer_size` is the request channel capacity.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the request loop until every client has been dropped.
    ///
    /// `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.next_id += 1;
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

// =============================================================================
// 4. THE CLIENT
// =============================================================================

/// A type-safe, cheaply cloneable handle to a [`ResourceActor`].
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: `T` itself does not need to be `Clone` for the handle to be.
impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Shelf {
        id: u32,
        label: String,
        units: u32,
    }

    #[derive(Debug)]
    struct ShelfCreate {
        label: String,
        units: u32,
    }

    #[derive(Debug)]
    struct ShelfUpdate {
        label: Option<String>,
    }

    #[derive(Debug)]
    enum ShelfAction {
        Take(u32),
    }

    #[derive(Debug, thiserror::Error)]
    enum ShelfError {
        #[error("only {0} left")]
        Short(u32),
        #[error("label must not be empty")]
        EmptyLabel,
    }

    #[async_trait]
    impl ActorEntity for Shelf {
        type Id = u32;
        type Create = ShelfCreate;
        type Update = ShelfUpdate;
        type Action = ShelfAction;
        type ActionResult = u32;
        type Context = ();
        type Error = ShelfError;

        fn from_create_params(id: u32, params: ShelfCreate) -> Result<Self, ShelfError> {
            if params.label.is_empty() {
                return Err(ShelfError::EmptyLabel);
            }
            Ok(Self {
                id,
                label: params.label,
                units: params.units,
            })
        }

        async fn on_update(&mut self, update: ShelfUpdate, _ctx: &()) -> Result<(), ShelfError> {
            if let Some(label) = update.label {
                self.label = label;
            }
            Ok(())
        }

        async fn handle_action(&mut self, action: ShelfAction, _ctx: &()) -> Result<u32, ShelfError> {
            match action {
                ShelfAction::Take(n) if self.units >= n => {
                    self.units -= n;
                    Ok(self.units)
                }
                ShelfAction::Take(_) => Err(ShelfError::Short(self.units)),
            }
        }
    }

    #[tokio::test]
    async fn test_crud_list_and_actions() {
        let (actor, client) = ResourceActor::<Shelf>::new(10);
        tokio::spawn(actor.run(()));

        let a = client
            .create(ShelfCreate { label: "a".into(), units: 3 })
            .await
            .unwrap();
        let b = client
            .create(ShelfCreate { label: "b".into(), units: 1 })
            .await
            .unwrap();
        assert_eq!((a, b), (1, 2));

        let all = client.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].label, "a");

        assert_eq!(client.perform_action(a, ShelfAction::Take(2)).await.unwrap(), 1);
        let err = client.perform_action(a, ShelfAction::Take(2)).await.unwrap_err();
        assert!(matches!(err.entity_error::<ShelfError>(), Some(ShelfError::Short(1))));

        let renamed = client
            .update(b, ShelfUpdate { label: Some("c".into()) })
            .await
            .unwrap();
        assert_eq!(renamed.label, "c");

        client.delete(b).await.unwrap();
        assert!(client.get(b).await.unwrap().is_none());
        assert!(matches!(
            client.delete(b).await,
            Err(FrameworkError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_create_does_not_consume_an_id() {
        let (actor, client) = ResourceActor::<Shelf>::new(10);
        tokio::spawn(actor.run(()));

        let err = client
            .create(ShelfCreate { label: String::new(), units: 0 })
            .await
            .unwrap_err();
        assert!(matches!(err.entity_error::<ShelfError>(), Some(ShelfError::EmptyLabel)));

        let id = client
            .create(ShelfCreate { label: "x".into(), units: 0 })
            .await
            .unwrap();
        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn test_concurrent_takes_never_oversell() {
        let (actor, client) = ResourceActor::<Shelf>::new(64);
        tokio::spawn(actor.run(()));
        let id = client
            .create(ShelfCreate { label: "hot".into(), units: 5 })
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..20 {
            let client = client.clone();
            handles.push(tokio::spawn(async move {
                client.perform_action(id, ShelfAction::Take(1)).await
            }));
        }
        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 5);
        assert_eq!(client.get(id).await.unwrap().unwrap().units, 0);
    }
}
