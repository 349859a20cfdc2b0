//! # Mock Client & Testing Guide
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered
//! from a queue of expectations instead of a running actor. It is how the checkout tests
//! inject backend failures (a dropped order actor, a stock write that fails half-way)
//! that are hard to provoke with real actors.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | **State** | none, scripted replies | real store |
//! | **Error injection** | `return_err` | needs specific state |
//! | **Use case** | logic *around* a client | the actor itself or full system |
//!
//! ```rust
//! use storefront_checkout::framework::mock::MockClient;
//! use storefront_checkout::framework::FrameworkError;
//! use storefront_checkout::model::{Product, ProductId};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Product>::new();
//!     mock.expect_get(ProductId(1)).return_err(FrameworkError::ActorClosed);
//!
//!     let result = mock.client().get(ProductId(1)).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! Every request the mock receives is recorded; [`MockClient::received`] returns them in
//! arrival order, which lets a test assert that *no* write happened.

use super::core::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

enum Expectation<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    Update(Result<T, FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
}

type Shared<V> = Arc<Mutex<V>>;

fn lock<V>(shared: &Shared<V>) -> MutexGuard<'_, V> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A scripted stand-in for a resource actor.
///
/// Expectations are consumed in FIFO order. A request that does not match the next
/// expectation (or arrives when none is left) is answered with
/// [`FrameworkError::NotFound`] and recorded, so [`MockClient::verify`] reports it.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Shared<VecDeque<Expectation<T>>>,
    received: Shared<Vec<String>>,
    unexpected: Shared<Vec<String>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Shared<VecDeque<Expectation<T>>> = Arc::default();
        let received: Shared<Vec<String>> = Arc::default();
        let unexpected: Shared<Vec<String>> = Arc::default();

        let (exps, seen, stray) = (expectations.clone(), received.clone(), unexpected.clone());
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = lock(&exps).pop_front();
                let label = describe(&request);
                lock(&seen).push(label.clone());

                let mismatch = || FrameworkError::NotFound(format!("unexpected request: {label}"));
                match (request, next) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Update { respond_to, .. }, Some(Expectation::Update(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Action { respond_to, .. }, Some(Expectation::Action(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (request, _) => {
                        lock(&stray).push(label.clone());
                        let err = mismatch();
                        match request {
                            ResourceRequest::Get { respond_to, .. } => {
                                let _ = respond_to.send(Err(err));
                            }
                            ResourceRequest::List { respond_to } => {
                                let _ = respond_to.send(Err(err));
                            }
                            ResourceRequest::Create { respond_to, .. } => {
                                let _ = respond_to.send(Err(err));
                            }
                            ResourceRequest::Update { respond_to, .. } => {
                                let _ = respond_to.send(Err(err));
                            }
                            ResourceRequest::Delete { respond_to, .. } => {
                                let _ = respond_to.send(Err(err));
                            }
                            ResourceRequest::Action { respond_to, .. } => {
                                let _ = respond_to.send(Err(err));
                            }
                        }
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            received,
            unexpected,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, _id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Expectation::Get)
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::List)
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(Expectation::Create)
    }

    pub fn expect_update(&mut self, _id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Update)
    }

    pub fn expect_action(&mut self, _id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(Expectation::Action)
    }

    fn builder<R>(
        &self,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap,
            expectations: self.expectations.clone(),
        }
    }

    /// Requests received so far, e.g. `"Get product_1"` or `"Action product_1 ReserveStock(2)"`.
    pub fn received(&self) -> Vec<String> {
        lock(&self.received).clone()
    }

    /// Panics if an expectation was left unused or a request arrived unannounced.
    pub fn verify(&self) {
        let stray = lock(&self.unexpected);
        assert!(stray.is_empty(), "Unexpected requests: {stray:?}");
        let remaining = lock(&self.expectations).len();
        assert!(
            remaining == 0,
            "Not all expectations were met. {remaining} remaining"
        );
    }
}

/// Queues the reply for one expected request.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    expectations: Shared<VecDeque<Expectation<T>>>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        lock(&self.expectations).push_back((self.wrap)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back((self.wrap)(Err(error)));
    }
}

fn describe<T: ActorEntity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Create { params, .. } => format!("Create {params:?}"),
        ResourceRequest::Get { id, .. } => format!("Get {id}"),
        ResourceRequest::List { .. } => "List".to_string(),
        ResourceRequest::Update { id, update, .. } => format!("Update {id} {update:?}"),
        ResourceRequest::Delete { id, .. } => format!("Delete {id}"),
        ResourceRequest::Action { id, action, .. } => format!("Action {id} {action:?}"),
    }
}

/// Creates a bare client plus the receiving end of its channel, for tests that want to
/// inspect each request and answer it by hand.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Receives the next request and returns its parts if it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    tokio::sync::oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
