//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_action`] to assert behavior.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest};

type Reply<R, T> = oneshot::Sender<Result<R, <T as Entity>::Error>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// Instead of spinning up a `ResourceActor`, the test owns the receiving end of
/// the client's channel. It can inspect each request and answer it (or not)
/// to simulate success, failure, and hangs deterministically.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Same as [`create_mock_client`] with a short timeout, for hang scenarios.
pub fn create_mock_client_with_timeout<T: Entity>(
    buffer_size: usize,
    timeout: Duration,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (client, receiver) = create_mock_client(buffer_size);
    (client.with_timeout(timeout), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Reply<T, T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Reply<Option<T>, T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<Reply<Vec<T>, T>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Reply<T::ActionResult, T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Asserts nothing has been sent to the mock yet.
pub fn expect_silence<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) {
    assert!(
        matches!(receiver.try_recv(), Err(mpsc::error::TryRecvError::Empty)),
        "expected no request to reach the store"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MenuItem, MenuItemDraft};
    use crate::menu_actor::CatalogError;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<MenuItem>(10);

        let create_task = tokio::spawn(async move {
            let draft = MenuItemDraft::new("Tea", Decimal::from(10), "Beverages", "tea.jpg");
            client.create(draft).await
        });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(params.name, "Tea");
        let stored = MenuItem {
            id: "8".to_string(),
            name: params.name,
            price: params.price,
            category: params.category,
            image_url: params.image_url,
            available: params.available,
        };
        responder.send(Ok(stored.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(stored));
    }

    #[tokio::test]
    async fn unanswered_requests_time_out() {
        let (client, mut receiver) = create_mock_client_with_timeout::<MenuItem>(10, Duration::from_millis(50));

        let list_task = tokio::spawn(async move { client.list().await });
        let _held = expect_list(&mut receiver).await.expect("Expected List request");

        let result = list_task.await.unwrap();
        assert!(matches!(result, Err(CatalogError::TransportFault(msg)) if msg.contains("timed out")));
    }
}
