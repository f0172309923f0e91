//! # Mock Framework
//!
//! Utilities for testing code that talks to a [`ShopClient`] without running the store actor.
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its mailbox.
//! Then use helpers like [`expect_record_sale`] to assert what was sent and script the reply.

use tokio::sync::{broadcast, mpsc};

use crate::clients::ShopClient;
use crate::domain::{Product, ProductCreate, Sale, SaleCreate};
use crate::messages::{ServiceResponse, ShopRequest};

/// Creates a client whose requests land on a receiver owned by the test.
pub fn create_mock_client(buffer_size: usize) -> (ShopClient, mpsc::Receiver<ShopRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (events, _) = broadcast::channel(buffer_size);
    (ShopClient::new(sender, events), receiver)
}

/// Helper to verify that the next message is an AddProduct request
pub async fn expect_add_product(
    receiver: &mut mpsc::Receiver<ShopRequest>,
) -> Option<(ProductCreate, ServiceResponse<Product>)> {
    match receiver.recv().await {
        Some(ShopRequest::AddProduct { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a RecordSale request
pub async fn expect_record_sale(
    receiver: &mut mpsc::Receiver<ShopRequest>,
) -> Option<(SaleCreate, ServiceResponse<Sale>)> {
    match receiver.recv().await {
        Some(ShopRequest::RecordSale { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductKind;
    use crate::error::ShopError;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_client_forwards_parsed_form_input() {
        let (client, mut receiver) = create_mock_client(4);

        let task = tokio::spawn(async move {
            let params = ProductCreate::parse("Ray-Ban Classic", "sunglasses", "10")?;
            client.add_product(params).await
        });

        let (params, responder) = expect_add_product(&mut receiver).await.expect("Expected AddProduct");
        assert_eq!(params.kind, ProductKind::Sunglasses);
        assert_eq!(params.quantity, 10);
        let created_at = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(9, 0, 0).unwrap();
        let product = Product {
            id: "product_1".into(),
            name: params.name,
            kind: params.kind,
            quantity: params.quantity,
            created_at,
        };
        responder.send(Ok(product.clone())).unwrap();

        assert_eq!(task.await.unwrap(), Ok(product));
    }

    #[tokio::test]
    async fn test_client_passes_store_errors_through() {
        let (client, mut receiver) = create_mock_client(4);

        let task = tokio::spawn(async move { client.record_sale(SaleCreate::new("product_1", 9)).await });

        let (params, responder) = expect_record_sale(&mut receiver).await.expect("Expected RecordSale");
        assert_eq!(params, SaleCreate::new("product_1", 9));
        let err = ShopError::InsufficientStock { requested: 9, available: 3 };
        responder.send(Err(err.clone())).unwrap();

        assert_eq!(task.await.unwrap(), Err(err));
    }

    #[tokio::test]
    async fn test_dropped_actor_is_a_communication_error() {
        let (client, receiver) = create_mock_client(4);
        drop(receiver);

        let result = client.list_products().await;
        assert!(matches!(result, Err(ShopError::ActorCommunication(_))));
    }

    #[tokio::test]
    async fn test_unanswered_request_is_a_communication_error() {
        let (client, mut receiver) = create_mock_client(4);

        let task = tokio::spawn(async move { client.record_sale(SaleCreate::new("product_1", 1)).await });
        let (_, responder) = expect_record_sale(&mut receiver).await.expect("Expected RecordSale");
        drop(responder);

        assert!(matches!(task.await.unwrap(), Err(ShopError::ActorCommunication(_))));
    }
}
