//! Gateway behaviour against an in-memory checkout service.

mod common;

use std::sync::Arc;

use checkout_bff::{
    CheckoutBffClientV1, CheckoutBffError, CheckoutBffService, ResponseEnvelope, ResponseResult,
    ShoppingCart, TransportError,
};
use common::{FailingTransport, FakeCheckout, FixedResponse, VALID_VOUCHER, item, product};
use http::{Method, StatusCode};
use rust_decimal::Decimal;

fn gateway(fake: &Arc<FakeCheckout>) -> CheckoutBffService {
    CheckoutBffService::new(fake.clone())
}

#[tokio::test]
async fn add_then_get_yields_single_line_for_product() {
    let fake = Arc::new(FakeCheckout::default());
    let checkout = gateway(&fake);
    let p = product(7);

    let envelope = checkout.add_shopping_cart_item(&item(p, 1)).await.unwrap();
    assert!(envelope.is_success());

    let cart = checkout.get_shopping_cart().await.unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].product_id, p);
    assert_eq!(cart.items[0].quantity, 1);
    assert_eq!(checkout.get_shopping_cart_quantity().await.unwrap(), 1);
}

#[tokio::test]
async fn get_returns_exactly_what_the_service_holds() {
    let mut cart = ShoppingCart::default();
    cart.items.push(item(product(1), 2));
    cart.items.push(item(product(2), 3));
    cart.total = Decimal::new(9950, 2);
    let fake = Arc::new(FakeCheckout::with_cart(cart.clone()));

    assert_eq!(gateway(&fake).get_shopping_cart().await.unwrap(), cart);
}

#[tokio::test]
async fn update_changes_quantity() {
    let fake = Arc::new(FakeCheckout::default());
    let checkout = gateway(&fake);
    let p = product(3);

    checkout.add_shopping_cart_item(&item(p, 1)).await.unwrap();
    let envelope = checkout
        .update_shopping_cart_item(p, &item(p, 4))
        .await
        .unwrap();

    assert!(envelope.is_success());
    assert_eq!(fake.cart().item(p).map(|i| i.quantity), Some(4));
    assert_eq!(
        fake.requests().last().map(|r| (r.method.clone(), r.path.clone())),
        Some((
            Method::PUT,
            format!("orders/shopping-cart/items/{}", p.hyphenated())
        ))
    );
}

#[tokio::test]
async fn invalid_voucher_fails_and_leaves_total_unchanged() {
    let fake = Arc::new(FakeCheckout::default());
    let checkout = gateway(&fake);
    checkout
        .add_shopping_cart_item(&item(product(1), 2))
        .await
        .unwrap();
    let total_before = checkout.get_shopping_cart().await.unwrap().total;

    let envelope = checkout.apply_voucher("NOT-A-CODE").await.unwrap();

    let failure = envelope.failure().expect("failure envelope");
    assert!(failure.messages().count() >= 1);
    assert_eq!(failure.status, Some(400));
    let cart = checkout.get_shopping_cart().await.unwrap();
    assert_eq!(cart.total, total_before);
    assert!(!cart.has_voucher);
}

#[tokio::test]
async fn valid_voucher_is_applied() {
    let fake = Arc::new(FakeCheckout::default());
    let checkout = gateway(&fake);

    let envelope = checkout.apply_voucher(VALID_VOUCHER).await.unwrap();

    assert_eq!(envelope, ResponseEnvelope::ok());
    let cart = checkout.get_shopping_cart().await.unwrap();
    assert!(cart.has_voucher);
    assert_eq!(
        cart.voucher.and_then(|v| v.code).as_deref(),
        Some(VALID_VOUCHER)
    );
}

#[tokio::test]
async fn removing_unknown_product_returns_not_found_envelope() {
    let fake = Arc::new(FakeCheckout::default());
    let checkout = gateway(&fake);

    let envelope = checkout
        .remove_shopping_cart_item(product(404))
        .await
        .unwrap();

    let ResponseEnvelope::Failure(result) = envelope else {
        panic!("expected failure envelope");
    };
    assert_eq!(result.status, Some(404));
    assert_eq!(
        result.field_messages(ResponseResult::MESSAGES_KEY),
        ["Item not found in shopping cart".to_owned()]
    );
}

#[tokio::test]
async fn removing_existing_product_empties_cart() {
    let fake = Arc::new(FakeCheckout::default());
    let checkout = gateway(&fake);
    let p = product(5);
    checkout.add_shopping_cart_item(&item(p, 1)).await.unwrap();

    let envelope = checkout.remove_shopping_cart_item(p).await.unwrap();

    assert!(envelope.is_success());
    assert!(checkout.get_shopping_cart().await.unwrap().is_empty());
}

#[tokio::test]
async fn local_validation_sends_no_request() {
    let fake = Arc::new(FakeCheckout::default());
    let checkout = gateway(&fake);
    let p = product(9);

    let add = checkout.add_shopping_cart_item(&item(p, 0)).await.unwrap();
    let update = checkout
        .update_shopping_cart_item(p, &item(p, -1))
        .await
        .unwrap();
    let voucher = checkout.apply_voucher("   ").await.unwrap();

    for envelope in [&add, &update, &voucher] {
        let failure = envelope.failure().expect("validation failure");
        assert_eq!(failure.status, Some(400));
        assert!(failure.has_errors());
    }
    assert_eq!(add.failure().unwrap().field_messages("Quantity").len(), 1);
    assert_eq!(voucher.failure().unwrap().field_messages("Voucher").len(), 1);
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn every_non_2xx_mutation_is_a_failure_envelope() {
    for status in [400_u16, 401, 403, 404, 409, 422, 500, 502, 503] {
        let checkout = CheckoutBffService::new(Arc::new(FixedResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body: r#"{"title":"Rejected","errors":{"Messages":["nope"]}}"#,
        }));

        let envelope = checkout.remove_shopping_cart_item(product(1)).await.unwrap();

        let failure = envelope.failure().expect("failure envelope");
        assert_eq!(failure.status, Some(status));
        assert_eq!(failure.title.as_deref(), Some("Rejected"));
        assert_eq!(failure.messages().collect::<Vec<_>>(), vec!["nope"]);
    }
}

#[tokio::test]
async fn non_2xx_read_is_rejected_with_envelope() {
    let checkout = CheckoutBffService::new(Arc::new(FixedResponse {
        status: StatusCode::UNAUTHORIZED,
        body: "",
    }));

    let err = checkout.get_shopping_cart().await.unwrap_err();
    assert_eq!(
        err,
        CheckoutBffError::Rejected {
            status: 401,
            result: None
        }
    );

    let checkout = CheckoutBffService::new(Arc::new(FixedResponse {
        status: StatusCode::NOT_FOUND,
        body: r#"{"title":"Not Found","status":404,"errors":{"Messages":["No orders yet"]}}"#,
    }));
    let err = checkout.get_last_order().await.unwrap_err();
    let CheckoutBffError::Rejected {
        status,
        result: Some(result),
    } = err
    else {
        panic!("expected rejected with envelope, got {err:?}");
    };
    assert_eq!(status, 404);
    assert_eq!(result.messages().collect::<Vec<_>>(), vec!["No orders yet"]);
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let checkout = CheckoutBffService::new(Arc::new(FixedResponse {
        status: StatusCode::OK,
        body: r#"{"items": "not a list"}"#,
    }));
    assert!(matches!(
        checkout.get_shopping_cart().await,
        Err(CheckoutBffError::Decode { .. })
    ));

    let checkout = CheckoutBffService::new(Arc::new(FixedResponse {
        status: StatusCode::OK,
        body: "-3",
    }));
    assert!(matches!(
        checkout.get_shopping_cart_quantity().await,
        Err(CheckoutBffError::Decode { .. })
    ));
}

#[tokio::test]
async fn transport_failures_are_errors_not_envelopes() {
    let checkout = CheckoutBffService::new(Arc::new(FailingTransport(
        TransportError::Unreachable("connection refused".to_owned()),
    )));
    assert!(matches!(
        checkout.add_shopping_cart_item(&item(product(1), 1)).await,
        Err(CheckoutBffError::Transport { .. })
    ));

    let checkout = CheckoutBffService::new(Arc::new(FailingTransport(TransportError::Timeout {
        timeout_ms: 250,
    })));
    assert_eq!(
        checkout.apply_voucher(VALID_VOUCHER).await,
        Err(CheckoutBffError::Timeout { timeout_ms: 250 })
    );
}

#[tokio::test]
async fn finish_order_sends_mapped_transaction() {
    let fake = Arc::new(FakeCheckout::default());
    let checkout = gateway(&fake);
    checkout
        .add_shopping_cart_item(&item(product(1), 2))
        .await
        .unwrap();
    let cart = checkout.get_shopping_cart().await.unwrap();

    let transaction = checkout
        .map_to_transaction(&cart, None)
        .with_card("Ana Silva", "4111111111111111", "12/29", "123");
    // The fake has no order route, so the service answers 404.
    let envelope = checkout.finish_order(&transaction).await.unwrap();
    assert_eq!(envelope.failure().and_then(|f| f.status), Some(404));

    let sent = fake.requests().pop().unwrap();
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.path, "orders");
    let body: serde_json::Value = serde_json::from_slice(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["items"][0]["quantity"], 2);
    assert_eq!(body["cardNumber"], "4111111111111111");
    assert_eq!(body["hasVoucher"], false);
}
