#![allow(dead_code)]

//! In-memory stand-in for the checkout service.

use std::sync::Mutex;

use async_trait::async_trait;
use checkout_bff::{
    CheckoutRequest, CheckoutResponse, CheckoutTransport, ShoppingCart, ShoppingCartItem,
    TransportError, Voucher,
};
use http::{Method, StatusCode};
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

pub const VALID_VOUCHER: &str = "SUMMER10";

/// Behaves like the orders service for the cart routes and records every request.
#[derive(Default)]
pub struct FakeCheckout {
    cart: Mutex<ShoppingCart>,
    requests: Mutex<Vec<CheckoutRequest>>,
}

impl FakeCheckout {
    pub fn with_cart(cart: ShoppingCart) -> Self {
        Self {
            cart: Mutex::new(cart),
            requests: Mutex::default(),
        }
    }

    pub fn requests(&self) -> Vec<CheckoutRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn cart(&self) -> ShoppingCart {
        self.cart.lock().unwrap().clone()
    }

    fn handle(&self, request: &CheckoutRequest) -> CheckoutResponse {
        let mut cart = self.cart.lock().unwrap();
        let path = request.path.as_str();

        if let Some(id) = path.strip_prefix("orders/shopping-cart/items/")
            && !id.is_empty()
        {
            let Ok(product_id) = Uuid::parse_str(id) else {
                return failure(StatusCode::BAD_REQUEST, "Invalid product id");
            };
            return match request.method {
                Method::DELETE => remove_item(&mut cart, product_id),
                Method::PUT => {
                    let item: ShoppingCartItem = parse_body(request);
                    update_item(&mut cart, product_id, item.quantity)
                }
                _ => empty(StatusCode::METHOD_NOT_ALLOWED),
            };
        }

        match (&request.method, path) {
            (&Method::GET, "orders/shopping-cart/") => ok_json(&*cart),
            (&Method::GET, "orders/shopping-cart/quantity/") => {
                ok_json(&json!(cart.quantity()))
            }
            (&Method::POST, "orders/shopping-cart/items/") => {
                let item: ShoppingCartItem = parse_body(request);
                add_item(&mut cart, item);
                empty(StatusCode::OK)
            }
            (&Method::POST, "orders/shopping-cart/aplicar-voucher/") => {
                let code: String = parse_body(request);
                if code == VALID_VOUCHER {
                    cart.has_voucher = true;
                    cart.voucher = Some(Voucher {
                        code: Some(code),
                        percentage: Some(Decimal::new(10, 0)),
                        ..Voucher::default()
                    });
                    empty(StatusCode::OK)
                } else {
                    failure(StatusCode::BAD_REQUEST, "Voucher not found")
                }
            }
            _ => empty(StatusCode::NOT_FOUND),
        }
    }
}

#[async_trait]
impl CheckoutTransport for FakeCheckout {
    async fn send(&self, request: CheckoutRequest) -> Result<CheckoutResponse, TransportError> {
        let response = self.handle(&request);
        self.requests.lock().unwrap().push(request);
        Ok(response)
    }
}

/// Transport that always fails below the HTTP level.
pub struct FailingTransport(pub TransportError);

#[async_trait]
impl CheckoutTransport for FailingTransport {
    async fn send(&self, _request: CheckoutRequest) -> Result<CheckoutResponse, TransportError> {
        Err(self.0.clone())
    }
}

/// Transport answering every request with the same status and body.
pub struct FixedResponse {
    pub status: StatusCode,
    pub body: &'static str,
}

#[async_trait]
impl CheckoutTransport for FixedResponse {
    async fn send(&self, _request: CheckoutRequest) -> Result<CheckoutResponse, TransportError> {
        Ok(CheckoutResponse::new(self.status, self.body))
    }
}

pub fn product(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn item(product_id: Uuid, quantity: i32) -> ShoppingCartItem {
    ShoppingCartItem {
        name: format!("Product {product_id}"),
        amount: Decimal::new(1990, 2),
        ..ShoppingCartItem::new(product_id, quantity)
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(request: &CheckoutRequest) -> T {
    serde_json::from_slice(request.body.as_deref().unwrap_or_default()).unwrap()
}

fn add_item(cart: &mut ShoppingCart, item: ShoppingCartItem) {
    match cart.items.iter_mut().find(|i| i.product_id == item.product_id) {
        Some(existing) => existing.quantity += item.quantity,
        None => cart.items.push(item),
    }
    recompute_total(cart);
}

fn update_item(cart: &mut ShoppingCart, product_id: Uuid, quantity: i32) -> CheckoutResponse {
    let Some(existing) = cart.items.iter_mut().find(|i| i.product_id == product_id) else {
        return failure(StatusCode::NOT_FOUND, "Item not found in shopping cart");
    };
    existing.quantity = quantity;
    recompute_total(cart);
    empty(StatusCode::OK)
}

fn remove_item(cart: &mut ShoppingCart, product_id: Uuid) -> CheckoutResponse {
    let before = cart.items.len();
    cart.items.retain(|i| i.product_id != product_id);
    if cart.items.len() == before {
        return failure(StatusCode::NOT_FOUND, "Item not found in shopping cart");
    }
    recompute_total(cart);
    empty(StatusCode::OK)
}

fn recompute_total(cart: &mut ShoppingCart) {
    cart.total = cart
        .items
        .iter()
        .map(|i| i.amount * Decimal::from(i.quantity))
        .sum();
}

fn ok_json<T: serde::Serialize + ?Sized>(body: &T) -> CheckoutResponse {
    CheckoutResponse::new(StatusCode::OK, serde_json::to_vec(body).unwrap())
}

fn empty(status: StatusCode) -> CheckoutResponse {
    CheckoutResponse::new(status, "")
}

fn failure(status: StatusCode, message: &str) -> CheckoutResponse {
    let body = json!({
        "title": status.canonical_reason(),
        "status": status.as_u16(),
        "errors": { "Messages": [message] },
    });
    CheckoutResponse::new(status, serde_json::to_vec(&body).unwrap())
}
