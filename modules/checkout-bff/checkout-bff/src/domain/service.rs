//! Domain service for the checkout gateway.
//!
//! Maps each checkout operation onto one call of the [`CheckoutTransport`] and
//! normalizes the answer: mutating calls fold non-2xx statuses into a
//! [`ResponseEnvelope::Failure`], read calls surface them as
//! [`DomainError::Rejected`].

use std::sync::Arc;

use checkout_bff_sdk::{
    Order, ResponseEnvelope, ResponseResult, ShoppingCart, ShoppingCartItem, Transaction,
};
use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

use super::error::DomainError;
use super::ports::{CheckoutRequest, CheckoutResponse, CheckoutTransport};
use super::routes;

/// Field key of locally produced quantity failures.
pub const QUANTITY_FIELD: &str = "Quantity";
/// Field key of locally produced voucher failures.
pub const VOUCHER_FIELD: &str = "Voucher";

/// Checkout operations over a [`CheckoutTransport`].
///
/// Each operation issues at most one outbound request; local validation
/// failures return before anything is sent.
pub struct Service {
    transport: Arc<dyn CheckoutTransport>,
}

impl Service {
    #[must_use]
    pub fn new(transport: Arc<dyn CheckoutTransport>) -> Self {
        Self { transport }
    }

    // === Shopping cart ===

    #[instrument(skip_all, fields(path = routes::SHOPPING_CART))]
    pub async fn get_shopping_cart(&self) -> Result<ShoppingCart, DomainError> {
        self.read(CheckoutRequest::new(Method::GET, routes::SHOPPING_CART))
            .await
    }

    #[instrument(skip_all, fields(path = routes::SHOPPING_CART_QUANTITY))]
    pub async fn get_shopping_cart_quantity(&self) -> Result<u32, DomainError> {
        self.read(CheckoutRequest::new(
            Method::GET,
            routes::SHOPPING_CART_QUANTITY,
        ))
        .await
    }

    #[instrument(
        skip_all,
        fields(path = routes::SHOPPING_CART_ITEMS, product_id = %item.product_id)
    )]
    pub async fn add_shopping_cart_item(
        &self,
        item: &ShoppingCartItem,
    ) -> Result<ResponseEnvelope, DomainError> {
        if let Some(failure) = check_quantity(item.quantity) {
            return Ok(ResponseEnvelope::Failure(failure));
        }
        let request = json_request(Method::POST, routes::SHOPPING_CART_ITEMS, item)?;
        self.submit(request).await
    }

    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn update_shopping_cart_item(
        &self,
        product_id: Uuid,
        item: &ShoppingCartItem,
    ) -> Result<ResponseEnvelope, DomainError> {
        if let Some(failure) = check_quantity(item.quantity) {
            return Ok(ResponseEnvelope::Failure(failure));
        }
        let path = routes::shopping_cart_item(product_id);
        let request = json_request(Method::PUT, path, item)?;
        self.submit(request).await
    }

    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn remove_shopping_cart_item(
        &self,
        product_id: Uuid,
    ) -> Result<ResponseEnvelope, DomainError> {
        let path = routes::shopping_cart_item(product_id);
        self.submit(CheckoutRequest::new(Method::DELETE, path)).await
    }

    #[instrument(skip_all, fields(path = routes::APPLY_VOUCHER))]
    pub async fn apply_voucher(&self, voucher: &str) -> Result<ResponseEnvelope, DomainError> {
        if voucher.trim().is_empty() {
            return Ok(ResponseEnvelope::Failure(ResponseResult::validation(
                VOUCHER_FIELD,
                "Voucher code is required",
            )));
        }
        // The service expects the bare code as a JSON string.
        let request = json_request(Method::POST, routes::APPLY_VOUCHER, voucher)?;
        self.submit(request).await
    }

    // === Orders ===

    #[instrument(skip_all, fields(path = routes::ORDERS, items = transaction.items.len()))]
    pub async fn finish_order(
        &self,
        transaction: &Transaction,
    ) -> Result<ResponseEnvelope, DomainError> {
        let request = json_request(Method::POST, routes::ORDERS, transaction)?;
        self.submit(request).await
    }

    #[instrument(skip_all, fields(path = routes::LAST_ORDER))]
    pub async fn get_last_order(&self) -> Result<Order, DomainError> {
        self.read(CheckoutRequest::new(Method::GET, routes::LAST_ORDER))
            .await
    }

    #[instrument(skip_all, fields(path = routes::CUSTOMER_ORDERS))]
    pub async fn list_customer_orders(&self) -> Result<Vec<Order>, DomainError> {
        self.read(CheckoutRequest::new(Method::GET, routes::CUSTOMER_ORDERS))
            .await
    }

    // === Helpers ===

    async fn dispatch(&self, request: CheckoutRequest) -> Result<CheckoutResponse, DomainError> {
        let route = request.route();
        debug!(%route, has_body = request.body.is_some(), "calling checkout service");

        match self.transport.send(request).await {
            Ok(response) => {
                debug!(%route, status = response.status.as_u16(), "checkout service answered");
                Ok(response)
            }
            Err(e) => {
                error!(%route, error = %e, "checkout service call failed");
                Err(e.into())
            }
        }
    }

    /// Mutating call: the body of a 2xx answer is ignored.
    async fn submit(&self, request: CheckoutRequest) -> Result<ResponseEnvelope, DomainError> {
        let route = request.route();
        let response = self.dispatch(request).await?;
        Ok(envelope_from(&route, &response))
    }

    /// Read call: 2xx bodies decode to `T`, everything else is `Rejected`.
    async fn read<T: DeserializeOwned>(&self, request: CheckoutRequest) -> Result<T, DomainError> {
        let route = request.route();
        let response = self.dispatch(request).await?;

        if !response.status.is_success() {
            let result = parse_failure(&response);
            warn!(
                %route,
                status = response.status.as_u16(),
                has_envelope = result.is_some(),
                "checkout service rejected read"
            );
            return Err(DomainError::Rejected {
                route,
                status: response.status.as_u16(),
                result,
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| DomainError::decode(route, e))
    }
}

fn check_quantity(quantity: i32) -> Option<ResponseResult> {
    (quantity < 1).then(|| {
        ResponseResult::validation(
            QUANTITY_FIELD,
            format!("Quantity must be at least 1, got {quantity}"),
        )
    })
}

fn json_request<B: Serialize + ?Sized>(
    method: Method,
    path: impl Into<String>,
    body: &B,
) -> Result<CheckoutRequest, DomainError> {
    let request = CheckoutRequest::new(method, path);
    let bytes = serde_json::to_vec(body).map_err(|e| DomainError::encode(request.route(), e))?;
    Ok(request.with_json(bytes))
}

/// Normalize the answer to a mutating call.
fn envelope_from(route: &str, response: &CheckoutResponse) -> ResponseEnvelope {
    if response.status.is_success() {
        return ResponseEnvelope::ok();
    }

    let result = parse_failure(response).unwrap_or_else(|| {
        ResponseResult::from_status(
            response.status.as_u16(),
            response.status.canonical_reason().unwrap_or("Unknown status"),
        )
    });
    warn!(
        %route,
        status = response.status.as_u16(),
        failure = %result,
        "checkout service returned a failure envelope"
    );
    ResponseEnvelope::Failure(result)
}

/// Failure envelope carried by a non-2xx body, if the body holds one.
///
/// Missing `status`/`title` are filled in from the HTTP status line.
fn parse_failure(response: &CheckoutResponse) -> Option<ResponseResult> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    let mut result: ResponseResult = serde_json::from_slice(&response.body).ok()?;
    result.status.get_or_insert(response.status.as_u16());
    if result.title.is_none() {
        result.title = response.status.canonical_reason().map(str::to_owned);
    }
    Some(result)
}
