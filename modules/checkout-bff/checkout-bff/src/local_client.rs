//! Client adapter implementing the SDK API trait.
//!
//! Bridges the domain service to the public `CheckoutBffClientV1` trait so that
//! controllers only depend on `checkout-bff-sdk`.

use std::sync::Arc;

use async_trait::async_trait;
use bff_http::{HttpClient, HttpClientBuilder, HttpError};
use checkout_bff_sdk::{
    CheckoutBffClientV1, CheckoutBffError, Order, ResponseEnvelope, ShoppingCart,
    ShoppingCartItem, Transaction,
};
use uuid::Uuid;

use crate::config::CheckoutBffConfig;
use crate::domain::ports::CheckoutTransport;
use crate::domain::service::Service;
use crate::infra::http_transport::HttpCheckoutTransport;

/// Checkout gateway used by the web application.
///
/// Cheap to clone; share one instance per process.
#[derive(Clone)]
pub struct CheckoutBffService {
    service: Arc<Service>,
}

impl CheckoutBffService {
    /// Gateway over an arbitrary transport (tests use in-memory fakes).
    #[must_use]
    pub fn new(transport: Arc<dyn CheckoutTransport>) -> Self {
        Self {
            service: Arc::new(Service::new(transport)),
        }
    }

    /// Gateway over HTTP, built from configuration.
    ///
    /// Must be called within a Tokio runtime.
    ///
    /// # Errors
    /// Returns `HttpError` if the HTTP client cannot be built (TLS roots, user agent)
    pub fn from_config(config: &CheckoutBffConfig) -> Result<Self, HttpError> {
        let client = HttpClientBuilder::with_config(config.http_client_config()).build()?;
        Ok(Self::with_http_client(client, config))
    }

    /// Gateway over an already built HTTP client.
    #[must_use]
    pub fn with_http_client(client: HttpClient, config: &CheckoutBffConfig) -> Self {
        let transport = HttpCheckoutTransport::new(client, config.base_url.clone());
        Self::new(Arc::new(transport))
    }
}

#[async_trait]
impl CheckoutBffClientV1 for CheckoutBffService {
    async fn get_shopping_cart(&self) -> Result<ShoppingCart, CheckoutBffError> {
        self.service.get_shopping_cart().await.map_err(Into::into)
    }

    async fn get_shopping_cart_quantity(&self) -> Result<u32, CheckoutBffError> {
        self.service
            .get_shopping_cart_quantity()
            .await
            .map_err(Into::into)
    }

    async fn add_shopping_cart_item(
        &self,
        item: &ShoppingCartItem,
    ) -> Result<ResponseEnvelope, CheckoutBffError> {
        self.service
            .add_shopping_cart_item(item)
            .await
            .map_err(Into::into)
    }

    async fn update_shopping_cart_item(
        &self,
        product_id: Uuid,
        item: &ShoppingCartItem,
    ) -> Result<ResponseEnvelope, CheckoutBffError> {
        self.service
            .update_shopping_cart_item(product_id, item)
            .await
            .map_err(Into::into)
    }

    async fn remove_shopping_cart_item(
        &self,
        product_id: Uuid,
    ) -> Result<ResponseEnvelope, CheckoutBffError> {
        self.service
            .remove_shopping_cart_item(product_id)
            .await
            .map_err(Into::into)
    }

    async fn apply_voucher(&self, voucher: &str) -> Result<ResponseEnvelope, CheckoutBffError> {
        self.service.apply_voucher(voucher).await.map_err(Into::into)
    }

    async fn finish_order(
        &self,
        transaction: &Transaction,
    ) -> Result<ResponseEnvelope, CheckoutBffError> {
        self.service
            .finish_order(transaction)
            .await
            .map_err(Into::into)
    }

    async fn get_last_order(&self) -> Result<Order, CheckoutBffError> {
        self.service.get_last_order().await.map_err(Into::into)
    }

    async fn list_customer_orders(&self) -> Result<Vec<Order>, CheckoutBffError> {
        self.service.list_customer_orders().await.map_err(Into::into)
    }
}
