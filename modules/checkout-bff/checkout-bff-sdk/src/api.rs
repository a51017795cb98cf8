//! `CheckoutBffClientV1` trait definition.

use async_trait::async_trait;
use uuid::Uuid;

use crate::envelope::ResponseEnvelope;
use crate::errors::CheckoutBffError;
use crate::models::{Address, Order, ShoppingCart, ShoppingCartItem, Transaction};

/// Checkout operations available to the web application's controllers.
///
/// Mutating calls return a [`ResponseEnvelope`]: `Failure` carries the checkout
/// service's validation or business messages and is an ordinary outcome.
/// `Err` is reserved for transport problems and unreadable responses.
///
/// ```ignore
/// let client: Arc<dyn CheckoutBffClientV1> = ...;
/// match client.apply_voucher("SUMMER10").await? {
///     ResponseEnvelope::Success(()) => redirect_to_cart(),
///     ResponseEnvelope::Failure(result) => show_errors(result.messages()),
/// }
/// ```
#[async_trait]
pub trait CheckoutBffClientV1: Send + Sync {
    /// Current cart of the customer, possibly empty.
    async fn get_shopping_cart(&self) -> Result<ShoppingCart, CheckoutBffError>;

    /// Number of items in the cart.
    async fn get_shopping_cart_quantity(&self) -> Result<u32, CheckoutBffError>;

    /// Add a product; `item.quantity` must be at least 1.
    async fn add_shopping_cart_item(
        &self,
        item: &ShoppingCartItem,
    ) -> Result<ResponseEnvelope, CheckoutBffError>;

    /// Replace the cart line of `product_id`; `item.quantity` must be at least 1.
    async fn update_shopping_cart_item(
        &self,
        product_id: Uuid,
        item: &ShoppingCartItem,
    ) -> Result<ResponseEnvelope, CheckoutBffError>;

    async fn remove_shopping_cart_item(
        &self,
        product_id: Uuid,
    ) -> Result<ResponseEnvelope, CheckoutBffError>;

    /// Apply a voucher code; blank codes are rejected without calling the service.
    async fn apply_voucher(&self, voucher: &str) -> Result<ResponseEnvelope, CheckoutBffError>;

    /// Submit the order.
    async fn finish_order(
        &self,
        transaction: &Transaction,
    ) -> Result<ResponseEnvelope, CheckoutBffError>;

    async fn get_last_order(&self) -> Result<Order, CheckoutBffError>;

    /// Orders of the current customer.
    async fn list_customer_orders(&self) -> Result<Vec<Order>, CheckoutBffError>;

    /// Build the finish-order payload from a cart. Pure; see [`Transaction::from_cart`].
    fn map_to_transaction(&self, cart: &ShoppingCart, address: Option<&Address>) -> Transaction {
        Transaction::from_cart(cart, address)
    }
}
