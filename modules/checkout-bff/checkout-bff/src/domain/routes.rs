//! Route table of the checkout service.
//!
//! Paths are relative so that a base URL with a path prefix
//! (`https://gateway/checkout/`) keeps its prefix when they are joined.

use uuid::Uuid;

pub const SHOPPING_CART: &str = "orders/shopping-cart/";
pub const SHOPPING_CART_QUANTITY: &str = "orders/shopping-cart/quantity/";
pub const SHOPPING_CART_ITEMS: &str = "orders/shopping-cart/items/";
pub const APPLY_VOUCHER: &str = "orders/shopping-cart/aplicar-voucher/";
pub const ORDERS: &str = "orders";
pub const LAST_ORDER: &str = "orders/last";
pub const CUSTOMER_ORDERS: &str = "orders/customers";

/// `orders/shopping-cart/items/{productId}`
#[must_use]
pub fn shopping_cart_item(product_id: Uuid) -> String {
    format!("{SHOPPING_CART_ITEMS}{}", product_id.hyphenated())
}
