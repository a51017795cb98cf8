//! Checkout BFF SDK
//!
//! Public contract of the `checkout_bff` gateway:
//! - `CheckoutBffClientV1` trait
//! - view models for carts, transactions and orders
//! - the `ResponseEnvelope` / `ResponseResult` result envelope
//! - error type (`CheckoutBffError`)
//!
//! ## Usage
//!
//! ```ignore
//! use checkout_bff_sdk::{CheckoutBffClientV1, ResponseEnvelope};
//!
//! let cart = client.get_shopping_cart().await?;
//! let transaction = client.map_to_transaction(&cart, Some(&address));
//! if let ResponseEnvelope::Failure(result) = client.finish_order(&transaction).await? {
//!     for message in result.messages() {
//!         // show to the customer
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod envelope;
pub mod errors;
pub mod models;

pub use api::CheckoutBffClientV1;
pub use envelope::{ResponseEnvelope, ResponseResult};
pub use errors::CheckoutBffError;
pub use models::{
    Address, DiscountType, Order, OrderItem, OrderStatus, ShoppingCart, ShoppingCartItem,
    Transaction, Voucher,
};
