//! Checkout BFF gateway
//!
//! Typed client the DevStore web application uses to talk to the checkout
//! (orders) service: shopping cart, vouchers and orders.
//!
//! ## Architecture
//!
//! ```text
//!        controller
//!            │ CheckoutBffClientV1
//!            ▼
//!   ┌──────────────────────┐
//!   │  CheckoutBffService  │  local_client
//!   └──────────────────────┘
//!            │
//!            ▼
//!   ┌──────────────────────┐
//!   │   domain::Service    │  validation, status normalization
//!   └──────────────────────┘
//!            │ CheckoutTransport
//!            ▼
//!   ┌──────────────────────┐
//!   │ HttpCheckoutTransport│  bff_http::HttpClient
//!   └──────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let config = CheckoutBffConfig::load(Some(Path::new("config/checkout.yaml")))?;
//! let checkout = CheckoutBffService::from_config(&config)?;
//! let cart = checkout.get_shopping_cart().await?;
//! ```
//!
//! The public API is defined in `checkout-bff-sdk` and re-exported here.

#![forbid(unsafe_code)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// === PUBLIC API (from SDK) ===
pub use checkout_bff_sdk::{
    Address, CheckoutBffClientV1, CheckoutBffError, DiscountType, Order, OrderItem, OrderStatus,
    ResponseEnvelope, ResponseResult, ShoppingCart, ShoppingCartItem, Transaction, Voucher,
};

// === CLIENT ===
pub mod local_client;
pub use local_client::CheckoutBffService;

pub use config::{CheckoutBffConfig, ConfigError};
pub use domain::ports::{CheckoutRequest, CheckoutResponse, CheckoutTransport, TransportError};

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
