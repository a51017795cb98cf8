//! View models exchanged with the checkout service.
//!
//! Field names follow the upstream JSON contract (camelCase). Money is carried
//! as JSON numbers and held as [`Decimal`].

use chrono::{DateTime, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A line of the shopping cart; also the payload of add/update item calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingCartItem {
    pub product_id: Uuid,
    #[serde(default)]
    pub name: String,
    /// Unit price
    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ShoppingCartItem {
    /// Item carrying only what the cart endpoints need to identify and count a product.
    #[must_use]
    pub fn new(product_id: Uuid, quantity: i32) -> Self {
        Self {
            product_id,
            name: String::new(),
            amount: Decimal::ZERO,
            quantity,
            image: None,
        }
    }
}

/// How a voucher discount is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum DiscountType {
    #[default]
    Percentage,
    Value,
}

impl From<i32> for DiscountType {
    fn from(code: i32) -> Self {
        if code == 1 { Self::Value } else { Self::Percentage }
    }
}

impl From<DiscountType> for i32 {
    fn from(kind: DiscountType) -> Self {
        match kind {
            DiscountType::Percentage => 0,
            DiscountType::Value => 1,
        }
    }
}

/// Voucher applied to a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    #[serde(default, alias = "voucher")]
    pub code: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub percentage: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub discount_type: DiscountType,
}

/// The customer's cart as reported by the checkout service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShoppingCart {
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    pub items: Vec<ShoppingCartItem>,
    pub has_voucher: bool,
    pub voucher: Option<Voucher>,
}

impl ShoppingCart {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item quantities.
    #[must_use]
    pub fn quantity(&self) -> i64 {
        self.items.iter().map(|item| i64::from(item.quantity)).sum()
    }

    #[must_use]
    pub fn item(&self, product_id: Uuid) -> Option<&ShoppingCartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }
}

/// Delivery address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub street_address: String,
    pub building_number: String,
    pub secondary_address: String,
    pub neighborhood: String,
    pub zip_code: String,
    pub city: String,
    pub state: String,
}

/// Payload of the finish-order call.
///
/// Built from a cart with [`Transaction::from_cart`]; the card fields are filled
/// in by the caller from the checkout form.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub items: Vec<ShoppingCartItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    pub has_voucher: bool,
    #[serde(default)]
    pub voucher: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    /// `MM/YY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_code: Option<String>,
}

// Card number and security code stay out of logs.
impl std::fmt::Debug for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("amount", &self.amount)
            .field("items", &self.items)
            .field("discount", &self.discount)
            .field("has_voucher", &self.has_voucher)
            .field("voucher", &self.voucher)
            .field("address", &self.address)
            .field("holder", &self.holder)
            .field("card_number", &self.card_number.as_ref().map(|_| "<redacted>"))
            .field("expiration_date", &self.expiration_date)
            .field(
                "security_code",
                &self.security_code.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl Transaction {
    /// Structural copy of a cart into an order payload.
    ///
    /// Amount, items, discount and voucher data come from the cart. A supplied
    /// address is cloned; without one the transaction has no address. Nothing is
    /// validated and card fields stay unset.
    #[must_use]
    pub fn from_cart(cart: &ShoppingCart, address: Option<&Address>) -> Self {
        Self {
            amount: cart.total,
            items: cart.items.clone(),
            discount: cart.discount,
            has_voucher: cart.has_voucher,
            voucher: cart.voucher.as_ref().and_then(|v| v.code.clone()),
            address: address.cloned(),
            ..Self::default()
        }
    }

    /// Attach payment card details entered by the customer.
    #[must_use]
    pub fn with_card(
        mut self,
        holder: impl Into<String>,
        card_number: impl Into<String>,
        expiration_date: impl Into<String>,
        security_code: impl Into<String>,
    ) -> Self {
        self.holder = Some(holder.into());
        self.card_number = Some(card_number.into());
        self.expiration_date = Some(expiration_date.into());
        self.security_code = Some(security_code.into());
        self
    }
}

/// Order lifecycle status as numbered by the checkout service.
///
/// Unknown codes are kept rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum OrderStatus {
    Authorized,
    Paid,
    Refused,
    Delivered,
    Canceled,
    Unknown(i32),
}

impl From<i32> for OrderStatus {
    fn from(code: i32) -> Self {
        match code {
            1 => Self::Authorized,
            2 => Self::Paid,
            3 => Self::Refused,
            4 => Self::Delivered,
            5 => Self::Canceled,
            other => Self::Unknown(other),
        }
    }
}

impl From<OrderStatus> for i32 {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Authorized => 1,
            OrderStatus::Paid => 2,
            OrderStatus::Refused => 3,
            OrderStatus::Delivered => 4,
            OrderStatus::Canceled => 5,
            OrderStatus::Unknown(code) => code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: Uuid,
    #[serde(default)]
    pub name: String,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub image: Option<String>,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub code: i32,
    pub status: OrderStatus,
    #[serde(deserialize_with = "deserialize_order_date")]
    pub date: NaiveDateTime,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(default)]
    pub has_voucher: bool,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// Accepts RFC 3339 timestamps (normalized to UTC) and offset-less ISO timestamps.
fn deserialize_order_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(with_offset.naive_utc());
    }
    raw.parse::<NaiveDateTime>()
        .map_err(|e| serde::de::Error::custom(format!("invalid order date '{raw}': {e}")))
}
