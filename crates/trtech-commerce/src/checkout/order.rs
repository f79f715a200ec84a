//! Order types.

use super::details::DeliveryDetails;
use crate::cart::CartLineItem;
use crate::catalog::Condition;
use crate::ids::{OrderId, ProductId};
use crate::money::{self, Currency, Money};
use crate::CommerceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order paid and closed. Counts towards revenue.
    Completed,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CommerceError> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CommerceError::UnknownValue {
                kind: "order status",
                value: s.to_string(),
            })
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    /// Arranged outside the shop, e.g. over the messaging channel.
    #[default]
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Transfer,
        PaymentMethod::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CommerceError> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CommerceError::UnknownValue {
                kind: "payment method",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Refunded => "Refunded",
        }
    }
}

/// A product line on an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Unit price at time of order.
    #[serde(with = "money::as_decimal")]
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl OrderItem {
    pub fn from_line(line: &CartLineItem) -> Self {
        Self {
            product_id: line.id.clone(),
            product_name: line.name.clone(),
            quantity: line.quantity,
            price: line.price,
            condition: Some(line.condition.clone()),
            image: line.image.clone(),
        }
    }

    /// `price × quantity`.
    pub fn subtotal(&self) -> Money {
        self.price.saturating_multiply(i64::from(self.quantity))
    }
}

/// Customer identity on an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderCustomer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Payload for `POST /orders`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer: OrderCustomer,
    pub shipping_address: String,
    pub items: Vec<OrderItem>,
    #[serde(with = "money::as_decimal")]
    pub subtotal: Money,
    #[serde(with = "money::as_decimal")]
    pub total_amount: Money,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub notes: String,
}

impl NewOrder {
    /// Build the order for a checkout.
    ///
    /// Fails on an empty cart or incomplete details.
    pub fn from_checkout(
        items: &[CartLineItem],
        details: &DeliveryDetails,
    ) -> Result<Self, CommerceError> {
        if items.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        details.validate()?;

        let items: Vec<OrderItem> = items.iter().map(OrderItem::from_line).collect();
        let cents = items
            .iter()
            .try_fold(0i64, |acc, i| {
                i.price
                    .try_multiply(i64::from(i.quantity))
                    .and_then(|m| acc.checked_add(m.amount_cents))
            })
            .ok_or(CommerceError::Overflow)?;
        let total = Money::new(cents, Currency::ZAR);

        Ok(Self {
            customer: OrderCustomer {
                name: details.name.trim().to_string(),
                email: details.email.trim().to_string(),
                phone: details.phone.trim().to_string(),
            },
            shipping_address: details.address_line(),
            items,
            subtotal: total,
            total_amount: total,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: PaymentMethod::Other,
            notes: details.notes.clone(),
        })
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

/// An order as stored by the backend.
///
/// Older records carry the customer as flat `customerName`/`email`/`phone`
/// fields and the amount as `total`; both layouts are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: OrderId,
    #[serde(default)]
    pub customer: OrderCustomer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(
        default,
        with = "money::option_as_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_amount: Option<Money>,
    #[serde(
        default,
        with = "money::option_as_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub total: Option<Money>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn customer_name(&self) -> &str {
        if !self.customer.name.is_empty() {
            return &self.customer.name;
        }
        self.customer_name.as_deref().unwrap_or("")
    }

    pub fn customer_email(&self) -> &str {
        if !self.customer.email.is_empty() {
            return &self.customer.email;
        }
        self.email.as_deref().unwrap_or("")
    }

    pub fn customer_phone(&self) -> &str {
        if !self.customer.phone.is_empty() {
            return &self.customer.phone;
        }
        self.phone.as_deref().unwrap_or("")
    }

    /// Order amount, preferring `totalAmount` over `total`.
    pub fn amount(&self) -> Money {
        self.total_amount.or(self.total).unwrap_or_default()
    }

    /// Short upper-case reference shown to staff, e.g. `#A1B2C3`.
    pub fn reference(&self) -> String {
        format!("#{}", self.id.short().to_uppercase())
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
