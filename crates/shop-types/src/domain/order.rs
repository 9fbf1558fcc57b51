use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::cart::CartItem;
use crate::domain::product::Product;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Re-applying the current status is allowed and changes nothing.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (Pending, Processing)
                | (Pending, Cancelled)
                | (Processing, Shipped)
                | (Processing, Cancelled)
                | (Shipped, Delivered)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid status. Must be one of: pending, processing, shipped, delivered, cancelled")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        OrderStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == wanted)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot move order from {from} to {to}")]
pub struct StatusTransitionError {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    BankTransfer,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    pub country: String,
}

/// Price snapshot of one cart line at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub product_name: String,
    #[serde(rename = "price", with = "crate::domain::money::dollars")]
    pub unit_price_cents: i64,
    pub quantity: u32,
    pub size: f32,
    pub color: String,
    #[serde(rename = "itemTotal", with = "crate::domain::money::dollars")]
    pub line_total_cents: i64,
}

impl OrderLine {
    pub fn price(item: &CartItem, product: &Product) -> anyhow::Result<Self> {
        let line_total = product
            .price_cents
            .checked_mul(i64::from(item.quantity))
            .ok_or_else(|| anyhow::anyhow!("line total overflow for {}", product.id))?;
        Ok(Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            unit_price_cents: product.price_cents,
            quantity: item.quantity,
            size: item.size,
            color: item.color.clone(),
            line_total_cents: line_total,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: String,
    pub items: Vec<OrderLine>,
    #[serde(rename = "totalAmount", with = "crate::domain::money::dollars")]
    pub total_cents: i64,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        user_id: String,
        items: Vec<OrderLine>,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> anyhow::Result<Self> {
        if user_id.trim().is_empty() {
            anyhow::bail!("user_id empty");
        }
        if items.is_empty() {
            anyhow::bail!("Cannot create order with empty cart");
        }
        for it in &items {
            if it.quantity == 0 {
                anyhow::bail!("item qty must be > 0");
            }
        }
        for (field, value) in [
            ("street", &shipping_address.street),
            ("city", &shipping_address.city),
            ("country", &shipping_address.country),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("shipping address {field} empty");
            }
        }
        let total = items
            .iter()
            .try_fold(0i64, |acc, it| acc.checked_add(it.line_total_cents))
            .ok_or_else(|| anyhow::anyhow!("order total overflow"))?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            items,
            total_cents: total,
            shipping_address,
            payment_method,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a status change. Returns whether anything changed.
    pub fn update_status(&mut self, status: OrderStatus) -> Result<bool, StatusTransitionError> {
        if !self.status.can_transition_to(status) {
            return Err(StatusTransitionError {
                from: self.status,
                to: status,
            });
        }
        if self.status == status {
            return Ok(false);
        }
        self.status = status;
        self.updated_at = Utc::now();
        Ok(true)
    }
}
