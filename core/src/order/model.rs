// dishdash_core/src/order/model.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::item::{deserialize_price, CheckoutData, CheckoutLine};
use crate::error::CheckoutError;
use crate::order::status::OrderStatus;

/// An order as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub order_id: String,
  pub order_status: OrderStatus,
  /// Priced by the backend; sent as a decimal string.
  #[serde(deserialize_with = "deserialize_price")]
  pub order_amount: f64,
  pub order_delivery_address: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  #[serde(default)]
  pub restaurant_name: String,
  #[serde(default)]
  pub customer_name: String,
  #[serde(default)]
  pub items: Option<Vec<OrderLine>>,
}

impl Order {
  pub fn lines(&self) -> &[OrderLine] {
    self.items.as_deref().unwrap_or_default()
  }

  pub fn contains_meal(&self, meal_id: &str) -> bool {
    self.lines().iter().any(|line| line.meal_id.as_deref() == Some(meal_id))
  }

  pub fn next_possible_statuses(&self) -> &'static [OrderStatus] {
    self.order_status.next_possible_statuses()
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
  /// Absent in some provider-facing listings.
  #[serde(default)]
  pub meal_id: Option<String>,
  pub meal_name: String,
  pub quantity: u32,
  /// Unit price at the time the order was placed.
  #[serde(deserialize_with = "deserialize_price")]
  pub price: f64,
  #[serde(default)]
  pub order_item_id: Option<String>,
}

impl OrderLine {
  pub fn line_total(&self) -> f64 {
    self.price * f64::from(self.quantity)
  }
}

/// Body of `POST /order/create`. Carries no prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
  pub delivery_address: String,
  pub provider_id: String,
  pub items: Vec<CheckoutLine>,
}

impl CreateOrderRequest {
  pub fn from_checkout(delivery_address: &str, checkout: CheckoutData) -> Result<Self, CheckoutError> {
    let delivery_address = delivery_address.trim();
    if delivery_address.is_empty() {
      return Err(CheckoutError::MissingAddress);
    }
    if checkout.items.is_empty() {
      return Err(CheckoutError::EmptyCart);
    }
    Ok(Self {
      delivery_address: delivery_address.to_string(),
      provider_id: checkout.provider_id,
      items: checkout.items,
    })
  }
}

/// Body of `PATCH /order/{orderId}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
  pub status: OrderStatus,
}
