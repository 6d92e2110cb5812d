// dishdash_core/src/order/status.rs

//! Order status values and the transition policy.
//!
//! The backend owns order state and re-validates every transition. The table
//! here decides what a UI may offer and lets callers reject an obviously stale
//! request before it leaves the process.
//!
//! ```text
//! PLACED ──► PREPARING ──► READY ──► DELIVERED
//!   │
//!   └──────► CANCELLED
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StatusError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
  Placed,
  Preparing,
  Ready,
  Delivered,
  Cancelled,
}

impl OrderStatus {
  pub const ALL: [OrderStatus; 5] = [
    OrderStatus::Placed,
    OrderStatus::Preparing,
    OrderStatus::Ready,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      OrderStatus::Placed => "PLACED",
      OrderStatus::Preparing => "PREPARING",
      OrderStatus::Ready => "READY",
      OrderStatus::Delivered => "DELIVERED",
      OrderStatus::Cancelled => "CANCELLED",
    }
  }

  /// Statuses a provider or admin may move the order to next, in the order
  /// they should be offered.
  pub fn next_possible_statuses(self) -> &'static [OrderStatus] {
    match self {
      OrderStatus::Placed => &[OrderStatus::Preparing, OrderStatus::Cancelled],
      OrderStatus::Preparing => &[OrderStatus::Ready],
      OrderStatus::Ready => &[OrderStatus::Delivered],
      OrderStatus::Delivered | OrderStatus::Cancelled => &[],
    }
  }

  pub fn can_transition_to(self, next: OrderStatus) -> bool {
    self.next_possible_statuses().contains(&next)
  }

  pub fn is_terminal(self) -> bool {
    self.next_possible_statuses().is_empty()
  }

  /// Customers may only cancel, and only before the kitchen starts.
  pub fn customer_can_cancel(self) -> bool {
    self == OrderStatus::Placed
  }

  /// Meals of an order can be reviewed once it has been delivered.
  pub fn is_reviewable(self) -> bool {
    self == OrderStatus::Delivered
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for OrderStatus {
  type Err = StatusError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    OrderStatus::ALL
      .into_iter()
      .find(|status| status.as_str() == s)
      .ok_or_else(|| StatusError::Unknown(s.to_string()))
  }
}

pub fn get_next_possible_statuses(current: OrderStatus) -> Vec<OrderStatus> {
  current.next_possible_statuses().to_vec()
}

/// String entry point: unknown statuses have no next statuses.
pub fn next_statuses_for(current: &str) -> Vec<OrderStatus> {
  current
    .parse::<OrderStatus>()
    .map(get_next_possible_statuses)
    .unwrap_or_default()
}

/// Pre-flight check for a provider/admin transition.
pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<(), StatusError> {
  if from.can_transition_to(to) {
    Ok(())
  } else {
    Err(StatusError::IllegalTransition { from, to })
  }
}

/// Pre-flight check for a customer cancellation.
pub fn validate_customer_cancel(current: OrderStatus) -> Result<(), StatusError> {
  if current.customer_can_cancel() {
    Ok(())
  } else {
    Err(StatusError::NotCancellable(current))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wire_names_round_trip_through_from_str() {
    for status in OrderStatus::ALL {
      assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
      assert_eq!(serde_json::to_value(status).unwrap(), serde_json::json!(status.as_str()));
    }
    assert_eq!(
      "placed".parse::<OrderStatus>(),
      Err(StatusError::Unknown("placed".to_string()))
    );
  }

  #[test]
  fn terminal_states_have_no_exits() {
    assert!(OrderStatus::Delivered.is_terminal());
    assert!(OrderStatus::Cancelled.is_terminal());
    assert!(!OrderStatus::Placed.is_terminal());
  }
}
