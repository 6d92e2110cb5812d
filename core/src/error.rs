// dishdash_core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::order::OrderStatus;

/// Rejections raised by the cart aggregate. None of these mutate the cart.
#[derive(Debug, Error)]
pub enum CartError {
  #[error("{meal_name} is already in your cart. You can update quantity in cart page.")]
  DuplicateMeal { meal_id: String, meal_name: String },

  #[error("You already have items from {current_provider_name}. Please clear cart to order from {requested_provider_name}.")]
  ProviderMismatch {
    current_provider_id: String,
    current_provider_name: String,
    requested_provider_id: String,
    requested_provider_name: String,
  },

  #[error("Invalid price for {meal_name}: {price}")]
  InvalidPrice { meal_name: String, price: f64 },

  /// The stored cart has not been read yet.
  #[error("Your cart is still loading. Please try again.")]
  Loading,

  #[error("Failed to persist cart. Source: {source}")]
  Storage {
    #[from]
    source: StorageError,
  },
}

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("Cart record could not be (de)serialized: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Storage backend failed for key '{key}'. Source: {source}")]
  Backend {
    key: String,
    #[source]
    source: AnyhowError,
  },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
  #[error("Order cannot move from {from} to {to}")]
  IllegalTransition { from: OrderStatus, to: OrderStatus },

  #[error("Order is {0} and can no longer be cancelled")]
  NotCancellable(OrderStatus),

  #[error("Order is {0} and cannot be reviewed yet")]
  NotReviewable(OrderStatus),

  #[error("Unknown order status: {0}")]
  Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
  #[error("Please select a rating")]
  MissingRating,

  #[error("Rating must be between 1 and 5, got {0}")]
  RatingOutOfRange(u8),
}

/// A well-formed failure reported by the backend (`success: false`), or a
/// success envelope that lacked the payload the caller needed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendError {
  pub message: String,
}

impl BackendError {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into() }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
  #[error("Please enter delivery address")]
  MissingAddress,

  #[error("Your cart is empty")]
  EmptyCart,
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
