// dishdash/storefront/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use dishdash_core::{BackendError, CartError, CheckoutError, Notice, ReviewError, StatusError, StorageError};
use serde_json::json;
use thiserror::Error;

/// Message shown when a call fails before the backend could answer.
pub const GENERIC_FAILURE: &str = "Something went wrong!";

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Forbidden: {0}")]
  Forbidden(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Cart Error: {0}")]
  Cart(#[from] CartError),

  #[error("Checkout Error: {0}")]
  Checkout(#[from] CheckoutError),

  #[error("Order Status Error: {0}")]
  Status(#[from] StatusError),

  #[error("Review Error: {0}")]
  Review(#[from] ReviewError),

  #[error("Cart Storage Error: {0}")]
  Storage(#[from] StorageError),

  // The backend answered with `success: false`; its message is user-facing.
  #[error("Backend Error: {0}")]
  Backend(#[from] BackendError),

  // The backend or auth service could not be reached or sent something undecodable.
  #[error("Upstream Transport Error: {0}")]
  Transport(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// What the UI should show for this error.
  pub fn notice(&self) -> Notice {
    match self {
      AppError::Auth(m) | AppError::Forbidden(m) | AppError::NotFound(m) => {
        Notice::error(m.clone())
      }
      AppError::Cart(e) => Notice::from(e),
      AppError::Checkout(e) => Notice::from(e),
      AppError::Status(e) => Notice::from(e),
      AppError::Review(e) => Notice::from(e),
      AppError::Backend(e) => Notice::from(e),
      AppError::Storage(_) => Notice::error("Could not save your cart. Please try again."),
      AppError::Config(_) | AppError::Transport(_) | AppError::Internal(_) => Notice::error(GENERIC_FAILURE),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Checkout(_) | AppError::Review(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::Forbidden(_) => StatusCode::FORBIDDEN,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Cart(CartError::InvalidPrice { .. }) => StatusCode::BAD_REQUEST,
      AppError::Cart(CartError::Storage { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
      AppError::Cart(CartError::Loading) => StatusCode::SERVICE_UNAVAILABLE,
      AppError::Cart(_) => StatusCode::CONFLICT,
      AppError::Status(StatusError::Unknown(_)) => StatusCode::BAD_REQUEST,
      AppError::Status(_) => StatusCode::CONFLICT,
      AppError::Backend(_) => StatusCode::UNPROCESSABLE_ENTITY,
      AppError::Transport(_) => StatusCode::BAD_GATEWAY,
      AppError::Config(_) | AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    if self.status_code().is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Responding with error");
    }
    let notice = self.notice();
    HttpResponse::build(self.status_code()).json(json!({
      "error": notice.message,
      "notice": notice,
    }))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
