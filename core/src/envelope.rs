// dishdash_core/src/envelope.rs

//! The `{ success, data?, message? }` envelope every backend response uses.

use serde::{Deserialize, Serialize};

use crate::error::BackendError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
  pub success: bool,
  pub data: Option<T>,
  pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
  pub fn ok(data: T) -> Self {
    Self {
      success: true,
      data: Some(data),
      message: None,
    }
  }

  pub fn failure(message: impl Into<String>) -> Self {
    Self {
      success: false,
      data: None,
      message: Some(message.into()),
    }
  }

  /// Unwraps `data`. `fallback` is used when the backend failed without a
  /// message of its own.
  pub fn into_data(self, fallback: &str) -> Result<T, BackendError> {
    if !self.success {
      return Err(self.into_error(fallback));
    }
    self
      .data
      .ok_or_else(|| BackendError::new(format!("{}: response carried no data", fallback)))
  }

  /// For calls whose payload the caller does not need.
  pub fn into_unit(self, fallback: &str) -> Result<(), BackendError> {
    if self.success {
      Ok(())
    } else {
      Err(self.into_error(fallback))
    }
  }

  /// For calls where the backend may or may not echo the resource back.
  pub fn into_optional(self, fallback: &str) -> Result<Option<T>, BackendError> {
    if self.success {
      Ok(self.data)
    } else {
      Err(self.into_error(fallback))
    }
  }

  fn into_error(self, fallback: &str) -> BackendError {
    match self.message {
      Some(message) if !message.trim().is_empty() => BackendError::new(message),
      _ => BackendError::new(fallback),
    }
  }
}
