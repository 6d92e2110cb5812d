// dishdash_core/src/notice.rs

//! User-facing notices emitted by cart operations and flows.
//!
//! A `Notice` is what a UI renders as a toast: a level, a message, and an
//! optional follow-up action the user can trigger from the notice itself.

use serde::{Deserialize, Serialize};

use crate::error::{BackendError, CartError, CheckoutError, ReviewError, StatusError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
  Success,
  Error,
  Info,
}

/// Action offered alongside a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeAction {
  /// Empty the cart so items from another provider can be added.
  ClearCart,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
  pub level: NoticeLevel,
  pub message: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub action: Option<NoticeAction>,
}

impl Notice {
  pub fn success(message: impl Into<String>) -> Self {
    Self {
      level: NoticeLevel::Success,
      message: message.into(),
      action: None,
    }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self {
      level: NoticeLevel::Error,
      message: message.into(),
      action: None,
    }
  }

  pub fn info(message: impl Into<String>) -> Self {
    Self {
      level: NoticeLevel::Info,
      message: message.into(),
      action: None,
    }
  }

  pub fn with_action(mut self, action: NoticeAction) -> Self {
    self.action = Some(action);
    self
  }

  pub fn is_error(&self) -> bool {
    self.level == NoticeLevel::Error
  }
}

impl From<&CartError> for Notice {
  fn from(err: &CartError) -> Self {
    match err {
      CartError::ProviderMismatch { .. } => Notice::error(err.to_string()).with_action(NoticeAction::ClearCart),
      // Storage details stay in the logs.
      CartError::Storage { .. } => Notice::error("Could not save your cart. Please try again."),
      _ => Notice::error(err.to_string()),
    }
  }
}

impl From<&StatusError> for Notice {
  fn from(err: &StatusError) -> Self {
    Notice::error(err.to_string())
  }
}

impl From<&BackendError> for Notice {
  fn from(err: &BackendError) -> Self {
    Notice::error(err.message.clone())
  }
}

impl From<&ReviewError> for Notice {
  fn from(err: &ReviewError) -> Self {
    Notice::error(err.to_string())
  }
}

impl From<&CheckoutError> for Notice {
  fn from(err: &CheckoutError) -> Self {
    Notice::error(err.to_string())
  }
}
