// dishdash/storefront/src/flows/mod.rs

//! Multi-step storefront operations: each one checks who is asking, applies
//! the order policy locally and only then calls the backend.

pub mod checkout_flow;
pub mod order_status_flow;
pub mod review_flow;

use dishdash_core::Session;

use crate::errors::{AppError, Result as AppResult};

pub(crate) fn require_customer(session: &Session, action: &str) -> AppResult<()> {
  if session.user.role.is_customer() {
    Ok(())
  } else {
    Err(AppError::Forbidden(format!("Only customers can {}", action)))
  }
}

pub(crate) fn require_status_manager(session: &Session) -> AppResult<()> {
  if session.user.role.may_manage_order_status() {
    Ok(())
  } else {
    Err(AppError::Forbidden("Only providers and admins can update order status".to_string()))
  }
}
