// dishdash/storefront/src/flows/order_status_flow.rs

use dishdash_core::{
  get_next_possible_statuses, validate_customer_cancel, validate_transition, Notice, Order, OrderStatus, Role, Session,
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::errors::{AppError, Result as AppResult};
use crate::flows::{require_customer, require_status_manager};
use crate::services::backend_gateway::BackendGateway;

/// An order plus what the viewer may do with it next.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
  #[serde(flatten)]
  pub order: Order,
  /// Empty unless the viewer manages order status.
  pub next_statuses: Vec<OrderStatus>,
  pub can_cancel: bool,
  pub can_review: bool,
  pub is_terminal: bool,
}

pub fn describe_order(order: Order, role: Role) -> OrderView {
  let status = order.order_status;
  let next_statuses = if role.may_manage_order_status() {
    get_next_possible_statuses(status)
  } else {
    Vec::new()
  };
  OrderView {
    order,
    next_statuses,
    can_cancel: role.is_customer() && status.customer_can_cancel(),
    can_review: role.is_customer() && status.is_reviewable(),
    is_terminal: status.is_terminal(),
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
  pub order_id: String,
  pub status: OrderStatus,
  pub order: Option<Order>,
  pub notice: Notice,
}

#[instrument(name = "flow::my_orders", skip(backend, session, cookies), fields(user_id = %session.user.id))]
pub async fn my_orders(backend: &dyn BackendGateway, session: &Session, cookies: &str) -> AppResult<Vec<OrderView>> {
  let role = session.user.role;
  let orders = backend.get_my_orders(cookies).await?;
  Ok(orders.into_iter().map(|order| describe_order(order, role)).collect())
}

/// Platform-wide listing for admins.
#[instrument(name = "flow::all_orders", skip(backend, session, cookies), fields(user_id = %session.user.id))]
pub async fn all_orders(backend: &dyn BackendGateway, session: &Session, cookies: &str) -> AppResult<Vec<OrderView>> {
  if !session.user.role.is_admin() {
    return Err(AppError::Forbidden("Only admins can view all orders".to_string()));
  }
  let orders = backend.get_all_orders(cookies).await?;
  Ok(orders.into_iter().map(|order| describe_order(order, Role::Admin)).collect())
}

#[instrument(name = "flow::order_details", skip(backend, session, cookies))]
pub async fn order_details(
  backend: &dyn BackendGateway,
  session: &Session,
  cookies: &str,
  order_id: &str,
) -> AppResult<OrderView> {
  let order = backend.get_order_details(cookies, order_id).await?;
  Ok(describe_order(order, session.user.role))
}

/// Moves an order one step along the status table on behalf of a provider or admin.
#[instrument(name = "flow::advance_order_status", skip(backend, session, cookies), fields(user_id = %session.user.id))]
pub async fn advance_order_status(
  backend: &dyn BackendGateway,
  session: &Session,
  cookies: &str,
  order_id: &str,
  requested: OrderStatus,
) -> AppResult<StatusChange> {
  require_status_manager(session)?;

  let current = backend.get_order_details(cookies, order_id).await?;
  validate_transition(current.order_status, requested)?;

  let order = backend.update_order_status(cookies, order_id, requested).await?;
  info!(from = %current.order_status, to = %requested, "Order status updated.");
  Ok(StatusChange {
    order_id: order_id.to_string(),
    status: requested,
    order,
    notice: Notice::success(format!("Order marked as {}", requested)),
  })
}

/// Customer cancellation, only while the kitchen has not started.
#[instrument(name = "flow::cancel_order", skip(backend, session, cookies), fields(user_id = %session.user.id))]
pub async fn cancel_order(
  backend: &dyn BackendGateway,
  session: &Session,
  cookies: &str,
  order_id: &str,
) -> AppResult<StatusChange> {
  require_customer(session, "cancel their orders")?;

  let current = backend.get_order_details(cookies, order_id).await?;
  validate_customer_cancel(current.order_status)?;

  let order = backend
    .update_order_status(cookies, order_id, OrderStatus::Cancelled)
    .await?;
  info!("Order cancelled by customer.");
  Ok(StatusChange {
    order_id: order_id.to_string(),
    status: OrderStatus::Cancelled,
    order,
    notice: Notice::success("Order cancelled successfully"),
  })
}
