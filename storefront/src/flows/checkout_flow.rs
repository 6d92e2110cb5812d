// dishdash/storefront/src/flows/checkout_flow.rs

use dishdash_core::{CartStore, CheckoutError, CreateOrderRequest, Notice, Order, Session};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::errors::Result as AppResult;
use crate::flows::require_customer;
use crate::services::backend_gateway::BackendGateway;

#[derive(Debug, Serialize)]
pub struct PlacedOrder {
  pub order: Order,
  pub notice: Notice,
}

/// Turns the cart into an order.
///
/// The cart is emptied only after the backend accepted the order; any
/// earlier failure leaves it exactly as it was.
#[instrument(
  name = "flow::place_order",
  skip(backend, session, cookies, cart, delivery_address),
  fields(user_id = %session.user.id, cart_key = %cart.storage_key())
)]
pub async fn place_order(
  backend: &dyn BackendGateway,
  session: &Session,
  cookies: &str,
  cart: &mut CartStore,
  delivery_address: &str,
) -> AppResult<PlacedOrder> {
  require_customer(session, "place orders")?;

  if delivery_address.trim().is_empty() {
    return Err(CheckoutError::MissingAddress.into());
  }
  let checkout = cart.get_checkout_data().ok_or(CheckoutError::EmptyCart)?;
  let request = CreateOrderRequest::from_checkout(delivery_address, checkout)?;

  let order = backend.create_order(cookies, &request).await?;
  info!(order_id = %order.order_id, lines = request.items.len(), "Order placed.");

  // The order exists at this point; a cart that fails to clear is only logged.
  if let Err(e) = cart.clear_cart().await {
    warn!(error = %e, order_id = %order.order_id, "Order placed but the cart could not be cleared.");
  }

  Ok(PlacedOrder {
    order,
    notice: Notice::success("Order placed successfully!"),
  })
}
