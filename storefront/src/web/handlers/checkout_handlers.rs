// dishdash/storefront/src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use dishdash_core::CheckoutError;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::flows::checkout_flow::place_order;
use crate::state::AppState;
use crate::web::extractors::{CartSession, CurrentSession};
use crate::web::handlers::cart_handlers::CartView;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
  #[serde(default)]
  pub delivery_address: String,
}

#[instrument(
  name = "handler::place_order",
  skip(app_state, current, payload),
  fields(user_id = %current.session.user.id, cart_id = %cart_session.cart_id)
)]
pub async fn place_order_handler(
  app_state: web::Data<AppState>,
  cart_session: CartSession,
  current: CurrentSession,
  payload: web::Json<CheckoutPayload>,
) -> Result<HttpResponse, AppError> {
  // No cart cookie means nothing was ever added.
  if cart_session.issued {
    return Err(CheckoutError::EmptyCart.into());
  }
  let mut cart = app_state.carts.cart(&cart_session.cart_id).await?;
  let placed = place_order(
    app_state.backend.as_ref(),
    &current.session,
    &current.cookies,
    &mut cart,
    &payload.delivery_address,
  )
  .await?;

  info!(order_id = %placed.order.order_id, "Checkout completed.");
  Ok(HttpResponse::Created().json(json!({
    "order": placed.order,
    "notice": placed.notice,
    "cart": CartView::from_store(&cart),
  })))
}
