// dishdash/storefront/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse, HttpResponseBuilder};
use dishdash_core::{CartLineItem, CartStore, NewCartItem, Notice};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::CartSession;

/// The cart as the UI renders it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
  pub items: Vec<CartLineItem>,
  pub provider_id: Option<String>,
  pub provider_name: Option<String>,
  pub total: f64,
  pub item_count: u64,
  pub is_loading: bool,
}

impl CartView {
  pub fn from_store(cart: &CartStore) -> Self {
    Self {
      items: cart.items().to_vec(),
      provider_id: cart.provider_id().map(str::to_string),
      provider_name: cart.provider_name().map(str::to_string),
      total: cart.get_cart_total(),
      item_count: cart.get_item_count(),
      is_loading: cart.is_loading(),
    }
  }

  /// What a browser without a cart cookie sees.
  pub fn empty() -> Self {
    Self {
      items: Vec::new(),
      provider_id: None,
      provider_name: None,
      total: 0.0,
      item_count: 0,
      is_loading: false,
    }
  }
}

#[derive(Deserialize, Debug)]
pub struct UpdateQuantityPayload {
  pub quantity: i64,
}

/// Starts a 200 response, setting the cart cookie if this request created the cart.
pub(crate) fn cart_response(app_state: &AppState, cart_session: &CartSession) -> HttpResponseBuilder {
  let mut builder = HttpResponse::Ok();
  if let Some(cookie) = cart_session.new_cookie(&app_state.config.cart_cookie_name) {
    builder.cookie(cookie);
  }
  builder
}

fn with_notice(cart: &CartStore, notice: Notice) -> serde_json::Value {
  json!({ "cart": CartView::from_store(cart), "notice": notice })
}

#[instrument(name = "handler::get_cart", skip(app_state), fields(cart_id = %cart_session.cart_id))]
pub async fn get_cart_handler(
  app_state: web::Data<AppState>,
  cart_session: CartSession,
) -> Result<HttpResponse, AppError> {
  // Reads never open a cart; the cookie is issued on the first add.
  if cart_session.issued {
    return Ok(HttpResponse::Ok().json(CartView::empty()));
  }
  let cart = app_state.carts.cart(&cart_session.cart_id).await?;
  Ok(cart_response(&app_state, &cart_session).json(CartView::from_store(&cart)))
}

#[instrument(
  name = "handler::add_to_cart",
  skip(app_state, payload),
  fields(cart_id = %cart_session.cart_id, meal_id = %payload.meal_id, provider_id = %payload.provider_id)
)]
pub async fn add_item_handler(
  app_state: web::Data<AppState>,
  cart_session: CartSession,
  payload: web::Json<NewCartItem>,
) -> Result<HttpResponse, AppError> {
  let mut cart = app_state.carts.cart(&cart_session.cart_id).await?;
  let notice = cart.add_item(payload.into_inner()).await?;
  info!(items = cart.items().len(), "Item added to cart.");
  Ok(cart_response(&app_state, &cart_session).json(with_notice(&cart, notice)))
}

#[instrument(name = "handler::update_cart_quantity", skip(app_state, payload), fields(cart_id = %cart_session.cart_id, quantity = payload.quantity))]
pub async fn update_quantity_handler(
  app_state: web::Data<AppState>,
  cart_session: CartSession,
  meal_id: web::Path<String>,
  payload: web::Json<UpdateQuantityPayload>,
) -> Result<HttpResponse, AppError> {
  let mut cart = app_state.carts.cart(&cart_session.cart_id).await?;
  let notice = cart.update_quantity(&meal_id, payload.quantity).await?;
  Ok(cart_response(&app_state, &cart_session).json(with_notice(&cart, notice)))
}

#[instrument(name = "handler::remove_from_cart", skip(app_state), fields(cart_id = %cart_session.cart_id))]
pub async fn remove_item_handler(
  app_state: web::Data<AppState>,
  cart_session: CartSession,
  meal_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let mut cart = app_state.carts.cart(&cart_session.cart_id).await?;
  let notice = cart.remove_item(&meal_id).await?;
  Ok(cart_response(&app_state, &cart_session).json(with_notice(&cart, notice)))
}

#[instrument(name = "handler::clear_cart", skip(app_state), fields(cart_id = %cart_session.cart_id))]
pub async fn clear_cart_handler(
  app_state: web::Data<AppState>,
  cart_session: CartSession,
) -> Result<HttpResponse, AppError> {
  let mut cart = app_state.carts.cart(&cart_session.cart_id).await?;
  let notice = cart.clear_cart().await?;
  Ok(cart_response(&app_state, &cart_session).json(with_notice(&cart, notice)))
}

#[instrument(name = "handler::checkout_data", skip(app_state), fields(cart_id = %cart_session.cart_id))]
pub async fn checkout_data_handler(
  app_state: web::Data<AppState>,
  cart_session: CartSession,
) -> Result<HttpResponse, AppError> {
  if cart_session.issued {
    return Ok(HttpResponse::Ok().json(json!({ "checkoutData": null })));
  }
  let cart = app_state.carts.cart(&cart_session.cart_id).await?;
  Ok(cart_response(&app_state, &cart_session).json(json!({ "checkoutData": cart.get_checkout_data() })))
}
