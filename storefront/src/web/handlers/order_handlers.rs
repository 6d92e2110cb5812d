// dishdash/storefront/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use dishdash_core::{next_statuses_for, OrderStatus};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::flows::order_status_flow::{advance_order_status, all_orders, cancel_order, my_orders, order_details};
use crate::state::AppState;
use crate::web::extractors::CurrentSession;

#[derive(Deserialize, Debug)]
pub struct StatusPayload {
  pub status: String,
}

#[instrument(name = "handler::my_orders", skip(app_state, current), fields(user_id = %current.session.user.id))]
pub async fn my_orders_handler(
  app_state: web::Data<AppState>,
  current: CurrentSession,
) -> Result<HttpResponse, AppError> {
  let orders = my_orders(app_state.backend.as_ref(), &current.session, &current.cookies).await?;
  Ok(HttpResponse::Ok().json(json!({ "orders": orders })))
}

#[instrument(name = "handler::all_orders", skip(app_state, current), fields(user_id = %current.session.user.id))]
pub async fn all_orders_handler(
  app_state: web::Data<AppState>,
  current: CurrentSession,
) -> Result<HttpResponse, AppError> {
  let orders = all_orders(app_state.backend.as_ref(), &current.session, &current.cookies).await?;
  Ok(HttpResponse::Ok().json(json!({ "orders": orders })))
}

#[instrument(name = "handler::order_details", skip(app_state, current), fields(user_id = %current.session.user.id))]
pub async fn order_details_handler(
  app_state: web::Data<AppState>,
  current: CurrentSession,
  order_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let view = order_details(app_state.backend.as_ref(), &current.session, &current.cookies, &order_id).await?;
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(name = "handler::update_order_status", skip(app_state, current, payload), fields(user_id = %current.session.user.id, status = %payload.status))]
pub async fn update_status_handler(
  app_state: web::Data<AppState>,
  current: CurrentSession,
  order_id: web::Path<String>,
  payload: web::Json<StatusPayload>,
) -> Result<HttpResponse, AppError> {
  let requested = payload.status.parse::<OrderStatus>()?;
  let change = advance_order_status(
    app_state.backend.as_ref(),
    &current.session,
    &current.cookies,
    &order_id,
    requested,
  )
  .await?;
  Ok(HttpResponse::Ok().json(change))
}

#[instrument(name = "handler::cancel_order", skip(app_state, current), fields(user_id = %current.session.user.id))]
pub async fn cancel_order_handler(
  app_state: web::Data<AppState>,
  current: CurrentSession,
  order_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let change = cancel_order(app_state.backend.as_ref(), &current.session, &current.cookies, &order_id).await?;
  Ok(HttpResponse::Ok().json(change))
}

/// Unknown statuses simply have nowhere to go.
pub async fn next_statuses_handler(status: web::Path<String>) -> HttpResponse {
  HttpResponse::Ok().json(json!({
    "status": status.as_str(),
    "nextStatuses": next_statuses_for(&status),
  }))
}
