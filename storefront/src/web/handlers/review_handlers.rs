// dishdash/storefront/src/web/handlers/review_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::instrument;

use crate::errors::AppError;
use crate::flows::review_flow::{submit_review, SubmitReview};
use crate::state::AppState;
use crate::web::extractors::CurrentSession;

#[instrument(name = "handler::submit_review", skip(app_state, current, payload), fields(user_id = %current.session.user.id))]
pub async fn submit_review_handler(
  app_state: web::Data<AppState>,
  current: CurrentSession,
  order_id: web::Path<String>,
  payload: web::Json<SubmitReview>,
) -> Result<HttpResponse, AppError> {
  let submitted = submit_review(
    app_state.backend.as_ref(),
    &current.session,
    &current.cookies,
    &order_id,
    payload.into_inner(),
  )
  .await?;
  Ok(HttpResponse::Created().json(submitted))
}
