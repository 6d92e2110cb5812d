// dishdash/storefront/src/flows/review_flow.rs

use dishdash_core::{Notice, Review, ReviewRequest, Session, StatusError};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::errors::{AppError, Result as AppResult};
use crate::flows::require_customer;
use crate::services::backend_gateway::BackendGateway;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReview {
  pub meal_id: String,
  /// Zero means no star was picked.
  #[serde(default)]
  pub rating: u8,
  #[serde(default)]
  pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmittedReview {
  pub review: Review,
  pub notice: Notice,
}

/// Reviews one meal of a delivered order.
#[instrument(
  name = "flow::submit_review",
  skip(backend, session, cookies, submission),
  fields(user_id = %session.user.id, meal_id = %submission.meal_id, rating = submission.rating)
)]
pub async fn submit_review(
  backend: &dyn BackendGateway,
  session: &Session,
  cookies: &str,
  order_id: &str,
  submission: SubmitReview,
) -> AppResult<SubmittedReview> {
  require_customer(session, "review meals")?;
  let request = ReviewRequest::new(submission.rating, submission.comment.as_deref())?;

  let order = backend.get_order_details(cookies, order_id).await?;
  if !order.order_status.is_reviewable() {
    return Err(StatusError::NotReviewable(order.order_status).into());
  }
  if !order.contains_meal(&submission.meal_id) {
    return Err(AppError::NotFound(format!(
      "Meal {} is not part of order {}",
      submission.meal_id, order_id
    )));
  }

  let review = backend.create_review(cookies, &submission.meal_id, &request).await?;
  info!("Review submitted.");
  Ok(SubmittedReview {
    review,
    notice: Notice::success("Review submitted successfully"),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::services::backend_mock::{sample_order, session_for, MockBackendGateway};
  use dishdash_core::{OrderStatus, ReviewError, Role};

  fn submission(meal_id: &str, rating: u8) -> SubmitReview {
    SubmitReview {
      meal_id: meal_id.to_string(),
      rating,
      comment: Some(" Crispy and hot ".to_string()),
    }
  }

  #[tokio::test]
  async fn delivered_meal_can_be_reviewed() {
    let backend = MockBackendGateway::new().with_order(sample_order("o1", OrderStatus::Delivered, &["m1", "m2"]));

    let submitted = submit_review(&backend, &session_for(Role::Customer), "sid=1", "o1", submission("m2", 5))
      .await
      .unwrap();

    assert_eq!(submitted.review.rating, 5);
    let sent = backend.reviews();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "m2");
    assert_eq!(sent[0].1.comment.as_deref(), Some("Crispy and hot"));
  }

  #[tokio::test]
  async fn missing_rating_stops_before_backend() {
    let backend = MockBackendGateway::new().with_order(sample_order("o1", OrderStatus::Delivered, &["m1"]));

    let err = submit_review(&backend, &session_for(Role::Customer), "sid=1", "o1", submission("m1", 0))
      .await
      .unwrap_err();

    assert!(matches!(err, AppError::Review(ReviewError::MissingRating)));
    assert_eq!(err.notice().message, "Please select a rating");
    assert!(backend.reviews().is_empty());
  }

  #[tokio::test]
  async fn undelivered_orders_are_not_reviewable() {
    let backend = MockBackendGateway::new().with_order(sample_order("o1", OrderStatus::Ready, &["m1"]));

    let err = submit_review(&backend, &session_for(Role::Customer), "sid=1", "o1", submission("m1", 4))
      .await
      .unwrap_err();
    assert!(matches!(err, AppError::Status(StatusError::NotReviewable(OrderStatus::Ready))));
  }

  #[tokio::test]
  async fn meal_must_belong_to_the_order() {
    let backend = MockBackendGateway::new().with_order(sample_order("o1", OrderStatus::Delivered, &["m1"]));

    let err = submit_review(&backend, &session_for(Role::Customer), "sid=1", "o1", submission("m9", 4))
      .await
      .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
  }
}
