// dishdash_core/src/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReviewError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Body of `POST /review/{mealId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
  pub rating: u8,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub comment: Option<String>,
}

impl ReviewRequest {
  /// Validates the star rating and drops a blank comment.
  pub fn new(rating: u8, comment: Option<&str>) -> Result<Self, ReviewError> {
    if rating == 0 {
      return Err(ReviewError::MissingRating);
    }
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
      return Err(ReviewError::RatingOutOfRange(rating));
    }
    let comment = comment.map(str::trim).filter(|c| !c.is_empty()).map(str::to_string);
    Ok(Self { rating, comment })
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
  #[serde(default)]
  pub review_id: Option<String>,
  #[serde(default)]
  pub meal_id: Option<String>,
  pub rating: u8,
  #[serde(default)]
  pub comment: Option<String>,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}
