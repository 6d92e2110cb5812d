// dishdash/storefront/src/services/backend_mock.rs

//! In-memory stand-ins for the backend and auth service, for handler and flow tests.

use async_trait::async_trait;
use chrono::Utc;
use dishdash_core::{
  BackendError, CreateOrderRequest, Order, OrderLine, OrderStatus, Review, ReviewRequest, Role, Session, SessionUser,
};
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::errors::{AppError, Result as AppResult};
use crate::services::backend_gateway::BackendGateway;
use crate::services::session_service::SessionGateway;

#[derive(Debug, Default)]
pub struct MockBackendGateway {
  orders: Mutex<HashMap<String, Order>>,
  created: Mutex<Vec<CreateOrderRequest>>,
  status_updates: Mutex<Vec<(String, OrderStatus)>>,
  reviews: Mutex<Vec<(String, ReviewRequest)>>,
  reject_with: Mutex<Option<String>>,
}

impl MockBackendGateway {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_order(self, order: Order) -> Self {
    self.orders.lock().insert(order.order_id.clone(), order);
    self
  }

  /// Every following call answers `success: false` with `message`.
  pub fn reject_with(&self, message: &str) {
    *self.reject_with.lock() = Some(message.to_string());
  }

  pub fn created_orders(&self) -> Vec<CreateOrderRequest> {
    self.created.lock().clone()
  }

  pub fn status_updates(&self) -> Vec<(String, OrderStatus)> {
    self.status_updates.lock().clone()
  }

  pub fn reviews(&self) -> Vec<(String, ReviewRequest)> {
    self.reviews.lock().clone()
  }

  fn check_rejection(&self) -> AppResult<()> {
    match self.reject_with.lock().as_ref() {
      Some(message) => Err(AppError::Backend(BackendError::new(message.clone()))),
      None => Ok(()),
    }
  }

  fn find(&self, order_id: &str) -> AppResult<Order> {
    self
      .orders
      .lock()
      .get(order_id)
      .cloned()
      .ok_or_else(|| AppError::Backend(BackendError::new("Order not found")))
  }
}

pub fn sample_order(order_id: &str, status: OrderStatus, meal_ids: &[&str]) -> Order {
  let items = meal_ids
    .iter()
    .map(|meal_id| OrderLine {
      meal_id: Some(meal_id.to_string()),
      meal_name: format!("Meal {}", meal_id),
      quantity: 1,
      price: 10.0,
      order_item_id: None,
    })
    .collect::<Vec<_>>();
  Order {
    order_id: order_id.to_string(),
    order_status: status,
    order_amount: 10.0 * items.len() as f64,
    order_delivery_address: "12 Lake Road".to_string(),
    created_at: Utc::now(),
    updated_at: Utc::now(),
    restaurant_name: "Spice Hub".to_string(),
    customer_name: "Sam".to_string(),
    items: Some(items),
  }
}

pub fn session_for(role: Role) -> Session {
  Session {
    user: SessionUser {
      id: "u1".to_string(),
      name: "Sam".to_string(),
      email: "sam@example.com".to_string(),
      role,
      status: Some("ACTIVE".to_string()),
    },
  }
}

#[async_trait]
impl BackendGateway for MockBackendGateway {
  async fn create_order(&self, _cookies: &str, request: &CreateOrderRequest) -> AppResult<Order> {
    self.check_rejection()?;
    self.created.lock().push(request.clone());
    let order_id = format!("order-{}", self.created.lock().len());
    let mut order = sample_order(&order_id, OrderStatus::Placed, &[]);
    order.order_delivery_address = request.delivery_address.clone();
    order.items = Some(
      request
        .items
        .iter()
        .map(|line| OrderLine {
          meal_id: Some(line.meal_id.clone()),
          meal_name: format!("Meal {}", line.meal_id),
          quantity: line.quantity,
          price: 10.0,
          order_item_id: None,
        })
        .collect(),
    );
    self.orders.lock().insert(order_id, order.clone());
    Ok(order)
  }

  async fn update_order_status(&self, _cookies: &str, order_id: &str, status: OrderStatus) -> AppResult<Option<Order>> {
    self.check_rejection()?;
    let mut order = self.find(order_id)?;
    order.order_status = status;
    self.orders.lock().insert(order_id.to_string(), order.clone());
    self.status_updates.lock().push((order_id.to_string(), status));
    Ok(Some(order))
  }

  async fn get_my_orders(&self, _cookies: &str) -> AppResult<Vec<Order>> {
    self.check_rejection()?;
    Ok(self.orders.lock().values().cloned().collect())
  }

  async fn get_all_orders(&self, _cookies: &str) -> AppResult<Vec<Order>> {
    self.check_rejection()?;
    Ok(self.orders.lock().values().cloned().collect())
  }

  async fn get_order_details(&self, _cookies: &str, order_id: &str) -> AppResult<Order> {
    self.check_rejection()?;
    self.find(order_id)
  }

  async fn create_review(&self, _cookies: &str, meal_id: &str, review: &ReviewRequest) -> AppResult<Review> {
    self.check_rejection()?;
    self.reviews.lock().push((meal_id.to_string(), review.clone()));
    Ok(Review {
      review_id: Some(format!("review-{}", self.reviews.lock().len())),
      meal_id: Some(meal_id.to_string()),
      rating: review.rating,
      comment: review.comment.clone(),
      created_at: Some(Utc::now()),
    })
  }
}

/// Resolves any non-empty cookie header to a fixed session.
#[derive(Debug)]
pub struct MockSessionGateway {
  session: Option<Session>,
}

impl MockSessionGateway {
  pub fn signed_in(role: Role) -> Self {
    Self {
      session: Some(session_for(role)),
    }
  }

  pub fn signed_out() -> Self {
    Self { session: None }
  }
}

#[async_trait]
impl SessionGateway for MockSessionGateway {
  async fn get_session(&self, cookies: &str) -> AppResult<Option<Session>> {
    if cookies.is_empty() {
      return Ok(None);
    }
    Ok(self.session.clone())
  }
}
