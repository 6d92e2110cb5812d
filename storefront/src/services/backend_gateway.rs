// dishdash/storefront/src/services/backend_gateway.rs

//! Typed adapter over the marketplace backend's REST API.
//!
//! Every call forwards the shopper's cookies (the backend authenticates from
//! them), decodes the `{ success, data?, message? }` envelope into a concrete
//! type and turns `success: false` into [`AppError::Backend`] carrying the
//! backend's message. Nothing is retried.

use async_trait::async_trait;
use dishdash_core::{ApiEnvelope, CreateOrderRequest, Order, OrderStatus, Review, ReviewRequest, UpdateOrderStatusRequest};
use reqwest::header::COOKIE;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::errors::{AppError, Result as AppResult, GENERIC_FAILURE};

const CREATE_ORDER_FAILED: &str = "Failed to create order";
const FETCH_ORDER_FAILED: &str = "Failed to fetch order details!";
const UPDATE_STATUS_FAILED: &str = "Failed to update order status!";

#[async_trait]
pub trait BackendGateway: Send + Sync {
  async fn create_order(&self, cookies: &str, request: &CreateOrderRequest) -> AppResult<Order>;

  /// Returns the updated order when the backend echoes it back.
  async fn update_order_status(&self, cookies: &str, order_id: &str, status: OrderStatus) -> AppResult<Option<Order>>;

  async fn get_my_orders(&self, cookies: &str) -> AppResult<Vec<Order>>;

  async fn get_all_orders(&self, cookies: &str) -> AppResult<Vec<Order>>;

  async fn get_order_details(&self, cookies: &str, order_id: &str) -> AppResult<Order>;

  async fn create_review(&self, cookies: &str, meal_id: &str, review: &ReviewRequest) -> AppResult<Review>;
}

#[derive(Debug, Clone)]
pub struct HttpBackendGateway {
  client: Client,
  base_url: String,
}

impl HttpBackendGateway {
  pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
    let client = Client::builder()
      .build()
      .map_err(|e| AppError::Config(format!("Failed to build backend HTTP client: {}", e)))?;
    Ok(Self::with_client(client, base_url))
  }

  pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
    Self {
      client,
      base_url: base_url.into(),
    }
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, cookies: &str) -> AppResult<ApiEnvelope<T>> {
    let request = if cookies.is_empty() {
      request
    } else {
      request.header(COOKIE, cookies)
    };

    let response = request.send().await.map_err(|e| {
      warn!(error = %e, "Backend request failed before a response arrived.");
      AppError::Transport(e.to_string())
    })?;

    // Failures still come back as envelopes, whatever the HTTP status.
    let http_status = response.status();
    debug!(%http_status, "Backend responded.");
    response.json::<ApiEnvelope<T>>().await.map_err(|e| {
      warn!(error = %e, %http_status, "Backend response was not a valid envelope.");
      AppError::Transport(format!("{} ({})", GENERIC_FAILURE, e))
    })
  }
}

#[async_trait]
impl BackendGateway for HttpBackendGateway {
  #[instrument(name = "backend::create_order", skip(self, cookies, request), fields(provider_id = %request.provider_id, lines = request.items.len()), err(Display))]
  async fn create_order(&self, cookies: &str, request: &CreateOrderRequest) -> AppResult<Order> {
    let envelope: ApiEnvelope<Order> = self
      .send(self.client.post(self.url("/order/create")).json(request), cookies)
      .await?;
    Ok(envelope.into_data(CREATE_ORDER_FAILED)?)
  }

  #[instrument(name = "backend::update_order_status", skip(self, cookies), err(Display))]
  async fn update_order_status(&self, cookies: &str, order_id: &str, status: OrderStatus) -> AppResult<Option<Order>> {
    let body = UpdateOrderStatusRequest { status };
    let envelope: ApiEnvelope<Order> = self
      .send(
        self.client.patch(self.url(&format!("/order/{}/status", order_id))).json(&body),
        cookies,
      )
      .await?;
    Ok(envelope.into_optional(UPDATE_STATUS_FAILED)?)
  }

  #[instrument(name = "backend::get_my_orders", skip(self, cookies), err(Display))]
  async fn get_my_orders(&self, cookies: &str) -> AppResult<Vec<Order>> {
    let envelope: ApiEnvelope<Vec<Order>> = self.send(self.client.get(self.url("/order/my-orders")), cookies).await?;
    Ok(envelope.into_data(FETCH_ORDER_FAILED)?)
  }

  #[instrument(name = "backend::get_all_orders", skip(self, cookies), err(Display))]
  async fn get_all_orders(&self, cookies: &str) -> AppResult<Vec<Order>> {
    let envelope: ApiEnvelope<Vec<Order>> = self.send(self.client.get(self.url("/order/all-order")), cookies).await?;
    Ok(envelope.into_data(FETCH_ORDER_FAILED)?)
  }

  #[instrument(name = "backend::get_order_details", skip(self, cookies), err(Display))]
  async fn get_order_details(&self, cookies: &str, order_id: &str) -> AppResult<Order> {
    let envelope: ApiEnvelope<Order> = self
      .send(self.client.get(self.url(&format!("/order/details/{}", order_id))), cookies)
      .await?;
    Ok(envelope.into_data(FETCH_ORDER_FAILED)?)
  }

  #[instrument(name = "backend::create_review", skip(self, cookies, review), fields(rating = review.rating), err(Display))]
  async fn create_review(&self, cookies: &str, meal_id: &str, review: &ReviewRequest) -> AppResult<Review> {
    let envelope: ApiEnvelope<Review> = self
      .send(
        self.client.post(self.url(&format!("/review/{}", meal_id))).json(review),
        cookies,
      )
      .await?;
    Ok(envelope.into_data(GENERIC_FAILURE)?)
  }
}
