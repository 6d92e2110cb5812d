// dishdash/storefront/src/services/session_service.rs

//! Looks up the caller's session at the external auth service.

use async_trait::async_trait;
use dishdash_core::Session;
use reqwest::header::COOKIE;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::errors::{AppError, Result as AppResult};

#[async_trait]
pub trait SessionGateway: Send + Sync {
  /// `Ok(None)` when the auth service knows no session for these cookies.
  async fn get_session(&self, cookies: &str) -> AppResult<Option<Session>>;
}

#[derive(Debug, Clone)]
pub struct HttpSessionGateway {
  client: Client,
  auth_url: String,
}

impl HttpSessionGateway {
  pub fn new(auth_url: impl Into<String>) -> AppResult<Self> {
    let client = Client::builder()
      .build()
      .map_err(|e| AppError::Config(format!("Failed to build auth HTTP client: {}", e)))?;
    Ok(Self {
      client,
      auth_url: auth_url.into(),
    })
  }
}

#[async_trait]
impl SessionGateway for HttpSessionGateway {
  #[instrument(name = "auth::get_session", skip(self, cookies), err(Display))]
  async fn get_session(&self, cookies: &str) -> AppResult<Option<Session>> {
    if cookies.is_empty() {
      debug!("No cookies on request, skipping session lookup.");
      return Ok(None);
    }

    let response = self
      .client
      .get(format!("{}/get-session", self.auth_url))
      .header(COOKIE, cookies)
      .send()
      .await
      .map_err(|e| {
        warn!(error = %e, "Auth service unreachable.");
        AppError::Transport(e.to_string())
      })?;

    // The auth service answers `null` when there is no session.
    let session = response.json::<Option<Session>>().await.map_err(|e| {
      warn!(error = %e, "Auth service sent an undecodable session.");
      AppError::Transport(e.to_string())
    })?;
    debug!(found = session.is_some(), "Session lookup finished.");
    Ok(session)
  }
}
