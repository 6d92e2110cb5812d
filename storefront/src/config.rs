// dishdash/storefront/src/config.rs

use crate::errors::{AppError, Result};
use dishdash_core::DEFAULT_CART_STORAGE_KEY;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  // External services this storefront fronts
  pub backend_url: String,
  pub auth_url: String,

  // Cart persistence
  pub cart_storage_dir: PathBuf,
  pub cart_storage_key: String,
  pub cart_cookie_name: String,
  /// How long an untouched cart stays in memory before it is re-read from storage.
  pub cart_idle_ttl: Duration,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let backend_url = normalize_base_url(&get_env("BACKEND_URL")?, "BACKEND_URL")?;
    let auth_url = normalize_base_url(&get_env("AUTH_URL")?, "AUTH_URL")?;

    let cart_storage_dir = PathBuf::from(get_env("CART_STORAGE_DIR").unwrap_or_else(|_| "./data/carts".to_string()));
    let cart_storage_key = get_env("CART_STORAGE_KEY").unwrap_or_else(|_| DEFAULT_CART_STORAGE_KEY.to_string());
    let cart_cookie_name = get_env("CART_COOKIE_NAME").unwrap_or_else(|_| "dishdash_cart".to_string());
    let cart_idle_ttl = get_env("CART_IDLE_TTL_SECS")
      .unwrap_or_else(|_| "1800".to_string())
      .parse::<u64>()
      .map(Duration::from_secs)
      .map_err(|e| AppError::Config(format!("Invalid CART_IDLE_TTL_SECS: {}", e)))?;

    tracing::info!(%backend_url, %auth_url, "Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      backend_url,
      auth_url,
      cart_storage_dir,
      cart_storage_key,
      cart_cookie_name,
      cart_idle_ttl,
    })
  }
}

/// Trims trailing slashes so paths can be appended with `format!("{}/...")`.
fn normalize_base_url(raw: &str, var_name: &str) -> Result<String> {
  let trimmed = raw.trim().trim_end_matches('/');
  if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
    return Err(AppError::Config(format!(
      "{} must be an http(s) URL, got '{}'",
      var_name, raw
    )));
  }
  Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn base_urls_lose_trailing_slash() {
    assert_eq!(
      normalize_base_url("https://api.dishdash.test/api/", "BACKEND_URL").unwrap(),
      "https://api.dishdash.test/api"
    );
    assert!(matches!(
      normalize_base_url("api.dishdash.test", "BACKEND_URL"),
      Err(AppError::Config(_))
    ));
  }
}
