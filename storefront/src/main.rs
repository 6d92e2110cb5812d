// dishdash/storefront/src/main.rs

mod config;
mod errors;
mod flows;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::errors::Result as AppResult;
use crate::services::backend_gateway::HttpBackendGateway;
use crate::services::cart_registry::CartRegistry;
use crate::services::cart_storage::FileCartStorage;
use crate::services::session_service::HttpSessionGateway;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

async fn build_state(app_config: Arc<AppConfig>) -> AppResult<AppState> {
  let storage = FileCartStorage::open(&app_config.cart_storage_dir).await?;
  tracing::info!(dir = %storage.dir().display(), "Cart storage ready.");

  let backend = HttpBackendGateway::new(app_config.backend_url.clone())?;
  let sessions = HttpSessionGateway::new(app_config.auth_url.clone())?;
  let carts = CartRegistry::new(
    Arc::new(storage),
    app_config.cart_storage_key.clone(),
    app_config.cart_idle_ttl,
  );

  Ok(AppState {
    config: app_config,
    backend: Arc::new(backend),
    sessions: Arc::new(sessions),
    carts: Arc::new(carts),
  })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // RUST_LOG overrides
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting DishDash storefront server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::other(e.to_string()));
    }
  };

  let app_state = match build_state(app_config.clone()).await {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to initialise application state.");
      return Err(std::io::Error::other(e.to_string()));
    }
  };

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!(
    backend = %app_config.backend_url,
    auth = %app_config.auth_url,
    "Attempting to bind server to {}...",
    server_address
  );

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
