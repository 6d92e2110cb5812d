// dishdash/storefront/src/state.rs
use crate::config::AppConfig;
use crate::services::backend_gateway::BackendGateway;
use crate::services::cart_registry::CartRegistry;
use crate::services::session_service::SessionGateway;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub config: Arc<AppConfig>,
  pub backend: Arc<dyn BackendGateway>,
  pub sessions: Arc<dyn SessionGateway>,
  pub carts: Arc<CartRegistry>,
}
