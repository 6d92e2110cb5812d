// dishdash/storefront/src/web/extractors.rs

//! Request extractors for the anonymous cart cookie and the signed-in session.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use dishdash_core::Session;
use futures_util::future::{ready, FutureExt, LocalBoxFuture, Ready};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

fn app_state(req: &HttpRequest) -> Result<web::Data<AppState>, AppError> {
  req
    .app_data::<web::Data<AppState>>()
    .cloned()
    .ok_or_else(|| AppError::Internal("Application state is not configured".to_string()))
}

/// All `Cookie` headers joined, ready to forward upstream.
pub fn forwarded_cookies(req: &HttpRequest) -> String {
  req
    .headers()
    .get_all(header::COOKIE)
    .filter_map(|value| value.to_str().ok())
    .collect::<Vec<_>>()
    .join("; ")
}

/// Identifies the browser's cart. Carts are anonymous; a request without a
/// valid cart cookie gets a fresh id that the handler sends back.
#[derive(Debug, Clone)]
pub struct CartSession {
  pub cart_id: String,
  pub issued: bool,
}

impl CartSession {
  /// The `Set-Cookie` to attach when this request started a new cart.
  pub fn new_cookie(&self, cookie_name: &str) -> Option<Cookie<'static>> {
    if !self.issued {
      return None;
    }
    Some(
      Cookie::build(cookie_name.to_string(), self.cart_id.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish(),
    )
  }
}

impl FromRequest for CartSession {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let state = match app_state(req) {
      Ok(state) => state,
      Err(e) => return ready(Err(e)),
    };

    let existing = req
      .cookie(&state.config.cart_cookie_name)
      .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());

    let session = match existing {
      Some(id) => CartSession {
        cart_id: id.to_string(),
        issued: false,
      },
      None => {
        let id = Uuid::new_v4();
        debug!(cart_id = %id, "Issuing new cart cookie.");
        CartSession {
          cart_id: id.to_string(),
          issued: true,
        }
      }
    };
    ready(Ok(session))
  }
}

/// The signed-in user, resolved through the auth service, plus the cookies
/// to forward to the backend on their behalf.
#[derive(Debug, Clone)]
pub struct CurrentSession {
  pub session: Session,
  pub cookies: String,
}

impl FromRequest for CurrentSession {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let state = app_state(req);
    let cookies = forwarded_cookies(req);

    async move {
      let state = state?;
      let session = state
        .sessions
        .get_session(&cookies)
        .await?
        .ok_or_else(|| AppError::Auth("Please sign in to continue".to_string()))?;

      if session.user.is_suspended() {
        warn!(user_id = %session.user.id, "Suspended account attempted access.");
        return Err(AppError::Forbidden("Your account has been suspended".to_string()));
      }
      Ok(CurrentSession { session, cookies })
    }
    .boxed_local()
  }
}
