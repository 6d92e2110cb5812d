// dishdash_core/src/session.rs

//! The session shape returned by the external auth service.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
  Customer,
  Provider,
  Admin,
}

impl Role {
  pub fn is_customer(self) -> bool {
    self == Role::Customer
  }

  /// Providers fulfil orders and admins oversee them; both drive the status table.
  pub fn may_manage_order_status(self) -> bool {
    matches!(self, Role::Provider | Role::Admin)
  }

  pub fn is_admin(self) -> bool {
    self == Role::Admin
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
  pub id: String,
  pub name: String,
  pub email: String,
  pub role: Role,
  /// e.g. `ACTIVE` / `SUSPENDED`; not every auth deployment sends it.
  #[serde(default)]
  pub status: Option<String>,
}

impl SessionUser {
  pub fn is_suspended(&self) -> bool {
    self.status.as_deref().is_some_and(|s| s.eq_ignore_ascii_case("SUSPENDED"))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
  pub user: SessionUser,
}
