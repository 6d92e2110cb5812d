// dishdash/storefront/src/services/cart_registry.rs

//! One `CartStore` per cart cookie, shared across requests.
//!
//! Each cart sits behind its own async mutex so two requests for the same
//! cart are serialized while different carts proceed independently. Carts
//! nobody holds that have been idle for `idle_ttl` are dropped when a new
//! cart is opened; storage keeps the record, so the next request hydrates
//! it again.

use dishdash_core::{CartStorage, CartStore, StorageError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, instrument};

pub type SharedCart = Arc<AsyncMutex<CartStore>>;

struct CartEntry {
  cart: SharedCart,
  last_used: Instant,
}

impl CartEntry {
  fn is_idle(&self, now: Instant, idle_ttl: Duration) -> bool {
    Arc::strong_count(&self.cart) == 1 && now.duration_since(self.last_used) >= idle_ttl
  }
}

pub struct CartRegistry {
  storage: Arc<dyn CartStorage>,
  key_prefix: String,
  idle_ttl: Duration,
  carts: Mutex<HashMap<String, CartEntry>>,
}

impl std::fmt::Debug for CartRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartRegistry")
      .field("key_prefix", &self.key_prefix)
      .field("idle_ttl", &self.idle_ttl)
      .field("open_carts", &self.open_carts())
      .finish_non_exhaustive()
  }
}

impl CartRegistry {
  pub fn new(storage: Arc<dyn CartStorage>, key_prefix: impl Into<String>, idle_ttl: Duration) -> Self {
    Self {
      storage,
      key_prefix: key_prefix.into(),
      idle_ttl,
      carts: Mutex::new(HashMap::new()),
    }
  }

  pub fn storage_key(&self, cart_id: &str) -> String {
    format!("{}:{}", self.key_prefix, cart_id)
  }

  pub fn open_carts(&self) -> usize {
    self.carts.lock().len()
  }

  /// Drops idle carts that no request is holding. Returns how many went.
  pub fn evict_idle(&self) -> usize {
    let mut carts = self.carts.lock();
    Self::evict_idle_locked(&mut carts, Instant::now(), self.idle_ttl)
  }

  fn evict_idle_locked(carts: &mut HashMap<String, CartEntry>, now: Instant, idle_ttl: Duration) -> usize {
    let before = carts.len();
    carts.retain(|_, entry| !entry.is_idle(now, idle_ttl));
    let evicted = before - carts.len();
    if evicted > 0 {
      debug!(evicted, remaining = carts.len(), "Evicted idle carts.");
    }
    evicted
  }

  /// Locks the cart for `cart_id`, hydrating it from storage on first use.
  ///
  /// A cart whose last load failed is still loading; the next call retries.
  #[instrument(name = "cart_registry::cart", skip(self))]
  pub async fn cart(&self, cart_id: &str) -> Result<OwnedMutexGuard<CartStore>, StorageError> {
    let shared = {
      let mut carts = self.carts.lock();
      let now = Instant::now();
      if !carts.contains_key(cart_id) {
        Self::evict_idle_locked(&mut carts, now, self.idle_ttl);
        debug!("Opening cart.");
      }
      let entry = carts.entry(cart_id.to_string()).or_insert_with(|| CartEntry {
        cart: Arc::new(AsyncMutex::new(CartStore::new(self.storage.clone(), self.storage_key(cart_id)))),
        last_used: now,
      });
      entry.last_used = now;
      entry.cart.clone()
    };

    let mut cart = shared.lock_owned().await;
    if cart.is_loading() {
      cart.hydrate().await?;
    }
    Ok(cart)
  }
}
