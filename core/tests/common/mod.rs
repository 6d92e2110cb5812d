// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use async_trait::async_trait;
use dishdash_core::{CartStorage, MemoryCartStorage, NewCartItem, StorageError};
use std::sync::{
  atomic::{AtomicBool, AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

pub const CART_KEY: &str = "dishdash-cart";

// --- Common Fixtures ---
pub fn meal(meal_id: &str, price: f64, provider_id: &str) -> NewCartItem {
  NewCartItem::new(
    meal_id,
    format!("Meal {}", meal_id),
    price,
    provider_id,
    format!("Restaurant {}", provider_id),
  )
}

pub fn memory_storage() -> Arc<MemoryCartStorage> {
  Arc::new(MemoryCartStorage::new())
}

// --- Storage double that can be told to fail and counts writes ---
#[derive(Default)]
pub struct FlakyStorage {
  pub inner: MemoryCartStorage,
  pub fail_loads: AtomicBool,
  pub fail_saves: AtomicBool,
  pub saves: AtomicUsize,
}

impl FlakyStorage {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn set_fail_saves(&self, fail: bool) {
    self.fail_saves.store(fail, Ordering::SeqCst);
  }

  pub fn set_fail_loads(&self, fail: bool) {
    self.fail_loads.store(fail, Ordering::SeqCst);
  }

  pub fn save_count(&self) -> usize {
    self.saves.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl CartStorage for FlakyStorage {
  async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
    if self.fail_loads.load(Ordering::SeqCst) {
      return Err(StorageError::Backend {
        key: key.to_string(),
        source: anyhow::anyhow!("simulated read failure"),
      });
    }
    self.inner.load(key).await
  }

  async fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
    if self.fail_saves.load(Ordering::SeqCst) {
      return Err(StorageError::Backend {
        key: key.to_string(),
        source: anyhow::anyhow!("simulated write failure"),
      });
    }
    self.saves.fetch_add(1, Ordering::SeqCst);
    self.inner.save(key, value).await
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
