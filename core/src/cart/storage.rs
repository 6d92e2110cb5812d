// dishdash_core/src/cart/storage.rs

//! Durable key/value storage for the persisted cart record.
//!
//! The store hands the backend an already-serialized JSON string, the same way
//! a browser's local storage would receive it. Implementations only move bytes.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::StorageError;

#[async_trait]
pub trait CartStorage: Send + Sync {
  /// Returns the raw record stored under `key`, if any.
  async fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

  /// Replaces the record stored under `key`.
  async fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-local storage. Records live as long as the value itself.
#[derive(Debug, Default)]
pub struct MemoryCartStorage {
  records: Mutex<HashMap<String, String>>,
}

impl MemoryCartStorage {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seeds a record, e.g. to simulate a cart left over from a previous visit.
  pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
    self.records.lock().insert(key.into(), value.into());
  }

  pub fn get(&self, key: &str) -> Option<String> {
    self.records.lock().get(key).cloned()
  }

  pub fn len(&self) -> usize {
    self.records.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.lock().is_empty()
  }
}

#[async_trait]
impl CartStorage for MemoryCartStorage {
  async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
    Ok(self.get(key))
  }

  async fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
    self.insert(key, value);
    Ok(())
  }
}
