// dishdash_core/src/cart/store.rs

//! The persisted cart store.
//!
//! A `CartStore` owns one [`CartState`] for one shopper and keeps it in sync
//! with a [`CartStorage`] record. The lifecycle is:
//!
//! 1. `CartStore::new` builds an empty store in the *loading* state.
//! 2. `hydrate()` reads the stored record once and flips the `hydrated` flag.
//!    Until then `save()` is a no-op, so defaults never overwrite a record that
//!    has not been read yet.
//!    Mutations before that are refused with `CartError::Loading`.
//! 3. Every mutation works on a copy of the state, persists the copy, and only
//!    swaps it in once the write succeeded. A failed write leaves the store
//!    exactly as it was.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::cart::item::{CartLineItem, CheckoutData, NewCartItem};
use crate::cart::state::CartState;
use crate::cart::storage::CartStorage;
use crate::error::{CartError, CartResult, StorageError};
use crate::notice::Notice;

/// Storage key used when the caller does not pick one.
pub const DEFAULT_CART_STORAGE_KEY: &str = "dishdash-cart";

pub struct CartStore {
  storage: Arc<dyn CartStorage>,
  key: String,
  state: CartState,
  hydrated: bool,
}

impl std::fmt::Debug for CartStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartStore")
      .field("key", &self.key)
      .field("state", &self.state)
      .field("hydrated", &self.hydrated)
      .finish()
  }
}

impl CartStore {
  pub fn new(storage: Arc<dyn CartStorage>, key: impl Into<String>) -> Self {
    Self {
      storage,
      key: key.into(),
      state: CartState::default(),
      hydrated: false,
    }
  }

  /// Builds a store and hydrates it in one go.
  pub async fn open(storage: Arc<dyn CartStorage>, key: impl Into<String>) -> Result<Self, StorageError> {
    let mut store = Self::new(storage, key);
    store.hydrate().await?;
    Ok(store)
  }

  pub fn storage_key(&self) -> &str {
    &self.key
  }

  /// True until `hydrate()` has completed.
  pub fn is_loading(&self) -> bool {
    !self.hydrated
  }

  /// Loads the persisted record. Safe to call more than once; only the first
  /// successful call reads storage.
  ///
  /// A record that cannot be parsed is discarded and the cart starts empty.
  /// A storage read failure is returned and the store stays in the loading
  /// state, so nothing gets written over the unreadable record.
  #[instrument(name = "cart_store::hydrate", skip(self), fields(key = %self.key))]
  pub async fn hydrate(&mut self) -> Result<(), StorageError> {
    if self.hydrated {
      return Ok(());
    }

    let raw = self.storage.load(&self.key).await?;
    let mut state = match raw {
      None => {
        debug!("No stored cart, starting empty.");
        CartState::default()
      }
      Some(raw) => match serde_json::from_str::<CartState>(&raw) {
        Ok(state) => state,
        Err(e) => {
          error!(error = %e, "Failed to load cart, starting empty.");
          CartState::default()
        }
      },
    };

    if state.normalize() {
      warn!("Stored cart violated cart invariants and was repaired.");
    }

    info!(items = state.items.len(), "Cart hydrated.");
    self.state = state;
    self.hydrated = true;
    Ok(())
  }

  /// Writes the current state. Skipped while the store is still loading.
  pub async fn save(&self) -> Result<(), StorageError> {
    self.persist(&self.state).await
  }

  #[instrument(name = "cart_store::add_item", skip(self, new_item), fields(key = %self.key, meal_id = %new_item.meal_id, provider_id = %new_item.provider_id))]
  pub async fn add_item(&mut self, new_item: NewCartItem) -> CartResult<Notice> {
    self.ensure_hydrated()?;
    let meal_name = new_item.meal_name.clone();
    let mut next = self.state.clone();
    if let Err(e) = next.add_item(new_item) {
      warn!(error = %e, "Add to cart rejected.");
      return Err(e);
    }
    self.commit(next).await?;
    info!("Meal added to cart.");
    Ok(Notice::success(format!("{} added to cart", meal_name)))
  }

  #[instrument(name = "cart_store::remove_item", skip(self), fields(key = %self.key))]
  pub async fn remove_item(&mut self, meal_id: &str) -> CartResult<Notice> {
    self.ensure_hydrated()?;
    let mut next = self.state.clone();
    if next.remove_item(meal_id) {
      self.commit(next).await?;
      info!("Meal removed from cart.");
    } else {
      debug!("Meal was not in the cart.");
    }
    Ok(Notice::success("Item removed from cart"))
  }

  /// Sets the quantity of a line; quantities below 1 remove it.
  #[instrument(name = "cart_store::update_quantity", skip(self), fields(key = %self.key))]
  pub async fn update_quantity(&mut self, meal_id: &str, quantity: i64) -> CartResult<Notice> {
    if quantity < 1 {
      return self.remove_item(meal_id).await;
    }
    self.ensure_hydrated()?;
    let mut next = self.state.clone();
    if !next.update_quantity(meal_id, quantity) {
      debug!("Meal was not in the cart, quantity left alone.");
      return Ok(Notice::info("Item is not in your cart"));
    }
    self.commit(next).await?;
    Ok(Notice::success("Quantity updated"))
  }

  #[instrument(name = "cart_store::clear_cart", skip(self), fields(key = %self.key))]
  pub async fn clear_cart(&mut self) -> CartResult<Notice> {
    self.ensure_hydrated()?;
    let mut next = self.state.clone();
    next.clear();
    self.commit(next).await?;
    info!("Cart cleared.");
    Ok(Notice::success("Cart cleared"))
  }

  pub fn state(&self) -> &CartState {
    &self.state
  }

  pub fn items(&self) -> &[CartLineItem] {
    &self.state.items
  }

  pub fn provider_id(&self) -> Option<&str> {
    self.state.provider_id.as_deref()
  }

  pub fn provider_name(&self) -> Option<&str> {
    self.state.provider_name.as_deref()
  }

  pub fn get_cart_total(&self) -> f64 {
    self.state.total()
  }

  pub fn get_item_count(&self) -> u64 {
    self.state.item_count()
  }

  pub fn get_checkout_data(&self) -> Option<CheckoutData> {
    self.state.checkout_data()
  }

  fn ensure_hydrated(&self) -> CartResult<()> {
    if self.hydrated {
      Ok(())
    } else {
      warn!(key = %self.key, "Cart mutation attempted before hydration.");
      Err(CartError::Loading)
    }
  }

  async fn commit(&mut self, next: CartState) -> Result<(), StorageError> {
    self.persist(&next).await?;
    self.state = next;
    Ok(())
  }

  async fn persist(&self, state: &CartState) -> Result<(), StorageError> {
    if !self.hydrated {
      debug!(key = %self.key, "Cart still loading, skipping save.");
      return Ok(());
    }
    let record = serde_json::to_string(state)?;
    self.storage.save(&self.key, &record).await
  }
}
