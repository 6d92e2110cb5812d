// dishdash_core/src/cart/state.rs

//! The cart aggregate.
//!
//! `CartState` is the record that gets persisted (`{ items, providerId, providerName }`)
//! and the place where the cart rules live. It knows nothing about storage; the
//! [`CartStore`](crate::cart::CartStore) clones it, applies a mutation, persists
//! the result and only then swaps it in.
//!
//! Every mutating method validates before touching any field, so an `Err`
//! always means the state is exactly as it was.

use serde::{Deserialize, Serialize};

use crate::cart::item::{CartLineItem, CheckoutData, CheckoutLine, NewCartItem};
use crate::error::{CartError, CartResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
  #[serde(default)]
  pub items: Vec<CartLineItem>,
  #[serde(default)]
  pub provider_id: Option<String>,
  #[serde(default)]
  pub provider_name: Option<String>,
}

impl CartState {
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn contains(&self, meal_id: &str) -> bool {
    self.items.iter().any(|item| item.meal_id == meal_id)
  }

  pub fn item(&self, meal_id: &str) -> Option<&CartLineItem> {
    self.items.iter().find(|item| item.meal_id == meal_id)
  }

  /// Appends `new_item` with quantity 1.
  ///
  /// Rejects a meal that is already present (adding twice is not a quantity
  /// bump) and a meal from a provider other than the one the cart is scoped to.
  /// An empty cart adopts the item's provider.
  pub fn add_item(&mut self, new_item: NewCartItem) -> CartResult<()> {
    if self.contains(&new_item.meal_id) {
      return Err(CartError::DuplicateMeal {
        meal_id: new_item.meal_id,
        meal_name: new_item.meal_name,
      });
    }

    if !self.items.is_empty() && self.provider_id.as_deref() != Some(new_item.provider_id.as_str()) {
      return Err(CartError::ProviderMismatch {
        current_provider_id: self.provider_id.clone().unwrap_or_default(),
        current_provider_name: self.provider_name.clone().unwrap_or_default(),
        requested_provider_id: new_item.provider_id,
        requested_provider_name: new_item.provider_name,
      });
    }

    if !new_item.price.is_finite() || new_item.price <= 0.0 {
      return Err(CartError::InvalidPrice {
        meal_name: new_item.meal_name,
        price: new_item.price,
      });
    }

    if self.items.is_empty() {
      self.provider_id = Some(new_item.provider_id.clone());
      self.provider_name = Some(new_item.provider_name.clone());
    }
    self.items.push(new_item.into_line_item());
    Ok(())
  }

  /// Drops the line for `meal_id`. Returns whether anything was removed.
  /// Emptying the cart resets the provider scope.
  pub fn remove_item(&mut self, meal_id: &str) -> bool {
    let before = self.items.len();
    self.items.retain(|item| item.meal_id != meal_id);
    if self.items.is_empty() {
      self.reset_scope();
    }
    self.items.len() != before
  }

  /// Overwrites the quantity of `meal_id`; anything below 1 removes the line.
  /// Returns whether a line was changed or removed.
  pub fn update_quantity(&mut self, meal_id: &str, quantity: i64) -> bool {
    if quantity < 1 {
      return self.remove_item(meal_id);
    }
    let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
    match self.items.iter_mut().find(|item| item.meal_id == meal_id) {
      Some(item) => {
        item.quantity = quantity;
        true
      }
      None => false,
    }
  }

  pub fn clear(&mut self) {
    self.items.clear();
    self.reset_scope();
  }

  /// Σ(price × quantity).
  pub fn total(&self) -> f64 {
    self.items.iter().map(CartLineItem::line_total).sum()
  }

  /// Σ(quantity).
  pub fn item_count(&self) -> u64 {
    self.items.iter().map(|item| u64::from(item.quantity)).sum()
  }

  pub fn checkout_data(&self) -> Option<CheckoutData> {
    let provider_id = self.provider_id.as_ref()?;
    if self.items.is_empty() {
      return None;
    }
    Some(CheckoutData {
      provider_id: provider_id.clone(),
      items: self
        .items
        .iter()
        .map(|item| CheckoutLine {
          meal_id: item.meal_id.clone(),
          quantity: item.quantity,
        })
        .collect(),
    })
  }

  /// Repairs a record loaded from storage so the invariants hold again:
  /// duplicate meal ids and zero quantities are dropped, items from a provider
  /// other than the first one are dropped, and the provider scope matches the
  /// remaining items. Returns whether anything had to change.
  pub fn normalize(&mut self) -> bool {
    let original = self.clone();

    let mut seen = std::collections::HashSet::new();
    self.items.retain(|item| item.quantity >= 1 && seen.insert(item.meal_id.clone()));

    let first = self.items.first().map(|item| (item.provider_id.clone(), item.provider_name.clone()));
    match first {
      None => self.reset_scope(),
      Some((first_id, first_name)) => {
        let scope_id = self.provider_id.clone().unwrap_or_else(|| first_id.clone());
        let scope_name = self
          .items
          .iter()
          .find(|item| item.provider_id == scope_id)
          .map(|item| item.provider_name.clone());
        match scope_name {
          Some(name) => {
            self.items.retain(|item| item.provider_id == scope_id);
            if self.provider_name.is_none() {
              self.provider_name = Some(name);
            }
            self.provider_id = Some(scope_id);
          }
          // The recorded scope matches none of the items; trust the items.
          None => {
            self.items.retain(|item| item.provider_id == first_id);
            self.provider_id = Some(first_id);
            self.provider_name = Some(first_name);
          }
        }
      }
    }

    *self != original
  }

  fn reset_scope(&mut self) {
    self.provider_id = None;
    self.provider_name = None;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn meal(id: &str, price: f64, provider: &str) -> NewCartItem {
    NewCartItem::new(id, format!("Meal {}", id), price, provider, format!("Provider {}", provider))
  }

  #[test]
  fn first_item_scopes_the_cart() {
    let mut cart = CartState::default();
    cart.add_item(meal("m1", 10.0, "p1")).unwrap();
    assert_eq!(cart.provider_id.as_deref(), Some("p1"));
    assert_eq!(cart.provider_name.as_deref(), Some("Provider p1"));
    assert_eq!(cart.items[0].quantity, 1);
  }

  #[test]
  fn rejected_adds_leave_state_untouched() {
    let mut cart = CartState::default();
    cart.add_item(meal("m1", 10.0, "p1")).unwrap();
    let snapshot = cart.clone();

    assert!(matches!(cart.add_item(meal("m1", 99.0, "p1")), Err(CartError::DuplicateMeal { .. })));
    assert!(matches!(cart.add_item(meal("m2", 5.0, "p2")), Err(CartError::ProviderMismatch { .. })));
    assert!(matches!(cart.add_item(meal("m3", 0.0, "p1")), Err(CartError::InvalidPrice { .. })));
    assert!(matches!(cart.add_item(meal("m4", f64::NAN, "p1")), Err(CartError::InvalidPrice { .. })));
    assert_eq!(cart, snapshot);
  }

  #[test]
  fn duplicate_check_wins_over_provider_check() {
    let mut cart = CartState::default();
    cart.add_item(meal("m1", 10.0, "p1")).unwrap();
    let err = cart.add_item(meal("m1", 10.0, "p2")).unwrap_err();
    assert!(matches!(err, CartError::DuplicateMeal { .. }));
  }

  #[test]
  fn zero_or_negative_quantity_removes() {
    let mut cart = CartState::default();
    cart.add_item(meal("m1", 10.0, "p1")).unwrap();
    cart.add_item(meal("m2", 4.0, "p1")).unwrap();

    assert!(cart.update_quantity("m2", -3));
    assert!(!cart.contains("m2"));
    assert!(!cart.update_quantity("absent", 0));
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.provider_id.as_deref(), Some("p1"));
  }

  #[test]
  fn totals_follow_quantities() {
    let mut cart = CartState::default();
    assert_eq!(cart.total(), 0.0);
    assert_eq!(cart.item_count(), 0);

    cart.add_item(meal("m1", 10.0, "p1")).unwrap();
    cart.add_item(meal("m2", 2.5, "p1")).unwrap();
    cart.update_quantity("m1", 3);
    cart.update_quantity("m2", 2);
    assert_eq!(cart.total(), 35.0);
    assert_eq!(cart.item_count(), 5);
  }

  #[test]
  fn checkout_data_strips_prices() {
    let mut cart = CartState::default();
    assert_eq!(cart.checkout_data(), None);

    cart.add_item(meal("m1", 10.0, "p1")).unwrap();
    cart.update_quantity("m1", 2);
    let data = cart.checkout_data().unwrap();
    assert_eq!(data.provider_id, "p1");
    assert_eq!(
      data.items,
      vec![CheckoutLine {
        meal_id: "m1".into(),
        quantity: 2
      }]
    );
  }

  #[test]
  fn checkout_data_requires_scope() {
    let mut cart = CartState::default();
    cart.add_item(meal("m1", 10.0, "p1")).unwrap();
    cart.provider_id = None;
    assert_eq!(cart.checkout_data(), None);
  }

  #[test]
  fn normalize_repairs_mixed_records() {
    let mut cart = CartState::default();
    cart.add_item(meal("m1", 10.0, "p1")).unwrap();
    cart.items.push(meal("m2", 5.0, "p2").into_line_item());
    cart.items.push(meal("m1", 10.0, "p1").into_line_item());
    cart.provider_id = None;
    cart.provider_name = None;

    assert!(cart.normalize());
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.provider_id.as_deref(), Some("p1"));
    assert_eq!(cart.provider_name.as_deref(), Some("Provider p1"));
    assert!(!cart.normalize());
  }

  #[test]
  fn normalize_clears_scope_of_empty_cart() {
    let mut cart = CartState {
      items: Vec::new(),
      provider_id: Some("p1".into()),
      provider_name: Some("Provider p1".into()),
    };
    assert!(cart.normalize());
    assert_eq!(cart.provider_id, None);
    assert_eq!(cart.provider_name, None);
  }
}
