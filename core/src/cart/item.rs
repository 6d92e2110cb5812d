// dishdash_core/src/cart/item.rs

//! Line items held by the cart and the checkout payload derived from them.

use serde::{Deserialize, Deserializer, Serialize};

/// A meal as offered to the cart, before it has a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
  pub meal_id: String,
  pub meal_name: String,
  /// Menus send prices as numbers or as decimal strings.
  #[serde(deserialize_with = "deserialize_price")]
  pub price: f64,
  #[serde(default)]
  pub image_url: Option<String>,
  pub provider_id: String,
  pub provider_name: String,
}

impl NewCartItem {
  pub fn new(
    meal_id: impl Into<String>,
    meal_name: impl Into<String>,
    price: f64,
    provider_id: impl Into<String>,
    provider_name: impl Into<String>,
  ) -> Self {
    Self {
      meal_id: meal_id.into(),
      meal_name: meal_name.into(),
      price,
      image_url: None,
      provider_id: provider_id.into(),
      provider_name: provider_name.into(),
    }
  }

  pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
    self.image_url = Some(image_url.into());
    self
  }

  pub(crate) fn into_line_item(self) -> CartLineItem {
    CartLineItem {
      meal_id: self.meal_id,
      meal_name: self.meal_name,
      price: self.price,
      quantity: 1,
      image_url: self.image_url,
      provider_id: self.provider_id,
      provider_name: self.provider_name,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
  pub meal_id: String,
  pub meal_name: String,
  #[serde(deserialize_with = "deserialize_price")]
  pub price: f64,
  pub quantity: u32,
  #[serde(default)]
  pub image_url: Option<String>,
  pub provider_id: String,
  pub provider_name: String,
}

impl CartLineItem {
  pub fn line_total(&self) -> f64 {
    self.price * f64::from(self.quantity)
  }
}

/// One `{mealId, quantity}` pair of the checkout payload. Prices are left out
/// on purpose: the backend prices the order itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
  pub meal_id: String,
  pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutData {
  pub provider_id: String,
  pub items: Vec<CheckoutLine>,
}

/// Accepts `12.5` as well as `"12.50"`.
pub(crate) fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum RawPrice {
    Number(f64),
    Text(String),
  }

  match RawPrice::deserialize(deserializer)? {
    RawPrice::Number(value) => Ok(value),
    RawPrice::Text(text) => text
      .trim()
      .parse::<f64>()
      .map_err(|e| serde::de::Error::custom(format!("price '{}' is not numeric: {}", text, e))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn price_accepts_numeric_strings() {
    let item: NewCartItem = serde_json::from_value(serde_json::json!({
      "mealId": "m1",
      "mealName": "Paneer Tikka",
      "price": "12.50",
      "providerId": "p1",
      "providerName": "Spice Hub"
    }))
    .unwrap();
    assert_eq!(item.price, 12.5);
    assert_eq!(item.image_url, None);
  }

  #[test]
  fn price_rejects_garbage() {
    let result: Result<NewCartItem, _> = serde_json::from_value(serde_json::json!({
      "mealId": "m1",
      "mealName": "Paneer Tikka",
      "price": "twelve",
      "providerId": "p1",
      "providerName": "Spice Hub"
    }));
    assert!(result.is_err());
  }
}
