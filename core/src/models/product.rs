// farmacart/src/models/product.rs
use serde::{Deserialize, Serialize};

use super::{Money, ProductId};

/// Product attributes as of the last fetch. Stock is the backend's figure at that moment;
/// the client treats it as an upper bound for writes, never as truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
  #[serde(alias = "id")]
  pub product_id: ProductId,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub image_url: Option<String>,
  #[serde(alias = "stock", default)]
  pub stock_count: u32,
  #[serde(default)]
  pub base_price: Option<Money>,
  #[serde(default)]
  pub final_price: Option<Money>,
  /// Legacy single price field still sent by older endpoints.
  #[serde(default)]
  pub price: Option<Money>,
  #[serde(default = "default_active")]
  pub is_active: bool,
}

fn default_active() -> bool {
  true
}

impl ProductSnapshot {
  pub fn new(product_id: impl Into<ProductId>, name: impl Into<String>, stock_count: u32) -> Self {
    Self {
      product_id: product_id.into(),
      name: name.into(),
      image_url: None,
      stock_count,
      base_price: None,
      final_price: None,
      price: None,
      is_active: true,
    }
  }

  pub fn with_final_price(mut self, price: Money) -> Self {
    self.final_price = Some(price);
    self
  }

  pub fn with_base_price(mut self, price: Money) -> Self {
    self.base_price = Some(price);
    self
  }

  pub fn is_out_of_stock(&self) -> bool {
    self.stock_count == 0
  }
}
