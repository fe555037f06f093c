// farmacart/src/models/cart_item.rs
use serde::{Deserialize, Serialize};

use super::{CartItemId, Money, ProductSnapshot};

/// One row of the backend cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
  #[serde(alias = "id")]
  pub cart_item_id: CartItemId,
  pub product: ProductSnapshot,
  pub quantity: u32,
  #[serde(default)]
  pub price_at_addition: Option<Money>,
}

impl CartLineItem {
  pub fn new(cart_item_id: CartItemId, product: ProductSnapshot, quantity: u32) -> Self {
    Self {
      cart_item_id,
      product,
      quantity,
      price_at_addition: None,
    }
  }
}
