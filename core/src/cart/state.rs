// farmacart/src/cart/state.rs
use crate::models::{CartItemId, CartLineItem, Money, ProductId};
use crate::pricing::PricePolicy;

/// Line items in backend order. Totals are derived on demand, never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSnapshot {
  items: Vec<CartLineItem>,
}

impl CartSnapshot {
  pub fn new(items: Vec<CartLineItem>) -> Self {
    Self { items }
  }

  pub fn items(&self) -> &[CartLineItem] {
    &self.items
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  /// Sum of quantities across all lines.
  pub fn item_count(&self) -> u64 {
    self.items.iter().map(|line| u64::from(line.quantity)).sum()
  }

  pub fn total(&self, policy: &PricePolicy) -> Money {
    self.items.iter().map(|line| policy.line_total(line)).sum()
  }

  pub fn line(&self, cart_item_id: &CartItemId) -> Option<&CartLineItem> {
    self.items.iter().find(|line| &line.cart_item_id == cart_item_id)
  }

  pub fn line_for_product(&self, product_id: ProductId) -> Option<&CartLineItem> {
    self.items.iter().find(|line| line.product.product_id == product_id)
  }

  /// Units of `product_id` across every line that carries it.
  pub fn quantity_of(&self, product_id: ProductId) -> u32 {
    self
      .items
      .iter()
      .filter(|line| line.product.product_id == product_id)
      .map(|line| line.quantity)
      .sum()
  }

  pub fn out_of_stock_lines(&self) -> Vec<CartItemId> {
    self
      .items
      .iter()
      .filter(|line| line.product.is_out_of_stock())
      .map(|line| line.cart_item_id.clone())
      .collect()
  }
}

/// What presentation components read: the snapshot plus the pending-load flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
  pub snapshot: CartSnapshot,
  pub loading: bool,
  /// Bumped every time the snapshot is replaced.
  pub revision: u64,
}
