// farmacart/src/pricing.rs

//! Canonical effective-price selection for cart lines.
//!
//! Different backend revisions populate different price fields (`priceAtAddition`,
//! `product.price`, `product.finalPrice`, `product.basePrice`). Instead of each view
//! carrying its own fallback chain, a `PricePolicy` holds one explicit priority list and
//! every total in the crate goes through it.

use std::fmt;
use std::str::FromStr;

use crate::models::{CartLineItem, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceField {
  PriceAtAddition,
  Price,
  FinalPrice,
  BasePrice,
}

impl PriceField {
  pub fn read(self, item: &CartLineItem) -> Option<Money> {
    match self {
      PriceField::PriceAtAddition => item.price_at_addition,
      PriceField::Price => item.product.price,
      PriceField::FinalPrice => item.product.final_price,
      PriceField::BasePrice => item.product.base_price,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      PriceField::PriceAtAddition => "price_at_addition",
      PriceField::Price => "price",
      PriceField::FinalPrice => "final_price",
      PriceField::BasePrice => "base_price",
    }
  }
}

impl fmt::Display for PriceField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for PriceField {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
      "price_at_addition" => Ok(PriceField::PriceAtAddition),
      "price" => Ok(PriceField::Price),
      "final_price" => Ok(PriceField::FinalPrice),
      "base_price" => Ok(PriceField::BasePrice),
      other => Err(format!("unknown price field '{}'", other)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricePolicy {
  priority: Vec<PriceField>,
}

impl Default for PricePolicy {
  fn default() -> Self {
    Self {
      priority: vec![
        PriceField::PriceAtAddition,
        PriceField::FinalPrice,
        PriceField::Price,
        PriceField::BasePrice,
      ],
    }
  }
}

impl PricePolicy {
  /// Duplicate fields are dropped, keeping the first occurrence. An empty list is rejected.
  pub fn new(priority: impl IntoIterator<Item = PriceField>) -> Result<Self, String> {
    let mut fields: Vec<PriceField> = Vec::new();
    for field in priority {
      if !fields.contains(&field) {
        fields.push(field);
      }
    }
    if fields.is_empty() {
      return Err("price priority list is empty".to_string());
    }
    Ok(Self { priority: fields })
  }

  /// Parses a comma separated list such as `final_price,base_price`.
  pub fn parse(list: &str) -> Result<Self, String> {
    let fields = list
      .split(',')
      .filter(|part| !part.trim().is_empty())
      .map(str::parse)
      .collect::<Result<Vec<PriceField>, String>>()?;
    Self::new(fields)
  }

  pub fn priority(&self) -> &[PriceField] {
    &self.priority
  }

  /// First populated field in priority order.
  pub fn effective_price(&self, item: &CartLineItem) -> Option<Money> {
    self.priority.iter().find_map(|field| field.read(item))
  }

  pub fn line_total(&self, item: &CartLineItem) -> Money {
    match self.effective_price(item) {
      Some(price) => price.times(item.quantity),
      None => {
        tracing::warn!(
          cart_item_id = %item.cart_item_id,
          product_id = %item.product.product_id,
          "Cart line has no price in any configured field; counting it as zero."
        );
        Money::ZERO
      }
    }
  }
}
