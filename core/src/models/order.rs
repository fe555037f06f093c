// farmacart/src/models/order.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Money;

/// Reference to the order created by a successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRef {
  #[serde(alias = "id")]
  pub order_id: i64,
  #[serde(default)]
  pub status: Option<String>,
  #[serde(default)]
  pub total: Option<Money>,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShippingAddressSelector {
  /// Let the backend use the account's default address.
  #[default]
  AccountDefault,
  Saved(i64),
}

impl ShippingAddressSelector {
  pub fn address_id(self) -> Option<i64> {
    match self {
      ShippingAddressSelector::AccountDefault => None,
      ShippingAddressSelector::Saved(id) => Some(id),
    }
  }
}
