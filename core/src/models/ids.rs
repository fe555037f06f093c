// farmacart/src/models/ids.rs
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<i64> for ProductId {
  fn from(raw: i64) -> Self {
    ProductId(raw)
  }
}

/// Backend-assigned identifier of a cart row. Opaque: the backend may send a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct CartItemId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
  Number(i64),
  Text(String),
}

impl From<RawId> for CartItemId {
  fn from(raw: RawId) -> Self {
    match raw {
      RawId::Number(n) => CartItemId(n.to_string()),
      RawId::Text(s) => CartItemId(s),
    }
  }
}

impl From<CartItemId> for String {
  fn from(id: CartItemId) -> Self {
    id.0
  }
}

impl CartItemId {
  pub fn new(raw: impl Into<String>) -> Self {
    CartItemId(raw.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for CartItemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
