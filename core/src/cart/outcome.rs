// farmacart/src/cart/outcome.rs
use std::fmt;

use crate::models::ProductId;

/// The add went through, but for fewer units than requested because of known stock.
/// This is a warning for the caller to show, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialAdd {
  pub product_id: ProductId,
  pub requested: u32,
  pub added: u32,
  pub in_cart_before: u32,
  pub stock: u32,
}

impl fmt::Display for PartialAdd {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} units added, {} already in cart, stock total {} (requested {})",
      self.added, self.in_cart_before, self.stock, self.requested
    )
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
  Added { quantity: u32 },
  Partial(PartialAdd),
}

impl AddOutcome {
  pub fn units_added(&self) -> u32 {
    match self {
      AddOutcome::Added { quantity } => *quantity,
      AddOutcome::Partial(partial) => partial.added,
    }
  }

  pub fn warning(&self) -> Option<&PartialAdd> {
    match self {
      AddOutcome::Partial(partial) => Some(partial),
      AddOutcome::Added { .. } => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
  Updated { quantity: u32 },
  /// The requested quantity exceeded the line's known stock and was lowered to it.
  Clamped { requested: u32, applied: u32, stock: u32 },
}

impl UpdateOutcome {
  pub fn applied(&self) -> u32 {
    match self {
      UpdateOutcome::Updated { quantity } => *quantity,
      UpdateOutcome::Clamped { applied, .. } => *applied,
    }
  }
}

impl fmt::Display for UpdateOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      UpdateOutcome::Updated { quantity } => write!(f, "quantity set to {}", quantity),
      UpdateOutcome::Clamped { requested, applied, stock } => write!(
        f,
        "quantity set to {} instead of {}: only {} in stock",
        applied, requested, stock
      ),
    }
  }
}
