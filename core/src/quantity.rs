// farmacart/src/quantity.rs

//! Input rules shared by every quantity widget (cart line, product detail, order builder).
//!
//! The widget keeps an uncommitted text draft so typing does not fire a mutation per
//! keystroke. On blur or enter the draft is committed: validated, clamped into
//! `[1, stock]`, and reported back only if the committed quantity actually changed.

/// Whether a keystroke may enter the draft. Only ASCII digits are accepted, which rules out
/// negatives, decimals, exponents and thousands separators.
pub fn accepts_keystroke(ch: char) -> bool {
  ch.is_ascii_digit()
}

/// Clamps a requested quantity into `[1, stock]`. With no stock the result is 0, which the
/// caller treats as "remove".
pub fn clamp_quantity(requested: u32, stock: u32) -> u32 {
  if stock == 0 {
    0
  } else {
    requested.clamp(1, stock)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityDraft {
  committed: u32,
  stock: u32,
  draft: String,
}

impl QuantityDraft {
  pub fn new(committed: u32, stock: u32) -> Self {
    Self {
      committed,
      stock,
      draft: committed.to_string(),
    }
  }

  pub fn committed(&self) -> u32 {
    self.committed
  }

  pub fn draft(&self) -> &str {
    &self.draft
  }

  pub fn stock(&self) -> u32 {
    self.stock
  }

  /// Appends a keystroke. Returns false (draft untouched) for rejected characters.
  pub fn push(&mut self, ch: char) -> bool {
    if !accepts_keystroke(ch) {
      return false;
    }
    self.draft.push(ch);
    true
  }

  pub fn backspace(&mut self) {
    self.draft.pop();
  }

  /// Replaces the draft with pasted text, keeping only the digits.
  pub fn set_draft(&mut self, text: &str) {
    self.draft = text.chars().filter(|c| accepts_keystroke(*c)).collect();
  }

  /// Commits the draft. Returns the new committed quantity when it differs from the previous one.
  pub fn commit(&mut self) -> Option<u32> {
    let next = if self.draft.is_empty() {
      // Nothing typed: keep what was there.
      clamp_quantity(self.committed, self.stock)
    } else {
      // The draft only holds digits, so a parse failure means overflow.
      let value = self.draft.parse::<u64>().unwrap_or(u64::MAX);
      clamp_quantity(u32::try_from(value).unwrap_or(u32::MAX), self.stock)
    };
    self.draft = next.to_string();
    if next == self.committed {
      None
    } else {
      self.committed = next;
      Some(next)
    }
  }

  /// Steps used by the +/- buttons; both commit immediately.
  pub fn increment(&mut self) -> Option<u32> {
    self.draft = self.committed.saturating_add(1).to_string();
    self.commit()
  }

  pub fn decrement(&mut self) -> Option<u32> {
    self.draft = self.committed.saturating_sub(1).max(1).to_string();
    self.commit()
  }

  /// Resets the widget to the values of a fresh reload, discarding any draft.
  pub fn sync(&mut self, committed: u32, stock: u32) {
    self.committed = committed;
    self.stock = stock;
    self.draft = committed.to_string();
  }

  /// The rendered item's stock dropped to zero since the last fetch; the widget removes it.
  pub fn needs_auto_remove(&self) -> bool {
    self.stock == 0
  }
}
