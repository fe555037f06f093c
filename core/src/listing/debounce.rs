// farmacart/src/listing/debounce.rs
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::trace;

/// Debounces search-box input: only the last keystroke inside the quiet window triggers a fetch.
///
/// Each `settle` call claims a new generation, waits for the delay, and yields its term only if
/// no later call claimed a newer generation in the meantime.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
  delay: Duration,
  generation: Arc<AtomicU64>,
}

impl SearchDebouncer {
  pub fn new(delay: Duration) -> Self {
    Self {
      delay,
      generation: Arc::new(AtomicU64::new(0)),
    }
  }

  pub fn delay(&self) -> Duration {
    self.delay
  }

  pub async fn settle(&self, term: impl Into<String>) -> Option<String> {
    let term = term.into();
    let mine = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
    tokio::time::sleep(self.delay).await;
    if self.generation.load(Ordering::SeqCst) == mine {
      Some(term)
    } else {
      trace!(term = %term, "Search input superseded before the quiet window elapsed.");
      None
    }
  }

  /// Invalidates any pending `settle`, e.g. when the view is closed.
  pub fn cancel_pending(&self) {
    self.generation.fetch_add(1, Ordering::SeqCst);
  }
}
