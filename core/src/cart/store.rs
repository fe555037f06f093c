// farmacart/src/cart/store.rs
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, instrument};

use super::state::{CartSnapshot, CartState};
use crate::error::CartResult;
use crate::flow::ContextData;
use crate::gateway::OrderGateway;

/// Holds the cart state and knows how to refresh it from the order gateway.
/// Cloned into flow contexts; all clones share the same state.
#[derive(Clone)]
pub struct CartStore {
  orders: Arc<dyn OrderGateway>,
  state: ContextData<CartState>,
  revisions: Arc<watch::Sender<u64>>,
}

impl CartStore {
  pub fn new(orders: Arc<dyn OrderGateway>) -> Self {
    let (revisions, _) = watch::channel(0);
    Self {
      orders,
      state: ContextData::new(CartState::default()),
      revisions: Arc::new(revisions),
    }
  }

  pub fn orders(&self) -> &Arc<dyn OrderGateway> {
    &self.orders
  }

  pub fn state(&self) -> &ContextData<CartState> {
    &self.state
  }

  pub fn subscribe(&self) -> watch::Receiver<u64> {
    self.revisions.subscribe()
  }

  /// Marks the cart as loading until the returned guard is dropped.
  pub fn busy(&self) -> BusyGuard {
    self.state.update(|s| s.loading = true);
    BusyGuard {
      state: self.state.clone(),
    }
  }

  /// Replaces the snapshot with the gateway's current cart. On failure the previous snapshot
  /// is kept and the error is returned.
  #[instrument(name = "CartStore::reload", skip(self), err(Display))]
  pub async fn reload(&self) -> CartResult<()> {
    let items = self.orders.fetch_cart().await?;
    debug!(lines = items.len(), "Cart snapshot replaced.");
    self.replace(CartSnapshot::new(items));
    Ok(())
  }

  pub fn set_empty(&self) {
    self.replace(CartSnapshot::default());
  }

  fn replace(&self, snapshot: CartSnapshot) {
    let revision = self.state.update(|s| {
      s.snapshot = snapshot;
      s.revision += 1;
      s.revision
    });
    self.revisions.send_replace(revision);
  }
}

/// Clears the loading flag on drop, whichever way the operation holding it ends.
#[must_use = "the cart stops reporting as loading as soon as the guard is dropped"]
pub struct BusyGuard {
  state: ContextData<CartState>,
}

impl Drop for BusyGuard {
  fn drop(&mut self) {
    self.state.update(|s| s.loading = false);
  }
}
