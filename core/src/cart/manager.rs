// farmacart/src/cart/manager.rs
use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use super::add_flow::{build_add_to_cart_flow, AddToCartCtx};
use super::outcome::{AddOutcome, UpdateOutcome};
use super::state::CartSnapshot;
use super::store::CartStore;
use crate::error::{CartError, CartResult};
use crate::flow::{ContextData, Flow, FlowOutcome};
use crate::gateway::{OrderGateway, ProductLookup};
use crate::models::{CartItemId, Money, OrderRef, ProductId, ShippingAddressSelector};
use crate::pricing::PricePolicy;
use crate::session::Session;

/// Session-scoped cart state manager.
///
/// Reads (`snapshot`, `item_count`, `total`, `is_loading`) never wait. Operations that talk to
/// the backend are serialized through a FIFO gate, so a reload issued by one operation can
/// never land after a later operation's reload. `is_loading` stays true from the first request
/// of an admitted operation until its reload settles.
pub struct CartManager {
  store: CartStore,
  products: Arc<dyn ProductLookup>,
  session: Session,
  policy: PricePolicy,
  add_flow: Flow<AddToCartCtx>,
  gate: Mutex<()>,
}

impl CartManager {
  pub fn new(
    orders: Arc<dyn OrderGateway>,
    products: Arc<dyn ProductLookup>,
    session: Session,
    policy: PricePolicy,
  ) -> Self {
    Self {
      store: CartStore::new(orders),
      products,
      session,
      policy,
      add_flow: build_add_to_cart_flow(),
      gate: Mutex::new(()),
    }
  }

  // --- Derived state ---

  pub fn snapshot(&self) -> CartSnapshot {
    self.store.state().with(|s| s.snapshot.clone())
  }

  pub fn item_count(&self) -> u64 {
    self.store.state().with(|s| s.snapshot.item_count())
  }

  pub fn total(&self) -> Money {
    self.store.state().with(|s| s.snapshot.total(&self.policy))
  }

  pub fn is_loading(&self) -> bool {
    self.store.state().with(|s| s.loading)
  }

  pub fn price_policy(&self) -> &PricePolicy {
    &self.policy
  }

  pub fn session(&self) -> &Session {
    &self.session
  }

  /// Yields the snapshot revision each time the snapshot is replaced.
  pub fn subscribe(&self) -> watch::Receiver<u64> {
    self.store.subscribe()
  }

  // --- Operations ---

  #[instrument(name = "CartManager::load_cart", skip(self), err(Display))]
  pub async fn load_cart(&self) -> CartResult<()> {
    let _turn = self.gate.lock().await;
    let _busy = self.store.busy();
    self.store.reload().await
  }

  /// Adds `requested` units of `product_id`, clamped to the stock known for it.
  ///
  /// Resolves with `AddOutcome::Partial` when fewer units than requested were added.
  /// `NotAuthenticated`, `InvalidQuantity` and `AtCapacity` are raised before any request.
  #[instrument(name = "CartManager::add_to_cart", skip_all, fields(%product_id, requested), err(Display))]
  pub async fn add_to_cart(&self, product_id: ProductId, requested: u32) -> CartResult<AddOutcome> {
    let _turn = self.gate.lock().await;
    let _busy = self.store.busy();

    let ctx = ContextData::new(AddToCartCtx::new(
      self.store.clone(),
      Arc::clone(&self.products),
      self.session.is_authenticated(),
      product_id,
      requested,
    ));

    match self.add_flow.run(ctx.clone()).await? {
      FlowOutcome::Completed => {}
      FlowOutcome::Stopped { at_step } => {
        return Err(CartError::Internal(format!("add to cart halted at step '{}'", at_step)));
      }
    }

    let outcome = ctx
      .read()
      .outcome
      .ok_or_else(|| CartError::Internal("add to cart completed without an outcome".to_string()))?;
    if let Some(partial) = outcome.warning() {
      info!(%partial, "Partial add.");
    }
    Ok(outcome)
  }

  /// Sets a line's quantity. Zero is rejected; use `remove_item`. A quantity above the line's
  /// known stock is lowered to that stock and reported as `UpdateOutcome::Clamped`; a line whose
  /// product is known to be out of stock is refused with `AtCapacity` before any request.
  /// Lines missing from the local snapshot are sent as requested.
  #[instrument(name = "CartManager::update_quantity", skip_all, fields(%cart_item_id, requested), err(Display))]
  pub async fn update_quantity(&self, cart_item_id: &CartItemId, requested: u32) -> CartResult<UpdateOutcome> {
    if requested == 0 {
      return Err(CartError::InvalidQuantity { requested });
    }
    let _turn = self.gate.lock().await;

    let known_line = self.store.state().with(|s| {
      s.snapshot
        .line(cart_item_id)
        .map(|line| (line.product.product_id, line.quantity, line.product.stock_count))
    });

    let outcome = match known_line {
      Some((product_id, in_cart, 0)) => {
        warn!(%product_id, in_cart, "Product out of stock; refusing update.");
        return Err(CartError::AtCapacity {
          product_id,
          in_cart,
          stock: 0,
        });
      }
      Some((_, _, stock)) if requested > stock => {
        warn!(requested, stock, "Quantity above known stock; clamping update.");
        UpdateOutcome::Clamped {
          requested,
          applied: stock,
          stock,
        }
      }
      _ => UpdateOutcome::Updated { quantity: requested },
    };

    let _busy = self.store.busy();
    self.store.orders().update_item(cart_item_id, outcome.applied()).await?;
    self.store.reload().await?;
    Ok(outcome)
  }

  #[instrument(name = "CartManager::remove_item", skip_all, fields(%cart_item_id), err(Display))]
  pub async fn remove_item(&self, cart_item_id: &CartItemId) -> CartResult<()> {
    let _turn = self.gate.lock().await;
    let _busy = self.store.busy();
    self.store.orders().remove_item(cart_item_id).await?;
    self.store.reload().await
  }

  /// Empties the cart on the backend, then locally without a reload.
  #[instrument(name = "CartManager::clear_cart", skip(self), err(Display))]
  pub async fn clear_cart(&self) -> CartResult<()> {
    let _turn = self.gate.lock().await;
    let _busy = self.store.busy();
    self.store.orders().clear_cart().await?;
    self.store.set_empty();
    Ok(())
  }

  #[instrument(name = "CartManager::checkout", skip(self), err(Display))]
  pub async fn checkout(&self, shipping: ShippingAddressSelector) -> CartResult<OrderRef> {
    let _turn = self.gate.lock().await;
    let _busy = self.store.busy();
    let order = self.store.orders().checkout(shipping).await?;
    self.store.set_empty();
    info!(order_id = order.order_id, "Checkout completed.");
    Ok(order)
  }

  /// Removes every line whose stock dropped to zero at the last fetch, then reloads once.
  /// Returns how many lines were removed.
  #[instrument(name = "CartManager::prune_out_of_stock", skip(self), err(Display))]
  pub async fn prune_out_of_stock(&self) -> CartResult<usize> {
    let _turn = self.gate.lock().await;
    let stale = self.store.state().with(|s| s.snapshot.out_of_stock_lines());
    if stale.is_empty() {
      return Ok(0);
    }
    let _busy = self.store.busy();
    for cart_item_id in &stale {
      self.store.orders().remove_item(cart_item_id).await?;
    }
    self.store.reload().await?;
    info!(removed = stale.len(), "Out-of-stock lines removed.");
    Ok(stale.len())
  }

  /// Drops the local snapshot without contacting the backend (sign-out).
  pub async fn reset_local(&self) {
    let _turn = self.gate.lock().await;
    self.store.set_empty();
  }

  /// Follows the session's authenticated flag: load on sign-in, clear on sign-out.
  /// Load failures are logged. The task runs until aborted.
  pub fn watch_session(self: &Arc<Self>) -> JoinHandle<()> {
    let manager = Arc::clone(self);
    let mut authenticated_rx = self.session.subscribe();
    tokio::spawn(async move {
      let mut authenticated = *authenticated_rx.borrow_and_update();
      manager.apply_session(authenticated).await;
      while authenticated_rx.changed().await.is_ok() {
        let now = *authenticated_rx.borrow_and_update();
        if now == authenticated {
          continue;
        }
        authenticated = now;
        manager.apply_session(now).await;
      }
    })
  }

  async fn apply_session(&self, authenticated: bool) {
    if authenticated {
      if let Err(e) = self.load_cart().await {
        warn!(error = %e, "Cart load after sign-in failed.");
      }
    } else {
      self.reset_local().await;
    }
  }
}
