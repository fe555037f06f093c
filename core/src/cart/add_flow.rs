// farmacart/src/cart/add_flow.rs

//! Add-to-cart reconciliation as a step flow.
//!
//! `require_session` → `validate_quantity` → `resolve_stock` → `check_capacity` →
//! `plan_quantity` → `submit_add` → `reload_snapshot`
//!
//! When the product is not in the cart and its stock cannot be looked up, the capacity and
//! planning steps are skipped and the requested quantity goes to the backend unchanged.

use std::sync::Arc;

use tracing::{info, warn};

use super::outcome::{AddOutcome, PartialAdd};
use super::store::CartStore;
use crate::error::CartError;
use crate::flow::{ContextData, Flow, FlowControl, StepDef};
use crate::gateway::ProductLookup;
use crate::models::ProductId;

pub const REQUIRE_SESSION: &str = "require_session";
pub const VALIDATE_QUANTITY: &str = "validate_quantity";
pub const RESOLVE_STOCK: &str = "resolve_stock";
pub const CHECK_CAPACITY: &str = "check_capacity";
pub const PLAN_QUANTITY: &str = "plan_quantity";
pub const SUBMIT_ADD: &str = "submit_add";
pub const RELOAD_SNAPSHOT: &str = "reload_snapshot";

pub struct AddToCartCtx {
  pub store: CartStore,
  pub products: Arc<dyn ProductLookup>,
  pub authenticated: bool,
  pub product_id: ProductId,
  pub requested: u32,
  pub in_cart: u32,
  pub stock: Option<u32>,
  /// Set when the product lookup failed; the backend becomes the only arbiter.
  pub stock_unverified: bool,
  pub to_submit: u32,
  pub outcome: Option<AddOutcome>,
}

impl AddToCartCtx {
  pub fn new(
    store: CartStore,
    products: Arc<dyn ProductLookup>,
    authenticated: bool,
    product_id: ProductId,
    requested: u32,
  ) -> Self {
    Self {
      store,
      products,
      authenticated,
      product_id,
      requested,
      in_cart: 0,
      stock: None,
      stock_unverified: false,
      to_submit: 0,
      outcome: None,
    }
  }
}

/// Pure clamping rule. `None` means nothing can be added.
pub fn plan_add(in_cart: u32, stock: u32, requested: u32) -> Option<u32> {
  if in_cart >= stock {
    return None;
  }
  Some(requested.min(stock - in_cart))
}

pub fn build_add_to_cart_flow() -> Flow<AddToCartCtx> {
  let mut flow = Flow::new(
    "add_to_cart",
    vec![
      StepDef::new(REQUIRE_SESSION),
      StepDef::new(VALIDATE_QUANTITY),
      StepDef::new(RESOLVE_STOCK),
      StepDef::new(CHECK_CAPACITY).skip_if(|ctx: &AddToCartCtx| ctx.stock_unverified),
      StepDef::new(PLAN_QUANTITY).skip_if(|ctx: &AddToCartCtx| ctx.stock_unverified),
      StepDef::new(SUBMIT_ADD),
      StepDef::new(RELOAD_SNAPSHOT),
    ],
  );

  flow.on(REQUIRE_SESSION, |ctx: ContextData<AddToCartCtx>| async move {
    if !ctx.read().authenticated {
      warn!("Add to cart attempted without a session.");
      return Err(CartError::NotAuthenticated);
    }
    Ok::<_, CartError>(FlowControl::Continue)
  });

  flow.on(VALIDATE_QUANTITY, |ctx: ContextData<AddToCartCtx>| async move {
    let requested = ctx.read().requested;
    if requested == 0 {
      return Err(CartError::InvalidQuantity { requested });
    }
    Ok::<_, CartError>(FlowControl::Continue)
  });

  flow.on(RESOLVE_STOCK, |ctx: ContextData<AddToCartCtx>| async move {
    let (product_id, known, products) = {
      let guard = ctx.read();
      let known = guard.store.state().with(|state| {
        state
          .snapshot
          .line_for_product(guard.product_id)
          .map(|line| (state.snapshot.quantity_of(guard.product_id), line.product.stock_count))
      });
      (guard.product_id, known, Arc::clone(&guard.products))
    };

    if let Some((in_cart, stock)) = known {
      ctx.update(|c| {
        c.in_cart = in_cart;
        c.stock = Some(stock);
      });
      return Ok(FlowControl::Continue);
    }

    match products.product(product_id).await {
      Ok(product) => {
        ctx.update(|c| {
          c.in_cart = 0;
          c.stock = Some(product.stock_count);
        });
      }
      Err(e) => {
        warn!(%product_id, error = %e, "Stock lookup failed; submitting the add unverified.");
        ctx.update(|c| {
          c.stock_unverified = true;
          c.to_submit = c.requested;
          c.outcome = Some(AddOutcome::Added { quantity: c.requested });
        });
      }
    }
    Ok::<_, CartError>(FlowControl::Continue)
  });

  flow.on(CHECK_CAPACITY, |ctx: ContextData<AddToCartCtx>| async move {
    let guard = ctx.read();
    let stock = guard.stock.unwrap_or(0);
    if guard.in_cart >= stock {
      info!(product_id = %guard.product_id, in_cart = guard.in_cart, stock, "Product already at capacity.");
      return Err(CartError::AtCapacity {
        product_id: guard.product_id,
        in_cart: guard.in_cart,
        stock,
      });
    }
    Ok::<_, CartError>(FlowControl::Continue)
  });

  flow.on(PLAN_QUANTITY, |ctx: ContextData<AddToCartCtx>| async move {
    let mut guard = ctx.write();
    let stock = guard.stock.unwrap_or(0);
    let allowed = plan_add(guard.in_cart, stock, guard.requested).ok_or(CartError::AtCapacity {
      product_id: guard.product_id,
      in_cart: guard.in_cart,
      stock,
    })?;
    let outcome = if allowed < guard.requested {
      info!(
        product_id = %guard.product_id,
        requested = guard.requested,
        allowed,
        "Requested quantity exceeds known stock; clamping."
      );
      AddOutcome::Partial(PartialAdd {
        product_id: guard.product_id,
        requested: guard.requested,
        added: allowed,
        in_cart_before: guard.in_cart,
        stock,
      })
    } else {
      AddOutcome::Added { quantity: allowed }
    };
    guard.to_submit = allowed;
    guard.outcome = Some(outcome);
    Ok::<_, CartError>(FlowControl::Continue)
  });

  flow.on(SUBMIT_ADD, |ctx: ContextData<AddToCartCtx>| async move {
    let (orders, product_id, quantity) = {
      let guard = ctx.read();
      (Arc::clone(guard.store.orders()), guard.product_id, guard.to_submit)
    };
    orders.add_item(product_id, quantity).await?;
    Ok::<_, CartError>(FlowControl::Continue)
  });

  flow.on(RELOAD_SNAPSHOT, |ctx: ContextData<AddToCartCtx>| async move {
    let store = ctx.read().store.clone();
    store.reload().await?;
    Ok::<_, CartError>(FlowControl::Continue)
  });

  flow
}
