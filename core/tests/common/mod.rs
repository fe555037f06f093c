// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use async_trait::async_trait;
use farmacart::error::{GatewayError, GatewayResult};
use farmacart::gateway::{CatalogGateway, OrderGateway, ProductLookup};
use farmacart::listing::{AdminResource, ListQuery, Page};
use farmacart::models::{CartItemId, CartLineItem, Money, OrderRef, ProductId, ProductSnapshot, ShippingAddressSelector};
use farmacart::{CartManager, PricePolicy, Session};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

// --- In-memory backend ---

/// Stands in for the storefront backend. Records every call, lets tests change stock
/// between fetches, and fails chosen operations on demand.
#[derive(Default)]
pub struct FakeBackend {
  catalog: Mutex<HashMap<ProductId, ProductSnapshot>>,
  cart: Mutex<Vec<CartLineItem>>,
  rows: Mutex<HashMap<AdminResource, Vec<Value>>>,
  calls: Mutex<Vec<String>>,
  failing: Mutex<HashSet<&'static str>>,
  delay: Mutex<Option<Duration>>,
  next_line: AtomicU64,
  next_order: AtomicU64,
}

impl FakeBackend {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn with_product(self: &Arc<Self>, product: ProductSnapshot) -> Arc<Self> {
    self.catalog.lock().insert(product.product_id, product);
    Arc::clone(self)
  }

  /// Changes the stock the backend reports from now on (next fetch or lookup).
  pub fn set_stock(&self, product_id: ProductId, stock: u32) {
    if let Some(product) = self.catalog.lock().get_mut(&product_id) {
      product.stock_count = stock;
    }
  }

  /// Seeds a cart line directly, as if it had been added in an earlier session.
  pub fn seed_line(&self, product_id: ProductId, quantity: u32) -> CartItemId {
    let id = self.new_line_id();
    let product = self.product_or_placeholder(product_id);
    self.cart.lock().push(CartLineItem::new(id.clone(), product, quantity));
    id
  }

  pub fn seed_rows(&self, resource: AdminResource, rows: Vec<Value>) {
    self.rows.lock().insert(resource, rows);
  }

  pub fn fail(&self, op: &'static str) {
    self.failing.lock().insert(op);
  }

  pub fn recover(&self, op: &'static str) {
    self.failing.lock().remove(op);
  }

  pub fn set_delay(&self, delay: Duration) {
    *self.delay.lock() = Some(delay);
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().clone()
  }

  pub fn calls_named(&self, op: &str) -> usize {
    self.calls.lock().iter().filter(|c| c.split(':').next() == Some(op)).count()
  }

  pub fn clear_calls(&self) {
    self.calls.lock().clear();
  }

  pub fn quantity_in_cart(&self, product_id: ProductId) -> u32 {
    self
      .cart
      .lock()
      .iter()
      .filter(|line| line.product.product_id == product_id)
      .map(|line| line.quantity)
      .sum()
  }

  async fn enter(&self, op: &'static str, detail: String) -> GatewayResult<()> {
    self.calls.lock().push(format!("{}:{}", op, detail));
    let delay = *self.delay.lock();
    if let Some(delay) = delay {
      tokio::time::sleep(delay).await;
    }
    if self.failing.lock().contains(op) {
      return Err(GatewayError::Transport(format!("{} unavailable", op)));
    }
    Ok(())
  }

  fn new_line_id(&self) -> CartItemId {
    CartItemId::new(format!("line-{}", self.next_line.fetch_add(1, Ordering::SeqCst) + 1))
  }

  fn product_or_placeholder(&self, product_id: ProductId) -> ProductSnapshot {
    self
      .catalog
      .lock()
      .get(&product_id)
      .cloned()
      .unwrap_or_else(|| ProductSnapshot::new(product_id, format!("Product {}", product_id), 0))
  }
}

#[async_trait]
impl OrderGateway for FakeBackend {
  async fn fetch_cart(&self) -> GatewayResult<Vec<CartLineItem>> {
    self.enter("fetch_cart", String::new()).await?;
    let catalog = self.catalog.lock().clone();
    let lines = self
      .cart
      .lock()
      .iter()
      .cloned()
      .map(|mut line| {
        if let Some(current) = catalog.get(&line.product.product_id) {
          line.product = current.clone();
        }
        line
      })
      .collect();
    Ok(lines)
  }

  async fn add_item(&self, product_id: ProductId, quantity: u32) -> GatewayResult<()> {
    self.enter("add_item", format!("{}x{}", product_id, quantity)).await?;
    let existing = self
      .cart
      .lock()
      .iter_mut()
      .find(|line| line.product.product_id == product_id)
      .map(|line| line.quantity += quantity)
      .is_some();
    if !existing {
      let id = self.new_line_id();
      let product = self.product_or_placeholder(product_id);
      self.cart.lock().push(CartLineItem::new(id, product, quantity));
    }
    Ok(())
  }

  async fn update_item(&self, cart_item_id: &CartItemId, quantity: u32) -> GatewayResult<()> {
    self.enter("update_item", format!("{}={}", cart_item_id, quantity)).await?;
    let mut cart = self.cart.lock();
    match cart.iter_mut().find(|line| &line.cart_item_id == cart_item_id) {
      Some(line) => {
        line.quantity = quantity;
        Ok(())
      }
      None => Err(GatewayError::NotFound(format!("/orders/cart/items/{}", cart_item_id))),
    }
  }

  async fn remove_item(&self, cart_item_id: &CartItemId) -> GatewayResult<()> {
    self.enter("remove_item", cart_item_id.to_string()).await?;
    self.cart.lock().retain(|line| &line.cart_item_id != cart_item_id);
    Ok(())
  }

  async fn clear_cart(&self) -> GatewayResult<()> {
    self.enter("clear_cart", String::new()).await?;
    self.cart.lock().clear();
    Ok(())
  }

  async fn checkout(&self, shipping: ShippingAddressSelector) -> GatewayResult<OrderRef> {
    self.enter("checkout", format!("{:?}", shipping)).await?;
    let total: Money = {
      let policy = PricePolicy::default();
      self.cart.lock().iter().map(|line| policy.line_total(line)).sum()
    };
    self.cart.lock().clear();
    Ok(OrderRef {
      order_id: self.next_order.fetch_add(1, Ordering::SeqCst) as i64 + 1000,
      status: Some("pending".to_string()),
      total: Some(total),
      created_at: None,
    })
  }
}

#[async_trait]
impl ProductLookup for FakeBackend {
  async fn product(&self, product_id: ProductId) -> GatewayResult<ProductSnapshot> {
    self.enter("product", product_id.to_string()).await?;
    self
      .catalog
      .lock()
      .get(&product_id)
      .cloned()
      .ok_or_else(|| GatewayError::NotFound(format!("/products/{}", product_id)))
  }
}

#[async_trait]
impl CatalogGateway for FakeBackend {
  async fn list_json(&self, resource: AdminResource, query: &ListQuery) -> GatewayResult<Page<Value>> {
    self.enter("list", resource.path().to_string()).await?;
    let rows = self.rows.lock().get(&resource).cloned().unwrap_or_default();
    let needle = query.search().to_lowercase();
    let matching: Vec<Value> = rows
      .into_iter()
      .filter(|row| {
        needle.is_empty()
          || row
            .get("name")
            .and_then(Value::as_str)
            .map(|name| name.to_lowercase().contains(&needle))
            .unwrap_or(false)
      })
      .collect();
    let total = matching.len() as u64;
    let size = query.page_size() as usize;
    let start = (query.page() as usize - 1) * size;
    let items = matching.into_iter().skip(start).take(size).collect();
    Ok(Page::new(items, total, query.page(), query.page_size()))
  }
}

// --- Fixtures ---

pub const ASPIRIN: ProductId = ProductId(1);
pub const INSULIN: ProductId = ProductId(2);
pub const SALINE: ProductId = ProductId(3);

pub fn aspirin(stock: u32) -> ProductSnapshot {
  ProductSnapshot::new(ASPIRIN, "Aspirin 500mg x20", stock).with_final_price(Money::from_cents(450))
}

pub fn insulin(stock: u32) -> ProductSnapshot {
  ProductSnapshot::new(INSULIN, "Insulin glargine 100U/ml", stock).with_base_price(Money::from_cents(3200))
}

pub fn saline(stock: u32) -> ProductSnapshot {
  ProductSnapshot::new(SALINE, "Saline 0.9% 500ml", stock).with_final_price(Money::from_cents(125))
}

/// A signed-in manager over `backend` with the default price priority.
pub fn signed_in_manager(backend: &Arc<FakeBackend>) -> Arc<CartManager> {
  manager_with_session(backend, Session::with_token("test-token"))
}

pub fn manager_with_session(backend: &Arc<FakeBackend>, session: Session) -> Arc<CartManager> {
  Arc::new(CartManager::new(
    Arc::clone(backend) as Arc<dyn OrderGateway>,
    Arc::clone(backend) as Arc<dyn ProductLookup>,
    session,
    PricePolicy::default(),
  ))
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
