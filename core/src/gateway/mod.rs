// farmacart/src/gateway/mod.rs

//! Seams to the remote backend. The cart manager only ever talks to these traits; the
//! REST implementation lives in `http`, and tests substitute an in-memory backend.

pub mod http;

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::listing::{AdminResource, ListQuery, Page};
use crate::models::{CartItemId, CartLineItem, OrderRef, ProductId, ProductSnapshot, ShippingAddressSelector};

pub use http::HttpGateway;

/// The backend cart resource of the signed-in account.
#[async_trait]
pub trait OrderGateway: Send + Sync {
  /// Full cart, in the backend's insertion order.
  async fn fetch_cart(&self) -> GatewayResult<Vec<CartLineItem>>;

  async fn add_item(&self, product_id: ProductId, quantity: u32) -> GatewayResult<()>;

  async fn update_item(&self, cart_item_id: &CartItemId, quantity: u32) -> GatewayResult<()>;

  async fn remove_item(&self, cart_item_id: &CartItemId) -> GatewayResult<()>;

  async fn clear_cart(&self) -> GatewayResult<()>;

  async fn checkout(&self, shipping: ShippingAddressSelector) -> GatewayResult<OrderRef>;
}

#[async_trait]
pub trait ProductLookup: Send + Sync {
  async fn product(&self, product_id: ProductId) -> GatewayResult<ProductSnapshot>;
}

/// Paginated listing used by the dashboard tables. Items are returned untyped; see
/// `listing::fetch_page` for the typed wrapper.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
  async fn list_json(&self, resource: AdminResource, query: &ListQuery) -> GatewayResult<Page<serde_json::Value>>;
}
