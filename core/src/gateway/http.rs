// farmacart/src/gateway/http.rs
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use super::{CatalogGateway, OrderGateway, ProductLookup};
use crate::config::ClientConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::listing::{AdminResource, ListQuery, Page};
use crate::models::{CartItemId, CartLineItem, OrderRef, ProductId, ProductSnapshot, ShippingAddressSelector};
use crate::session::Session;

const CART_PATH: &str = "/orders/cart";
const CART_ITEMS_PATH: &str = "/orders/cart/items";
const CHECKOUT_PATH: &str = "/orders/checkout";
const PRODUCTS_PATH: &str = "/products";

/// REST implementation of every gateway trait, authenticated with the session's bearer token.
#[derive(Clone)]
pub struct HttpGateway {
  client: Client,
  base_url: String,
  session: Session,
}

impl HttpGateway {
  pub fn new(config: &ClientConfig, session: Session) -> GatewayResult<Self> {
    let client = Client::builder()
      .timeout(config.request_timeout)
      .build()
      .map_err(|e| GatewayError::Transport(format!("building HTTP client: {}", e)))?;
    Ok(Self {
      client,
      base_url: config.api_base_url.clone(),
      session,
    })
  }

  pub fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  fn request(&self, method: Method, path: &str) -> RequestBuilder {
    let builder = self.client.request(method, self.url(path));
    match self.session.token() {
      Some(token) => builder.bearer_auth(token),
      None => builder,
    }
  }

  async fn send(&self, builder: RequestBuilder, path: &str) -> GatewayResult<Response> {
    let response = builder.send().await?;
    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!(%status, path, "Backend rejected request.");
    Err(status_error(status, path, &body))
  }

  async fn send_json(&self, builder: RequestBuilder, path: &str) -> GatewayResult<Value> {
    let response = self.send(builder, path).await?;
    Ok(response.json::<Value>().await?)
  }
}

/// Maps a non-2xx response onto the gateway taxonomy.
pub fn status_error(status: StatusCode, path: &str, body: &str) -> GatewayError {
  match status {
    StatusCode::UNAUTHORIZED => GatewayError::Unauthorized,
    StatusCode::NOT_FOUND => GatewayError::NotFound(path.to_string()),
    _ => GatewayError::Status {
      status: status.as_u16(),
      message: error_message(body).unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
    },
  }
}

/// The backend reports errors as `{"message": ..}` or `{"error": ..}`; plain text is taken as is.
pub fn error_message(body: &str) -> Option<String> {
  let trimmed = body.trim();
  if trimmed.is_empty() {
    return None;
  }
  match serde_json::from_str::<Value>(trimmed) {
    Ok(Value::Object(map)) => ["message", "error", "detail"]
      .iter()
      .find_map(|key| map.get(*key).and_then(Value::as_str))
      .map(str::to_string),
    Ok(_) => None,
    Err(_) => Some(trimmed.to_string()),
  }
}

/// Accepts a bare array of line items, an object wrapping it under `items`, `cartItems` or
/// `data`, or a `{"cart": ..}` envelope around any of those. `null` and `{}` are an empty cart;
/// any other shape is a decode error, never an empty cart.
pub fn parse_cart(body: Value) -> GatewayResult<Vec<CartLineItem>> {
  let items = match body {
    Value::Array(items) => Value::Array(items),
    Value::Null => return Ok(Vec::new()),
    Value::Object(map) if map.is_empty() => return Ok(Vec::new()),
    Value::Object(mut map) => {
      match ["items", "cartItems", "data"].iter().find_map(|key| map.remove(*key)) {
        Some(items) => items,
        None => match map.remove("cart") {
          Some(inner) => return parse_cart(inner),
          None => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            return Err(GatewayError::Decode(format!("cart payload has no line items (keys: {})", keys.join(", "))));
          }
        },
      }
    }
    other => return Err(GatewayError::Decode(format!("unexpected cart payload: {}", other))),
  };
  serde_json::from_value(items).map_err(|e| GatewayError::Decode(format!("cart items: {}", e)))
}

/// Accepts `{items|data, total|totalCount, page, pageSize}`; missing counters default from the query.
pub fn parse_page(body: Value, query: &ListQuery) -> GatewayResult<Page<Value>> {
  let mut map = match body {
    Value::Object(map) => map,
    Value::Array(items) => {
      let total = items.len() as u64;
      return Ok(Page::new(items, total, query.page(), query.page_size()));
    }
    other => return Err(GatewayError::Decode(format!("unexpected page payload: {}", other))),
  };
  let items = match map.remove("items").or_else(|| map.remove("data")) {
    Some(Value::Array(items)) => items,
    Some(other) => return Err(GatewayError::Decode(format!("page items are not a list: {}", other))),
    None => Vec::new(),
  };
  let number = |map: &serde_json::Map<String, Value>, keys: &[&str]| keys.iter().find_map(|k| map.get(*k)?.as_u64());
  let total = number(&map, &["total", "totalCount", "count"]).unwrap_or(items.len() as u64);
  let page = number(&map, &["page"]).map(|p| p as u32).unwrap_or(query.page());
  let page_size = number(&map, &["pageSize", "limit"]).map(|s| s as u32).unwrap_or(query.page_size());
  Ok(Page::new(items, total, page, page_size))
}

pub fn checkout_body(shipping: ShippingAddressSelector) -> Value {
  match shipping.address_id() {
    Some(id) => json!({ "shippingAddressId": id }),
    None => json!({}),
  }
}

#[async_trait]
impl OrderGateway for HttpGateway {
  #[instrument(name = "http::fetch_cart", skip(self), err(Display))]
  async fn fetch_cart(&self) -> GatewayResult<Vec<CartLineItem>> {
    let body = self.send_json(self.request(Method::GET, CART_PATH), CART_PATH).await?;
    let items = parse_cart(body)?;
    debug!(lines = items.len(), "Cart fetched.");
    Ok(items)
  }

  #[instrument(name = "http::add_item", skip(self), err(Display))]
  async fn add_item(&self, product_id: ProductId, quantity: u32) -> GatewayResult<()> {
    let builder = self
      .request(Method::POST, CART_ITEMS_PATH)
      .json(&json!({ "productId": product_id, "quantity": quantity }));
    self.send(builder, CART_ITEMS_PATH).await.map(drop)
  }

  #[instrument(name = "http::update_item", skip(self, cart_item_id), fields(cart_item_id = %cart_item_id), err(Display))]
  async fn update_item(&self, cart_item_id: &CartItemId, quantity: u32) -> GatewayResult<()> {
    let path = format!("{}/{}", CART_ITEMS_PATH, cart_item_id);
    let builder = self.request(Method::PUT, &path).json(&json!({ "quantity": quantity }));
    self.send(builder, &path).await.map(drop)
  }

  #[instrument(name = "http::remove_item", skip(self, cart_item_id), fields(cart_item_id = %cart_item_id), err(Display))]
  async fn remove_item(&self, cart_item_id: &CartItemId) -> GatewayResult<()> {
    let path = format!("{}/{}", CART_ITEMS_PATH, cart_item_id);
    self.send(self.request(Method::DELETE, &path), &path).await.map(drop)
  }

  #[instrument(name = "http::clear_cart", skip(self), err(Display))]
  async fn clear_cart(&self) -> GatewayResult<()> {
    self.send(self.request(Method::DELETE, CART_PATH), CART_PATH).await.map(drop)
  }

  #[instrument(name = "http::checkout", skip(self), err(Display))]
  async fn checkout(&self, shipping: ShippingAddressSelector) -> GatewayResult<OrderRef> {
    let builder = self.request(Method::POST, CHECKOUT_PATH).json(&checkout_body(shipping));
    let body = self.send_json(builder, CHECKOUT_PATH).await?;
    // Some deployments wrap the created order as {"order": {...}}.
    let order = match body {
      Value::Object(mut map) if map.contains_key("order") => map.remove("order").unwrap_or(Value::Null),
      other => other,
    };
    serde_json::from_value(order).map_err(|e| GatewayError::Decode(format!("checkout response: {}", e)))
  }
}

#[async_trait]
impl ProductLookup for HttpGateway {
  #[instrument(name = "http::product", skip(self), err(Display))]
  async fn product(&self, product_id: ProductId) -> GatewayResult<ProductSnapshot> {
    let path = format!("{}/{}", PRODUCTS_PATH, product_id);
    let body = self.send_json(self.request(Method::GET, &path), &path).await?;
    serde_json::from_value(body).map_err(|e| GatewayError::Decode(format!("product {}: {}", product_id, e)))
  }
}

#[async_trait]
impl CatalogGateway for HttpGateway {
  #[instrument(name = "http::list", skip_all, fields(resource = resource.path()), err(Display))]
  async fn list_json(&self, resource: AdminResource, query: &ListQuery) -> GatewayResult<Page<Value>> {
    let path = resource.path();
    let builder = self.request(Method::GET, path).query(&query.to_query_pairs());
    let body = self.send_json(builder, path).await?;
    parse_page(body, query)
  }
}
