// farmacart/src/error.rs
use thiserror::Error;

use crate::models::ProductId;

/// Failures reported by a remote gateway (order, product or catalog endpoints).
///
/// These are propagated verbatim by the cart manager; it never retries them.
#[derive(Debug, Error)]
pub enum GatewayError {
  #[error("Transport failure: {0}")]
  Transport(String),

  #[error("Session rejected by the backend")]
  Unauthorized,

  #[error("Resource not found: {0}")]
  NotFound(String),

  #[error("Backend responded with status {status}: {message}")]
  Status { status: u16, message: String },

  #[error("Malformed backend response: {0}")]
  Decode(String),
}

impl From<reqwest::Error> for GatewayError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_decode() {
      GatewayError::Decode(err.to_string())
    } else {
      GatewayError::Transport(err.to_string())
    }
  }
}

#[derive(Debug, Error)]
pub enum CartError {
  /// No active session. Raised before any network call.
  #[error("Sign in to modify the cart")]
  NotAuthenticated,

  /// The cart already holds every unit currently known to be in stock.
  #[error("Product {product_id} is already at maximum available stock ({in_cart} of {stock} in cart)")]
  AtCapacity {
    product_id: ProductId,
    in_cart: u32,
    stock: u32,
  },

  #[error("Invalid quantity {requested}: must be at least 1")]
  InvalidQuantity { requested: u32 },

  #[error("Gateway failure: {0}")]
  Gateway(#[from] GatewayError),

  /// A flow step was declared without a handler. This is a wiring fault, not a runtime condition.
  #[error("Flow step '{step_name}' has no handler")]
  StepMissing { step_name: String },

  #[error("Internal cart error: {0}")]
  Internal(String),
}

impl CartError {
  /// True for failures raised locally, before any request left the client.
  pub fn is_local(&self) -> bool {
    matches!(
      self,
      CartError::NotAuthenticated | CartError::AtCapacity { .. } | CartError::InvalidQuantity { .. }
    )
  }
}

impl From<anyhow::Error> for CartError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<CartError>() {
      Ok(cart_err) => cart_err,
      Err(err) => match err.downcast::<GatewayError>() {
        Ok(gateway_err) => CartError::Gateway(gateway_err),
        Err(other) => CartError::Internal(other.to_string()),
      },
    }
  }
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Missing environment variable '{0}'")]
  Missing(String),

  #[error("Invalid value for '{var}': {message}")]
  Invalid { var: String, message: String },
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;
