// farmacart/src/config.rs
use std::collections::HashMap;
use std::env;
use std::time::Duration;

use dotenvy::dotenv;

use crate::error::ConfigError;
use crate::listing::{ListQuery, SearchDebouncer};
use crate::pricing::PricePolicy;

pub const API_BASE_URL: &str = "FARMACART_API_BASE_URL";
pub const API_TOKEN: &str = "FARMACART_API_TOKEN";
pub const REQUEST_TIMEOUT_SECS: &str = "FARMACART_REQUEST_TIMEOUT_SECS";
pub const PRICE_PRIORITY: &str = "FARMACART_PRICE_PRIORITY";
pub const SEARCH_DEBOUNCE_MS: &str = "FARMACART_SEARCH_DEBOUNCE_MS";
pub const PAGE_SIZE: &str = "FARMACART_PAGE_SIZE";

#[derive(Debug, Clone)]
pub struct ClientConfig {
  pub api_base_url: String,
  pub api_token: Option<String>,
  pub request_timeout: Duration,
  pub price_policy: PricePolicy,
  pub search_debounce: Duration,
  pub page_size: u32,
}

impl ClientConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenv().ok(); // .env is optional

    let vars: HashMap<String, String> = env::vars().filter(|(k, _)| k.starts_with("FARMACART_")).collect();
    let config = Self::from_vars(&vars)?;
    tracing::info!(api_base_url = %config.api_base_url, "Client configuration loaded.");
    Ok(config)
  }

  /// Builds the configuration from an explicit variable map. `from_env` delegates here.
  pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
    let get = |name: &str| vars.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

    let api_base_url = get(API_BASE_URL)
      .ok_or_else(|| ConfigError::Missing(API_BASE_URL.to_string()))?
      .trim_end_matches('/')
      .to_string();
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
      return Err(ConfigError::Invalid {
        var: API_BASE_URL.to_string(),
        message: format!("'{}' is not an http(s) URL", api_base_url),
      });
    }

    let api_token = get(API_TOKEN).map(str::to_string);
    let request_timeout = Duration::from_secs(parse_or(get(REQUEST_TIMEOUT_SECS), REQUEST_TIMEOUT_SECS, 30)?);
    let price_policy = match get(PRICE_PRIORITY) {
      Some(list) => PricePolicy::parse(list).map_err(|message| ConfigError::Invalid {
        var: PRICE_PRIORITY.to_string(),
        message,
      })?,
      None => PricePolicy::default(),
    };
    let search_debounce = Duration::from_millis(parse_or(get(SEARCH_DEBOUNCE_MS), SEARCH_DEBOUNCE_MS, 400)?);
    let page_size: u32 = parse_or(get(PAGE_SIZE), PAGE_SIZE, 20)?;
    if page_size == 0 {
      return Err(ConfigError::Invalid {
        var: PAGE_SIZE.to_string(),
        message: "page size must be positive".to_string(),
      });
    }

    Ok(Self {
      api_base_url,
      api_token,
      request_timeout,
      price_policy,
      search_debounce,
      page_size,
    })
  }

  /// Debouncer for listing search boxes, using the configured quiet period.
  pub fn search_debouncer(&self) -> SearchDebouncer {
    SearchDebouncer::new(self.search_debounce)
  }

  /// First page of a listing at the configured page size.
  pub fn list_query(&self) -> ListQuery {
    ListQuery::new(self.page_size)
  }
}

fn parse_or<T>(raw: Option<&str>, var: &str, default: T) -> Result<T, ConfigError>
where
  T: std::str::FromStr,
  T::Err: std::fmt::Display,
{
  match raw {
    Some(value) => value.parse::<T>().map_err(|e| ConfigError::Invalid {
      var: var.to_string(),
      message: format!("'{}': {}", value, e),
    }),
    None => Ok(default),
  }
}
