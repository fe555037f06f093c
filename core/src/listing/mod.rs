// farmacart/src/listing/mod.rs

//! The search-and-filter pattern shared by every dashboard table: a query with search
//! term, filters and pagination, a debouncer for the search box, and typed pages.

pub mod debounce;
pub mod page;
pub mod query;

pub use debounce::SearchDebouncer;
pub use page::Page;
pub use query::{AdminResource, ListQuery, SortOrder};

use serde::de::DeserializeOwned;

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::CatalogGateway;

/// Fetches one page of `resource` and decodes its items as `T`.
pub async fn fetch_page<T: DeserializeOwned>(
  gateway: &dyn CatalogGateway,
  resource: AdminResource,
  query: &ListQuery,
) -> GatewayResult<Page<T>> {
  let raw = gateway.list_json(resource, query).await?;
  raw.try_map(|item| {
    serde_json::from_value(item).map_err(|e| GatewayError::Decode(format!("{} row: {}", resource.path(), e)))
  })
}
