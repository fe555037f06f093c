// src/lib.rs

//! Farmacart: client-side cart state and catalog plumbing for a B2B pharmacy storefront.
//!
//! The crate keeps one authoritative view of the signed-in account's cart and reconciles
//! every mutation against the backend:
//!  - Add-to-cart clamps the requested quantity to the stock known for the product and
//!    reports partial adds as warnings, not failures.
//!  - Every mutation is followed by a full reload; mutations are admitted one at a time.
//!  - Totals and item counts are derived from the snapshot, with a configurable price
//!    priority.
//!  - Quantity widgets share one set of input rules (`quantity`).
//!  - Dashboard tables share a search/filter/pagination pattern (`listing`).

pub mod cart;
pub mod config;
pub mod error;
pub mod flow;
pub mod gateway;
pub mod listing;
pub mod models;
pub mod pricing;
pub mod quantity;
pub mod session;

// --- Re-exports for the Public API ---

pub use crate::cart::{AddOutcome, CartManager, CartSnapshot, PartialAdd, UpdateOutcome};
pub use crate::config::ClientConfig;
pub use crate::error::{CartError, CartResult, ConfigError, GatewayError, GatewayResult};
pub use crate::gateway::{CatalogGateway, HttpGateway, OrderGateway, ProductLookup};
pub use crate::listing::{AdminResource, ListQuery, Page, SearchDebouncer, SortOrder};
pub use crate::models::{CartItemId, CartLineItem, Money, OrderRef, ProductId, ProductSnapshot, ShippingAddressSelector};
pub use crate::pricing::{PriceField, PricePolicy};
pub use crate::quantity::QuantityDraft;
pub use crate::session::Session;
