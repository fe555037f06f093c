// farmacart/src/models/mod.rs

//! Wire-level records exchanged with the storefront backend.

pub mod cart_item;
pub mod catalog;
pub mod ids;
pub mod money;
pub mod order;
pub mod product;

pub use cart_item::CartLineItem;
pub use catalog::{Category, PriceList, Role, SalesGroup, UserAccount};
pub use ids::{CartItemId, ProductId};
pub use money::Money;
pub use order::{OrderRef, ShippingAddressSelector};
pub use product::ProductSnapshot;
