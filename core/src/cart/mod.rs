// farmacart/src/cart/mod.rs

//! The cart state manager: the session's single source of truth for the cart.
//!
//! Every mutation goes through the backend and is followed by a full reload, so the local
//! snapshot is always "the last successful fetch". Operations are admitted one at a time;
//! a second caller waits until the first one's mutation and reload have both finished.

pub mod add_flow;
pub mod manager;
pub mod outcome;
pub mod state;
pub mod store;

pub use manager::CartManager;
pub use outcome::{AddOutcome, PartialAdd, UpdateOutcome};
pub use state::{CartSnapshot, CartState};
pub use store::CartStore;
