//! `shopfloor-shops` — shop directory collaborator surface.
//!
//! The authorization engine consumes shop *status* from here; everything else
//! (persistence, sync, editing) lives in other layers.

pub mod directory;
pub mod shop;

pub use directory::{InMemoryShopDirectory, ShopDirectory};
pub use shop::{BusinessHours, Shop, ShopSettings, ShopStatus};
