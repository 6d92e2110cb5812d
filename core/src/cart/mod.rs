// dishdash_core/src/cart/mod.rs

//! The single-provider shopping cart: line items, the aggregate, its storage
//! seam and the persisted store built on top.

pub mod item;
pub mod state;
pub mod storage;
pub mod store;

pub use item::{CartLineItem, CheckoutData, CheckoutLine, NewCartItem};
pub use state::CartState;
pub use storage::{CartStorage, MemoryCartStorage};
pub use store::{CartStore, DEFAULT_CART_STORAGE_KEY};
