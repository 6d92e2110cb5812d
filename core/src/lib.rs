// src/lib.rs

//! DishDash core: the client-side domain of a food-delivery storefront.
//!
//! The marketplace backend owns menus, pricing, orders and users. What lives
//! here is the part the storefront itself is responsible for:
//!  - A single-provider shopping cart (`cart`) that survives restarts through a
//!    pluggable storage seam and only writes once it has been hydrated.
//!  - The order status transition table (`order::status`) that decides which
//!    status changes a provider, admin or customer may request.
//!  - Typed backend payloads and the `{ success, data?, message? }` envelope,
//!    decoded at the boundary so nothing downstream handles loose JSON.
//!  - User-facing notices produced by cart operations and errors.

pub mod cart;
pub mod envelope;
pub mod error;
pub mod notice;
pub mod order;
pub mod review;
pub mod session;

// --- Re-exports for the Public API ---

pub use crate::cart::{
  CartLineItem, CartState, CartStorage, CartStore, CheckoutData, CheckoutLine, MemoryCartStorage, NewCartItem,
  DEFAULT_CART_STORAGE_KEY,
};
pub use crate::envelope::ApiEnvelope;
pub use crate::error::{
  BackendError, CartError, CartResult, CheckoutError, ReviewError, StatusError, StorageError,
};
pub use crate::notice::{Notice, NoticeAction, NoticeLevel};
pub use crate::order::{
  get_next_possible_statuses, next_statuses_for, validate_customer_cancel, validate_transition, CreateOrderRequest,
  Order, OrderLine, OrderStatus, UpdateOrderStatusRequest,
};
pub use crate::review::{Review, ReviewRequest};
pub use crate::session::{Role, Session, SessionUser};

/*
    Typical flow:
    1. Build a `CartStore` over some `CartStorage` and `hydrate()` it once.
    2. Route user actions to `add_item` / `remove_item` / `update_quantity` /
       `clear_cart`; show the returned `Notice`, or `Notice::from(&err)` on error.
    3. At checkout, turn `get_checkout_data()` plus an address into a
       `CreateOrderRequest`, send it, and `clear_cart()` once the backend accepted it.
    4. For an existing order, offer `order_status.next_possible_statuses()` to
       providers/admins and a cancel button to customers while `customer_can_cancel()`.
*/
