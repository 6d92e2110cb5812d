// dishdash_core/src/order/mod.rs

//! Orders as reported by the backend and the status transition policy.

pub mod model;
pub mod status;

pub use model::{CreateOrderRequest, Order, OrderLine, UpdateOrderStatusRequest};
pub use status::{
  get_next_possible_statuses, next_statuses_for, validate_customer_cancel, validate_transition, OrderStatus,
};
