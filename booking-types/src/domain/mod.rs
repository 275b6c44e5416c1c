//! Pure domain types.

mod order;

pub use order::{GatewayOrder, GatewayOrderRequest, OrderRecord};
