//! Payment-gateway port trait.
//!
//! The gateway is the allocator of canonical order identifiers and the
//! source of truth for order state; this service only relays its orders.

use crate::domain::{GatewayOrder, GatewayOrderRequest};
use crate::error::GatewayError;

/// Outbound port to the payment gateway.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    /// Asks the gateway to mint an order for the given amount and metadata.
    async fn create_order(&self, req: GatewayOrderRequest) -> Result<GatewayOrder, GatewayError>;

    /// Checks a callback signature against the shared gateway secret.
    ///
    /// Pure and deterministic: same three inputs always yield the same
    /// answer. A mismatch is a normal outcome, never an error.
    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;
}

#[async_trait::async_trait]
impl<T: PaymentGateway> PaymentGateway for std::sync::Arc<T> {
    async fn create_order(&self, req: GatewayOrderRequest) -> Result<GatewayOrder, GatewayError> {
        (**self).create_order(req).await
    }

    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        (**self).verify_signature(order_id, payment_id, signature)
    }
}
