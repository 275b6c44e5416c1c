//! Gateway order shapes and the server-side order record.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body sent to the gateway's order-creation endpoint.
///
/// Amount is in the smallest unit of the currency (paise for INR)
/// to avoid floating-point amount errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrderRequest {
    /// Amount in smallest currency unit
    pub amount: i64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Merchant-side receipt token, unique per order
    pub receipt: String,
    /// Instructs the gateway to auto-capture the payment
    pub payment_capture: u8,
    /// Free-form merchant metadata
    #[serde(default)]
    pub notes: HashMap<String, String>,
}

/// Order object minted by the gateway.
///
/// Only the fields this service reads are typed; everything else the gateway
/// returns is preserved in `extra` so the order can be relayed verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    /// Gateway-assigned order identifier
    pub id: String,
    /// Echoed amount in smallest currency unit
    pub amount: i64,
    /// Echoed ISO 4217 currency code
    pub currency: String,
    /// Echoed receipt token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
    /// Gateway-side order status (e.g. "created")
    #[serde(default)]
    pub status: String,
    /// Remaining gateway fields, passed through unmodified
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Server-side record of a created order.
///
/// The gateway stays the source of truth for order state; this record only
/// lets the notification step read the authoritative charged amount instead
/// of trusting client-supplied data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub order_id: String,
    /// Amount in smallest currency unit, as submitted to the gateway
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_order_roundtrips_unknown_fields() {
        let raw = serde_json::json!({
            "id": "order_Nq1yJzLEpRrYVs",
            "entity": "order",
            "amount": 500000,
            "amount_paid": 0,
            "amount_due": 500000,
            "currency": "INR",
            "receipt": "rcpt_1700000000000_a1b2c3",
            "status": "created",
            "attempts": 0,
            "created_at": 1700000000
        });

        let order: GatewayOrder = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(order.id, "order_Nq1yJzLEpRrYVs");
        assert_eq!(order.amount, 500000);
        assert_eq!(order.status, "created");

        // Unknown gateway fields survive re-serialization verbatim.
        let echoed = serde_json::to_value(&order).unwrap();
        assert_eq!(echoed, raw);
    }

    #[test]
    fn order_request_serializes_capture_flag() {
        let req = GatewayOrderRequest {
            amount: 500000,
            currency: "INR".to_string(),
            receipt: "rcpt_1".to_string(),
            payment_capture: 1,
            notes: HashMap::new(),
        };

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["amount"], 500000);
        assert_eq!(body["payment_capture"], 1);
        assert_eq!(body["currency"], "INR");
    }
}
