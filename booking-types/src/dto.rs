//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

// ─────────────────────────────────────────────────────────────────────────────
// Order DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a payment-gateway order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Amount in smallest currency unit (paise for INR). Accepted as a JSON
    /// integer or a numeric string; validated by the service before any
    /// outbound call.
    #[serde(default)]
    #[schema(value_type = i64, example = 500000)]
    pub amount: serde_json::Value,
    /// ISO 4217 currency code
    #[serde(default = "default_currency")]
    #[schema(example = "INR")]
    pub currency: String,
    /// Merchant receipt token; auto-generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
    /// Free-form metadata forwarded to the gateway
    #[serde(default)]
    pub notes: HashMap<String, String>,
}

fn default_currency() -> String {
    "INR".to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Verification DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Gateway callback payload forwarded by the client for verification.
///
/// Fields are optional at the serde level so an incomplete payload maps to a
/// distinct invalid-request error instead of a body-rejection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyPaymentRequest {
    #[schema(example = "order_Nq1yJzLEpRrYVs")]
    pub razorpay_order_id: Option<String>,
    #[schema(example = "pay_G3kWtZHxLQ9dNe")]
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
}

/// Result of a signature check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct VerifyPaymentResponse {
    pub verified: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Receipt notification DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Contact details captured by the booking form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReceiptFormData {
    #[schema(example = "Asha Rao")]
    pub name: String,
    #[schema(example = "asha@example.com")]
    pub email: String,
    #[schema(example = "+91-9800000000")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One selected service line on the receipt.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SelectedService {
    #[schema(example = "Electric Cremation")]
    pub title: String,
    /// Price in whole rupees as displayed to the customer
    #[schema(example = 1000)]
    pub price: i64,
}

/// Request to send a receipt email.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRequest {
    pub form_data: Option<ReceiptFormData>,
    #[serde(default)]
    pub selected_services: Vec<SelectedService>,
    /// Gateway order id of the completed payment. When present, the recorded
    /// order amount overrides the client-supplied prices as the charged total
    /// and keys notification retries idempotently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// Generic success message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Email sent")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_request_defaults() {
        let req: CreateOrderRequest = serde_json::from_str(r#"{"amount": 500000}"#).unwrap();
        assert_eq!(req.currency, "INR");
        assert!(req.receipt.is_none());
        assert!(req.notes.is_empty());
        assert_eq!(req.amount, serde_json::json!(500000));
    }

    #[test]
    fn order_request_accepts_string_amount() {
        let req: CreateOrderRequest =
            serde_json::from_str(r#"{"amount": "2500", "currency": "INR"}"#).unwrap();
        assert_eq!(req.amount, serde_json::json!("2500"));
    }

    #[test]
    fn verify_request_tolerates_missing_fields() {
        let req: VerifyPaymentRequest =
            serde_json::from_str(r#"{"razorpay_order_id": "order_ABC"}"#).unwrap();
        assert_eq!(req.razorpay_order_id.as_deref(), Some("order_ABC"));
        assert!(req.razorpay_payment_id.is_none());
        assert!(req.razorpay_signature.is_none());
    }

    #[test]
    fn receipt_request_uses_camel_case() {
        let req: ReceiptRequest = serde_json::from_str(
            r#"{
                "formData": {"name": "X", "email": "x@y.z", "phone": "1"},
                "selectedServices": [{"title": "Hall", "price": 2000}],
                "orderId": "order_ABC"
            }"#,
        )
        .unwrap();
        assert_eq!(req.form_data.unwrap().name, "X");
        assert_eq!(req.selected_services[0].price, 2000);
        assert_eq!(req.order_id.as_deref(), Some("order_ABC"));
    }
}
