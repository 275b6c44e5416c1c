//! # Booking Client SDK
//!
//! A typed Rust client for the booking payments API.

use std::collections::HashMap;

use booking_types::{
    CreateOrderRequest, GatewayOrder, MessageResponse, ReceiptFormData, ReceiptRequest,
    SelectedService, VerifyPaymentRequest,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Booking payments API client.
pub struct BookingClient {
    base_url: String,
    http: Client,
}

impl BookingClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Creates a gateway order for `amount` in minor currency units.
    pub async fn create_order(
        &self,
        amount: i64,
        currency: Option<String>,
        receipt: Option<String>,
        notes: HashMap<String, String>,
    ) -> Result<GatewayOrder, ClientError> {
        let req = CreateOrderRequest {
            amount: serde_json::json!(amount),
            currency: currency.unwrap_or_else(|| "INR".to_string()),
            receipt,
            notes,
        };
        self.post("/api/payment/order", &req).await
    }

    /// Verifies a checkout callback. `Ok(false)` is a signature mismatch.
    pub async fn verify_payment(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<bool, ClientError> {
        let req = VerifyPaymentRequest {
            razorpay_order_id: Some(order_id.to_string()),
            razorpay_payment_id: Some(payment_id.to_string()),
            razorpay_signature: Some(signature.to_string()),
        };

        let resp = self
            .http
            .post(format!("{}/api/payment/verify", self.base_url))
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        let json: serde_json::Value = serde_json::from_str(&body)?;
        match json.get("verified").and_then(|v| v.as_bool()) {
            Some(verified) => Ok(verified),
            None => Err(ClientError::Api {
                status: status.as_u16(),
                message: body,
            }),
        }
    }

    /// Requests the receipt confirmation email.
    pub async fn send_receipt(
        &self,
        form_data: ReceiptFormData,
        selected_services: Vec<SelectedService>,
        order_id: Option<String>,
    ) -> Result<String, ClientError> {
        let req = ReceiptRequest {
            form_data: Some(form_data),
            selected_services,
            order_id,
        };
        let resp: MessageResponse = self.post("/api/email/receipt", &req).await?;
        Ok(resp.message)
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = BookingClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = BookingClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
