//! Razorpay REST adapter for the payment-gateway port.

use std::time::Duration;

use booking_types::{GatewayError, GatewayOrder, GatewayOrderRequest, PaymentGateway};

use crate::signature;

const DEFAULT_BASE_URL: &str = "https://api.razorpay.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Payment gateway backed by the Razorpay orders API.
///
/// Authenticates with HTTP basic auth (key id / key secret); the same key
/// secret is the HMAC key for callback signatures.
pub struct RazorpayGateway {
    http: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayGateway {
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("reqwest client construction"),
            base_url: DEFAULT_BASE_URL.to_string(),
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        }
    }

    /// Overrides the API endpoint (used against stub servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait::async_trait]
impl PaymentGateway for RazorpayGateway {
    #[tracing::instrument(skip(self, req), fields(amount = req.amount, currency = %req.currency))]
    async fn create_order(&self, req: GatewayOrderRequest) -> Result<GatewayOrder, GatewayError> {
        let resp = self
            .http
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&req)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<GatewayOrder>()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    fn verify_signature(&self, order_id: &str, payment_id: &str, sig: &str) -> bool {
        signature::verify_payment_signature(order_id, payment_id, sig, &self.key_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let gw = RazorpayGateway::new("key", "secret").with_base_url("http://localhost:9000/");
        assert_eq!(gw.base_url, "http://localhost:9000");
    }

    #[test]
    fn verify_uses_key_secret() {
        let gw = RazorpayGateway::new("key_id", "key_secret_123");
        // hex(HMAC-SHA256("key_secret_123", "order_Nq1yJzLEpRrYVs|pay_G3kWtZHxLQ9dNe"))
        let sig = "272290d933ac8c326a27f57f4fcc592a4abb51c976ba56e1c2f08de94caba2b4";
        assert!(gw.verify_signature("order_Nq1yJzLEpRrYVs", "pay_G3kWtZHxLQ9dNe", sig));
        assert!(!gw.verify_signature("order_Nq1yJzLEpRrYVs", "pay_other", sig));
    }
}
