//! Booking Application Service
//!
//! Orchestrates the payment-order lifecycle through the gateway and mail
//! ports: create order, verify callback signature, send receipt. Contains no
//! transport logic.

use std::sync::Arc;

use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};

use booking_gateway::{NotificationOutbox, OrderStore};
use booking_types::{
    AppError, CreateOrderRequest, GatewayOrder, GatewayOrderRequest, Mailer, OrderRecord,
    OutboundMail, PaymentGateway, ReceiptRequest, VerifyPaymentRequest,
};

use crate::receipt::{self, RECEIPT_SUBJECT, ReceiptSettings};

/// Application service for the payment-order lifecycle.
///
/// Generic over the gateway and mailer ports - adapters are injected at
/// compile time, which keeps the service testable with in-memory fakes.
pub struct BookingService<G: PaymentGateway, M: Mailer> {
    gateway: G,
    mailer: Arc<M>,
    orders: Arc<OrderStore>,
    outbox: Arc<NotificationOutbox>,
    receipt: ReceiptSettings,
}

impl<G: PaymentGateway, M: Mailer> BookingService<G, M> {
    pub fn new(
        gateway: G,
        mailer: Arc<M>,
        orders: Arc<OrderStore>,
        outbox: Arc<NotificationOutbox>,
        receipt: ReceiptSettings,
    ) -> Self {
        Self {
            gateway,
            mailer,
            orders,
            outbox,
            receipt,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Order Creation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates a gateway order and records it for later receipt lookup.
    pub async fn create_order(&self, req: CreateOrderRequest) -> Result<GatewayOrder, AppError> {
        let amount = parse_amount(&req.amount)?;
        let currency = if req.currency.trim().is_empty() {
            "INR".to_string()
        } else {
            req.currency
        };
        let receipt = req
            .receipt
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(generate_receipt_token);

        let gateway_req = GatewayOrderRequest {
            amount,
            currency: currency.clone(),
            receipt: receipt.clone(),
            payment_capture: 1,
            notes: req.notes,
        };

        let order = self.gateway.create_order(gateway_req).await.map_err(|e| {
            tracing::error!(error = %e, "gateway order creation failed");
            AppError::OrderCreationFailed
        })?;

        self.orders.insert(OrderRecord {
            order_id: order.id.clone(),
            amount,
            currency,
            receipt,
            created_at: Utc::now(),
        });

        Ok(order)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Signature Verification
    // ─────────────────────────────────────────────────────────────────────────────

    /// Checks a gateway callback signature.
    ///
    /// A mismatch answers `Ok(false)`; only an incomplete payload is an
    /// error, rejected before any comparison is attempted.
    pub fn verify_payment(&self, req: &VerifyPaymentRequest) -> Result<bool, AppError> {
        let order_id = required_field(&req.razorpay_order_id, "razorpay_order_id")?;
        let payment_id = required_field(&req.razorpay_payment_id, "razorpay_payment_id")?;
        let signature = required_field(&req.razorpay_signature, "razorpay_signature")?;

        Ok(self.gateway.verify_signature(order_id, payment_id, signature))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Receipt Notification
    // ─────────────────────────────────────────────────────────────────────────────

    /// Renders and dispatches the confirmation email.
    ///
    /// Delivery is at-least-once and idempotent per completed-payment id: a
    /// failed inline send parks the message in the outbox for background
    /// retry and still reports `NotificationFailed` to the caller; a repeat
    /// request for an already-delivered id short-circuits to success.
    pub async fn send_receipt(&self, req: ReceiptRequest) -> Result<String, AppError> {
        let form = req
            .form_data
            .ok_or_else(|| AppError::InvalidRequest("formData is required".into()))?;
        if form.email.trim().is_empty() {
            return Err(AppError::InvalidRequest("formData.email is required".into()));
        }

        let order_id = req.order_id.filter(|id| !id.trim().is_empty());
        let notification_id = order_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        if self.outbox.is_delivered(&notification_id) {
            tracing::info!(id = %notification_id, "receipt already delivered, skipping resend");
            return Ok("Email sent".to_string());
        }

        let charged_paise = order_id
            .as_deref()
            .and_then(|id| self.orders.get(id))
            .map(|record| record.amount);

        let html = receipt::render_receipt(
            &form,
            &req.selected_services,
            charged_paise,
            &self.receipt,
        );

        let mut to = vec![form.email.clone()];
        to.extend(self.receipt.internal_recipients.iter().cloned());

        let mail = OutboundMail {
            to,
            subject: RECEIPT_SUBJECT.to_string(),
            html_body: html,
        };

        match self.mailer.send(mail.clone()).await {
            Ok(()) => {
                self.outbox.mark_delivered(&notification_id);
                Ok("Email sent".to_string())
            }
            Err(e) => {
                tracing::error!(id = %notification_id, error = %e, "receipt send failed, parking for retry");
                self.outbox.enqueue(&notification_id, mail);
                Err(AppError::NotificationFailed)
            }
        }
    }
}

fn required_field<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    match field.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(AppError::InvalidRequest(format!("{name} is required"))),
    }
}

/// Validates the caller-supplied amount: a JSON integer or numeric string,
/// strictly positive. Floats and garbage are rejected, never coerced.
fn parse_amount(value: &serde_json::Value) -> Result<i64, AppError> {
    let amount = match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| AppError::InvalidAmount("amount must be an integer".into()))?,
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::InvalidAmount("amount must be an integer".into()))?,
        _ => return Err(AppError::InvalidAmount("amount must be an integer".into())),
    };

    if amount <= 0 {
        return Err(AppError::InvalidAmount(
            "amount must be a positive integer".into(),
        ));
    }
    Ok(amount)
}

/// Time-based receipt token; the random suffix keeps concurrent calls in the
/// same millisecond distinct on a best-effort basis.
fn generate_receipt_token() -> String {
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("rcpt_{}_{}", Utc::now().timestamp_millis(), suffix)
}
