//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use booking_types::{
    AppError, CreateOrderRequest, Mailer, MessageResponse, PaymentGateway, ReceiptRequest,
    VerifyPaymentRequest, VerifyPaymentResponse,
};

use crate::BookingService;

/// Application state shared across handlers.
pub struct AppState<G: PaymentGateway, M: Mailer> {
    pub service: BookingService<G, M>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::InvalidAmount(_) | AppError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            AppError::OrderCreationFailed | AppError::NotificationFailed => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string())
            }
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "OK" }))
}

/// Create a payment-gateway order.
#[tracing::instrument(skip(state, req))]
pub async fn create_order<G: PaymentGateway, M: Mailer>(
    State(state): State<Arc<AppState<G, M>>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.service.create_order(req).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Verify a gateway callback signature.
///
/// A mismatch is a normal outcome: `{verified:false}` with 400, never a 5xx.
#[tracing::instrument(skip(state, req))]
pub async fn verify_payment<G: PaymentGateway, M: Mailer>(
    State(state): State<Arc<AppState<G, M>>>,
    Json(req): Json<VerifyPaymentRequest>,
) -> Result<Response, ApiError> {
    let verified = state.service.verify_payment(&req)?;
    let status = if verified {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    Ok((status, Json(VerifyPaymentResponse { verified })).into_response())
}

/// Send the receipt confirmation email.
#[tracing::instrument(skip(state, req))]
pub async fn send_receipt<G: PaymentGateway, M: Mailer>(
    State(state): State<Arc<AppState<G, M>>>,
    Json(req): Json<ReceiptRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = state.service.send_receipt(req).await?;
    Ok(Json(MessageResponse { message }))
}
