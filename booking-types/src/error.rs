//! Error types for the booking payments service.

/// Payment-gateway adapter errors (outbound order API).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway transport error: {0}")]
    Transport(String),

    #[error("gateway rejected request: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("unexpected gateway response: {0}")]
    InvalidResponse(String),
}

/// Transactional-mail adapter errors (outbound mail API).
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail transport error: {0}")]
    Transport(String),

    #[error("token acquisition failed: {0}")]
    Auth(String),

    #[error("mail API rejected request: HTTP {status}: {body}")]
    Api { status: u16, body: String },
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes. The messages on the unit variants are
/// intentionally generic: upstream detail is logged server-side and never
/// surfaced to the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Order creation failed")]
    OrderCreationFailed,

    #[error("Email sending failed")]
    NotificationFailed,
}
