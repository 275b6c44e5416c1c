//! # Booking Hex
//!
//! Application service layer and HTTP adapter for the booking payments
//! service.
//!
//! ## Architecture
//!
//! - `service` - Application service (orchestrates the payment-order lifecycle)
//! - `receipt` - Receipt rendering (HTML body, rupee formatting)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `G: PaymentGateway` and `M: Mailer`, allowing
//! different adapter implementations to be injected.

pub mod inbound;
pub mod receipt;
pub mod service;


pub use receipt::ReceiptSettings;
pub use service::BookingService;
