//! # Booking Gateway
//!
//! Outbound adapters for the booking payments service:
//! - `razorpay` - payment-gateway order API over REST
//! - `graph` - transactional mail through the Microsoft Graph sendMail API
//! - `signature` - HMAC-SHA256 callback signature helpers
//! - `orders` - ephemeral in-process store of created orders
//! - `outbox` - at-least-once retry queue for receipt notifications

pub mod graph;
pub mod orders;
pub mod outbox;
pub mod razorpay;
pub mod signature;

pub use graph::GraphMailer;
pub use orders::OrderStore;
pub use outbox::{NotificationOutbox, OutboxWorker};
pub use razorpay::RazorpayGateway;
