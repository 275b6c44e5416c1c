//! # Booking Types
//!
//! Domain types and port traits for the booking payments service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (gateway order shapes, order records)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Adapter and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{GatewayOrder, GatewayOrderRequest, OrderRecord};
pub use dto::*;
pub use error::{AppError, GatewayError, MailError};
pub use ports::{Mailer, OutboundMail, PaymentGateway};
