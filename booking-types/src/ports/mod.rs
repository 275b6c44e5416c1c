//! Port traits implemented by outbound adapters.

mod gateway;
mod mailer;

pub use gateway::PaymentGateway;
pub use mailer::{Mailer, OutboundMail};
