//! Transactional-mail port trait.

use crate::error::MailError;

/// A rendered message ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMail {
    pub to: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

/// Outbound port to the hosted mail API.
///
/// Delivery is best-effort relative to the payment flow: a failure here must
/// never undo or contradict a successful payment.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync + 'static {
    async fn send(&self, mail: OutboundMail) -> Result<(), MailError>;
}

#[async_trait::async_trait]
impl<T: Mailer> Mailer for std::sync::Arc<T> {
    async fn send(&self, mail: OutboundMail) -> Result<(), MailError> {
        (**self).send(mail).await
    }
}
