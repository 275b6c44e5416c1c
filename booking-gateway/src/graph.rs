//! Microsoft Graph adapter for the mail port.
//!
//! Authenticates with a client-credential grant against the directory
//! service, caches the token until shortly before expiry, then posts to the
//! sender mailbox's sendMail action.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use booking_types::{MailError, Mailer, OutboundMail};

const DEFAULT_LOGIN_BASE: &str = "https://login.microsoftonline.com";
const DEFAULT_GRAPH_BASE: &str = "https://graph.microsoft.com";
const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Refresh the cached token this long before it actually expires.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Mailer backed by the Graph sendMail API.
pub struct GraphMailer {
    http: reqwest::Client,
    login_base: String,
    graph_base: String,
    tenant_id: String,
    client_id: String,
    client_secret: String,
    sender: String,
    token: RwLock<Option<CachedToken>>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMailBody {
    message: GraphMessage,
    save_to_sent_items: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphMessage {
    subject: String,
    body: MessageBody,
    to_recipients: Vec<Recipient>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageBody {
    content_type: &'static str,
    content: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Recipient {
    email_address: EmailAddress,
}

#[derive(Serialize)]
struct EmailAddress {
    address: String,
}

impl GraphMailer {
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("reqwest client construction"),
            login_base: DEFAULT_LOGIN_BASE.to_string(),
            graph_base: DEFAULT_GRAPH_BASE.to_string(),
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            sender: sender.into(),
            token: RwLock::new(None),
        }
    }

    /// Overrides the login and Graph endpoints (used against stub servers).
    pub fn with_endpoints(
        mut self,
        login_base: impl Into<String>,
        graph_base: impl Into<String>,
    ) -> Self {
        self.login_base = login_base.into().trim_end_matches('/').to_string();
        self.graph_base = graph_base.into().trim_end_matches('/').to_string();
        self
    }

    async fn access_token(&self) -> Result<String, MailError> {
        let margin = chrono::Duration::seconds(TOKEN_EXPIRY_MARGIN_SECS);
        {
            let cached = self.token.read().await;
            if let Some(t) = cached.as_ref() {
                if t.expires_at - margin > Utc::now() {
                    return Ok(t.token.clone());
                }
            }
        }

        let resp = self
            .http
            .post(format!(
                "{}/{}/oauth2/v2.0/token",
                self.login_base, self.tenant_id
            ))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("scope", GRAPH_SCOPE),
            ])
            .send()
            .await
            .map_err(|e| MailError::Auth(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MailError::Auth(format!("HTTP {}: {}", status, body)));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| MailError::Auth(e.to_string()))?;

        let expires_at = Utc::now() + chrono::Duration::seconds(token.expires_in);
        let mut cached = self.token.write().await;
        *cached = Some(CachedToken {
            token: token.access_token.clone(),
            expires_at,
        });
        Ok(token.access_token)
    }
}

#[async_trait::async_trait]
impl Mailer for GraphMailer {
    #[tracing::instrument(skip(self, mail), fields(recipients = mail.to.len()))]
    async fn send(&self, mail: OutboundMail) -> Result<(), MailError> {
        let token = self.access_token().await?;

        let body = SendMailBody {
            message: GraphMessage {
                subject: mail.subject,
                body: MessageBody {
                    content_type: "HTML",
                    content: mail.html_body,
                },
                to_recipients: mail
                    .to
                    .into_iter()
                    .map(|address| Recipient {
                        email_address: EmailAddress { address },
                    })
                    .collect(),
            },
            save_to_sent_items: true,
        };

        let resp = self
            .http
            .post(format!(
                "{}/v1.0/users/{}/sendMail",
                self.graph_base, self.sender
            ))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MailError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_mail_body_matches_graph_wire_format() {
        let body = SendMailBody {
            message: GraphMessage {
                subject: "Payment Confirmation".to_string(),
                body: MessageBody {
                    content_type: "HTML",
                    content: "<p>hi</p>".to_string(),
                },
                to_recipients: vec![Recipient {
                    email_address: EmailAddress {
                        address: "asha@example.com".to_string(),
                    },
                }],
            },
            save_to_sent_items: true,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["saveToSentItems"], true);
        assert_eq!(json["message"]["body"]["contentType"], "HTML");
        assert_eq!(
            json["message"]["toRecipients"][0]["emailAddress"]["address"],
            "asha@example.com"
        );
    }

    #[test]
    fn endpoint_overrides_trim_trailing_slash() {
        let mailer = GraphMailer::new("t", "c", "s", "sender@example.com")
            .with_endpoints("http://localhost:1/", "http://localhost:2/");
        assert_eq!(mailer.login_base, "http://localhost:1");
        assert_eq!(mailer.graph_base, "http://localhost:2");
    }
}
