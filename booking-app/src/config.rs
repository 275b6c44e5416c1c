//! Configuration loading from environment.
//!
//! All credentials come from the environment; nothing is embedded in source.

use std::env;

/// Application configuration, built once at startup and injected.
pub struct Config {
    pub port: u16,
    pub razorpay_key_id: String,
    pub razorpay_key_secret: String,
    pub graph_tenant_id: String,
    pub graph_client_id: String,
    pub graph_client_secret: String,
    pub sender_email: String,
    /// Internal mailboxes copied on every receipt (comma separated).
    pub internal_recipients: Vec<String>,
    /// Phone numbers rendered into the receipt's confirm-slot line.
    pub contact_phones: Option<String>,
    pub rate_limit_per_minute: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let rate_limit_per_minute = env::var("RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|_| "100".to_string())
            .parse()?;

        let internal_recipients = env::var("INTERNAL_RECIPIENTS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let contact_phones = env::var("CONTACT_PHONES")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Ok(Self {
            port,
            razorpay_key_id: required("RAZORPAY_KEY_ID")?,
            razorpay_key_secret: required("RAZORPAY_KEY_SECRET")?,
            graph_tenant_id: required("GRAPH_TENANT_ID")?,
            graph_client_id: required("GRAPH_CLIENT_ID")?,
            graph_client_secret: required("GRAPH_CLIENT_SECRET")?,
            sender_email: required("SENDER_EMAIL")?,
            internal_recipients,
            contact_phones,
            rate_limit_per_minute,
        })
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name).map_err(|_| anyhow::anyhow!("{name} environment variable is required"))
}
