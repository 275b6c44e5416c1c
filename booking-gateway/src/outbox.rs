//! Notification outbox with at-least-once, idempotent retry.
//!
//! A failed receipt send is parked here keyed by the completed-payment
//! identifier and retried with exponential backoff by a background worker.
//! Delivered identifiers are remembered so a repeat request (or a late
//! retry racing an inline success) never produces a second email.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::{DashMap, DashSet};
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

use booking_types::{Mailer, OutboundMail};

const MAX_ATTEMPTS: u32 = 8;
const POLL_INTERVAL: Duration = Duration::from_secs(1);
const MAX_BACKOFF_SECS: i64 = 300;

#[derive(Debug, Clone)]
struct PendingNotification {
    mail: OutboundMail,
    attempts: u32,
    next_attempt_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct NotificationOutbox {
    pending: DashMap<String, PendingNotification>,
    delivered: DashSet<String>,
}

impl NotificationOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks a notification for retry. Returns false when the id is already
    /// delivered or already queued.
    pub fn enqueue(&self, id: &str, mail: OutboundMail) -> bool {
        if self.delivered.contains(id) || self.pending.contains_key(id) {
            return false;
        }
        self.pending.insert(
            id.to_string(),
            PendingNotification {
                mail,
                attempts: 0,
                next_attempt_at: Utc::now(),
            },
        );
        true
    }

    pub fn is_delivered(&self, id: &str) -> bool {
        self.delivered.contains(id)
    }

    pub fn mark_delivered(&self, id: &str) {
        self.pending.remove(id);
        self.delivered.insert(id.to_string());
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Entries whose next attempt is due at `now`.
    fn due(&self, now: DateTime<Utc>) -> Vec<(String, OutboundMail)> {
        self.pending
            .iter()
            .filter(|e| e.next_attempt_at <= now)
            .map(|e| (e.key().clone(), e.mail.clone()))
            .collect()
    }

    /// Bumps the attempt counter and reschedules with backoff.
    /// Returns false when the entry exhausted its attempts and was dropped.
    fn record_failure(&self, id: &str) -> bool {
        let attempts = match self.pending.get_mut(id) {
            Some(mut entry) => {
                entry.attempts += 1;
                if entry.attempts < MAX_ATTEMPTS {
                    entry.next_attempt_at = Utc::now() + backoff(entry.attempts);
                    return true;
                }
                entry.attempts
            }
            None => return false,
        };
        self.pending.remove(id);
        error!(id, attempts, "notification dropped after exhausting retries");
        false
    }
}

fn backoff(attempts: u32) -> chrono::Duration {
    let secs = 1i64 << attempts.min(12);
    chrono::Duration::seconds(secs.min(MAX_BACKOFF_SECS))
}

/// Background task draining the outbox through the mail port.
pub struct OutboxWorker<M: Mailer> {
    outbox: Arc<NotificationOutbox>,
    mailer: Arc<M>,
}

impl<M: Mailer> OutboxWorker<M> {
    pub fn new(outbox: Arc<NotificationOutbox>, mailer: Arc<M>) -> Self {
        Self { outbox, mailer }
    }

    #[instrument(skip(self))]
    pub async fn run(self) {
        info!("starting notification outbox worker");
        loop {
            self.drain_due().await;
            sleep(POLL_INTERVAL).await;
        }
    }

    /// One polling pass over due entries. Split out of `run` for tests.
    pub async fn drain_due(&self) {
        for (id, mail) in self.outbox.due(Utc::now()) {
            if self.outbox.is_delivered(&id) {
                self.outbox.mark_delivered(&id);
                continue;
            }
            match self.mailer.send(mail).await {
                Ok(()) => {
                    info!(id = %id, "queued notification delivered");
                    self.outbox.mark_delivered(&id);
                }
                Err(e) => {
                    warn!(id = %id, error = %e, "notification retry failed");
                    self.outbox.record_failure(&id);
                }
            }
        }
    }
}
