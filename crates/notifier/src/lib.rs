//! Notification delivery for drawn assignments.
//!
//! Each giver gets one email naming their receiver. Deliveries are attempted
//! sequentially and independently: a failed send is logged and counted, never
//! propagated, so the batch always produces exactly one outcome per assignment.

pub mod resend;
pub mod template;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use santa_common::config::AppConfig;
use santa_common::types::{Assignment, DeliveryOutcome, DeliveryStatus};

pub use resend::ResendTransport;
pub use template::EmailMessage;

/// Why a single delivery attempt failed.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid message: {0}")]
    InvalidMessage(String),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Capability to send one rendered email.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError>;

    /// Short name used in logs (e.g. "resend").
    fn name(&self) -> &'static str;
}

/// Whether outbound email is available for this process.
#[derive(Clone)]
pub enum Transport {
    Configured(Arc<dyn MailTransport>),
    /// No credentials: pairings are written to the log instead.
    Unconfigured,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transport::Configured(t) => write!(f, "Configured({})", t.name()),
            Transport::Unconfigured => write!(f, "Unconfigured"),
        }
    }
}

impl Transport {
    /// Pick the transport from configuration; missing credentials select degraded mode.
    pub fn from_config(config: &AppConfig) -> Self {
        match (&config.resend_api_key, &config.email_from) {
            (Some(api_key), Some(from)) => Transport::Configured(Arc::new(ResendTransport::new(
                &config.resend_api_url,
                api_key.clone(),
                from.clone(),
            ))),
            _ => Transport::Unconfigured,
        }
    }
}

/// Delivers assignment notifications to givers.
#[derive(Debug, Clone)]
pub struct Notifier {
    transport: Transport,
}

impl Notifier {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.transport, Transport::Configured(_))
    }

    /// Notify every giver of their receiver and report aggregate counts.
    pub async fn notify(&self, assignments: &[Assignment]) -> DeliveryOutcome {
        let transport = match &self.transport {
            Transport::Configured(transport) => transport,
            Transport::Unconfigured => return Self::log_unsent(assignments),
        };

        let mut outcome = DeliveryOutcome::default();
        for assignment in assignments {
            let status = Self::deliver(transport.as_ref(), assignment).await;
            outcome = outcome.record(status);
        }

        tracing::info!(
            transport = transport.name(),
            successful = outcome.successful,
            failed = outcome.failed,
            "Notification batch complete"
        );

        outcome
    }

    /// One attempt for one assignment. Errors are logged here and never escape.
    async fn deliver(transport: &dyn MailTransport, assignment: &Assignment) -> DeliveryStatus {
        let result = match EmailMessage::for_assignment(assignment) {
            Ok(message) => transport.send(&message).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                tracing::info!(giver = %assignment.giver.email, "Email sent");
                DeliveryStatus::Sent
            }
            Err(e) => {
                tracing::warn!(
                    giver = %assignment.giver.email,
                    error = %e,
                    "Failed to send email"
                );
                DeliveryStatus::Failed
            }
        }
    }

    /// Degraded mode: no transport, so surface pairings in the log for manual relay.
    fn log_unsent(assignments: &[Assignment]) -> DeliveryOutcome {
        tracing::warn!(
            assignments = assignments.len(),
            "Email not configured; set RESEND_API_KEY and EMAIL_FROM. Assignments logged below"
        );

        for assignment in assignments {
            tracing::info!(
                giver = %assignment.giver,
                receiver = %assignment.receiver.name,
                status = %DeliveryStatus::Failed,
                "Secret Santa assignment (email not sent)"
            );
        }

        DeliveryOutcome::all_failed(assignments.len())
    }
}
