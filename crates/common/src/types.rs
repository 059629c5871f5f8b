use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person taking part in a draw.
///
/// Identity for matching purposes is the email address; two participants with
/// the same email are the same person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub email: String,
}

impl Participant {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Whether both values refer to the same person.
    pub fn same_person(&self, other: &Participant) -> bool {
        self.email.eq_ignore_ascii_case(&other.email)
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.email)
    }
}

/// Raw participant as submitted by a client, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticipantInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// A giver paired with the participant they buy a gift for.
///
/// `giver` and `receiver` are never the same person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub giver: Participant,
    pub receiver: Participant,
}

/// Outcome of a single delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
    Failed,
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryStatus::Sent => write!(f, "sent"),
            DeliveryStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Aggregate delivery counters for one notification batch.
///
/// `successful + failed` always equals the number of attempts recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    pub successful: usize,
    pub failed: usize,
}

impl DeliveryOutcome {
    /// Outcome of a batch where nothing could be delivered.
    pub fn all_failed(count: usize) -> Self {
        Self {
            successful: 0,
            failed: count,
        }
    }

    /// Count one attempt.
    pub fn record(mut self, status: DeliveryStatus) -> Self {
        match status {
            DeliveryStatus::Sent => self.successful += 1,
            DeliveryStatus::Failed => self.failed += 1,
        }
        self
    }

    pub fn total(&self) -> usize {
        self.successful + self.failed
    }
}

/// Response body for a completed draw. Never contains the pairings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawSummary {
    pub success: bool,
    pub message: String,
    pub draw_id: Uuid,
    pub emails_sent: usize,
    pub emails_failed: usize,
    pub total_participants: usize,
}

impl DrawSummary {
    pub fn new(draw_id: Uuid, outcome: DeliveryOutcome, total_participants: usize) -> Self {
        let message = if outcome.failed == 0 {
            "Secret Santa assignments sent successfully!".to_string()
        } else {
            format!(
                "Secret Santa assignments drawn; {} of {} emails could not be sent",
                outcome.failed,
                outcome.total()
            )
        };

        Self {
            success: true,
            message,
            draw_id,
            emails_sent: outcome.successful,
            emails_failed: outcome.failed,
            total_participants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_record_keeps_total() {
        let outcome = [
            DeliveryStatus::Sent,
            DeliveryStatus::Failed,
            DeliveryStatus::Sent,
        ]
        .into_iter()
        .fold(DeliveryOutcome::default(), DeliveryOutcome::record);

        assert_eq!(outcome.successful, 2);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.total(), 3);
    }

    #[test]
    fn test_same_person_ignores_email_case() {
        let a = Participant::new("Alice", "alice@x.com");
        let b = Participant::new("Alicia", "ALICE@x.com");
        assert!(a.same_person(&b));
        assert!(!a.same_person(&Participant::new("Bob", "bob@x.com")));
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = DrawSummary::new(
            Uuid::nil(),
            DeliveryOutcome {
                successful: 3,
                failed: 0,
            },
            3,
        );
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["emailsSent"], 3);
        assert_eq!(json["emailsFailed"], 0);
        assert_eq!(json["totalParticipants"], 3);
        assert_eq!(json["message"], "Secret Santa assignments sent successfully!");
    }
}
