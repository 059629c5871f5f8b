//! Roster validation — the gate in front of the assigner.
//!
//! Rejects short lists, blank fields, malformed addresses and duplicate emails
//! before any drawing happens.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use santa_common::error::AppError;
use santa_common::types::{Participant, ParticipantInput};

/// Smallest roster accepted for a draw.
pub const MIN_PARTICIPANTS: usize = 3;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"));

/// Validate a submitted roster and convert it into participants, preserving order.
pub fn validate_participants(
    input: Option<Vec<ParticipantInput>>,
) -> Result<Vec<Participant>, AppError> {
    let input = match input {
        Some(list) if list.len() >= MIN_PARTICIPANTS => list,
        _ => {
            return Err(AppError::InvalidInput(format!(
                "At least {} participants are required",
                MIN_PARTICIPANTS
            )));
        }
    };

    let mut seen = HashSet::with_capacity(input.len());
    let mut participants = Vec::with_capacity(input.len());

    for raw in input {
        let participant = parse_participant(raw)?;

        if !seen.insert(participant.email.to_ascii_lowercase()) {
            return Err(AppError::InvalidInput(format!(
                "Duplicate email: {}",
                participant.email
            )));
        }

        participants.push(participant);
    }

    Ok(participants)
}

fn parse_participant(raw: ParticipantInput) -> Result<Participant, AppError> {
    let name = raw.name.as_deref().map(str::trim).unwrap_or_default();
    let email = raw.email.as_deref().map(str::trim).unwrap_or_default();

    if name.is_empty() || email.is_empty() {
        return Err(AppError::InvalidInput(
            "Each participant must have a name and email".to_string(),
        ));
    }

    if !is_valid_email(email) {
        return Err(AppError::InvalidInput(format!(
            "Invalid email format: {}",
            email
        )));
    }

    Ok(Participant::new(name, email))
}

/// Loose syntactic check: `local@domain.tld` with no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
