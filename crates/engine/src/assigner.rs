//! Assigner — pairs every participant with someone other than themselves.
//!
//! Uses rejection sampling: shuffle the roster uniformly, reject the shuffle if
//! anyone landed on their own position, and try again up to `MAX_ATTEMPTS`
//! times. Roughly 1/e of shuffles are derangements, so for three or more
//! participants the ceiling is never reached in practice.

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use santa_common::error::AppError;
use santa_common::types::{Assignment, Participant};

/// Number of shuffles tried before giving up.
pub const MAX_ATTEMPTS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    /// Zero or one participant has no derangement at all.
    #[error("At least 2 participants are needed to draw, got {count}")]
    TooFewParticipants { count: usize },

    #[error("Could not generate valid Secret Santa assignments after {attempts} attempts")]
    AssignmentExhausted { attempts: u32 },
}

impl From<AssignError> for AppError {
    fn from(err: AssignError) -> Self {
        match err {
            AssignError::TooFewParticipants { .. } => AppError::InvalidInput(err.to_string()),
            AssignError::AssignmentExhausted { attempts } => {
                AppError::AssignmentExhausted { attempts }
            }
        }
    }
}

/// Draw assignments using the thread-local RNG.
pub fn assign(participants: &[Participant]) -> Result<Vec<Assignment>, AssignError> {
    assign_with(participants, &mut rand::thread_rng())
}

/// Draw assignments using the given random source.
///
/// `result[i].giver` is always `participants[i]`; receivers are a permutation
/// of `participants` with no one mapped to themselves.
pub fn assign_with<R: Rng + ?Sized>(
    participants: &[Participant],
    rng: &mut R,
) -> Result<Vec<Assignment>, AssignError> {
    match participants {
        [] | [_] => {
            return Err(AssignError::TooFewParticipants {
                count: participants.len(),
            });
        }
        // Only one derangement exists.
        [a, b] => return Ok(pair(participants, &[b.clone(), a.clone()])),
        _ => {}
    }

    let mut shuffled = participants.to_vec();

    for attempt in 1..=MAX_ATTEMPTS {
        shuffled.shuffle(rng);

        if is_derangement(participants, &shuffled) {
            tracing::debug!(
                participants = participants.len(),
                attempt,
                "Found valid assignment"
            );
            return Ok(pair(participants, &shuffled));
        }
    }

    tracing::error!(
        participants = participants.len(),
        attempts = MAX_ATTEMPTS,
        "Assignment retries exhausted"
    );

    Err(AssignError::AssignmentExhausted {
        attempts: MAX_ATTEMPTS,
    })
}

/// True when no position of `shuffled` holds the same person as `original`.
fn is_derangement(original: &[Participant], shuffled: &[Participant]) -> bool {
    original
        .iter()
        .zip(shuffled)
        .all(|(giver, receiver)| !giver.same_person(receiver))
}

fn pair(givers: &[Participant], receivers: &[Participant]) -> Vec<Assignment> {
    givers
        .iter()
        .zip(receivers)
        .map(|(giver, receiver)| Assignment {
            giver: giver.clone(),
            receiver: receiver.clone(),
        })
        .collect()
}
