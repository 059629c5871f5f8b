//! Draw route — validate, assign, notify.

use std::time::Duration;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use santa_common::error::AppError;
use santa_common::types::{DrawSummary, ParticipantInput};
use santa_engine::assigner;
use santa_engine::validation::validate_participants;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/assign-secret-santa", post(assign_secret_santa))
}

/// Request body for a draw.
#[derive(Debug, Deserialize)]
pub struct DrawRequest {
    pub participants: Option<Vec<ParticipantInput>>,
}

/// POST /api/assign-secret-santa — Draw pairings and email every giver.
///
/// The response carries counts only; pairings are delivered solely by email
/// (or the operational log in degraded mode).
async fn assign_secret_santa(
    State(state): State<AppState>,
    payload: Result<Json<DrawRequest>, JsonRejection>,
) -> Result<Json<DrawSummary>, AppError> {
    // Wrongly typed bodies are reported as invalid input, not as axum's 422.
    let Json(req) = payload?;
    let participants = validate_participants(req.participants)?;
    let draw_id = Uuid::new_v4();

    let assignments = assigner::assign(&participants).inspect_err(|e| {
        tracing::error!(draw_id = %draw_id, error = %e, "Error assigning Secret Santa");
    })?;

    tracing::info!(
        draw_id = %draw_id,
        participants = participants.len(),
        email_configured = state.notifier.is_configured(),
        "Assignments drawn"
    );

    // Partial counts are dropped if the batch overruns.
    let limit = Duration::from_secs(state.config.notify_timeout_secs);
    let outcome = tokio::time::timeout(limit, state.notifier.notify(&assignments))
        .await
        .map_err(|_| {
            tracing::error!(draw_id = %draw_id, "Notification batch timed out");
            AppError::Timeout(format!(
                "sending notifications exceeded {}s",
                state.config.notify_timeout_secs
            ))
        })?;

    tracing::info!(
        draw_id = %draw_id,
        emails_sent = outcome.successful,
        emails_failed = outcome.failed,
        "Draw complete"
    );

    Ok(Json(DrawSummary::new(draw_id, outcome, participants.len())))
}
