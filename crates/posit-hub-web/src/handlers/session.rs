//! Session input and inspection endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use posit_hub_common::HubError;
use posit_hub_reactive::{InputUpdate, SessionEvent, SessionSnapshot};
use uuid::Uuid;

use crate::state::SharedState;

/// POST /session/{id}/input — apply one text, choice or click update.
///
/// The resulting events go to the session's stream and are also returned,
/// so clients without an open stream can still read them.
pub async fn session_input(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(update): Json<InputUpdate>,
) -> Result<Json<Vec<SessionEvent>>, HubError> {
    let handle = state.sessions.get(id)?;
    let events = handle.apply(update).await?;
    Ok(Json(events))
}

/// GET /session/{id} — current inputs, outputs and visible panel.
pub async fn session_snapshot(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, HubError> {
    let handle = state.sessions.get(id)?;
    Ok(Json(handle.snapshot().await))
}
