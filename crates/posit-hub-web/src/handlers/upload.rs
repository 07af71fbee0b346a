//! Multipart file selection.
//!
//! Only the file name and byte count of each part are kept; the bytes are
//! dropped as soon as they are counted and nothing is written to disk.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use posit_hub_common::HubError;
use posit_hub_reactive::{FileDescriptor, InputUpdate, SessionEvent};
use uuid::Uuid;

use crate::state::SharedState;

/// POST /session/{id}/upload/{input} — replace the file selection of `input`.
pub async fn session_upload(
    State(state): State<SharedState>,
    Path((id, input)): Path<(Uuid, String)>,
    mut multipart: Multipart,
) -> Result<Json<Vec<SessionEvent>>, Response> {
    let handle = state.sessions.get(id).map_err(IntoResponse::into_response)?;

    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        // Browsers send an unnamed empty part when nothing is selected
        let name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        let bytes = field.bytes().await.map_err(multipart_error)?;
        files.push(FileDescriptor::new(name, bytes.len() as u64));
    }

    tracing::info!(
        session = %id,
        input = %input,
        files = files.len(),
        bytes = files.iter().map(|f| f.size).sum::<u64>(),
        "File selection received"
    );

    let events = handle
        .apply(InputUpdate::Files { id: input, files })
        .await
        .map_err(IntoResponse::into_response)?;
    Ok(Json(events))
}

/// Oversized bodies keep the framework's 413; anything else is a bad upload.
fn multipart_error(e: MultipartError) -> Response {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return e.into_response();
    }
    HubError::Upload(e.body_text()).into_response()
}
