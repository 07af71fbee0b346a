//! The single page and the health probe.

use axum::{extract::State, response::Html, Json};
use posit_hub_common::HubError;
use serde_json::{json, Value};

use crate::state::SharedState;

/// GET / — render the four-panel page.
pub async fn index(State(state): State<SharedState>) -> Result<Html<String>, HubError> {
    state.templates.render_index(&state.config.ui).map(Html)
}

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "sessions": state.sessions.len(),
    }))
}
