use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum HubError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Unknown input: {0}")]
    UnknownInput(String),

    #[error("Input {id} expects a {expected} value, got {got}")]
    InputKindMismatch {
        id: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Reactive graph error: {0}")]
    Graph(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, HubError>;

impl HubError {
    /// HTTP status the web layer reports for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            HubError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            HubError::UnknownInput(_)
            | HubError::InputKindMismatch { .. }
            | HubError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            HubError::Upload(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
