use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message returned for any downstream failure. The client never learns
/// which stage broke; the detail goes to the logs.
pub const GENERIC_FAILURE: &str = "Processing failed. Please try again.";

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),
    #[error("transcription failed: {0}")]
    Transcription(String),
    #[error("extraction failed: {0}")]
    Extraction(String),
    #[error("sheet append failed: {0}")]
    Sheets(String),
    #[error("improperly configured: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({"error": message}))).into_response()
            }
            err => {
                tracing::error!("request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": GENERIC_FAILURE})),
                )
                    .into_response()
            }
        }
    }
}
