//! Liveness route.

use axum::Json;
use serde::Serialize;

/// Body of the liveness response.
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: &'static str,
}

/// Report that the API is up.
pub async fn home() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "Translator API is running!",
    })
}
