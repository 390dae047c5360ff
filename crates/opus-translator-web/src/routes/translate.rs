//! Translation route - detect, resolve and translate a single text.

use axum::{Json, extract::State};
use opus_translator_core::{TranslationRequest, TranslationResponse};
use std::sync::Arc;
use tracing::debug;

use crate::state::AppState;

/// Translate the request text into `target_lang`.
///
/// Same-language input, unavailable model pairs, detection and inference
/// failures all come back as `{"error": ...}` with status 200.
pub async fn translate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TranslationRequest>,
) -> Json<TranslationResponse> {
    debug!(
        "translate: target_lang={}, chars={}",
        request.target_lang,
        request.text.chars().count()
    );

    Json(state.service.handle(&request).await)
}
