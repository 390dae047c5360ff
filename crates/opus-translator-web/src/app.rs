//! Router and middleware assembly.

use anyhow::{Context, Result};
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::routes;
use crate::state::AppState;

/// CORS for the configured browser origins.
///
/// Credentials are allowed, so methods and headers are mirrored from the
/// preflight request instead of answering with a `*` wildcard.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("Invalid CORS origin: {origin}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Build the application router.
pub fn build_router(state: Arc<AppState>) -> Result<Router> {
    let cors = cors_layer(&state.config.server.cors_origins)?;

    Ok(Router::new()
        .route("/", get(routes::home))
        .route("/translate/", post(routes::translate))
        .route("/translate", post(routes::translate))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}
