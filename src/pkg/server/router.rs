use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};

use super::handlers::probes::{healthz, index, livez};
use super::handlers::upload::{upload_audio, MAX_UPLOAD_BYTES};
use super::state::AppState;
use crate::prelude::Result;

pub async fn build_routes() -> Result<Router> {
    Ok(routes(AppState::new().await?))
}

pub fn routes(state: AppState) -> Router {
    // browser clients record and upload from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/upload-audio", post(upload_audio))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        // leave headroom over the in-handler file limit for multipart framing
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 2 * 1024 * 1024))
        .layer(cors)
        .with_state(state)
}
