use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use crate::state::AppState;
use tower_http::limit::RequestBodyLimitLayer;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

/// Hard cap enforced by the body-limit layer before the handler runs.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/videos", post(handler::upload_video))
        .route("/videos/{id}/transcription", post(handler::create_transcription))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES))
}
