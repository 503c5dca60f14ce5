use axum::Router;
use axum::routing::post;
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod prompt;

pub fn router() -> Router<AppState> {
    Router::new().route("/ai/generate", post(handler::generate_completion))
}
