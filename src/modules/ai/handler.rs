use crate::common::response::ApiError;
use crate::modules::ai::dto::GenerateCompletionRequest;
use crate::modules::ai::prompt;
use crate::modules::video::repository::VideoRepository;
use crate::state::AppState;
use axum::{
    Json,
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use bytes::Bytes;
use futures_util::TryStreamExt;
use tracing::{error, info};
use validator::Validate;

/// Generate an AI completion from a video transcription
/// Relays the model's token stream to the caller unbuffered.
#[utoipa::path(
    post,
    path = "/ai/generate",
    request_body = GenerateCompletionRequest,
    responses(
        (status = 200, description = "Chunked completion text", body = String),
        (status = 400, description = "Invalid parameters or transcription not generated yet"),
        (status = 404, description = "Video not found"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "AI"
)]
pub async fn generate_completion(
    State(state): State<AppState>,
    Json(req): Json<GenerateCompletionRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return ApiError(e.to_string(), StatusCode::BAD_REQUEST).into_response();
    }

    let video = match VideoRepository::get_by_id(&state.db, req.video_id).await {
        Ok(Some(v)) => v,
        Ok(None) => {
            return ApiError("Video not found".to_string(), StatusCode::NOT_FOUND).into_response();
        }
        Err(e) => {
            return ApiError(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response();
        }
    };

    let transcription = match video.transcription {
        Some(t) => t,
        None => {
            return ApiError(
                "Video transcription was not generated yet".to_string(),
                StatusCode::BAD_REQUEST,
            )
            .into_response();
        }
    };

    let composed = prompt::compose(&req.prompt, &transcription);

    info!(
        "Generating completion for video {} (temperature {})",
        req.video_id, req.temperature
    );

    let tokens = match state.llm.chat_stream(&composed, req.temperature).await {
        Ok(stream) => stream,
        Err(e) => {
            error!("Completion request failed: {}", e);
            return ApiError(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response();
        }
    };

    let body = Body::from_stream(tokens.map_ok(Bytes::from));

    axum::response::Response::builder()
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(body)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
