use crate::common::response::ApiError;
use crate::common::upload::stream_to_disk;
use crate::modules::video::dto::*;
use crate::modules::video::repository::VideoRepository;
use crate::modules::video::service::VideoService;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

/// Upload an MP3 file
/// The body is streamed straight to local storage, then a metadata row is created.
#[utoipa::path(
    post,
    path = "/videos",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Video Created", body = UploadVideoResponse),
        (status = 400, description = "Missing or non-MP3 file"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Videos"
)]
pub async fn upload_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            let file_name = field.file_name().unwrap_or("").to_string();

            if !VideoService::is_mp3(&file_name) {
                return ApiError(
                    "Invalid input type, please upload a MP3.".to_string(),
                    StatusCode::BAD_REQUEST,
                )
                .into_response();
            }

            let stored_name = VideoService::unique_file_name(&file_name);
            let dest = state.storage.path_for(&stored_name);
            info!("Starting upload: {} -> {}", file_name, dest.display());

            if let Err(e) = stream_to_disk(&dest, field).await {
                return ApiError(
                    format!("Upload failed: {}", e),
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
                .into_response();
            }

            let path = dest.to_string_lossy().to_string();

            return match VideoService::create_video(state.clone(), &file_name, &path).await {
                Ok(video) => {
                    (StatusCode::CREATED, Json(UploadVideoResponse { video })).into_response()
                }
                Err(e) => {
                    ApiError(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response()
                }
            };
        }
    }

    ApiError("Missing file input".to_string(), StatusCode::BAD_REQUEST).into_response()
}

/// Transcribe an uploaded file
/// Streams the stored audio to the speech-to-text API and saves the text.
#[utoipa::path(
    post,
    path = "/videos/{id}/transcription",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    request_body = CreateTranscriptionRequest,
    responses(
        (status = 200, description = "Transcription created", body = TranscriptionResponse),
        (status = 404, description = "Video not found"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Videos"
)]
pub async fn create_transcription(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateTranscriptionRequest>,
) -> impl IntoResponse {
    let video = match VideoRepository::get_by_id(&state.db, id).await {
        Ok(Some(v)) => v,
        Ok(None) => {
            return ApiError("Video not found".to_string(), StatusCode::NOT_FOUND).into_response();
        }
        Err(e) => {
            return ApiError(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response();
        }
    };

    info!("Transcribing video {}: {}", id, video.name);

    match VideoService::transcribe_video(state, video, req.prompt.as_deref()).await {
        Ok(text) => Json(TranscriptionResponse {
            transcription: text,
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Transcription of {} failed: {}", id, e);
            ApiError(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response()
        }
    }
}
