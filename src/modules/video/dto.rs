use super::model::Video;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadVideoResponse {
    pub video: Video,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTranscriptionRequest {
    /// Optional keyword hints passed through to the speech recognizer.
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TranscriptionResponse {
    pub transcription: String,
}
