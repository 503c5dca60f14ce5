use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::video::handler::upload_video,
        crate::modules::video::handler::create_transcription,
        crate::modules::ai::handler::generate_completion,
    ),
    components(
        schemas(
            crate::modules::video::model::Video,
            crate::modules::video::dto::UploadVideoResponse,
            crate::modules::video::dto::CreateTranscriptionRequest,
            crate::modules::video::dto::TranscriptionResponse,
            crate::modules::ai::dto::GenerateCompletionRequest,
            crate::common::response::ErrorBody,
        )
    ),
    tags(
        (name = "Videos", description = "Audio upload and transcription"),
        (name = "AI", description = "Completion generation")
    )
)]
pub struct ApiDoc;
