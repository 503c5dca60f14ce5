use super::{Context, Error, Stage};
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// Drive one submission through the stage sequence.
///
/// Each stage begins only after the previous stage's operation resolved; on
/// the first failure the error is returned without advancing, so the last
/// stage handed to `on_stage` is the last one that was entered successfully.
/// No selected file is a silent no-op.
pub async fn run(
    ctx: &Context,
    input: Option<&Path>,
    prompt: Option<&str>,
    mut on_stage: impl FnMut(Stage),
) -> Result<Option<Uuid>, Error> {
    let Some(input) = input else {
        return Ok(None);
    };

    on_stage(Stage::Waiting);

    on_stage(Stage::Converting);
    let transcoder = ctx.transcoder().await?;
    let audio = transcoder.extract_audio(input).await?;

    on_stage(Stage::Uploading);
    let file_name = audio_file_name(input);
    let video = ctx.api().upload_audio(&file_name, audio).await?;

    on_stage(Stage::Generating);
    ctx.api().request_transcription(video.id, prompt).await?;

    on_stage(Stage::Success);
    info!("Submission finished for video {}", video.id);

    Ok(Some(video.id))
}

fn audio_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    format!("{}.mp3", stem)
}
