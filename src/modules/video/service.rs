use super::model::Video;
use super::repository::VideoRepository;
use crate::state::AppState;
use anyhow::Result;
use std::path::Path;
use uuid::Uuid;

pub struct VideoService;

impl VideoService {
    /// Uploads must be MP3 audio. The check is on the literal extension, so
    /// `.MP3` and friends are rejected along with everything else.
    pub fn is_mp3(file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e == "mp3")
            .unwrap_or(false)
    }

    /// Collision-resistant stored name: a random identifier appended to the
    /// original base name, extension preserved.
    pub fn unique_file_name(original: &str) -> String {
        let path = Path::new(original);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("upload");
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();

        format!("{}-{}{}", stem, Uuid::new_v4(), extension)
    }

    pub async fn create_video(state: AppState, name: &str, path: &str) -> Result<Video> {
        VideoRepository::create(&state.db, name, path).await
    }

    /// Run speech-to-text over the stored file and persist the result.
    pub async fn transcribe_video(
        state: AppState,
        video: Video,
        prompt: Option<&str>,
    ) -> Result<String> {
        let text = state
            .llm
            .transcribe(
                Path::new(&video.path),
                &video.name,
                &state.config.whisper_language,
                prompt,
            )
            .await?;

        VideoRepository::set_transcription(&state.db, video.id, &text).await?;

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- is_mp3 ---

    #[test]
    fn accepts_mp3_extension() {
        assert!(VideoService::is_mp3("podcast.mp3"));
    }

    #[test]
    fn rejects_other_extensions() {
        assert!(!VideoService::is_mp3("clip.wav"));
        assert!(!VideoService::is_mp3("clip.mp4"));
    }

    #[test]
    fn rejects_uppercase_extension() {
        assert!(!VideoService::is_mp3("clip.MP3"));
    }

    #[test]
    fn rejects_missing_extension() {
        assert!(!VideoService::is_mp3("clip"));
        assert!(!VideoService::is_mp3(".mp3"));
    }

    // ---- unique_file_name ---

    #[test]
    fn unique_name_keeps_stem_and_extension() {
        let name = VideoService::unique_file_name("talk.mp3");
        assert!(name.starts_with("talk-"));
        assert!(name.ends_with(".mp3"));
    }

    #[test]
    fn unique_name_embeds_a_valid_identifier() {
        let name = VideoService::unique_file_name("talk.mp3");
        let suffix = name
            .strip_prefix("talk-")
            .and_then(|rest| rest.strip_suffix(".mp3"))
            .unwrap();
        assert!(Uuid::parse_str(suffix).is_ok());
    }

    #[test]
    fn same_base_name_twice_yields_distinct_names() {
        let first = VideoService::unique_file_name("talk.mp3");
        let second = VideoService::unique_file_name("talk.mp3");
        assert_ne!(first, second);
    }
}
