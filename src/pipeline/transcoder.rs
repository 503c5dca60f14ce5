use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::info;
use uuid::Uuid;

/// Fixed output bitrate. Transcripts need intelligible speech, not fidelity,
/// and the upload limit favors small files.
const AUDIO_BITRATE: &str = "20k";
const AUDIO_CODEC: &str = "libmp3lame";

#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("ffmpeg is not available: {0}")]
    EngineUnavailable(String),

    #[error("ffmpeg exited with {status}: {stderr}")]
    CommandFailed {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Wraps the external ffmpeg engine for video-to-audio conversion.
pub struct Transcoder {
    ffmpeg: PathBuf,
}

impl Transcoder {
    /// Locate and verify the engine. Run once per session; the handle is
    /// shared by all subsequent conversions.
    pub async fn probe() -> Result<Self, TranscodeError> {
        let ffmpeg = PathBuf::from("ffmpeg");

        let output = Command::new(&ffmpeg)
            .arg("-version")
            .output()
            .await
            .map_err(|e| TranscodeError::EngineUnavailable(e.to_string()))?;

        if !output.status.success() {
            return Err(TranscodeError::EngineUnavailable(format!(
                "ffmpeg -version exited with {}",
                output.status
            )));
        }

        info!("✅ ffmpeg engine ready");

        Ok(Self { ffmpeg })
    }

    /// Select the audio stream of `input` and re-encode it as a compact MP3.
    /// No partial output is returned on failure.
    pub async fn extract_audio(&self, input: &Path) -> Result<Vec<u8>, TranscodeError> {
        // Unique per conversion, so concurrent conversions cannot collide.
        let output_path = std::env::temp_dir().join(format!("clipscribe-{}.mp3", Uuid::new_v4()));

        let result = Command::new(&self.ffmpeg)
            .args(encode_args(input, &output_path))
            .output()
            .await?;

        if !result.status.success() {
            let _ = tokio::fs::remove_file(&output_path).await;
            return Err(TranscodeError::CommandFailed {
                status: result.status,
                stderr: stderr_tail(&result.stderr),
            });
        }

        let audio = tokio::fs::read(&output_path).await?;
        let _ = tokio::fs::remove_file(&output_path).await;

        Ok(audio)
    }
}

fn encode_args(input: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-i".into(),
        input.into(),
        "-map".into(),
        "0:a".into(),
        "-b:a".into(),
        AUDIO_BITRATE.into(),
        "-acodec".into(),
        AUDIO_CODEC.into(),
        "-y".into(),
        output.into(),
    ]
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let mut lines: Vec<&str> = text.lines().rev().take(4).collect();
    lines.reverse();
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_args_select_audio_stream_only() {
        let args = encode_args(Path::new("input.mp4"), Path::new("out.mp3"));
        let args: Vec<&OsString> = args.iter().collect();

        let map_pos = args.iter().position(|a| *a == "-map").unwrap();
        assert_eq!(args[map_pos + 1], "0:a");
    }

    #[test]
    fn encode_args_use_fixed_bitrate_and_codec() {
        let args = encode_args(Path::new("input.mp4"), Path::new("out.mp3"));

        let bitrate_pos = args.iter().position(|a| a == "-b:a").unwrap();
        assert_eq!(args[bitrate_pos + 1], "20k");

        let codec_pos = args.iter().position(|a| a == "-acodec").unwrap();
        assert_eq!(args[codec_pos + 1], "libmp3lame");
    }

    #[test]
    fn encode_args_start_with_input_and_end_with_output() {
        let args = encode_args(Path::new("clip.mp4"), Path::new("/tmp/out.mp3"));
        assert_eq!(args[0], "-i");
        assert_eq!(args[1], "clip.mp4");
        assert_eq!(args.last().unwrap(), "/tmp/out.mp3");
    }

    #[test]
    fn stderr_tail_keeps_the_last_lines() {
        let stderr = b"line 1\nline 2\nline 3\nline 4\nline 5\n";
        assert_eq!(stderr_tail(stderr), "line 2\nline 3\nline 4\nline 5");
    }
}
