//! Client-side submission pipeline: convert a selected video to MP3, upload
//! it, and request a transcription, surfacing each stage as it is entered.

use tokio::sync::OnceCell;

pub mod client;
pub mod runner;
pub mod stage;
pub mod transcoder;

pub use runner::run;
pub use stage::Stage;

use client::ApiClient;
use transcoder::{TranscodeError, Transcoder};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("conversion failed: {0}")]
    Transcode(#[from] TranscodeError),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid API base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("API error ({status}): {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },
}

/// Session-scoped context shared by every submission: the backend client and
/// the lazily created transcoding engine.
pub struct Context {
    transcoder: OnceCell<Transcoder>,
    api: ApiClient,
}

impl Context {
    pub fn new(api_base_url: &str) -> Result<Self, Error> {
        Ok(Self {
            transcoder: OnceCell::new(),
            api: ApiClient::new(api_base_url)?,
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The shared engine, probed at most once per session. Concurrent first
    /// callers wait on the same initialization instead of racing.
    pub async fn transcoder(&self) -> Result<&Transcoder, TranscodeError> {
        self.transcoder.get_or_try_init(Transcoder::probe).await
    }
}
