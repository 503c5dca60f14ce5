use super::Error;
use crate::common::response::ErrorBody;
use crate::modules::video::dto::{TranscriptionResponse, UploadVideoResponse};
use crate::modules::video::model::Video;
use bytes::Bytes;
use futures_util::Stream;
use reqwest::multipart::{Form, Part};
use url::Url;
use uuid::Uuid;

/// HTTP client for the backend, used by the submission pipeline.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    /// Upload converted audio as the multipart `file` part. Returns the
    /// created video record.
    pub async fn upload_audio(&self, file_name: &str, audio: Vec<u8>) -> Result<Video, Error> {
        let part = Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("audio/mpeg")?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(self.base_url.join("/videos")?)
            .multipart(form)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let body: UploadVideoResponse = response.json().await?;
        Ok(body.video)
    }

    pub async fn request_transcription(
        &self,
        id: Uuid,
        prompt: Option<&str>,
    ) -> Result<String, Error> {
        let response = self
            .http
            .post(
                self.base_url
                    .join(&format!("/videos/{}/transcription", id))?,
            )
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let body: TranscriptionResponse = response.json().await?;
        Ok(body.transcription)
    }

    /// Request a streamed completion; yields the chunked text as it arrives.
    pub async fn generate(
        &self,
        id: Uuid,
        prompt: &str,
        temperature: f32,
    ) -> Result<impl Stream<Item = Result<Bytes, reqwest::Error>>, Error> {
        let response = self
            .http
            .post(self.base_url.join("/ai/generate")?)
            .json(&serde_json::json!({
                "videoId": id,
                "prompt": prompt,
                "temperature": temperature,
            }))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        Ok(response.bytes_stream())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };

        Err(Error::Api { status, message })
    }
}
