use futures_util::{Stream, StreamExt};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::pin::Pin;
use tokio_util::io::ReaderStream;

use crate::config::settings::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("AI request failed: {0}")]
    Request(String),

    #[error("AI provider rate limited the request")]
    RateLimited,

    #[error("unexpected AI response: {0}")]
    InvalidResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Lazy, finite sequence of completion text chunks. Produced once per
/// request and consumed exactly once by the transport layer.
pub type TokenStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send>>;

#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
    chat_model: String,
    whisper_model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    temperature: f32,
    stream: bool,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct CompletionChunk {
    choices: Vec<ChunkChoice>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    delta: ChunkDelta,
}

#[derive(Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl OpenAiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            api_key: config.openai_api_key.clone(),
            chat_model: config.chat_model.clone(),
            whisper_model: config.whisper_model.clone(),
        }
    }

    /// Streaming chat completion: one user-role message, fixed model, caller
    /// temperature. Returns the token stream as the provider emits it.
    pub async fn chat_stream(
        &self,
        prompt: &str,
        temperature: f32,
    ) -> Result<TokenStream, LlmError> {
        let request_body = ChatCompletionRequest {
            model: self.chat_model.clone(),
            temperature,
            stream: true,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        let response = Self::check_status(response).await?;

        let mut events = SseBuffer::new();
        let stream = response.bytes_stream().flat_map(move |chunk| {
            let items: Vec<Result<String, LlmError>> = match chunk {
                Ok(bytes) => events
                    .push(&bytes)
                    .iter()
                    .filter(|data| data.as_str() != "[DONE]")
                    .filter_map(|data| delta_content(data))
                    .map(Ok)
                    .collect(),
                Err(e) => vec![Err(LlmError::Request(e.to_string()))],
            };
            futures_util::stream::iter(items)
        });

        Ok(Box::pin(stream))
    }

    /// Speech-to-text over the stored audio file. The file is streamed to the
    /// provider, never buffered whole.
    pub async fn transcribe(
        &self,
        audio_path: &Path,
        file_name: &str,
        language: &str,
        prompt: Option<&str>,
    ) -> Result<String, LlmError> {
        let file = tokio::fs::File::open(audio_path).await?;
        let mime = mime_guess::from_path(file_name).first_or_octet_stream();

        let part = Part::stream(reqwest::Body::wrap_stream(ReaderStream::new(file)))
            .file_name(file_name.to_string())
            .mime_str(mime.as_ref())
            .map_err(|e| LlmError::Request(e.to_string()))?;

        let mut form = Form::new()
            .part("file", part)
            .text("model", self.whisper_model.clone())
            .text("language", language.to_string())
            .text("response_format", "json")
            .text("temperature", "0");

        if let Some(prompt) = prompt {
            form = form.text("prompt", prompt.to_string());
        }

        let response = self
            .http
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        let response = Self::check_status(response).await?;

        let transcription: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(transcription.text)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Request(format!("HTTP {}: {}", status, body)));
        }

        Ok(response)
    }
}

/// Reassembles server-sent-event lines from network chunks. An event may be
/// split across chunk boundaries; incomplete lines stay buffered until the
/// terminating newline arrives.
struct SseBuffer {
    pending: String,
}

impl SseBuffer {
    fn new() -> Self {
        Self {
            pending: String::new(),
        }
    }

    /// Feed one network chunk; returns the `data:` payloads of every line
    /// completed by it.
    fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.push_str(&String::from_utf8_lossy(chunk));

        let mut payloads = Vec::new();
        while let Some(newline) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=newline).collect();
            if let Some(data) = line.trim_end().strip_prefix("data: ") {
                payloads.push(data.to_string());
            }
        }
        payloads
    }
}

fn delta_content(data: &str) -> Option<String> {
    let chunk: CompletionChunk = serde_json::from_str(data).ok()?;
    chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_with(content: &str) -> String {
        format!(r#"{{"choices":[{{"delta":{{"content":"{}"}}}}]}}"#, content)
    }

    #[test]
    fn sse_buffer_extracts_data_lines() {
        let mut buf = SseBuffer::new();
        let payloads = buf.push(b"data: one\n\ndata: two\n");
        assert_eq!(payloads, vec!["one", "two"]);
    }

    #[test]
    fn sse_buffer_handles_event_split_across_chunks() {
        let mut buf = SseBuffer::new();
        assert!(buf.push(b"data: hel").is_empty());
        assert_eq!(buf.push(b"lo\n"), vec!["hello"]);
    }

    #[test]
    fn sse_buffer_strips_carriage_returns() {
        let mut buf = SseBuffer::new();
        assert_eq!(buf.push(b"data: token\r\n"), vec!["token"]);
    }

    #[test]
    fn sse_buffer_ignores_non_data_lines() {
        let mut buf = SseBuffer::new();
        assert!(buf.push(b"event: ping\n: comment\n\n").is_empty());
    }

    #[test]
    fn delta_content_reads_first_choice() {
        let data = chunk_with("Hi");
        assert_eq!(delta_content(&data), Some("Hi".to_string()));
    }

    #[test]
    fn delta_content_is_none_for_role_only_delta() {
        let data = r#"{"choices":[{"delta":{"role":"assistant"}}]}"#;
        assert_eq!(delta_content(data), None);
    }

    #[test]
    fn delta_content_is_none_for_done_marker() {
        assert_eq!(delta_content("[DONE]"), None);
    }
}
