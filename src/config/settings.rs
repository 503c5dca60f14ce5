use crate::config::env::{self, EnvKey};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub upload_dir: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub chat_model: String,
    pub whisper_model: String,
    pub whisper_language: String,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3333),
            database_url: env::get_or(EnvKey::DatabaseUrl, "sqlite:clipscribe.db?mode=rwc"),
            upload_dir: env::get_or(EnvKey::UploadDir, "./tmp"),
            openai_api_key: env::get(EnvKey::OpenAiApiKey)?,
            openai_base_url: env::get_or(EnvKey::OpenAiBaseUrl, "https://api.openai.com/v1"),
            chat_model: env::get_or(EnvKey::OpenAiChatModel, "gpt-3.5-turbo-16k"),
            whisper_model: env::get_or(EnvKey::OpenAiWhisperModel, "whisper-1"),
            whisper_language: env::get_or(EnvKey::WhisperLanguage, "pt"),
        })
    }
}
