use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    DatabaseUrl,
    UploadDir,
    OpenAiApiKey,
    OpenAiBaseUrl,
    OpenAiChatModel,
    OpenAiWhisperModel,
    WhisperLanguage,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::DatabaseUrl => "DATABASE_URL",
            EnvKey::UploadDir => "UPLOAD_DIR",
            EnvKey::OpenAiApiKey => "OPENAI_API_KEY",
            EnvKey::OpenAiBaseUrl => "OPENAI_BASE_URL",
            EnvKey::OpenAiChatModel => "OPENAI_CHAT_MODEL",
            EnvKey::OpenAiWhisperModel => "OPENAI_WHISPER_MODEL",
            EnvKey::WhisperLanguage => "WHISPER_LANGUAGE",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
