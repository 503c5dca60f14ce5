use crate::config::settings::AppConfig;
use crate::infrastructure::db::pool::DbPool;
use crate::infrastructure::llm::openai::OpenAiClient;
use crate::infrastructure::storage::local::LocalStorage;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DbPool,
    pub storage: LocalStorage,
    pub llm: OpenAiClient,
}

impl AppState {
    pub fn new(config: AppConfig, db: DbPool, storage: LocalStorage, llm: OpenAiClient) -> Self {
        Self {
            config,
            db,
            storage,
            llm,
        }
    }
}
