use clipscribe::app;
use clipscribe::config::settings::AppConfig;
use clipscribe::infrastructure::db::pool::connect_to_db;
use clipscribe::infrastructure::llm::openai::OpenAiClient;
use clipscribe::infrastructure::storage::local::LocalStorage;
use clipscribe::state::AppState;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting server...");

    let config = AppConfig::new()?;
    let db = connect_to_db(&config.database_url).await?;
    let storage = LocalStorage::new(config.upload_dir.as_str()).await?;
    let llm = OpenAiClient::new(&config);

    let state = AppState::new(config.clone(), db, storage, llm);
    let app = app::create_app(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
