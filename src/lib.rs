mod error;
pub use error::{AppError, Result};
pub mod config;
pub mod models;
pub mod quote_service;
pub mod routes;
pub mod storage;

use config::AppConfig;
use models::AppState;
use quote_service::QuoteFetcher;
use storage::{QuoteFile, QuoteStorage};

/// Собирает общее состояние: клиент провайдера, базу и файл котировок
pub async fn build_state(config: &AppConfig) -> Result<AppState> {
    let pipeline = config.pipeline.clone();
    let fetcher = QuoteFetcher::new(&config.api.dolar_price, pipeline.fetch_timeout())?;
    let storage = QuoteStorage::new(&config.storage.database, pipeline.persist_timeout()).await?;
    let quote_file = QuoteFile::new(&config.storage.quote_file);
    Ok(AppState::new(fetcher, storage, quote_file, pipeline))
}

/// Роутер приложения, готовый к запуску
pub async fn app(config: &AppConfig) -> Result<axum::Router> {
    let state = build_state(config).await?;
    let request_timeout = std::time::Duration::from_secs(config.server.request_timeout_secs);
    Ok(routes::init(state, request_timeout))
}
