use anyhow::Context;
use cotacao::config::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Не удалось загрузить конфигурацию")?;
    tracing_subscriber::fmt()
        .with_max_level(config.log.level())
        .init();
    info!("Конфигурация загружена, провайдер: {}", config.api.dolar_price);
    info!("Инициализирую базу данных {}", config.storage.database);
    let app = cotacao::app(&config)
        .await
        .context("Не удалось инициализировать сервис")?;
    info!("База данных готова к использованию");
    let listener = tokio::net::TcpListener::bind(&config.server.address)
        .await
        .with_context(|| format!("Не удалось занять адрес {}", config.server.address))?;
    info!("Слушаю {}", config.server.address);
    axum::serve(listener, app).await?;
    Ok(())
}
