use std::{path::Path, time::Duration};

use serde::Deserialize;
use tracing::debug;

use crate::{AppError, Result};

/// Где сервис ищет конфигурацию по умолчанию
pub const DEFAULT_CONFIG_PATH: &str = "config/application-local.yaml";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApiConfig {
    pub dolar_price: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ServerConfig {
    pub address: String,
    pub request_timeout_secs: u64,
}
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: String::from("0.0.0.0:8080"),
            request_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StorageConfig {
    pub database: String,
    pub quote_file: String,
}
impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: String::from("dolar-price.db"),
            quote_file: String::from("cotacao.txt"),
        }
    }
}

/// Таймауты и поведение цепочки "получить → база → файл".
///
/// По умолчанию `respond_on_persist_failure = true`: после успешного получения котировки
/// тело `{"price": ...}` отдается всегда, даже если сохранение не удалось. Это отход от
/// старого поведения, где ошибка сохранения обрывала обработчик и клиент получал 200
/// с пустым телом; `false` возвращает старое поведение. Статус 200 в обоих случаях.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PipelineConfig {
    pub fetch_timeout_ms: u64,
    pub persist_timeout_ms: u64,
    /// false: после ошибки сохранения тело ответа не пишется (200 с пустым телом)
    pub respond_on_persist_failure: bool,
}
impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: 200,
            persist_timeout_ms: 10,
            respond_on_persist_failure: true,
        }
    }
}
impl PipelineConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
    pub fn persist_timeout(&self) -> Duration {
        Duration::from_millis(self.persist_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}
impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
        }
    }
}
impl LogConfig {
    /// Неизвестный уровень превращается в INFO
    pub fn level(&self) -> tracing::Level {
        self.level.parse().unwrap_or(tracing::Level::INFO)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Читаю конфигурацию из {}", path.display());
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_yaml(&raw)?;
        debug!("Конфигурация прочитана");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(raw)?;
        if config.api.dolar_price.trim().is_empty() {
            return Err(AppError::Config(String::from("api.dolar-price is empty")));
        }
        Ok(config)
    }
}
