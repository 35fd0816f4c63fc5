use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error("quote request timed out after {0:?}")]
    FetchTimeout(std::time::Duration),
    #[error("quote request failed: {0}")]
    FetchTransport(String),
    #[error("unexpected quote payload: {0}")]
    Decode(String),
    #[error("saving quote timed out after {0:?}")]
    PersistTimeout(std::time::Duration),
    #[error("saving quote failed: {0}")]
    PersistWrite(String),
    #[error("could not open quote file: {0}")]
    FileOpen(std::io::Error),
    #[error("could not write quote file: {0}")]
    FileWrite(std::io::Error),
}

pub type Result<T> = core::result::Result<T, AppError>;

impl From<sqlx::Error> for AppError {
    fn from(value: sqlx::Error) -> Self {
        Self::PersistWrite(value.to_string())
    }
}
impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(value: sqlx::migrate::MigrateError) -> Self {
        Self::PersistWrite(value.to_string())
    }
}
impl From<serde_yaml::Error> for AppError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Config(value.to_string())
    }
}
