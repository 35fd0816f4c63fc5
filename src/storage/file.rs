use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::{models::Quote, AppError};

/// Текстовый файл с последней котировкой. Каждая запись полностью заменяет содержимое;
/// при параллельных запросах побеждает последний писатель
#[derive(Clone, Debug)]
pub struct QuoteFile {
    path: PathBuf,
}
impl QuoteFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    pub async fn save(&self, quote: &Quote) -> crate::Result<()> {
        let mut file = tokio::fs::File::create(&self.path)
            .await
            .map_err(AppError::FileOpen)?;
        file.write_all(line(quote).as_bytes())
            .await
            .map_err(AppError::FileWrite)?;
        file.flush().await.map_err(AppError::FileWrite)?;
        tracing::info!("Котировка записана в {}", self.path.display());
        Ok(())
    }
}

fn line(quote: &Quote) -> String {
    format!("Dólar: {}\n", quote.bid)
}
