mod quote;
pub use quote::*;

use crate::config::PipelineConfig;
use crate::quote_service::QuoteFetcher;
use crate::storage::{QuoteFile, QuoteStorage};

/// Общие данные для обработчиков
#[derive(Clone)]
pub struct AppState {
    pub fetcher: QuoteFetcher,
    pub storage: QuoteStorage,
    pub quote_file: QuoteFile,
    pub pipeline: PipelineConfig,
}
impl AppState {
    /// Создать новый экземпляр общих данных
    pub fn new(
        fetcher: QuoteFetcher,
        storage: QuoteStorage,
        quote_file: QuoteFile,
        pipeline: PipelineConfig,
    ) -> Self {
        Self {
            fetcher,
            storage,
            quote_file,
            pipeline,
        }
    }
}
