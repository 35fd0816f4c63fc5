use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::{models::Quote, AppError};

/// Журнал котировок в SQLite: только вставки, без обновлений и удалений
#[derive(Clone)]
pub struct QuoteStorage {
    pool: SqlitePool,
    timeout: Duration,
}
impl QuoteStorage {
    /// Открывает (или создает) базу и применяет миграции
    pub async fn new(path: &str, timeout: Duration) -> crate::Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        sqlx::migrate!().run(&pool).await?;
        Ok(Self { pool, timeout })
    }
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
    /// Сохраняет котировку новой строкой. Одинаковые котировки не схлопываются.
    /// Вставка идет в транзакции: если таймаут истек, транзакция откатывается,
    /// а не фиксируется воркером SQLite в фоне
    pub async fn save(&self, quote: &Quote) -> crate::Result<u64> {
        let query = "INSERT INTO quotes(id, code, codein, name, high, low, var_bid, pct_change, bid, ask, timestamp, create_date, fetched_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)";
        let insert = async {
            let mut tx = self.pool.begin().await?;
            let rows_affected = sqlx::query(query)
                .bind(uuid::Uuid::new_v4().to_string())
                .bind(&quote.code)
                .bind(&quote.codein)
                .bind(&quote.name)
                .bind(&quote.high)
                .bind(&quote.low)
                .bind(&quote.var_bid)
                .bind(&quote.pct_change)
                .bind(&quote.bid)
                .bind(&quote.ask)
                .bind(&quote.timestamp)
                .bind(&quote.create_date)
                .bind(chrono::Utc::now())
                .execute(&mut *tx)
                .await?
                .rows_affected();
            Ok::<_, sqlx::Error>((tx, rows_affected))
        };
        let (tx, rows_affected) = match tokio::time::timeout(self.timeout, insert).await {
            Ok(result) => result?,
            // транзакция уже сброшена вместе с future, откат встанет в очередь после вставки
            Err(_) => return Err(AppError::PersistTimeout(self.timeout)),
        };
        tx.commit().await?;
        tracing::info!("Котировка сохранена в базе данных");
        Ok(rows_affected)
    }
    pub async fn count(&self) -> crate::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quotes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
