//! MySQL-backed record store.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

use crate::config::DatabaseConfig;
use crate::store::{Record, RecordStore, StoreError, StoreResult};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS data_table (
    id INT AUTO_INCREMENT PRIMARY KEY,
    data VARCHAR(255),
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
)";

const INSERT_RECORD: &str = "INSERT INTO data_table (data) VALUES (?)";

const SELECT_NEWEST_FIRST: &str = "SELECT id, data, created_at FROM data_table ORDER BY id DESC";

/// SQLSTATE for "base table or view not found" (MySQL error 1146).
const TABLE_NOT_FOUND: &str = "42S02";

/// Store backed by a bounded MySQL connection pool.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Build the pool without connecting; the first query opens a connection.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy_with(options);

        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            max_connections = config.max_connections,
            "MySQL pool configured"
        );

        Self { pool }
    }

    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_missing_table(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(TABLE_NOT_FOUND),
        _ => false,
    }
}

#[async_trait]
impl RecordStore for MySqlStore {
    async fn ensure_table(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, data: &str) -> StoreResult<i64> {
        // DDL commits implicitly in MySQL, so it runs outside the transaction.
        self.ensure_table().await?;

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(INSERT_RECORD)
            .bind(data)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        i64::try_from(result.last_insert_id())
            .map_err(|_| StoreError::Query("insert id out of range".to_string()))
    }

    async fn list_newest_first(&self) -> StoreResult<Vec<Record>> {
        match sqlx::query_as::<_, Record>(SELECT_NEWEST_FIRST)
            .fetch_all(&self.pool)
            .await
        {
            Ok(rows) => Ok(rows),
            Err(e) if is_missing_table(&e) => {
                tracing::debug!("data_table does not exist yet, returning no rows");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
