use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::auth::storage::ApiKeyStore;
use crate::auth::types::ApiKey;

pub struct SqliteApiKeyStore {
    pool: SqlitePool,
}

impl SqliteApiKeyStore {
    pub async fn new(database_url: &str) -> Result<Self> {
        info!("Initializing SQLite api key store at {}", database_url);
        let pool = SqlitePool::connect(database_url).await?;

        // 创建 api_keys 表
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS api_keys (
                id TEXT PRIMARY KEY,
                key TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                last_used_at TEXT
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    fn row_to_key(&self, row: sqlx::sqlite::SqliteRow) -> Result<ApiKey> {
        Ok(ApiKey {
            id: row.get("id"),
            key: row.get("key"),
            name: row.get("name"),
            is_active: row.get::<i64, _>("is_active") != 0,
            created_at: DateTime::parse_from_rfc3339(row.get("created_at"))?.with_timezone(&Utc),
            last_used_at: row
                .get::<Option<String>, _>("last_used_at")
                .map(|t| DateTime::parse_from_rfc3339(&t))
                .transpose()?
                .map(|t| t.with_timezone(&Utc)),
        })
    }
}

#[async_trait]
impl ApiKeyStore for SqliteApiKeyStore {
    async fn find_active(&self, key: &str) -> Result<Option<ApiKey>> {
        let row = sqlx::query("SELECT * FROM api_keys WHERE key = ? AND is_active = 1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(match row {
            Some(row) => Some(self.row_to_key(row)?),
            None => None,
        })
    }

    async fn insert(&self, api_key: &ApiKey) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO api_keys (id, key, name, is_active, created_at, last_used_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&api_key.id)
        .bind(&api_key.key)
        .bind(&api_key.name)
        .bind(api_key.is_active as i64)
        .bind(api_key.created_at.to_rfc3339())
        .bind(api_key.last_used_at.map(|t| t.to_rfc3339()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn touch_last_used(&self, id: &str, at: DateTime<Utc>) -> Result<()> {
        sqlx::query("UPDATE api_keys SET last_used_at = ? WHERE id = ?")
            .bind(at.to_rfc3339())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn set_active(&self, id: &str, active: bool) -> Result<()> {
        sqlx::query("UPDATE api_keys SET is_active = ? WHERE id = ?")
            .bind(active as i64)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<ApiKey>> {
        let rows = sqlx::query("SELECT * FROM api_keys ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await?;

        let mut keys = Vec::new();
        for row in rows {
            keys.push(self.row_to_key(row)?);
        }
        Ok(keys)
    }
}
