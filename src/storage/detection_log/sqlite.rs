use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::info;

use super::{DetectionLog, DetectionLogStore};
use crate::detect::types::Classification;

pub struct SqliteDetectionLogStore {
    pool: SqlitePool,
}

impl SqliteDetectionLogStore {
    pub async fn new(database_url: &str) -> Result<Self> {
        info!("Initializing SQLite detection log store at {}", database_url);
        let pool = SqlitePool::connect(database_url).await?;

        // 创建 detection_logs 表
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS detection_logs (
                id TEXT PRIMARY KEY,
                api_key_id TEXT NOT NULL,
                language TEXT NOT NULL,
                result TEXT NOT NULL,
                confidence REAL NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    fn row_to_log(&self, row: sqlx::sqlite::SqliteRow) -> Result<DetectionLog> {
        let result: String = row.get("result");
        let result = Classification::parse(&result)
            .ok_or_else(|| anyhow::anyhow!("Unknown classification: {}", result))?;

        Ok(DetectionLog {
            id: row.get("id"),
            api_key_id: row.get("api_key_id"),
            language: row.get("language"),
            result,
            confidence: row.get("confidence"),
            created_at: DateTime::parse_from_rfc3339(row.get("created_at"))?.with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl DetectionLogStore for SqliteDetectionLogStore {
    async fn append(&self, log: &DetectionLog) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO detection_logs (id, api_key_id, language, result, confidence, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&log.id)
        .bind(&log.api_key_id)
        .bind(&log.language)
        .bind(log.result.as_str())
        .bind(log.confidence)
        .bind(log.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<DetectionLog>> {
        let rows = sqlx::query(
            "SELECT * FROM detection_logs ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut logs = Vec::new();
        for row in rows {
            logs.push(self.row_to_log(row)?);
        }
        Ok(logs)
    }
}
