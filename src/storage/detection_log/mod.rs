use std::sync::Mutex;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::detect::types::Classification;

pub mod sqlite;


/// One detection decision. Append-only; rows are never mutated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectionLog {
    pub id: String,
    pub api_key_id: String,
    pub language: String,
    pub result: Classification,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

impl DetectionLog {
    pub fn new(
        api_key_id: String,
        language: &str,
        result: Classification,
        confidence: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            api_key_id,
            language: language.to_string(),
            result,
            confidence,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait DetectionLogStore: Send + Sync + 'static {
    async fn append(&self, log: &DetectionLog) -> Result<()>;
    /// Newest first. Read side of the contract, consumed by the external
    /// dashboard collaborator.
    async fn list_recent(&self, limit: usize) -> Result<Vec<DetectionLog>>;
}

pub struct InMemoryDetectionLogStore {
    logs: Mutex<Vec<DetectionLog>>,
}

impl InMemoryDetectionLogStore {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryDetectionLogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DetectionLogStore for InMemoryDetectionLogStore {
    async fn append(&self, log: &DetectionLog) -> Result<()> {
        let mut logs = self.logs.lock().map_err(|e| anyhow::anyhow!(e.to_string()))?;
        logs.push(log.clone());
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<DetectionLog>> {
        let logs = self.logs.lock().map_err(|e| anyhow::anyhow!(e.to_string()))?;
        Ok(logs.iter().rev().take(limit).cloned().collect())
    }
}
