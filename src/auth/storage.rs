use std::sync::RwLock;
use std::collections::HashMap;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::types::ApiKey;

#[async_trait]
pub trait ApiKeyStore: Send + Sync + 'static {
    /// Exact-match lookup; only rows with `is_active = true` are returned.
    async fn find_active(&self, key: &str) -> Result<Option<ApiKey>>;
    async fn insert(&self, api_key: &ApiKey) -> Result<()>;
    async fn touch_last_used(&self, id: &str, at: DateTime<Utc>) -> Result<()>;
    async fn set_active(&self, id: &str, active: bool) -> Result<()>;
    async fn list(&self) -> Result<Vec<ApiKey>>;
}

pub struct InMemoryApiKeyStore {
    keys: RwLock<HashMap<String, ApiKey>>,
}

impl InMemoryApiKeyStore {
    pub fn new() -> Self {
        Self {
            keys: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryApiKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiKeyStore for InMemoryApiKeyStore {
    async fn find_active(&self, key: &str) -> Result<Option<ApiKey>> {
        let keys = self.keys.read().map_err(|e| anyhow::anyhow!(e.to_string()))?;
        Ok(keys.values().find(|k| k.key == key && k.is_active).cloned())
    }

    async fn insert(&self, api_key: &ApiKey) -> Result<()> {
        let mut keys = self.keys.write().map_err(|e| anyhow::anyhow!(e.to_string()))?;
        keys.insert(api_key.id.clone(), api_key.clone());
        Ok(())
    }

    async fn touch_last_used(&self, id: &str, at: DateTime<Utc>) -> Result<()> {
        let mut keys = self.keys.write().map_err(|e| anyhow::anyhow!(e.to_string()))?;
        match keys.get_mut(id) {
            Some(info) => {
                info.last_used_at = Some(at);
                Ok(())
            }
            None => Err(anyhow::anyhow!("API key not found")),
        }
    }

    async fn set_active(&self, id: &str, active: bool) -> Result<()> {
        let mut keys = self.keys.write().map_err(|e| anyhow::anyhow!(e.to_string()))?;
        match keys.get_mut(id) {
            Some(info) => {
                info.is_active = active;
                Ok(())
            }
            None => Err(anyhow::anyhow!("API key not found")),
        }
    }

    async fn list(&self) -> Result<Vec<ApiKey>> {
        let keys = self.keys.read().map_err(|e| anyhow::anyhow!(e.to_string()))?;
        Ok(keys.values().cloned().collect())
    }
}
