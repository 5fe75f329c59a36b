use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: String,
    pub key: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

impl ApiKey {
    /// New active key with a generated `vd_` credential.
    pub fn generate(name: String) -> Self {
        let key = format!("vd_{}", Uuid::new_v4().simple());
        Self::with_key(key, name)
    }

    pub fn with_key(key: String, name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            key,
            name,
            is_active: true,
            created_at: Utc::now(),
            last_used_at: None,
        }
    }
}
