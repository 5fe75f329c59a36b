use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::error::AuthError;
use super::storage::ApiKeyStore;
use super::types::ApiKey;

const STORE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Auth {
    key_store: Arc<dyn ApiKeyStore>,
}

impl Auth {
    pub fn new(key_store: Arc<dyn ApiKeyStore>) -> Self {
        Self { key_store }
    }

    pub fn new_with_memory_storage() -> Self {
        use super::storage::InMemoryApiKeyStore;
        Self {
            key_store: Arc::new(InMemoryApiKeyStore::new()),
        }
    }

    /// Resolves a candidate credential to the matching key id.
    ///
    /// A store failure is reported as `InvalidApiKey` so the caller cannot
    /// probe the difference between a bad key and an unreachable store.
    pub async fn verify_api_key(&self, api_key: Option<&str>) -> Result<String, AuthError> {
        let api_key = match api_key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(AuthError::MissingApiKey),
        };

        let key_info = match timeout(STORE_TIMEOUT, self.key_store.find_active(api_key)).await {
            Ok(Ok(info)) => info,
            Ok(Err(e)) => {
                warn!("API key lookup failed: {}", e);
                return Err(AuthError::InvalidApiKey);
            }
            Err(_) => {
                warn!("API key lookup timed out");
                return Err(AuthError::InvalidApiKey);
            }
        };

        let key_info = key_info.ok_or(AuthError::InvalidApiKey)?;

        // best-effort, must never fail the request
        if let Err(e) = self.key_store.touch_last_used(&key_info.id, Utc::now()).await {
            warn!("Failed to update last_used_at for key {}: {}", key_info.id, e);
        }

        debug!("API key '{}' validated", key_info.name);
        Ok(key_info.id)
    }

    pub async fn create_api_key(&self, name: String) -> Result<ApiKey, AuthError> {
        let key = ApiKey::generate(name);
        self.key_store.insert(&key).await?;
        Ok(key)
    }

    pub async fn revoke_api_key(&self, id: &str) -> Result<(), AuthError> {
        self.key_store.set_active(id, false).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::storage::InMemoryApiKeyStore;

    fn setup_test_auth() -> (Auth, Arc<InMemoryApiKeyStore>) {
        let store = Arc::new(InMemoryApiKeyStore::new());
        (Auth::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_api_key_basic_lifecycle() {
        let (auth, _store) = setup_test_auth();

        let key_info = auth.create_api_key("Test Key".to_string()).await.unwrap();

        assert_eq!(key_info.name, "Test Key");
        assert!(key_info.key.starts_with("vd_"));
        assert!(key_info.is_active);
        assert!(key_info.last_used_at.is_none());

        let id = auth.verify_api_key(Some(&key_info.key)).await.unwrap();
        assert_eq!(id, key_info.id);

        auth.revoke_api_key(&key_info.id).await.unwrap();
        assert!(matches!(
            auth.verify_api_key(Some(&key_info.key)).await,
            Err(AuthError::InvalidApiKey)
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let (auth, _store) = setup_test_auth();

        assert!(matches!(
            auth.verify_api_key(None).await,
            Err(AuthError::MissingApiKey)
        ));
        assert!(matches!(
            auth.verify_api_key(Some("")).await,
            Err(AuthError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn test_unknown_api_key() {
        let (auth, _store) = setup_test_auth();

        assert!(matches!(
            auth.verify_api_key(Some("vd_does_not_exist")).await,
            Err(AuthError::InvalidApiKey)
        ));
    }

    #[tokio::test]
    async fn test_last_used_is_touched() {
        let (auth, store) = setup_test_auth();

        let key_info = auth.create_api_key("Touched Key".to_string()).await.unwrap();
        auth.verify_api_key(Some(&key_info.key)).await.unwrap();

        let stored = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .find(|k| k.id == key_info.id)
            .unwrap();
        assert!(stored.last_used_at.is_some());
    }

    #[tokio::test]
    async fn test_no_partial_match() {
        let (auth, _store) = setup_test_auth();

        let key_info = auth.create_api_key("Prefix Key".to_string()).await.unwrap();
        let prefix = &key_info.key[..key_info.key.len() - 2];

        assert!(matches!(
            auth.verify_api_key(Some(prefix)).await,
            Err(AuthError::InvalidApiKey)
        ));
    }
}
