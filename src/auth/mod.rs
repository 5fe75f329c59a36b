pub mod error;
pub mod storage;
pub mod service;
pub mod types;

pub use error::AuthError;
pub use storage::{ApiKeyStore, InMemoryApiKeyStore};
pub use service::Auth;
pub use types::ApiKey;
