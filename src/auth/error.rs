use std::fmt::Display;

#[derive(Debug)]
pub enum AuthError {
    MissingApiKey,
    InvalidApiKey,
    StorageError(String),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(error: anyhow::Error) -> Self {
        AuthError::StorageError(error.to_string())
    }
}
